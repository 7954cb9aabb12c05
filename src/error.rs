//! Structured error types for evaluation
//!
//! Configuration problems are rejected before any computation starts;
//! transform failures surface the index of the offending element so a
//! failed chunk can never silently drop its contribution.

use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Main error type for map-reduce evaluation
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid configuration: {field} = {value}: {reason}")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    #[error("transform failed at element {index} (value {value}): {reason}")]
    TransformFailed {
        index: usize,
        value: f64,
        reason: String,
    },

    /// A worker thread died without reporting results for every chunk it
    /// pulled off the dispatch queue.
    #[error("{missing} dispatch unit(s) went unreported; a worker thread panicked")]
    WorkerLost { missing: usize },

    /// A scheduling scenario produced a sum outside the documented
    /// reassociation tolerance of the sequential baseline.
    #[error("scenario {scenario} produced sum {sum}, diverging from sequential baseline {baseline}")]
    ScenarioDivergence {
        scenario: String,
        sum: f64,
        baseline: f64,
    },
}

impl EvalError {
    /// Construct an `InvalidConfiguration` error for a named field.
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        EvalError::InvalidConfiguration {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_names_field_and_value() {
        let err = EvalError::invalid_config("workers", 0, "must be at least 1");
        let msg = err.to_string();
        assert!(msg.contains("workers"));
        assert!(msg.contains("0"));
        assert!(msg.contains("must be at least 1"));
    }

    #[test]
    fn transform_failure_names_element_index() {
        let err = EvalError::TransformFailed {
            index: 42,
            value: -1.0,
            reason: "negative input".into(),
        };
        assert!(err.to_string().contains("element 42"));
    }
}
