use clap::{Args, Parser, Subcommand};
use tracing::debug;

use parsum::{
    evaluate, render_table, run_comparison, ChunkPolicy, EvalConfig, IteratedSqrt,
};

/// Chunked parallel map-reduce evaluator
#[derive(Parser)]
#[command(name = "parsum")]
#[command(about = "Apply a per-element transform over a sequence in parallel chunks and sum the results", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Number of input elements (values are 1..=N)
    #[arg(short = 'n', long, default_value_t = 10_000, global = true)]
    input_size: usize,

    /// Square-root applications per element
    #[arg(short = 'r', long, default_value_t = 100, global = true)]
    reps: u32,

    /// Worker count (default: number of logical CPUs)
    #[arg(short = 'w', long, global = true)]
    workers: Option<usize>,

    /// Maximum chunk size (default: chosen automatically)
    #[arg(short = 'c', long, global = true)]
    chunk_size: Option<usize>,

    /// Print dispatch accounting to stderr
    #[arg(long)]
    stats: bool,

    /// Print the full outcome as JSON to stderr
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the four scheduling scenarios and report timings
    Compare,
}

impl RunArgs {
    fn to_config(&self) -> EvalConfig {
        EvalConfig {
            input_size: self.input_size,
            reps: self.reps,
            workers: self.workers.unwrap_or_else(|| num_cpus::get().max(1)),
            chunking: match self.chunk_size {
                Some(size) => ChunkPolicy::Fixed(size),
                None => ChunkPolicy::Auto,
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.run.to_config();
    config.validate()?;
    let transform = IteratedSqrt::new(config.reps);
    debug!(?config.input_size, ?config.workers, "parsum starting");

    match cli.command {
        Some(Commands::Compare) => {
            let reports = run_comparison(&config, &transform)?;
            print!("{}", render_table(&reports));
        }
        None => {
            let input = config.build_input();
            let outcome = evaluate(&input, &transform, &config)?;

            // stdout carries exactly one line: the final sum.
            println!("{:?}", outcome.sum);

            if cli.run.stats {
                eprintln!("{}", outcome.stats);
            }
            if cli.run.json {
                eprintln!("{}", serde_json::to_string_pretty(&outcome)?);
            }
        }
    }
    Ok(())
}
