#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use gpu_harness::{bench_cmd, export_cmd, matrix_cmd, run_cmd};

#[derive(Parser, Debug)]
#[command(name = "gpu-harness")]
#[command(about = "Mock GPU driver harness for CI pipeline validation", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set GPU_HARNESS_LOG)
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Exercise the full driver lifecycle (initialize, allocate, compute, release)
    Run {
        /// Simulated driver version (overrides config and DRIVER_VERSION)
        #[arg(long)]
        driver_version: Option<String>,
        /// Bytes to allocate after initialization
        #[arg(long)]
        allocate: Option<u64>,
        /// Workload size for the compute dispatch
        #[arg(long)]
        workload_size: Option<i64>,
        /// Bytes to release at the end of the scenario
        #[arg(long)]
        release: Option<u64>,
        /// Path to harness-config.toml
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Write machine-readable JSON report to this file
        #[arg(long)]
        json: Option<std::path::PathBuf>,
        /// Append the record to this JSONL file
        #[arg(long)]
        record: Option<std::path::PathBuf>,
    },

    /// Benchmark the simulated compute path
    Bench {
        /// Workload size per iteration
        #[arg(long)]
        size: Option<i64>,
        /// Number of measured iterations to run
        #[arg(long)]
        iterations: Option<usize>,
        /// Number of warmup iterations to run before measuring
        #[arg(long)]
        warmup: Option<usize>,
        /// Path to harness-config.toml
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Write machine-readable JSON report to this file
        #[arg(long)]
        json: Option<std::path::PathBuf>,
        /// Append the record to this JSONL file
        #[arg(long)]
        record: Option<std::path::PathBuf>,
    },

    /// Emit the CI test matrix for the current diff as JSON on stdout
    Matrix {
        /// Base ref the diff is computed against (default HEAD~1)
        #[arg(value_name = "BASE_REF")]
        base_ref: Option<String>,
    },

    /// Export recorded runs from JSONL to CSV
    Export {
        /// Path to the JSONL record file
        #[arg(long)]
        records: std::path::PathBuf,
        /// Write CSV to this file instead of stdout
        #[arg(long)]
        csv: Option<std::path::PathBuf>,
        /// Only export records for this scenario (e.g. "bench")
        #[arg(long)]
        scenario: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("GPU_HARNESS_LOG").unwrap_or_else(|_| {
        if verbose { "gpu_harness=debug".to_string() } else { "gpu_harness=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run { driver_version, allocate, workload_size, release, config, json, record } => {
            run_cmd::run(driver_version, allocate, workload_size, release, config, json, record)
        }
        Commands::Bench { size, iterations, warmup, config, json, record } => {
            bench_cmd::run(size, iterations, warmup, config, json, record)
        }
        Commands::Matrix { base_ref } => matrix_cmd::run(base_ref),
        Commands::Export { records, csv, scenario } => export_cmd::run(records, csv, scenario),
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
