//! powsolve CLI
//!
//! Solve 16-byte SHA-1 proof-of-work challenges from the command line.
//!
//! # Commands
//!
//! - `solve` - Find a nonce for a problem and difficulty
//! - `benchmark` - Measure single-thread hash throughput

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use powsolve::algorithm::{available_threads, MAX_COUNTER, MESSAGE_LEN};
use powsolve::config::default_config_path;
use powsolve::solver::benchmark;
use powsolve::{solve_challenge, Challenge, Mode, SolverConfig, Status};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "powsolve")]
#[command(version)]
#[command(about = "Brute-force proof-of-work solver for 16-byte SHA-1 challenges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Custom config file path (default: ~/.powsolve/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a nonce for a challenge
    Solve {
        /// The 16-character problem string
        problem: String,

        /// Required leading zero bits (0-32)
        #[arg(allow_negative_numbers = true)]
        difficulty: i64,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long, env = "POWSOLVE_THREADS")]
        threads: Option<usize>,

        /// Scan on a single thread and return the lowest accepted nonce
        #[arg(long)]
        sequential: bool,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Only try nonces below this counter
        #[arg(long)]
        limit: Option<u64>,

        /// Print a JSON report instead of the bare solution
        #[arg(long)]
        json: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of hashes to compute
        #[arg(short, long, default_value = "1000000")]
        count: u64,
    },
}

/// Flags that override the config file
struct SolveOverrides {
    threads: Option<usize>,
    sequential: bool,
    timeout: Option<u64>,
    limit: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Solve {
            problem,
            difficulty,
            threads,
            sequential,
            timeout,
            limit,
            json,
        } => {
            let overrides = SolveOverrides {
                threads,
                sequential,
                timeout,
                limit,
            };
            cmd_solve(&problem, difficulty, overrides, json, cli.config)
        }
        Commands::Benchmark { count } => cmd_benchmark(count),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries the solution
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "powsolve=debug,powsolve_core=debug"
    } else {
        "powsolve=warn,powsolve_core=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build solver config from the config file and CLI args
fn build_solver_config(
    config_path: Option<PathBuf>,
    overrides: SolveOverrides,
) -> anyhow::Result<SolverConfig> {
    let mut config = match config_path {
        Some(path) => SolverConfig::load_from_file(&path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading default config");
                SolverConfig::load_from_file(&path)?
            } else {
                SolverConfig::default()
            }
        }
    };

    if overrides.sequential {
        config.mode = Mode::Sequential;
    }
    if let Some(threads) = overrides.threads {
        config.threads = Some(threads);
    }
    if let Some(timeout) = overrides.timeout {
        config.timeout_secs = Some(timeout);
    }
    if let Some(limit) = overrides.limit {
        config.limit = limit;
    }

    config.validate()?;

    Ok(config)
}

fn cmd_solve(
    problem: &str,
    difficulty: i64,
    overrides: SolveOverrides,
    json: bool,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Reject bad input before any config is touched
    let challenge = Challenge::parse(problem, difficulty)?;
    let config = build_solver_config(config_path, overrides)?;

    let report = solve_challenge(&challenge, &config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    match (report.status, report.solution.as_deref()) {
        (Status::Found, Some(solution)) => {
            if !json {
                println!("{}", solution);
            }
            Ok(())
        }
        (Status::TimedOut, _) => anyhow::bail!(
            "No solution found within {}s ({} hashes)",
            config.timeout_secs.unwrap_or_default(),
            report.hashes
        ),
        _ => anyhow::bail!(
            "No solution exists below nonce {} for difficulty {}",
            config.limit.min(MAX_COUNTER),
            report.difficulty
        ),
    }
}

fn cmd_benchmark(count: u64) -> anyhow::Result<()> {
    println!("Running benchmark with {} hashes...", count.min(MAX_COUNTER));

    let report = benchmark(count);

    println!("\nResults:");
    println!("  Total hashes: {}", report.hashes);
    println!("  Time elapsed: {:.2}s", report.elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s (single thread)", report.hashrate());
    println!("  Difficulty-16 hits: {}", report.accepted);

    println!("\nAlgorithm parameters:");
    println!("  Digest: SHA-1, leading 32 bits tested");
    println!("  Message size: {} bytes", MESSAGE_LEN);
    println!("  Nonce space: {}", MAX_COUNTER);
    println!("  CPU cores: {}", available_threads());

    Ok(())
}
