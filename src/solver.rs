//! Run a validated challenge through the core search

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::algorithm::{hashrate, leading_zero_bits, Message, Outcome, Search, MAX_COUNTER};
use crate::challenge::Challenge;
use crate::config::{Mode, SolverConfig};

/// Fixed problem hashed by [`benchmark`]
pub const BENCHMARK_PROBLEM: &[u8; 16] = b"benchmarkproblem";

/// Mask counted as a hit by [`benchmark`] (difficulty 16)
pub const BENCHMARK_MASK: u32 = 0xFFFF_0000;

/// How a solve attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Found,
    Exhausted,
    TimedOut,
}

/// Everything known about one solve attempt
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub problem: String,
    pub difficulty: u32,
    /// Acceptance mask as `0x`-prefixed hex
    pub mask: String,
    pub mode: Mode,
    pub threads: usize,
    pub status: Status,
    pub solution: Option<String>,
    /// Leading zero bits actually achieved by the solution
    pub zero_bits: Option<u32>,
    pub hashes: u64,
    pub elapsed_ms: u64,
    pub hashrate: f64,
}

/// Solve `challenge` according to `config`, blocking until done.
///
/// Sequential mode is a single worker scanning counters in order, so it
/// reports the lowest accepted nonce.
pub fn solve_challenge(challenge: &Challenge, config: &SolverConfig) -> SolveReport {
    let problem = challenge.problem();
    let mask = challenge.mask();

    let mut search = Search::new(problem, mask)
        .threads(config.worker_threads())
        .limit(config.limit);
    if let Some(timeout) = config.timeout() {
        search = search.deadline(timeout);
    }

    debug!(
        problem = %problem.escape_ascii(),
        difficulty = challenge.difficulty().bits(),
        mode = ?config.mode,
        "solving challenge"
    );

    let report = search.run();

    let (status, solution) = match report.outcome {
        Outcome::Found(solution) => (Status::Found, Some(solution)),
        Outcome::Exhausted => (Status::Exhausted, None),
        Outcome::TimedOut => (Status::TimedOut, None),
    };

    match status {
        Status::Found => info!(
            hashes = report.hashes,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "solution found"
        ),
        Status::Exhausted => warn!(limit = config.limit, "counter space exhausted"),
        Status::TimedOut => warn!(timeout_secs = ?config.timeout_secs, "search timed out"),
    }

    SolveReport {
        problem: problem.escape_ascii().to_string(),
        difficulty: challenge.difficulty().bits(),
        mask: format!("{:#010x}", mask),
        mode: config.mode,
        threads: report.threads,
        status,
        solution: solution.map(|s| s.to_string()),
        zero_bits: solution.map(|s| leading_zero_bits(problem, s.as_bytes())),
        hashes: report.hashes,
        elapsed_ms: report.elapsed.as_millis() as u64,
        hashrate: report.hashrate(),
    }
}

/// Result of a single-thread throughput run
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Candidates actually hashed
    pub hashes: u64,
    /// Candidates meeting [`BENCHMARK_MASK`]
    pub accepted: u64,
    pub elapsed: Duration,
}

impl BenchmarkReport {
    pub fn hashrate(&self) -> f64 {
        hashrate(self.hashes, self.elapsed)
    }
}

/// Hash the first `count` candidates of [`BENCHMARK_PROBLEM`] on this thread.
///
/// `count` is clamped to the nonce space.
pub fn benchmark(count: u64) -> BenchmarkReport {
    let hashes = count.min(MAX_COUNTER);
    let mut message = Message::new(BENCHMARK_PROBLEM);
    let mut accepted = 0;

    let start = Instant::now();
    for counter in 0..hashes {
        message.load(counter);
        if message.accepts(BENCHMARK_MASK) {
            accepted += 1;
        }
    }
    let elapsed = start.elapsed();

    debug!(hashes, accepted, ?elapsed, "benchmark finished");

    BenchmarkReport {
        hashes,
        accepted,
        elapsed,
    }
}
