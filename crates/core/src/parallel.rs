//! Parallel search
//!
//! Workers are plain OS threads, spawned fresh for every search and joined
//! before it returns. Worker `t` of `T` scans the stride `t, t+T, t+2T, ...`
//! and polls a shared flag before every hash. The first worker to find an
//! accepted candidate wins a compare-and-set on that flag and is the only
//! one allowed to write the solution.
//!
//! Which accepted candidate is returned is not deterministic when several
//! exist (e.g. low difficulty); any returned solution passes `meets_mask`.

use std::panic;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::digest::Message;
use crate::params::*;
use crate::search::stride;
use crate::solution::Solution;

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A worker found an accepted candidate
    Found(Solution),
    /// Every counter below the limit was tried without success
    Exhausted,
    /// The deadline passed before a solution was found
    TimedOut,
}

impl Outcome {
    pub fn solution(&self) -> Option<Solution> {
        match self {
            Outcome::Found(solution) => Some(*solution),
            Outcome::Exhausted | Outcome::TimedOut => None,
        }
    }
}

/// Result of [`Search::run`]
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: Outcome,
    /// Candidates hashed across all workers
    pub hashes: u64,
    /// Workers spawned
    pub threads: usize,
    pub elapsed: Duration,
}

impl SearchReport {
    /// Hashes per second over the whole search
    pub fn hashrate(&self) -> f64 {
        hashrate(self.hashes, self.elapsed)
    }
}

/// `hashes` per second of `elapsed`, 0 when no time was measured
pub fn hashrate(hashes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { hashes as f64 / secs } else { 0.0 }
}

/// Write-once solution slot guarded by a compare-and-set flag
pub(crate) struct SolutionSlot {
    claimed: AtomicBool,
    value: OnceLock<Solution>,
}

impl SolutionSlot {
    pub(crate) fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
            value: OnceLock::new(),
        }
    }

    /// Cheap early-exit check; may lag the winning write briefly
    #[inline(always)]
    pub(crate) fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Relaxed)
    }

    /// Try to become the winner. Only the caller that gets `true` has
    /// written `solution`.
    pub(crate) fn claim(&self, solution: Solution) -> bool {
        if self
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        self.value.set(solution).is_ok()
    }

    pub(crate) fn into_inner(self) -> Option<Solution> {
        self.value.into_inner()
    }
}

/// Configurable search over the counter space
///
/// ```rust
/// use powsolve_core::{Outcome, Search};
///
/// let report = Search::new(b"abcdefghijklmnop", 0).threads(4).run();
/// assert!(matches!(report.outcome, Outcome::Found(_)));
/// ```
#[derive(Debug, Clone)]
pub struct Search {
    problem: Problem,
    mask: u32,
    threads: usize,
    limit: u64,
    deadline: Option<Duration>,
}

impl Search {
    /// Search the full space with one worker per available CPU
    pub fn new(problem: &Problem, mask: u32) -> Self {
        Self {
            problem: *problem,
            mask,
            threads: available_threads(),
            limit: MAX_COUNTER,
            deadline: None,
        }
    }

    /// Number of workers (at least 1). With one worker the scan order is
    /// the sequential order.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Only try counters below `limit` (clamped to `MAX_COUNTER`)
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit.min(MAX_COUNTER);
        self
    }

    /// Give up once `deadline` has elapsed since `run` was called
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Run the search to completion, blocking until every worker has joined
    pub fn run(&self) -> SearchReport {
        let start = Instant::now();
        let expires = self.deadline.and_then(|d| start.checked_add(d));
        let slot = SolutionSlot::new();
        let timed_out = AtomicBool::new(false);

        debug!(
            threads = self.threads,
            mask = format_args!("{:#010x}", self.mask),
            limit = self.limit,
            "search started"
        );

        let hashes = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.threads)
                .map(|worker| {
                    let slot = &slot;
                    let timed_out = &timed_out;
                    scope.spawn(move || self.scan(worker, slot, expires, timed_out))
                })
                .collect();

            total_hashes(handles.into_iter().map(|handle| handle.join()))
        });

        let outcome = match slot.into_inner() {
            Some(solution) => Outcome::Found(solution),
            None if timed_out.load(Ordering::Relaxed) => Outcome::TimedOut,
            None => Outcome::Exhausted,
        };
        let elapsed = start.elapsed();

        debug!(?outcome, hashes, ?elapsed, "search finished");

        SearchReport {
            outcome,
            hashes,
            threads: self.threads,
            elapsed,
        }
    }

    /// One worker's loop. Returns the number of candidates it hashed.
    fn scan(
        &self,
        worker: usize,
        slot: &SolutionSlot,
        expires: Option<Instant>,
        timed_out: &AtomicBool,
    ) -> u64 {
        let mut message = Message::new(&self.problem);
        let mut hashes: u64 = 0;

        for counter in stride(worker, self.threads, self.limit) {
            if slot.is_claimed() {
                break;
            }

            if let Some(expires) = expires {
                if hashes % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= expires {
                    timed_out.store(true, Ordering::Relaxed);
                    break;
                }
            }

            message.load(counter);
            hashes += 1;

            if message.accepts(self.mask) {
                if slot.claim(message.solution()) {
                    debug!(worker, counter, "worker claimed solution");
                } else {
                    trace!(worker, counter, "accepted candidate lost the race");
                }
                break;
            }
        }

        hashes
    }
}

/// Search the full space with one worker per available CPU.
///
/// Returns some accepted solution, not necessarily the lowest one, or
/// `None` if the space was exhausted.
pub fn solve_parallel(problem: &Problem, mask: u32) -> Option<Solution> {
    Search::new(problem, mask).run().outcome.solution()
}

/// Sum the per-worker hash counts.
///
/// A worker that panicked left its stride unscanned, so its panic is
/// re-raised rather than reported as an exhausted search.
pub(crate) fn total_hashes(results: impl IntoIterator<Item = thread::Result<u64>>) -> u64 {
    results
        .into_iter()
        .map(|result| result.unwrap_or_else(|payload| panic::resume_unwind(payload)))
        .sum()
}

/// Logical CPUs, at least 1
pub fn available_threads() -> usize {
    num_cpus::get().max(1)
}
