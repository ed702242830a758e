//! Sequential search and counter partitioning

use core::iter::StepBy;
use core::ops::Range;

use crate::digest::Message;
use crate::params::*;
use crate::solution::Solution;

/// Scan the whole counter space in order and return the first acceptance.
///
/// The result is the lowest accepted counter, so repeated calls with the
/// same inputs always agree. `None` means the space was exhausted.
///
/// # Example
///
/// ```rust
/// use powsolve_core::solve;
///
/// let solution = solve(b"abcdefghijklmnop", 0).unwrap();
/// assert_eq!(solution.to_string(), "0000000000000000");
/// ```
pub fn solve(problem: &Problem, mask: u32) -> Option<Solution> {
    solve_bounded(problem, mask, MAX_COUNTER)
}

/// Scan counters `[0, limit)` in order and return the first acceptance.
///
/// `limit` is clamped to `MAX_COUNTER`.
pub fn solve_bounded(problem: &Problem, mask: u32, limit: u64) -> Option<Solution> {
    let mut message = Message::new(problem);

    for counter in 0..limit.min(MAX_COUNTER) {
        message.load(counter);
        if message.accepts(mask) {
            return Some(message.solution());
        }
    }

    None
}

/// Counters assigned to `worker` out of `workers`: `worker, worker + workers, ...`
///
/// Taken over every `worker in 0..workers`, the strides cover `[0, limit)`
/// exactly once. `workers` must be non-zero.
pub fn stride(worker: usize, workers: usize, limit: u64) -> StepBy<Range<u64>> {
    debug_assert!(workers > 0, "stride needs at least one worker");
    (worker as u64..limit).step_by(workers)
}
