//! Solver parameters
//!
//! Sizes are fixed by the challenge format: a 16-byte problem, a 16-digit
//! nonce, and the problem repeated on both sides of the nonce.

/// Problem length in bytes
pub const PROBLEM_LEN: usize = 16;

/// Encoded candidate (and solution) length in bytes
pub const SOLUTION_LEN: usize = 16;

/// Message length: problem || candidate || problem
pub const MESSAGE_LEN: usize = PROBLEM_LEN + SOLUTION_LEN + PROBLEM_LEN;

/// Offset of the candidate field inside the message
pub const CANDIDATE_OFFSET: usize = PROBLEM_LEN;

/// Exclusive upper bound of the counter space (10^13)
///
/// Leaves three digits of headroom in the 16-character field.
pub const MAX_COUNTER: u64 = 10_000_000_000_000;

/// Highest meaningful difficulty: only the first 32 digest bits are tested
pub const MAX_DIFFICULTY: u32 = 32;

/// SHA-1 output size
pub const DIGEST_SIZE: usize = 20;

/// How many candidates a worker hashes between deadline checks
pub const DEADLINE_CHECK_INTERVAL: u64 = 4096;

/// A challenge problem, used verbatim
pub type Problem = [u8; PROBLEM_LEN];
