//! # powsolve Core
//!
//! Brute-force solver for a SHA-1 proof-of-work challenge.
//!
//! ## Challenge Format
//!
//! A 16-byte problem and a 32-bit mask. A nonce is a counter in
//! `[0, 10^13)` written as 16 zero-padded decimal digits. The hashed message
//! is:
//!
//! ```text
//! message = problem || nonce || problem
//!           ^^^^^^^    ^^^^^    ^^^^^^^
//!           16 bytes   16 digits 16 bytes
//! ```
//!
//! A nonce is accepted when `u32::from_be_bytes(sha1(message)[0..4]) & mask == 0`.
//! For difficulty `d` the mask has its `d` highest bits set, so acceptance
//! means at least `d` leading zero bits.
//!
//! ## Example
//!
//! ```rust
//! use powsolve_core::{meets_mask, solve, solve_parallel};
//!
//! let problem = b"abcdefghijklmnop";
//! let mask = 0xFF00_0000; // difficulty 8
//!
//! // Lowest accepted nonce, deterministic
//! let first = solve(problem, mask).unwrap();
//! assert!(meets_mask(problem, first.as_bytes(), mask));
//!
//! // Any accepted nonce, found by one worker per CPU
//! let any = solve_parallel(problem, mask).unwrap();
//! assert!(meets_mask(problem, any.as_bytes(), mask));
//! ```
//!
//! ## no_std Support
//!
//! Encoding, evaluation and the sequential solver work without `std`. The
//! parallel search and the C bindings need the `std` feature (on by default).

#![cfg_attr(not(feature = "std"), no_std)]

mod digest;
mod encode;
mod params;
mod search;
mod solution;

#[cfg(feature = "std")]
pub mod ffi;
#[cfg(feature = "std")]
mod parallel;

pub use digest::{Message, leading_zero_bits, meets_mask};
pub use encode::{decode_candidate, encode_counter};
pub use params::*;
pub use search::{solve, solve_bounded, stride};
pub use solution::Solution;

#[cfg(feature = "std")]
pub use parallel::{Outcome, Search, SearchReport, available_threads, hashrate, solve_parallel};

#[cfg(test)]
mod tests;
