//! powsolve
//!
//! Brute-force solver for 16-byte SHA-1 proof-of-work challenges.
//!
//! # Overview
//!
//! A challenge is a 16-byte problem and a difficulty in `0..=32`. A solution
//! is a 16-digit decimal nonce such that `sha1(problem || nonce || problem)`
//! starts with at least `difficulty` zero bits.
//!
//! This crate is the boundary around the search engine in
//! [`powsolve_core`]: it validates caller input, derives the acceptance
//! mask, loads solver settings and reports results.
//!
//! # Example
//!
//! ```rust
//! use powsolve::{Challenge, SolverConfig, Status, solve_challenge};
//!
//! let challenge = Challenge::parse("abcdefghijklmnop", 8).unwrap();
//! let report = solve_challenge(&challenge, &SolverConfig::default());
//!
//! assert_eq!(report.status, Status::Found);
//! println!("{}", report.solution.unwrap());
//! ```

// Re-export the core algorithm
pub use powsolve_core as algorithm;

// C entry points, exported from the cdylib build of this crate
pub use algorithm::ffi;

pub mod challenge;
pub mod config;
pub mod solver;

// Convenience re-exports
pub use algorithm::{meets_mask, solve, solve_parallel, Solution};
pub use challenge::{mask_for_difficulty, Challenge, ChallengeError, Difficulty};
pub use config::{ConfigError, Mode, SolverConfig};
pub use solver::{solve_challenge, SolveReport, Status};
