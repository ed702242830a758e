//! Solution value

use core::fmt;

use crate::encode::{decode_candidate, encode_counter};
use crate::params::SOLUTION_LEN;

/// The 16-byte candidate encoding that produced an accepted digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Solution([u8; SOLUTION_LEN]);

impl Solution {
    /// Wrap raw solution bytes
    pub const fn from_bytes(bytes: [u8; SOLUTION_LEN]) -> Self {
        Self(bytes)
    }

    /// Encode `counter` as a solution
    pub fn from_counter(counter: u64) -> Self {
        let mut bytes = [b'0'; SOLUTION_LEN];
        encode_counter(counter, &mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SOLUTION_LEN] {
        &self.0
    }

    /// The counter this solution encodes, if it is all digits
    pub fn counter(&self) -> Option<u64> {
        decode_candidate(&self.0)
    }
}

impl From<Solution> for [u8; SOLUTION_LEN] {
    fn from(solution: Solution) -> Self {
        solution.0
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Solution(\"{}\")", self.0.escape_ascii())
    }
}
