//! Digest evaluation
//!
//! A candidate is hashed as `problem || candidate || problem` (48 bytes)
//! with SHA-1. Only the first 32 bits of the digest, read big-endian, take
//! part in the acceptance test.

use sha1::{Digest, Sha1};

use crate::encode::encode_counter;
use crate::params::*;
use crate::solution::Solution;

/// Reusable message buffer for one problem
///
/// The two problem copies are written once; every candidate only rewrites
/// the middle 16 bytes. Each worker owns its own `Message`.
#[derive(Clone)]
pub struct Message {
    buf: [u8; MESSAGE_LEN],
}

impl Message {
    /// Prepare a buffer for `problem` with the all-zero candidate loaded
    pub fn new(problem: &Problem) -> Self {
        let mut buf = [b'0'; MESSAGE_LEN];
        buf[..PROBLEM_LEN].copy_from_slice(problem);
        buf[MESSAGE_LEN - PROBLEM_LEN..].copy_from_slice(problem);
        Self { buf }
    }

    /// Load the encoding of `counter` into the candidate field
    #[inline(always)]
    pub fn load(&mut self, counter: u64) {
        let mut encoded = [b'0'; SOLUTION_LEN];
        encode_counter(counter, &mut encoded);
        self.set_candidate(&encoded);
    }

    /// Load a raw 16-byte candidate into the candidate field
    #[inline(always)]
    pub fn set_candidate(&mut self, candidate: &[u8; SOLUTION_LEN]) {
        self.buf[CANDIDATE_OFFSET..CANDIDATE_OFFSET + SOLUTION_LEN].copy_from_slice(candidate);
    }

    /// The candidate currently loaded, as a solution value
    pub fn solution(&self) -> Solution {
        let mut out = [0u8; SOLUTION_LEN];
        out.copy_from_slice(&self.buf[CANDIDATE_OFFSET..CANDIDATE_OFFSET + SOLUTION_LEN]);
        Solution::from_bytes(out)
    }

    /// Full message bytes
    pub fn as_bytes(&self) -> &[u8; MESSAGE_LEN] {
        &self.buf
    }

    /// SHA-1 of the message
    pub fn digest(&self) -> [u8; DIGEST_SIZE] {
        Sha1::digest(self.buf).into()
    }

    /// First 32 bits of the digest, big-endian
    #[inline(always)]
    pub fn leading_word(&self) -> u32 {
        let digest = Sha1::digest(self.buf);
        u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
    }

    /// Whether the loaded candidate passes `mask`
    #[inline(always)]
    pub fn accepts(&self, mask: u32) -> bool {
        self.leading_word() & mask == 0
    }
}

/// Check a single candidate against `mask`
///
/// This is the whole verification side: any solution returned by the
/// sequential or parallel search passes this check.
///
/// # Example
///
/// ```rust
/// use powsolve_core::meets_mask;
///
/// // Difficulty 0: nothing is rejected
/// assert!(meets_mask(b"abcdefghijklmnop", b"0000000000000000", 0));
/// ```
pub fn meets_mask(problem: &Problem, candidate: &[u8; SOLUTION_LEN], mask: u32) -> bool {
    let mut message = Message::new(problem);
    message.set_candidate(candidate);
    message.accepts(mask)
}

/// Number of leading zero bits in the digest of `candidate`, capped at 32
pub fn leading_zero_bits(problem: &Problem, candidate: &[u8; SOLUTION_LEN]) -> u32 {
    let mut message = Message::new(problem);
    message.set_candidate(candidate);
    message.leading_word().leading_zeros()
}
