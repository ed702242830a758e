//! Candidate encoding
//!
//! Counters are written as 16 ASCII decimal digits, right-justified and
//! zero-padded: `42` becomes `"0000000000000042"`.

use crate::params::SOLUTION_LEN;

/// Write `counter` into `out` as a zero-padded 16-digit decimal string.
///
/// All 16 positions are written on every call, so a buffer that previously
/// held a longer encoding never keeps stale high-order digits.
///
/// Counters of `10^16` and above do not fit the field; the search space is
/// capped well below that.
#[inline(always)]
pub fn encode_counter(counter: u64, out: &mut [u8; SOLUTION_LEN]) {
    debug_assert!(counter < 10_000_000_000_000_000, "counter overflows field");

    let mut rest = counter;
    for slot in out.iter_mut().rev() {
        *slot = b'0' + (rest % 10) as u8;
        rest /= 10;
    }
}

/// Parse a 16-digit encoding back into its counter.
///
/// Returns `None` if any byte is not an ASCII digit.
pub fn decode_candidate(encoded: &[u8; SOLUTION_LEN]) -> Option<u64> {
    encoded.iter().try_fold(0u64, |acc, &byte| {
        if byte.is_ascii_digit() {
            Some(acc * 10 + u64::from(byte - b'0'))
        } else {
            None
        }
    })
}
