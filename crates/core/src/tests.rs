//! Tests for the powsolve core

use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::time::Duration;

use proptest::prelude::*;

use crate::ffi::{powsolve_solve, powsolve_solve_parallel, powsolve_verify};
use crate::parallel::{SolutionSlot, total_hashes};
use crate::*;

const PROBLEM: &Problem = b"abcdefghijklmnop";

/// Mask with `difficulty` high bits set
fn mask(difficulty: u32) -> u32 {
    match difficulty {
        0 => 0,
        d if d >= 32 => u32::MAX,
        d => u32::MAX << (32 - d),
    }
}

fn encoded(counter: u64) -> [u8; SOLUTION_LEN] {
    let mut out = [0u8; SOLUTION_LEN];
    encode_counter(counter, &mut out);
    out
}

#[test]
fn test_encode_zero() {
    assert_eq!(&encoded(0), b"0000000000000000");
}

#[test]
fn test_encode_pads_left() {
    assert_eq!(&encoded(7), b"0000000000000007");
    assert_eq!(&encoded(42), b"0000000000000042");
    assert_eq!(&encoded(1_234_567_890), b"0000001234567890");
}

#[test]
fn test_encode_upper_bounds() {
    assert_eq!(&encoded(MAX_COUNTER - 1), b"0009999999999999");
    assert_eq!(&encoded(9_999_999_999_999_999), b"9999999999999999");
}

#[test]
fn test_encode_clears_stale_digits() {
    // A long encoding followed by a short one in the same buffer must not
    // leave the old high-order digits behind.
    let mut buf = [0u8; SOLUTION_LEN];
    encode_counter(9_876_543_210_987, &mut buf);
    assert_eq!(&buf, b"0009876543210987");

    encode_counter(5, &mut buf);
    assert_eq!(&buf, b"0000000000000005");

    encode_counter(0, &mut buf);
    assert_eq!(&buf, b"0000000000000000");
}

#[test]
fn test_message_reuse_clears_stale_digits() {
    let mut message = Message::new(PROBLEM);
    message.load(1_000_000);
    message.load(3);
    assert_eq!(
        message.as_bytes(),
        b"abcdefghijklmnop0000000000000003abcdefghijklmnop"
    );
}

#[test]
fn test_decode_candidate() {
    assert_eq!(decode_candidate(b"0000000000000000"), Some(0));
    assert_eq!(decode_candidate(b"0000000000017405"), Some(17_405));
    assert_eq!(decode_candidate(b"9999999999999999"), Some(9_999_999_999_999_999));
    assert_eq!(decode_candidate(b"00000000000001a5"), None);
    assert_eq!(decode_candidate(b"               1"), None);
}

#[test]
fn test_message_layout() {
    let mut message = Message::new(PROBLEM);
    assert_eq!(
        message.as_bytes(),
        b"abcdefghijklmnop0000000000000000abcdefghijklmnop"
    );

    message.load(42);
    assert_eq!(
        message.as_bytes(),
        b"abcdefghijklmnop0000000000000042abcdefghijklmnop"
    );
    assert_eq!(message.solution().to_string(), "0000000000000042");
}

#[test]
fn test_digest_vectors() {
    let mut message = Message::new(PROBLEM);
    assert_eq!(
        hex::encode(message.digest()),
        "293682ce48a45c662ff59ad93969c366a62f9622"
    );
    assert_eq!(message.leading_word(), 0x2936_82ce);

    message.load(42);
    assert_eq!(
        hex::encode(message.digest()),
        "27552e00bb87b851854eadba6b448ada58050d47"
    );
}

#[test]
fn test_mask_zero_accepts_everything() {
    for counter in [0, 1, 42, 9_999, MAX_COUNTER - 1] {
        assert!(meets_mask(PROBLEM, &encoded(counter), 0));
    }
}

#[test]
fn test_meets_mask_matches_leading_zero_bits() {
    for counter in 0..512 {
        let candidate = encoded(counter);
        let zeros = leading_zero_bits(PROBLEM, &candidate);
        for difficulty in 0..=MAX_DIFFICULTY {
            assert_eq!(
                meets_mask(PROBLEM, &candidate, mask(difficulty)),
                zeros >= difficulty,
                "counter {} difficulty {}",
                counter,
                difficulty
            );
        }
    }
}

#[test]
fn test_leading_zero_bits_known() {
    assert_eq!(leading_zero_bits(PROBLEM, b"0000000000000000"), 2);
    assert_eq!(leading_zero_bits(PROBLEM, b"0000000000000163"), 9);
    assert_eq!(leading_zero_bits(PROBLEM, b"0000000000000385"), 14);
    assert_eq!(leading_zero_bits(PROBLEM, b"0000000000017405"), 17);
}

#[test]
fn test_difficulty_zero_end_to_end() {
    let sequential = solve(PROBLEM, 0).unwrap();
    assert_eq!(sequential.to_string(), "0000000000000000");

    // One worker scans in order, so it must also land on the zero nonce.
    let single = Search::new(PROBLEM, 0).threads(1).run();
    assert_eq!(single.outcome, Outcome::Found(Solution::from_counter(0)));

    // With several workers each one's first candidate is accepted; any of
    // them may win the race.
    let report = Search::new(PROBLEM, 0).threads(8).run();
    let counter = report.outcome.solution().and_then(|s| s.counter()).unwrap();
    assert!(counter < 8, "counter {} is not a first candidate", counter);

    let parallel = solve_parallel(PROBLEM, 0).unwrap();
    assert!(meets_mask(PROBLEM, parallel.as_bytes(), 0));
}

#[test]
fn test_sequential_returns_lowest_counter() {
    let expected = [(1, 0), (4, 11), (8, 163), (12, 385), (16, 17_405)];
    for (difficulty, counter) in expected {
        let solution = solve(PROBLEM, mask(difficulty)).unwrap();
        assert_eq!(solution.counter(), Some(counter), "difficulty {}", difficulty);
    }

    let other: &Problem = b"0123456789ABCDEF";
    assert_eq!(solve(other, mask(8)).unwrap().counter(), Some(111));
    assert_eq!(solve(other, mask(16)).unwrap().counter(), Some(13_558));
}

#[test]
fn test_sequential_is_deterministic() {
    let first = solve(PROBLEM, mask(12)).unwrap();
    for _ in 0..5 {
        assert_eq!(solve(PROBLEM, mask(12)).unwrap(), first);
    }
}

#[test]
fn test_parallel_solution_verifies() {
    for difficulty in [1, 4, 8, 12, 16] {
        let solution = solve_parallel(PROBLEM, mask(difficulty)).unwrap();
        assert!(
            meets_mask(PROBLEM, solution.as_bytes(), mask(difficulty)),
            "difficulty {}: {} does not verify",
            difficulty,
            solution
        );
        assert!(leading_zero_bits(PROBLEM, solution.as_bytes()) >= difficulty);
    }
}

#[test]
fn test_parallel_with_various_thread_counts() {
    for threads in [1, 2, 3, 7, 16] {
        let report = Search::new(PROBLEM, mask(12)).threads(threads).run();
        assert_eq!(report.threads, threads);
        let solution = report.outcome.solution().unwrap();
        assert!(meets_mask(PROBLEM, solution.as_bytes(), mask(12)));
    }
}

#[test]
fn test_single_worker_matches_sequential_order() {
    let report = Search::new(PROBLEM, mask(12)).threads(1).run();
    assert_eq!(report.outcome, Outcome::Found(Solution::from_counter(385)));
    assert_eq!(report.hashes, 386);
}

#[test]
fn test_zero_threads_means_one() {
    let report = Search::new(PROBLEM, 0).threads(0).run();
    assert_eq!(report.threads, 1);
    assert_eq!(report.hashes, 1);
}

#[test]
fn test_exhaustion_is_explicit() {
    // No counter below 1000 hashes to 32 leading zero bits for this problem.
    assert_eq!(solve_bounded(PROBLEM, u32::MAX, 1000), None);

    let report = Search::new(PROBLEM, u32::MAX).threads(4).limit(1000).run();
    assert_eq!(report.outcome, Outcome::Exhausted);
    assert_eq!(report.hashes, 1000);
}

#[test]
fn test_zero_limit_is_exhausted_immediately() {
    assert_eq!(solve_bounded(PROBLEM, 0, 0), None);

    let report = Search::new(PROBLEM, 0).threads(3).limit(0).run();
    assert_eq!(report.outcome, Outcome::Exhausted);
    assert_eq!(report.hashes, 0);
}

#[test]
fn test_all_zero_solution_distinct_from_not_found() {
    let found = Search::new(PROBLEM, 0).threads(1).run().outcome;
    assert_eq!(found, Outcome::Found(Solution::from_counter(0)));

    let missing = Search::new(PROBLEM, u32::MAX).threads(2).limit(10).run().outcome;
    assert_eq!(missing.solution(), None);
}

#[test]
fn test_zero_deadline_times_out() {
    let report = Search::new(PROBLEM, u32::MAX)
        .threads(2)
        .deadline(Duration::ZERO)
        .run();
    assert_eq!(report.outcome, Outcome::TimedOut);
    assert_eq!(report.hashes, 0);
}

#[test]
fn test_generous_deadline_still_finds() {
    let report = Search::new(PROBLEM, mask(8))
        .threads(2)
        .deadline(Duration::from_secs(600))
        .run();
    assert!(matches!(report.outcome, Outcome::Found(_)));
}

#[test]
fn test_stride_partition_covers_space() {
    let limit = 103;
    for workers in 1..=12 {
        let mut seen = BTreeSet::new();
        let mut total = 0;
        for worker in 0..workers {
            for counter in stride(worker, workers, limit) {
                assert_eq!(counter as usize % workers, worker);
                seen.insert(counter);
                total += 1;
            }
        }
        assert_eq!(total, limit as usize, "duplicates with {} workers", workers);
        assert_eq!(seen, (0..limit).collect::<BTreeSet<_>>());
    }
}

#[test]
fn test_stride_more_workers_than_counters() {
    assert_eq!(stride(2, 8, 5).collect::<Vec<_>>(), vec![2]);
    assert_eq!(stride(6, 8, 5).count(), 0);
}

#[test]
fn test_solution_slot_single_thread() {
    let slot = SolutionSlot::new();
    assert!(!slot.is_claimed());
    assert!(slot.claim(Solution::from_counter(7)));
    assert!(slot.is_claimed());
    assert!(!slot.claim(Solution::from_counter(8)));
    assert_eq!(slot.into_inner(), Some(Solution::from_counter(7)));
}

#[test]
fn test_solution_slot_exactly_once_under_contention() {
    const CONTENDERS: usize = 16;

    for _ in 0..50 {
        let slot = Arc::new(SolutionSlot::new());
        let barrier = Arc::new(Barrier::new(CONTENDERS));

        let handles: Vec<_> = (0..CONTENDERS)
            .map(|i| {
                let slot = Arc::clone(&slot);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    let candidate = Solution::from_counter(1_111_111_111_111 * (i as u64 % 9 + 1));
                    barrier.wait();
                    slot.claim(candidate).then_some(candidate)
                })
            })
            .collect();

        let winners: Vec<Solution> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(winners.len(), 1, "exactly one claim must win");
        let slot = Arc::try_unwrap(slot).ok().unwrap();
        assert_eq!(slot.into_inner(), Some(winners[0]));
    }
}

#[test]
fn test_total_hashes_sums_workers() {
    assert_eq!(total_hashes([Ok(3), Ok(4), Ok(0)]), 7);
    assert_eq!(total_hashes(Vec::new()), 0);
}

#[test]
#[should_panic(expected = "worker failed")]
fn test_total_hashes_reraises_worker_panic() {
    let worker = std::thread::spawn(|| -> u64 { panic!("worker failed") });
    total_hashes([Ok(10), worker.join()]);
}

#[test]
fn test_hashrate_guards_zero_elapsed() {
    assert_eq!(hashrate(0, Duration::ZERO), 0.0);
    assert_eq!(hashrate(1_000, Duration::ZERO), 0.0);
    assert_eq!(hashrate(1_000, Duration::from_millis(500)), 2_000.0);
}

#[test]
fn test_default_threads_match_available() {
    let report = Search::new(PROBLEM, mask(1)).run();
    assert_eq!(report.threads, available_threads());
    assert!(available_threads() >= 1);
}

#[test]
fn test_solution_display_and_counter() {
    let solution = Solution::from_counter(17_405);
    assert_eq!(solution.to_string(), "0000000000017405");
    assert_eq!(solution.counter(), Some(17_405));
    assert_eq!(<[u8; SOLUTION_LEN]>::from(solution), *b"0000000000017405");

    let raw = Solution::from_bytes(*b"00000000000000\n!");
    assert_eq!(raw.counter(), None);
    assert_eq!(raw.to_string(), "00000000000000\\n!");
}

#[test]
fn test_ffi_solve_and_verify() {
    let mut out = [0u8; SOLUTION_LEN];
    assert!(powsolve_solve(PROBLEM.as_ptr(), mask(12), out.as_mut_ptr()));
    assert_eq!(&out, b"0000000000000385");
    assert!(powsolve_verify(PROBLEM.as_ptr(), out.as_ptr(), mask(12)));
    assert!(!powsolve_verify(PROBLEM.as_ptr(), b"0000000000000384".as_ptr(), mask(12)));

    let mut out = [0u8; SOLUTION_LEN];
    assert!(powsolve_solve_parallel(PROBLEM.as_ptr(), mask(8), out.as_mut_ptr()));
    assert!(meets_mask(PROBLEM, &out, mask(8)));
}

#[test]
fn test_ffi_null_pointers() {
    let mut out = [0u8; SOLUTION_LEN];
    assert!(!powsolve_solve(std::ptr::null(), 0, out.as_mut_ptr()));
    assert!(!powsolve_solve_parallel(PROBLEM.as_ptr(), 0, std::ptr::null_mut()));
    assert!(!powsolve_verify(PROBLEM.as_ptr(), std::ptr::null(), 0));
    assert_eq!(out, [0u8; SOLUTION_LEN]);
}

proptest! {
    #[test]
    fn prop_encoding_is_canonical_decimal(counter in 0..MAX_COUNTER) {
        let out = encoded(counter);
        prop_assert_eq!(std::str::from_utf8(&out).unwrap(), format!("{:016}", counter));
        prop_assert_eq!(decode_candidate(&out), Some(counter));
    }

    #[test]
    fn prop_encoding_after_larger_counter(large in 0..MAX_COUNTER, small in 0u64..100_000) {
        let mut buf = encoded(large);
        encode_counter(small, &mut buf);
        prop_assert_eq!(buf, encoded(small));
    }

    #[test]
    fn prop_strides_partition_range(workers in 1usize..64, limit in 0u64..2_000) {
        let mut all: Vec<u64> = (0..workers)
            .flat_map(|worker| stride(worker, workers, limit))
            .collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..limit).collect::<Vec<_>>());
    }
}
