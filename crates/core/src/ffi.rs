//! C FFI bindings
//!
//! All buffers are fixed-size: `problem` and `solution` point at 16 bytes.
//! Nothing is NUL-terminated or written on failure.

use core::slice;

use crate::digest::meets_mask;
use crate::params::{PROBLEM_LEN, Problem, SOLUTION_LEN};
use crate::parallel::solve_parallel;
use crate::search::solve;
use crate::solution::Solution;

/// Read a 16-byte problem from a raw pointer
///
/// # Safety
/// `problem` must be non-null and valid for 16 bytes of reads.
unsafe fn read_problem(problem: *const u8) -> Problem {
    let mut out = [0u8; PROBLEM_LEN];
    out.copy_from_slice(unsafe { slice::from_raw_parts(problem, PROBLEM_LEN) });
    out
}

/// Copy `found` to `solution`. Returns `false` if there is nothing to copy.
///
/// # Safety
/// `solution` must be non-null and valid for 16 bytes of writes.
unsafe fn write_solution(found: Option<Solution>, solution: *mut u8) -> bool {
    match found {
        Some(found) => {
            let out = unsafe { slice::from_raw_parts_mut(solution, SOLUTION_LEN) };
            out.copy_from_slice(found.as_bytes());
            true
        }
        None => false,
    }
}

/// Sequential solve
/// - problem: pointer to 16 problem bytes
/// - mask: acceptance mask derived from the difficulty
/// - solution: pointer to a 16-byte output buffer
///
/// Returns `true` and fills `solution` on success, `false` if the counter
/// space was exhausted or a pointer was null.
#[unsafe(no_mangle)]
pub extern "C" fn powsolve_solve(problem: *const u8, mask: u32, solution: *mut u8) -> bool {
    if problem.is_null() || solution.is_null() {
        return false;
    }

    unsafe {
        let problem = read_problem(problem);
        write_solution(solve(&problem, mask), solution)
    }
}

/// Parallel solve, one worker per CPU. Same contract as `powsolve_solve`,
/// except that any accepted solution may be returned.
#[unsafe(no_mangle)]
pub extern "C" fn powsolve_solve_parallel(
    problem: *const u8,
    mask: u32,
    solution: *mut u8,
) -> bool {
    if problem.is_null() || solution.is_null() {
        return false;
    }

    unsafe {
        let problem = read_problem(problem);
        write_solution(solve_parallel(&problem, mask), solution)
    }
}

/// Check a 16-byte candidate against `mask`
#[unsafe(no_mangle)]
pub extern "C" fn powsolve_verify(problem: *const u8, candidate: *const u8, mask: u32) -> bool {
    if problem.is_null() || candidate.is_null() {
        return false;
    }

    unsafe {
        let problem = read_problem(problem);
        let mut bytes = [0u8; SOLUTION_LEN];
        bytes.copy_from_slice(slice::from_raw_parts(candidate, SOLUTION_LEN));
        meets_mask(&problem, &bytes, mask)
    }
}
