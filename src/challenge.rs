//! Challenge input validation
//!
//! The core assumes well-formed input. Everything a caller types in goes
//! through here first: the problem must be exactly 16 bytes and the
//! difficulty must lie in `0..=32`.

use thiserror::Error;

use crate::algorithm::{Problem, MAX_DIFFICULTY};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    #[error("Problem string must be exactly 16 bytes long (got {len})")]
    InvalidProblemLength { len: usize },

    #[error("Difficulty must be between 0 and 32 (got {value})")]
    DifficultyOutOfRange { value: i64 },
}

/// Number of leading zero bits a solution's digest must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(u32);

impl Difficulty {
    pub fn new(value: i64) -> Result<Self, ChallengeError> {
        u32::try_from(value)
            .ok()
            .filter(|&bits| bits <= MAX_DIFFICULTY)
            .map(Self)
            .ok_or(ChallengeError::DifficultyOutOfRange { value })
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Acceptance mask for this difficulty
    pub fn mask(self) -> u32 {
        mask_for_difficulty(self.0)
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = ChallengeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Mask with the `difficulty` most significant bits set.
///
/// Anything at or above 32 saturates to `0xFFFF_FFFF`.
///
/// ```rust
/// use powsolve::mask_for_difficulty;
///
/// assert_eq!(mask_for_difficulty(0), 0x0000_0000);
/// assert_eq!(mask_for_difficulty(8), 0xFF00_0000);
/// assert_eq!(mask_for_difficulty(32), 0xFFFF_FFFF);
/// assert_eq!(mask_for_difficulty(40), 0xFFFF_FFFF);
/// ```
pub fn mask_for_difficulty(difficulty: u32) -> u32 {
    if difficulty >= MAX_DIFFICULTY {
        u32::MAX
    } else {
        // difficulty 0 shifts by 32, which checked_shl turns into 0
        u32::MAX.checked_shl(MAX_DIFFICULTY - difficulty).unwrap_or(0)
    }
}

/// A validated problem and difficulty pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    problem: Problem,
    difficulty: Difficulty,
}

impl Challenge {
    pub fn new(problem: Problem, difficulty: Difficulty) -> Self {
        Self {
            problem,
            difficulty,
        }
    }

    /// Validate raw caller input
    pub fn parse(problem: &str, difficulty: i64) -> Result<Self, ChallengeError> {
        let problem: Problem = problem
            .as_bytes()
            .try_into()
            .map_err(|_| ChallengeError::InvalidProblemLength {
                len: problem.len(),
            })?;
        let difficulty = Difficulty::new(difficulty)?;

        Ok(Self::new(problem, difficulty))
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mask(&self) -> u32 {
        self.difficulty.mask()
    }
}
