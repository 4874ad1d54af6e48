//! Patient intake state.

use serde::Serialize;
use std::ops::RangeInclusive;

/// Valid Social Functioning Scale scores.
pub const SFS_RANGE: RangeInclusive<u8> = 0..=150;

/// Valid patient ages.
pub const AGE_RANGE: RangeInclusive<u8> = 18..=100;

pub const DEFAULT_SFS_SCORE: u8 = 100;
pub const DEFAULT_AGE: u8 = 30;

/// Intake form values. Presentation only; the metrics reader never sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntakeState {
    sfs_score: u8,
    age: u8,
}

impl IntakeState {
    /// Create intake state, rejecting out-of-range values.
    pub fn new(sfs_score: u8, age: u8) -> Result<Self, IntakeError> {
        if !SFS_RANGE.contains(&sfs_score) {
            return Err(IntakeError::SfsOutOfRange(sfs_score));
        }
        if !AGE_RANGE.contains(&age) {
            return Err(IntakeError::AgeOutOfRange(age));
        }
        Ok(Self { sfs_score, age })
    }

    pub fn sfs_score(&self) -> u8 {
        self.sfs_score
    }

    pub fn age(&self) -> u8 {
        self.age
    }
}

impl Default for IntakeState {
    fn default() -> Self {
        Self {
            sfs_score: DEFAULT_SFS_SCORE,
            age: DEFAULT_AGE,
        }
    }
}

/// Intake validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    SfsOutOfRange(u8),
    AgeOutOfRange(u8),
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeError::SfsOutOfRange(v) => write!(
                f,
                "SFS score {v} out of range ({}-{})",
                SFS_RANGE.start(),
                SFS_RANGE.end()
            ),
            IntakeError::AgeOutOfRange(v) => write!(
                f,
                "Age {v} out of range ({}-{})",
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ),
        }
    }
}

impl std::error::Error for IntakeError {}
