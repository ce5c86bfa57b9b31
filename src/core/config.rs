//! Immutable per-game settings.
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min number ({min}) must be less than max number ({max})")]
    EmptyRange { min: i64, max: i64 },
    #[error("max attempts must be at least 1")]
    NoAttempts,
    #[error("range {min}..={max} is too wide to search")]
    RangeTooWide { min: i64, max: i64 },
}

/// Range and attempt budget for one game. Only constructible through
/// [`GameConfig::new`], so every instance satisfies `min < max` and
/// `max_attempts >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    min_number: i64,
    max_number: i64,
    max_attempts: u32,
}

impl GameConfig {
    pub fn new(min_number: i64, max_number: i64, max_attempts: u32) -> Result<Self, ConfigError> {
        if min_number >= max_number {
            return Err(ConfigError::EmptyRange { min: min_number, max: max_number });
        }
        if max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        // The search window width has to fit in an i64.
        if max_number.checked_sub(min_number).is_none() {
            return Err(ConfigError::RangeTooWide { min: min_number, max: max_number });
        }
        Ok(Self { min_number, max_number, max_attempts })
    }

    pub fn min_number(&self) -> i64 {
        self.min_number
    }

    pub fn max_number(&self) -> i64 {
        self.max_number
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min_number..=self.max_number).contains(&value)
    }

    /// Number of candidate values in the range.
    pub fn width(&self) -> u64 {
        self.max_number.abs_diff(self.min_number) + 1
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { min_number: 1, max_number: 100, max_attempts: 12 }
    }
}
