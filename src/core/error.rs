use thiserror::Error;

use crate::core::game::Side;

/// Bad guess input. Recovered locally and shown on the status line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty input")]
    Empty,
    #[error("Please enter a valid number.")]
    NotANumber { input: String },
    #[error("Please enter a number between {min} - {max}.")]
    OutOfRange { value: i64, min: i64, max: i64 },
}

impl ValidationError {
    /// Empty submissions are dropped without telling the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, ValidationError::Empty)
    }
}

/// A guess arrived from a side that may not guess right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnViolation {
    #[error("no game is active")]
    Inactive,
    #[error("it is the {expected}'s turn, not the {attempted}'s")]
    WrongSide { expected: Side, attempted: Side },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Turn(#[from] TurnViolation),
}
