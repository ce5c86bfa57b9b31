pub mod core;
pub mod engine;
pub mod games;

pub mod cli;
pub mod logging;

// Re-export for convenience
pub use crate::core::config::{ConfigError, GameConfig};
pub use crate::core::error::{GuessError, TurnViolation, ValidationError};
pub use crate::core::game::{GameEvent, GameObserver, GameResult, GameState, GuessOutcome, Hint, Side};
pub use crate::games::rand_num::{GuessingGameEngine, StrategyKind};
