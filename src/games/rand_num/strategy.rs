//! The computer player's guess generator.
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

use crate::core::config::GameConfig;
use crate::core::game::Hint;
use crate::core::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Halve the remaining window after every hint.
    #[default]
    BinarySearch,
    /// Guess anywhere in the configured range, ignoring hints.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search bounds crossed: low {low} > high {high}")]
    BoundsCrossed { low: i64, high: i64 },
}

/// Candidate window plus every guess the computer has made this game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub low_bound: i64,
    pub high_bound: i64,
    pub guess_history: Vec<i64>,
}

impl SearchState {
    fn full(config: &GameConfig) -> Self {
        Self {
            low_bound: config.min_number(),
            high_bound: config.max_number(),
            guess_history: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComputerStrategy {
    kind: StrategyKind,
    config: GameConfig,
    search: SearchState,
}

impl ComputerStrategy {
    pub fn new(kind: StrategyKind, config: GameConfig) -> Self {
        Self { kind, config, search: SearchState::full(&config) }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Back to the full range with an empty history.
    pub fn reset(&mut self) {
        self.search = SearchState::full(&self.config);
    }

    /// Switch to a new range and reset to it.
    pub fn reconfigure(&mut self, config: GameConfig) {
        self.config = config;
        self.reset();
    }

    /// Next guess, recorded in the history.
    pub fn next_guess<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<i64, SearchError> {
        let guess = match self.kind {
            StrategyKind::BinarySearch => {
                let SearchState { low_bound: low, high_bound: high, .. } = self.search;
                if low > high {
                    return Err(SearchError::BoundsCrossed { low, high });
                }
                midpoint(low, high)
            }
            StrategyKind::Random => rng.pick_inclusive(self.config.min_number(), self.config.max_number()),
        };
        self.search.guess_history.push(guess);
        Ok(guess)
    }

    /// Narrow the window using the hint for one of our own guesses.
    pub fn observe(&mut self, guess: i64, hint: Hint) {
        match hint {
            Hint::Lower => self.search.high_bound = guess.saturating_sub(1),
            Hint::Higher => self.search.low_bound = guess.saturating_add(1),
        }
    }

    /// Recovery after [`SearchError::BoundsCrossed`]: reopen the window to
    /// the configured range, keep the history, and guess its midpoint.
    pub fn recover(&mut self) -> i64 {
        self.search.low_bound = self.config.min_number();
        self.search.high_bound = self.config.max_number();
        let guess = midpoint(self.search.low_bound, self.search.high_bound);
        self.search.guess_history.push(guess);
        guess
    }

    /// Play a solo search against `target` with truthful hints. Returns how
    /// many guesses it took, or `None` if `limit` ran out first.
    pub fn guesses_to_find<R: RandomSource + ?Sized>(
        &mut self,
        target: i64,
        rng: &mut R,
        limit: u32,
    ) -> Result<Option<u32>, SearchError> {
        self.reset();
        for n in 1..=limit {
            let guess = self.next_guess(rng)?;
            match Hint::for_guess(guess, target) {
                None => return Ok(Some(n)),
                Some(hint) => self.observe(guess, hint),
            }
        }
        Ok(None)
    }
}

/// Floor of `(low + high) / 2` without overflowing.
fn midpoint(low: i64, high: i64) -> i64 {
    low + (high - low) / 2
}
