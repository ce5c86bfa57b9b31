//! Core game types shared by the engine and anything that renders it.
use serde::Serialize;
use std::fmt;
use tokio::sync::mpsc;

/// Which side owns the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    /// Label shown in the turn indicator, e.g. "Player Turn".
    pub fn turn_label(self) -> String {
        format!("{self} Turn")
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("Player"),
            Side::Computer => f.write_str("Computer"),
        }
    }
}

/// Where the target lies relative to a wrong guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    /// The target is lower than the guess.
    Lower,
    /// The target is higher than the guess.
    Higher,
}

impl Hint {
    /// `None` when the guess is the target.
    pub fn for_guess(guess: i64, target: i64) -> Option<Self> {
        match guess.cmp(&target) {
            std::cmp::Ordering::Greater => Some(Hint::Lower),
            std::cmp::Ordering::Less => Some(Hint::Higher),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Lower => f.write_str("Lower!"),
            Hint::Higher => f.write_str("Higher!"),
        }
    }
}

/// Result of one accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GuessOutcome {
    Win(Side),
    Loss { target: i64 },
    Hint(Hint),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameResult {
    Won { by: Side, target: i64 },
    Lost { target: i64 },
}

/// Snapshot of the mutable part of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub target_number: i64,
    pub attempts_used: u32,
    pub current_turn: Side,
    pub active: bool,
}

/// Everything a presentation layer needs to mirror the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh game began; any previous log is void.
    GameStarted { generation: u64, max_attempts: u32 },
    AttemptsUpdated { used: u32, remaining: u32 },
    TurnChanged { side: Side },
    LogAppended { text: String },
    GameEnded { result: GameResult },
    InputEnabled { enabled: bool },
    /// Short user-facing message, including validation errors.
    StatusChanged { text: String },
}

/// Sink for [`GameEvent`]s.
pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

impl GameObserver for mpsc::UnboundedSender<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        // A dropped receiver just means nobody is rendering anymore.
        let _ = self.send(event.clone());
    }
}
