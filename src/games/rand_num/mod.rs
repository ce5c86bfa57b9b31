pub mod game;
pub mod renderer;
pub mod strategy;

pub use game::GuessingGameEngine;
pub use strategy::{ComputerStrategy, SearchState, StrategyKind};

use anyhow::Result;
use ratatui::DefaultTerminal;
use std::time::Duration;

use crate::core::config::GameConfig;
use crate::core::rng::RandomSource;
use crate::engine::transcript::TranscriptObserver;
use crate::engine::GameRunner;

/// Game runner for Number Guessing Game
pub async fn run_game<R: RandomSource>(
    config: GameConfig,
    strategy: StrategyKind,
    think_delay: Duration,
    rng: R,
    transcript: Option<TranscriptObserver<std::io::BufWriter<std::fs::File>>>,
    terminal: DefaultTerminal,
) -> Result<()> {
    let mut runner = GameRunner::new(config, strategy, think_delay, rng);
    if let Some(transcript) = transcript {
        runner.subscribe(transcript);
    }
    runner.run(terminal).await
}
