use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::core::config::GameConfig;
use crate::core::rng::{RandomSource, SeededRandom, ThreadRandom};
use crate::engine::transcript::TranscriptObserver;
use crate::games::rand_num::{self, ComputerStrategy, StrategyKind};
use crate::logging;

#[derive(Parser)]
#[command(name = "guessterm")]
#[command(about = "🔢 Turn-based number guessing against the computer")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub game: GameArgs,

    #[command(flatten)]
    pub play: PlayArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Smallest number the target can be
    #[arg(long, global = true, default_value_t = 1, env = "GUESSTERM_MIN", allow_negative_numbers = true)]
    pub min: i64,

    /// Largest number the target can be
    #[arg(long, global = true, default_value_t = 100, env = "GUESSTERM_MAX", allow_negative_numbers = true)]
    pub max: i64,

    /// Total guesses shared by both sides
    #[arg(long, global = true, default_value_t = 12, env = "GUESSTERM_ATTEMPTS")]
    pub attempts: u32,

    /// How the computer picks its guesses
    #[arg(long, global = true, value_enum, default_value_t = StrategyKind::BinarySearch, env = "GUESSTERM_STRATEGY")]
    pub strategy: StrategyKind,

    /// Seed for reproducible targets (random if omitted)
    #[arg(long, global = true, env = "GUESSTERM_SEED")]
    pub seed: Option<u64>,
}

impl GameArgs {
    pub fn config(&self) -> Result<GameConfig> {
        GameConfig::new(self.min, self.max, self.attempts).context("invalid game configuration")
    }

    pub fn random_source(&self) -> Box<dyn RandomSource + Send> {
        match self.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom),
        }
    }
}

/// Settings for interactive play, accepted with or without the `play` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Computer "thinking" pause in milliseconds
    #[arg(long, global = true, default_value_t = 1000, env = "GUESSTERM_THINK_MS")]
    pub think_ms: u64,

    /// Where tracing output goes while the TUI is up
    #[arg(long, global = true, default_value = "guessterm.log", env = "GUESSTERM_LOG_FILE")]
    pub log_file: PathBuf,

    /// Write every game event as NDJSON to this file
    #[arg(long, global = true, env = "GUESSTERM_TRANSCRIPT")]
    pub transcript: Option<PathBuf>,
}

impl PlayArgs {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play in the terminal (default)
    Play,
    /// Let the computer search for many random targets and report how it did
    Simulate {
        /// Number of searches to run
        #[arg(short, long, default_value_t = 1000)]
        games: u32,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let config = cli.game.config()?;
            logging::init_file(&cli.play.log_file)?;
            let transcript = cli
                .play
                .transcript
                .as_deref()
                .map(TranscriptObserver::create)
                .transpose()?;
            info!(?config, strategy = ?cli.game.strategy, "starting interactive game");

            let terminal = ratatui::init();
            let result = rand_num::run_game(
                config,
                cli.game.strategy,
                cli.play.think_delay(),
                cli.game.random_source(),
                transcript,
                terminal,
            )
            .await;
            ratatui::restore();
            result
        }
        Commands::Simulate { games } => {
            logging::init_stderr();
            let config = cli.game.config()?;
            let report = simulate(config, cli.game.strategy, games, &mut cli.game.random_source())?;
            println!("🎯 {} searches over {} - {}", report.games, config.min_number(), config.max_number());
            println!("   found within budget: {}", report.found);
            println!("   average guesses:     {:.2}", report.average());
            println!("   worst case:          {}", report.worst);
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationReport {
    pub games: u32,
    /// Searches that hit the target within `max_attempts` guesses.
    pub found: u32,
    pub total_guesses: u64,
    pub worst: u32,
}

impl SimulationReport {
    pub fn average(&self) -> f64 {
        if self.found == 0 {
            0.0
        } else {
            self.total_guesses as f64 / self.found as f64
        }
    }
}

/// Solo computer searches against random targets, each capped at the
/// configured attempt budget.
pub fn simulate<R: RandomSource + ?Sized>(
    config: GameConfig,
    kind: StrategyKind,
    games: u32,
    rng: &mut R,
) -> Result<SimulationReport> {
    let mut strategy = ComputerStrategy::new(kind, config);
    let mut report = SimulationReport { games, ..Default::default() };
    for _ in 0..games {
        let target = rng.pick_inclusive(config.min_number(), config.max_number());
        if let Some(n) = strategy.guesses_to_find(target, rng, config.max_attempts())? {
            report.found += 1;
            report.total_guesses += u64::from(n);
            report.worst = report.worst.max(n);
        }
    }
    info!(?report, "simulation finished");
    Ok(report)
}
