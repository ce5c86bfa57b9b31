use std::time::Duration;

use tracing::{debug, error, info};

use crate::core::config::GameConfig;
use crate::core::error::{GuessError, TurnViolation, ValidationError};
use crate::core::game::{GameEvent, GameObserver, GameResult, GameState, GuessOutcome, Hint, Side};
use crate::core::rng::RandomSource;
use crate::engine::scheduler::{MoveTicket, Scheduler};
use crate::games::rand_num::strategy::{ComputerStrategy, SearchState, StrategyKind};

pub const DEFAULT_THINK_DELAY: Duration = Duration::from_secs(1);
pub const LOG_HEADER: &str = "== Game Log ==";

/// Turn engine for a human against the computer.
///
/// Owns the target, the attempt counter, the turn and the computer's search
/// window. Nothing here blocks: the computer's move is handed to the
/// [`Scheduler`] and comes back through [`GuessingGameEngine::computer_move`].
pub struct GuessingGameEngine<R, S> {
    config: GameConfig,
    state: GameState,
    strategy: ComputerStrategy,
    /// Bumped by every new game; stale move tickets carry an older value.
    generation: u64,
    think_delay: Duration,
    rng: R,
    scheduler: S,
    observers: Vec<Box<dyn GameObserver + Send>>,
}

impl<R: RandomSource, S: Scheduler> GuessingGameEngine<R, S> {
    /// An engine with no game running yet; call [`Self::start_new_game`].
    pub fn new(config: GameConfig, strategy: StrategyKind, rng: R, scheduler: S) -> Self {
        Self {
            config,
            state: GameState {
                target_number: config.min_number(),
                attempts_used: 0,
                current_turn: Side::Player,
                active: false,
            },
            strategy: ComputerStrategy::new(strategy, config),
            generation: 0,
            think_delay: DEFAULT_THINK_DELAY,
            rng,
            scheduler,
            observers: Vec::new(),
        }
    }

    pub fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay = delay;
        self
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn search(&self) -> &SearchState {
        self.strategy.search()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn attempts_left(&self) -> u32 {
        self.config.max_attempts() - self.state.attempts_used
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Pick a new target and reset everything else. Any computer move still
    /// in flight from the previous game becomes stale.
    pub fn start_new_game(&mut self) -> GameState {
        self.start_new_game_with(self.config)
    }

    /// Like [`Self::start_new_game`], but the new game and every later one
    /// use `config`.
    pub fn start_new_game_with(&mut self, config: GameConfig) -> GameState {
        self.config = config;
        self.strategy.reconfigure(config);
        self.generation += 1;
        self.state = GameState {
            target_number: self.rng.pick_inclusive(self.config.min_number(), self.config.max_number()),
            attempts_used: 0,
            current_turn: Side::Player,
            active: true,
        };
        info!(
            generation = self.generation,
            strategy = ?self.strategy.kind(),
            min = self.config.min_number(),
            max = self.config.max_number(),
            max_attempts = self.config.max_attempts(),
            "new game started"
        );
        debug!(secret = self.state.target_number, "target chosen");

        self.emit(GameEvent::GameStarted {
            generation: self.generation,
            max_attempts: self.config.max_attempts(),
        });
        self.emit(GameEvent::LogAppended { text: LOG_HEADER.to_string() });
        self.emit(GameEvent::TurnChanged { side: Side::Player });
        self.emit_attempts();
        self.emit(GameEvent::StatusChanged { text: "New game started!".to_string() });
        self.emit(GameEvent::InputEnabled { enabled: true });
        self.state
    }

    /// Raw text from the input field, always on behalf of the player.
    pub fn submit_input(&mut self, raw: &str) -> Result<GuessOutcome, GuessError> {
        self.check_turn(Side::Player)?;
        let value = match parse_guess(raw) {
            Ok(value) => value,
            Err(err) => return Err(self.reject(err)),
        };
        self.submit_guess(value, Side::Player)
    }

    pub fn submit_guess(&mut self, value: i64, by: Side) -> Result<GuessOutcome, GuessError> {
        self.check_turn(by)?;
        if !self.config.contains(value) {
            return Err(self.reject(ValidationError::OutOfRange {
                value,
                min: self.config.min_number(),
                max: self.config.max_number(),
            }));
        }
        Ok(self.apply_guess(value, by))
    }

    /// Fired by the scheduler after the thinking delay. Returns `None` for a
    /// stale ticket: a newer game started, the game ended, or the turn is no
    /// longer the computer's.
    pub fn computer_move(&mut self, ticket: MoveTicket) -> Option<GuessOutcome> {
        if ticket.generation != self.generation
            || !self.state.active
            || self.state.current_turn != Side::Computer
        {
            debug!(
                ticket = ticket.generation,
                generation = self.generation,
                active = self.state.active,
                "ignoring stale computer move"
            );
            return None;
        }

        let guess = match self.strategy.next_guess(&mut self.rng) {
            Ok(guess) => guess,
            Err(err) => {
                error!(%err, generation = self.generation, "computer search window collapsed, reopening full range");
                self.strategy.recover()
            }
        };
        Some(self.apply_guess(guess, Side::Computer))
    }

    fn check_turn(&self, by: Side) -> Result<(), TurnViolation> {
        let violation = if !self.state.active {
            TurnViolation::Inactive
        } else if self.state.current_turn != by {
            TurnViolation::WrongSide { expected: self.state.current_turn, attempted: by }
        } else {
            return Ok(());
        };
        debug!(%violation, "guess ignored");
        Err(violation)
    }

    fn reject(&mut self, err: ValidationError) -> GuessError {
        if !err.is_silent() {
            debug!(%err, "invalid guess input");
            self.emit(GameEvent::StatusChanged { text: err.to_string() });
        }
        err.into()
    }

    /// Caller has checked turn and range.
    fn apply_guess(&mut self, value: i64, by: Side) -> GuessOutcome {
        self.state.attempts_used += 1;
        info!(side = %by, guess = value, attempt = self.state.attempts_used, "guess");
        self.emit(GameEvent::LogAppended { text: format!("{by} guessed: {value}") });

        let target = self.state.target_number;
        match Hint::for_guess(value, target) {
            None => {
                self.emit(GameEvent::LogAppended { text: format!("{by} got it right!") });
                self.finish(GameResult::Won { by, target });
                GuessOutcome::Win(by)
            }
            Some(_) if self.state.attempts_used >= self.config.max_attempts() => {
                self.emit(GameEvent::LogAppended {
                    text: format!("Game Over! The correct number was {target}"),
                });
                self.finish(GameResult::Lost { target });
                GuessOutcome::Loss { target }
            }
            Some(hint) => {
                if by == Side::Computer {
                    self.strategy.observe(value, hint);
                }
                self.emit(GameEvent::LogAppended { text: hint.to_string() });
                self.pass_turn();
                GuessOutcome::Hint(hint)
            }
        }
    }

    fn pass_turn(&mut self) {
        let next = self.state.current_turn.other();
        self.state.current_turn = next;
        self.emit(GameEvent::TurnChanged { side: next });
        self.emit_attempts();

        match next {
            Side::Computer => {
                self.emit(GameEvent::InputEnabled { enabled: false });
                let ticket = MoveTicket { generation: self.generation };
                debug!(generation = ticket.generation, delay_ms = self.think_delay.as_millis() as u64, "computer move scheduled");
                self.scheduler.schedule(ticket, self.think_delay);
            }
            Side::Player => self.emit(GameEvent::InputEnabled { enabled: true }),
        }
    }

    fn finish(&mut self, result: GameResult) {
        self.state.active = false;
        info!(generation = self.generation, ?result, attempts = self.state.attempts_used, "game over");
        self.emit_attempts();
        self.emit(GameEvent::InputEnabled { enabled: false });
        self.emit(GameEvent::GameEnded { result });
        self.emit(GameEvent::StatusChanged { text: "Click New Game to start again".to_string() });
    }

    fn emit_attempts(&mut self) {
        let event = GameEvent::AttemptsUpdated {
            used: self.state.attempts_used,
            remaining: self.attempts_left(),
        };
        self.emit(event);
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}

fn parse_guess(raw: &str) -> Result<i64, ValidationError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }
    input
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber { input: input.to_string() })
}
