use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::config::GameConfig;
use crate::core::error::GuessError;
use crate::core::game::{GameEvent, GameObserver};
use crate::core::rng::RandomSource;
use crate::engine::scheduler::{MoveTicket, TokioScheduler};
use crate::games::rand_num::renderer::{self, GameView};
use crate::games::rand_num::{GuessingGameEngine, StrategyKind};

const FRAME: Duration = Duration::from_millis(16);

/// Drives one engine from the terminal: key presses and fired computer
/// moves are handled one at a time on the same task.
pub struct GameRunner<R: RandomSource> {
    engine: GuessingGameEngine<R, TokioScheduler>,
    tickets: mpsc::UnboundedReceiver<MoveTicket>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    view: GameView,
}

impl<R: RandomSource> GameRunner<R> {
    pub fn new(config: GameConfig, strategy: StrategyKind, think_delay: Duration, rng: R) -> Self {
        let (scheduler, tickets) = TokioScheduler::new();
        let (event_tx, events) = mpsc::unbounded_channel();
        let mut engine = GuessingGameEngine::new(config, strategy, rng, scheduler).with_think_delay(think_delay);
        engine.subscribe(event_tx);
        Self { engine, tickets, events, view: GameView::default() }
    }

    /// Extra sinks, e.g. a transcript.
    pub fn subscribe(&mut self, observer: impl GameObserver + Send + 'static) {
        self.engine.subscribe(observer);
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.engine.start_new_game();

        loop {
            while let Ok(event) = self.events.try_recv() {
                self.view.apply(&event);
            }
            terminal.draw(|f| renderer::render(f, &self.view, self.engine.config()))?;

            // INPUT (Non-blocking)
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && !self.handle_key(key) {
                        break;
                    }
                }
            }

            tokio::select! {
                Some(ticket) = self.tickets.recv() => {
                    self.engine.computer_move(ticket);
                }
                _ = tokio::time::sleep(FRAME) => {}
            }
        }

        info!("quitting");
        Ok(())
    }

    /// Returns `false` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if ctrl => return false,
            KeyCode::Char('n') if ctrl => {
                self.engine.start_new_game();
            }
            KeyCode::Enter => match self.engine.submit_input(self.view.input()) {
                Ok(outcome) => {
                    debug!(?outcome, "player guess accepted");
                    self.view.clear_input();
                }
                // Validation feedback arrives as a status event; the text
                // stays in the field so it can be corrected.
                Err(GuessError::Validation(_)) => {}
                Err(GuessError::Turn(_)) => {}
            },
            KeyCode::Backspace => self.view.pop_char(),
            KeyCode::Char(c) => self.view.push_char(c),
            _ => {}
        }
        true
    }
}
