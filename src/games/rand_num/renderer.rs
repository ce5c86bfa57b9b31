//! Terminal presentation for the guessing game.
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::core::config::GameConfig;
use crate::core::game::{GameEvent, GameResult, Side};

/// Long enough for any i64 with its sign.
pub const MAX_INPUT_LEN: usize = 20;

/// What the screen shows, rebuilt purely from [`GameEvent`]s plus the text
/// the user is typing.
#[derive(Debug, Clone, Default)]
pub struct GameView {
    attempts_left: u32,
    turn: Option<Side>,
    log: Vec<String>,
    status: String,
    input_enabled: bool,
    input: String,
    result: Option<GameResult>,
}

impl GameView {
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted { max_attempts, .. } => {
                self.log.clear();
                self.attempts_left = *max_attempts;
                self.result = None;
                self.input.clear();
            }
            GameEvent::AttemptsUpdated { remaining, .. } => self.attempts_left = *remaining,
            GameEvent::TurnChanged { side } => self.turn = Some(*side),
            GameEvent::LogAppended { text } => self.log.push(text.clone()),
            GameEvent::GameEnded { result } => {
                self.result = Some(*result);
                self.turn = None;
            }
            GameEvent::InputEnabled { enabled } => self.input_enabled = *enabled,
            GameEvent::StatusChanged { text } => self.status = text.clone(),
        }
    }

    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    pub fn turn(&self) -> Option<Side> {
        self.turn
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Typing is ignored while the field is disabled or full.
    pub fn push_char(&mut self, c: char) {
        if self.input_enabled && !c.is_control() && self.input.chars().count() < MAX_INPUT_LEN {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.input_enabled {
            self.input.pop();
        }
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }
}

pub fn render(frame: &mut Frame, view: &GameView, config: &GameConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(format!(
            " GUESS THE NUMBER ({} - {}) ",
            config.min_number(),
            config.max_number()
        ))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan)),
        chunks[0],
    );

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let turn_text = view.turn.map(Side::turn_label).unwrap_or_default();
    let turn_style = match view.turn {
        Some(Side::Player) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Some(Side::Computer) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        None => Style::default(),
    };
    frame.render_widget(
        Paragraph::new(turn_text)
            .style(turn_style)
            .block(Block::default().title(" TURN ").borders(Borders::ALL)),
        header[0],
    );
    frame.render_widget(
        Paragraph::new(format!("Attempts Left: {}", view.attempts_left))
            .block(Block::default().title(" ATTEMPTS ").borders(Borders::ALL)),
        header[1],
    );

    // Keep the newest lines visible when the log outgrows its box.
    let visible = chunks[2].height.saturating_sub(2) as usize;
    let skip = view.log.len().saturating_sub(visible);
    let items: Vec<ListItem> = view.log[skip..].iter().map(|line| ListItem::new(line.as_str())).collect();
    frame.render_widget(
        List::new(items).block(Block::default().title(" LOG ").borders(Borders::ALL)),
        chunks[2],
    );

    let status_style = match view.result {
        Some(GameResult::Won { by: Side::Player, .. }) => Style::default().fg(Color::Green),
        Some(_) => Style::default().fg(Color::Red),
        None => Style::default(),
    };
    frame.render_widget(
        Paragraph::new(view.status.as_str())
            .style(status_style)
            .block(Block::default().title(" STATUS ").borders(Borders::ALL)),
        chunks[3],
    );

    let input_style = if view.input_enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(format!("> {}", view.input))
            .style(input_style)
            .block(Block::default().title(" YOUR GUESS ").borders(Borders::ALL)),
        chunks[4],
    );
    if view.input_enabled {
        let typed = u16::try_from(view.input.chars().count()).unwrap_or(u16::MAX);
        let x = chunks[4]
            .x
            .saturating_add(3)
            .saturating_add(typed)
            .min(chunks[4].right().saturating_sub(2));
        frame.set_cursor_position((x, chunks[4].y + 1));
    }

    frame.render_widget(
        Paragraph::new("[Enter] Guess  [Ctrl+N] New Game  [Esc] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        chunks[5],
    );
}
