//! Delayed computer moves.
//!
//! A scheduled move is just a [`MoveTicket`] that comes back after the
//! thinking delay. Tickets are never cancelled: the engine compares the
//! ticket's generation with its own when the ticket fires and drops stale ones.
use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

/// Identifies the game a scheduled computer move belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveTicket {
    pub generation: u64,
}

pub trait Scheduler {
    /// Hand `ticket` back to the engine after `delay`.
    fn schedule(&mut self, ticket: MoveTicket, delay: Duration);
}

/// Sleeps on the tokio runtime, then posts the ticket to the event loop.
/// Must be used from inside a runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<MoveTicket>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MoveTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, ticket: MoveTicket, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ticket).is_err() {
                debug!(generation = ticket.generation, "event loop gone, dropping computer move");
            }
        });
    }
}

/// Keeps tickets in a queue for the caller to fire by hand.
#[derive(Debug, Clone, Default)]
pub struct QueuedScheduler {
    pending: VecDeque<(MoveTicket, Duration)>,
}

impl QueuedScheduler {
    pub fn pop(&mut self) -> Option<MoveTicket> {
        self.pending.pop_front().map(|(ticket, _)| ticket)
    }

    pub fn peek(&self) -> Option<&(MoveTicket, Duration)> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Scheduler for QueuedScheduler {
    fn schedule(&mut self, ticket: MoveTicket, delay: Duration) {
        self.pending.push_back((ticket, delay));
    }
}
