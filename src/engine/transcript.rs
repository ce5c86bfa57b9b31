//! NDJSON transcript of every game event, one JSON object per line.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use crate::core::game::{GameEvent, GameObserver};

#[derive(Serialize)]
struct TranscriptLine<'a> {
    ts_ms: u64,
    #[serde(flatten)]
    event: &'a GameEvent,
}

pub struct TranscriptObserver<W: Write> {
    out: W,
}

impl TranscriptObserver<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("creating transcript {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TranscriptObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &GameEvent) -> Result<()> {
        let line = TranscriptLine { ts_ms: now_ms(), event };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")?;
        // Flush per event so the file is complete even if the TUI is killed.
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> GameObserver for TranscriptObserver<W> {
    fn notify(&mut self, event: &GameEvent) {
        if let Err(err) = self.write_event(event) {
            warn!(error = %err, "failed to write transcript line");
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
