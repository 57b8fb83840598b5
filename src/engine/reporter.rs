//! Reporting channel for step output
//!
//! The runner never prints directly. It produces [`ReportEvent`]s and hands
//! them to a [`Reporter`], which decides where they go:
//! - `ConsoleReporter` - one line per event on stdout
//! - `ChannelReporter` - forwards events over an async channel
//! - `MemoryReporter` - keeps events in memory for later inspection
//! - `NullReporter` - drops everything

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Text printed for a step that does not exist
pub const MISSING_STEP_TEXT: &str = "undefined";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    /// A step finished its delay; `text` is `None` when the index was out of range
    Step { index: usize, text: Option<String> },
    /// Every step of a chain succeeded
    Arrived { message: String },
    /// A chain was aborted by a failing step
    Failed { reason: String },
    /// A chain settled, successfully or not
    Finalized { message: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEvent {
    #[serde(flatten)]
    pub kind: ReportKind,
    pub timestamp: DateTime<Utc>,
}

impl ReportEvent {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }

    pub fn step(index: usize, text: Option<&str>) -> Self {
        Self::new(ReportKind::Step {
            index,
            text: text.map(str::to_string),
        })
    }

    pub fn arrived(message: &str) -> Self {
        Self::new(ReportKind::Arrived {
            message: message.to_string(),
        })
    }

    pub fn failed(reason: &str) -> Self {
        Self::new(ReportKind::Failed {
            reason: reason.to_string(),
        })
    }

    pub fn finalized(message: &str) -> Self {
        Self::new(ReportKind::Finalized {
            message: message.to_string(),
        })
    }

    /// The line a console would show for this event
    pub fn display_line(&self) -> String {
        match &self.kind {
            ReportKind::Step { text, .. } => {
                text.clone().unwrap_or_else(|| MISSING_STEP_TEXT.to_string())
            }
            ReportKind::Arrived { message } => message.clone(),
            ReportKind::Failed { reason } => reason.clone(),
            ReportKind::Finalized { message } => message.clone(),
        }
    }
}

/// Sink for report events
pub trait Reporter: Send + Sync {
    fn report(&self, event: ReportEvent);
}

/// Prints each event to stdout
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter {
    json: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print events as JSON lines instead of plain text
    pub fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: ReportEvent) {
        tracing::debug!(kind = ?event.kind, "report");
        if self.json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to serialize report event: {}", e),
            }
        } else {
            println!("{}", event.display_line());
        }
    }
}

/// Forwards events to an async channel
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: async_channel::Sender<ReportEvent>,
}

impl ChannelReporter {
    /// Wrap an existing sender
    ///
    /// With a bounded sender, events that arrive while the channel is full
    /// are dropped with a warning; use [`ChannelReporter::unbounded`] when
    /// every event must be delivered.
    pub fn new(tx: async_channel::Sender<ReportEvent>) -> Self {
        Self { tx }
    }

    /// Create a reporter together with an unbounded receiver
    pub fn unbounded() -> (Self, async_channel::Receiver<ReportEvent>) {
        let (tx, rx) = async_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl Reporter for ChannelReporter {
    fn report(&self, event: ReportEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            // receiver gone: nobody is listening any more
            Err(async_channel::TrySendError::Closed(_)) => {}
            Err(async_channel::TrySendError::Full(event)) => {
                tracing::warn!(
                    kind = ?event.kind,
                    capacity = ?self.tx.capacity(),
                    "Report channel full, event dropped"
                );
            }
        }
    }
}

/// Records every event in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    pub fn kinds(&self) -> Vec<ReportKind> {
        self.lock().iter().map(|e| e.kind.clone()).collect()
    }

    /// Indices of the reported steps, in report order
    pub fn step_indices(&self) -> Vec<usize> {
        self.lock()
            .iter()
            .filter_map(|e| match &e.kind {
                ReportKind::Step { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(ReportEvent::display_line).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEvent>> {
        // a panicking reporter must not hide earlier events
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: ReportEvent) {
        self.lock().push(event);
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: ReportEvent) {}
}
