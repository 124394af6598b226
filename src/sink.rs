//! Destinations for batch log lines.
//!
//! | Sink | Description |
//! |------|-------------|
//! | [`TracingLogSink`] | Emits each line as a `tracing` info event (default) |
//! | [`MemoryLogSink`] | Keeps lines in memory, for tests and callers that post-process |
//! | [`NoopLogSink`] | Drops everything |
//!
//! Any `Fn(&str) + Send + Sync` closure is a sink as well.

use std::sync::{Arc, Mutex, MutexGuard};

/// Receives batch log lines in order, once each.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn write_line(&self, line: &str) {
        self(line)
    }
}

/// Forwards lines to `tracing` under the `livy_batch::batch_log` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn write_line(&self, line: &str) {
        tracing::info!(target: "livy_batch::batch_log", "{}", line);
    }
}

/// In-memory sink.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.guard().clear();
    }

    // A writer that panicked mid-push cannot leave the Vec inconsistent.
    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LogSink for MemoryLogSink {
    fn write_line(&self, line: &str) {
        self.guard().push(line.to_string());
    }
}

/// No-op sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn write_line(&self, _: &str) {}
}
