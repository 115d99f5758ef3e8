use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info};

#[cfg(test)]
use mockall::automock;

/// Local sink for submission failures. Never a retry path.
#[cfg_attr(test, automock)]
pub trait Diagnostics: Send + Sync {
    /// A failure description (validation, bad status, transport error).
    fn report(&self, line: &str);
    /// A record that could not be delivered, as `[stack][level][package] message`.
    fn echo(&self, line: &str);
}

/// Routes diagnostics into the process's `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, line: &str) {
        error!(target: "logging_middleware::diagnostics", "{line}");
    }

    fn echo(&self, line: &str) {
        info!(target: "logging_middleware::fallback", "{line}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Report,
    Echo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLine {
    pub kind: DiagnosticKind,
    pub text: String,
}

/// Keeps every diagnostic line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryDiagnostics {
    lines: Arc<Mutex<Vec<DiagnosticLine>>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<DiagnosticLine> {
        self.lines.lock().clone()
    }

    pub fn reports(&self) -> Vec<String> {
        self.texts(DiagnosticKind::Report)
    }

    pub fn echoes(&self) -> Vec<String> {
        self.texts(DiagnosticKind::Echo)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    fn texts(&self, kind: DiagnosticKind) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|line| line.kind == kind)
            .map(|line| line.text.clone())
            .collect()
    }

    fn push(&self, kind: DiagnosticKind, text: &str) {
        self.lines.lock().push(DiagnosticLine {
            kind,
            text: text.to_string(),
        });
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn report(&self, line: &str) {
        self.push(DiagnosticKind::Report, line);
    }

    fn echo(&self, line: &str) {
        self.push(DiagnosticKind::Echo, line);
    }
}
