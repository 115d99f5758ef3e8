use super::{Diagnostics, TracingDiagnostics, Transport};
use crate::domain::{Level, LogRecord, SubmitError};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

/// Statuses the collector answers with when it has stored a record.
pub const fn is_accepted_status(status: u16) -> bool {
    matches!(status, 200 | 201)
}

/// Validates log records and hands them to a [`Transport`].
///
/// Each call stands alone: one record, at most one request, no retry and no
/// buffering. Clones share the transport and the diagnostics sink.
pub struct LogSubmitter<T, D = TracingDiagnostics> {
    transport: Arc<T>,
    diagnostics: Arc<D>,
}

impl<T: Transport> LogSubmitter<T> {
    pub fn new(transport: T) -> Self {
        Self::with_diagnostics(transport, TracingDiagnostics)
    }
}

impl<T: Transport, D: Diagnostics> LogSubmitter<T, D> {
    pub fn with_diagnostics(transport: T, diagnostics: D) -> Self {
        Self {
            transport: Arc::new(transport),
            diagnostics: Arc::new(diagnostics),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Validates and sends one record, surfacing the reason on failure.
    /// Returns the accepted HTTP status.
    pub async fn try_submit(
        &self,
        stack: &str,
        level: &str,
        package: &str,
        message: &str,
    ) -> Result<u16, SubmitError> {
        let record = LogRecord::validate(stack, level, package, message)?;
        self.try_submit_record(&record).await
    }

    pub async fn try_submit_record(&self, record: &LogRecord) -> Result<u16, SubmitError> {
        let body = serde_json::to_vec(record)?;

        debug!(
            "Submitting {} log for {}/{} to {}",
            record.level,
            record.stack,
            record.package,
            self.transport.endpoint()
        );

        let status = self.transport.send_json(Bytes::from(body)).await?;

        if is_accepted_status(status) {
            Ok(status)
        } else {
            warn!("Collector rejected log record: HTTP {}", status);
            Err(SubmitError::Rejected { status })
        }
    }

    /// Fire-and-forget submission: every failure is reported to the
    /// diagnostics sink and turned into `false`.
    pub async fn submit(&self, stack: &str, level: &str, package: &str, message: &str) -> bool {
        match LogRecord::validate(stack, level, package, message) {
            Ok(record) => self.submit_record(&record).await,
            Err(err) => {
                self.diagnostics.report(&err.to_string());
                false
            }
        }
    }

    pub async fn submit_record(&self, record: &LogRecord) -> bool {
        match self.try_submit_record(record).await {
            Ok(_) => true,
            Err(err) => {
                self.diagnostics.report(&err.to_string());
                if err.is_delivery_failure() {
                    self.diagnostics.echo(&record.fallback_line());
                }
                false
            }
        }
    }

    pub async fn debug(&self, stack: &str, package: &str, message: &str) -> bool {
        self.submit(stack, Level::Debug.as_str(), package, message).await
    }

    pub async fn info(&self, stack: &str, package: &str, message: &str) -> bool {
        self.submit(stack, Level::Info.as_str(), package, message).await
    }

    pub async fn warn(&self, stack: &str, package: &str, message: &str) -> bool {
        self.submit(stack, Level::Warn.as_str(), package, message).await
    }

    pub async fn error(&self, stack: &str, package: &str, message: &str) -> bool {
        self.submit(stack, Level::Error.as_str(), package, message).await
    }

    pub async fn fatal(&self, stack: &str, package: &str, message: &str) -> bool {
        self.submit(stack, Level::Fatal.as_str(), package, message).await
    }
}

impl<T, D> Clone for LogSubmitter<T, D> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            diagnostics: Arc::clone(&self.diagnostics),
        }
    }
}

impl<T: Transport, D> std::fmt::Debug for LogSubmitter<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSubmitter")
            .field("endpoint", &self.transport.endpoint())
            .finish_non_exhaustive()
    }
}
