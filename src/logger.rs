//! Process-wide logger bound to the default collector.
//!
//! ```no_run
//! # async fn run() {
//! use logging_middleware::logger;
//!
//! logger::log("frontend", "info", "page", "URL shortener page loaded").await;
//! logger::warn("frontend", "utils", "invalid protocol in URL").await;
//! # }
//! ```

use crate::domain::Level;
use crate::sender::{
    ClientConfig, Diagnostics, LogSubmitter, ReqwestTransport, TracingDiagnostics, Transport,
    TransportError,
};
use std::sync::OnceLock;

type DefaultSubmitter = LogSubmitter<ReqwestTransport>;

fn default_submitter() -> Result<&'static DefaultSubmitter, &'static TransportError> {
    static DEFAULT: OnceLock<Result<DefaultSubmitter, TransportError>> = OnceLock::new();

    DEFAULT
        .get_or_init(|| ReqwestTransport::new(ClientConfig::default()).map(LogSubmitter::new))
        .as_ref()
}

/// Submits one record to the default collector. Never fails; see
/// [`LogSubmitter::submit`].
pub async fn log(stack: &str, level: &str, package: &str, message: &str) -> bool {
    match default_submitter() {
        Ok(submitter) => log_with(submitter, stack, level, package, message).await,
        Err(err) => {
            TracingDiagnostics.report(&format!("Default log client unavailable: {err}"));
            false
        }
    }
}

/// Same as [`log`], through a caller-supplied submitter.
pub async fn log_with<T: Transport, D: Diagnostics>(
    submitter: &LogSubmitter<T, D>,
    stack: &str,
    level: &str,
    package: &str,
    message: &str,
) -> bool {
    submitter.submit(stack, level, package, message).await
}

pub async fn debug(stack: &str, package: &str, message: &str) -> bool {
    log(stack, Level::Debug.as_str(), package, message).await
}

pub async fn info(stack: &str, package: &str, message: &str) -> bool {
    log(stack, Level::Info.as_str(), package, message).await
}

pub async fn warn(stack: &str, package: &str, message: &str) -> bool {
    log(stack, Level::Warn.as_str(), package, message).await
}

pub async fn error(stack: &str, package: &str, message: &str) -> bool {
    log(stack, Level::Error.as_str(), package, message).await
}

pub async fn fatal(stack: &str, package: &str, message: &str) -> bool {
    log(stack, Level::Fatal.as_str(), package, message).await
}
