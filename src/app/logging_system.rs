use super::config::{LogFormat, LogLevel};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log directive '{directive}': {source}")]
    InvalidDirective {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("Logging initialization failed: {0}")]
    InitFailed(String),
}

/// Filter directives for the process's own tracing output.
pub struct LoggingSystem {
    directives: Arc<RwLock<Vec<Directive>>>,
}

impl LoggingSystem {
    pub fn new() -> Self {
        Self {
            directives: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add_directive(&self, directive_str: &str) -> Result<(), LoggingError> {
        let directive =
            directive_str
                .parse::<Directive>()
                .map_err(|source| LoggingError::InvalidDirective {
                    directive: directive_str.to_string(),
                    source,
                })?;

        self.directives.write().push(directive);
        Ok(())
    }

    /// Quiets the HTTP stacks, which are chatty at debug level, and keeps
    /// undelivered records visible whatever the default level is.
    pub fn add_default_directives(&self) -> Result<(), LoggingError> {
        for directive in [
            "hyper=warn",
            "hyper_util=warn",
            "reqwest=warn",
            "h2=warn",
            "logging_middleware::fallback=info",
        ] {
            self.add_directive(directive)?;
        }
        Ok(())
    }

    pub fn build_filter_string(&self, default_level: LogLevel) -> String {
        let directives = self.directives.read();

        let mut filter_parts = Vec::with_capacity(directives.len() + 1);
        filter_parts.push(default_level.as_str().to_string());
        filter_parts.extend(directives.iter().map(ToString::to_string));

        filter_parts.join(",")
    }

    pub fn initialize_tracing(
        &self,
        default_level: LogLevel,
        format: LogFormat,
    ) -> Result<(), LoggingError> {
        let filter_string = self.build_filter_string(default_level);
        let env_filter = EnvFilter::try_new(&filter_string).map_err(|e| {
            LoggingError::InitFailed(format!("Failed to create EnvFilter with '{filter_string}': {e}"))
        })?;

        let (text_layer, json_layer) = match format {
            LogFormat::Text => (
                Some(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .compact(),
                ),
                None,
            ),
            LogFormat::Json => (
                None,
                Some(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .json()
                        .with_target(true),
                ),
            ),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(text_layer)
            .with(json_layer)
            .try_init()
            .map_err(|e| LoggingError::InitFailed(e.to_string()))
    }

    pub fn directive_count(&self) -> usize {
        self.directives.read().len()
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs the global subscriber once; later calls return the first outcome.
pub fn setup_logging_safe(level: LogLevel, format: LogFormat) -> Result<(), LoggingError> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.get_or_init(|| {
        let logging_system = LoggingSystem::new();
        logging_system
            .add_default_directives()
            .and_then(|()| logging_system.initialize_tracing(level, format))
            .map_err(|e| e.to_string())
    })
    .clone()
    .map_err(LoggingError::InitFailed)
}
