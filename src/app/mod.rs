pub mod cli;
pub mod config;
pub mod logging_system;

pub use cli::{Cli, render_packages};
pub use config::{Config, ConfigError, LogFormat, LogLevel, TransportKind};
pub use logging_system::{LoggingError, LoggingSystem, setup_logging_safe};

use crate::domain::Stack;
use crate::sender::{CollectorTransport, HyperTransport, LogSubmitter, ReqwestTransport};
use anyhow::{Context, bail};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};

pub struct App {
    config: Config,
    submitter: LogSubmitter<CollectorTransport>,
}

impl App {
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let client_config = config.client_config();
        let transport = match config.transport {
            TransportKind::Reqwest => {
                ReqwestTransport::new(client_config).map(CollectorTransport::Reqwest)
            }
            TransportKind::Hyper => HyperTransport::new(client_config).map(CollectorTransport::Hyper),
        }
        .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;

        debug!(
            "Configuration: endpoint={}, transport={:?}, timeout={:?}",
            config.endpoint, config.transport, config.timeout
        );

        Ok(Self {
            config,
            submitter: LogSubmitter::new(transport),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn submitter(&self) -> &LogSubmitter<CollectorTransport> {
        &self.submitter
    }

    pub async fn submit(&self, stack: &str, level: &str, package: &str, message: &str) -> bool {
        self.submitter.submit(stack, level, package, message).await
    }
}

pub fn get_version() -> String {
    crate::VERSION.to_string()
}

/// Runs one CLI invocation; `Ok(false)` means the record was not accepted.
pub async fn execute(cli: Cli) -> anyhow::Result<bool> {
    let config = cli.config.resolve().context("invalid configuration")?;
    if let Err(e) = setup_logging_safe(config.log_level, config.log_format) {
        eprintln!("Warning: {e}, continuing without tracing output");
    }

    if cli.list_packages {
        let stack = cli
            .stack
            .as_deref()
            .map(str::parse::<Stack>)
            .transpose()?;
        print!("{}", render_packages(stack));
        return Ok(true);
    }

    let (Some(stack), Some(level), Some(package), Some(message)) =
        (cli.stack, cli.level, cli.package, cli.message)
    else {
        bail!("STACK, LEVEL, PACKAGE and MESSAGE are all required");
    };

    let app = App::from_config(config).context("failed to build collector client")?;
    info!(
        "logging-middleware v{} submitting to {}",
        get_version(),
        app.config().endpoint
    );

    Ok(app.submit(&stack, &level, &package, &message).await)
}

// Main entry point for the application
pub async fn main() -> anyhow::Result<ExitCode> {
    if execute(Cli::parse()).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
