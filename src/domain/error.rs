use super::vocabulary::{Package, Stack, VALID_LEVELS, VALID_STACKS, join_names};
use crate::sender::TransportError;
use thiserror::Error;

/// A record rejected locally, before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid stack: {0}. Must be one of: {stacks}", stacks = join_names(VALID_STACKS))]
    InvalidStack(String),

    #[error("Invalid level: {0}. Must be one of: {levels}", levels = join_names(VALID_LEVELS))]
    InvalidLevel(String),

    #[error("Invalid package: {0}. Must be one of: {packages}", packages = join_names(Package::ALL))]
    InvalidPackage(String),

    #[error("Package '{package}' is not allowed for stack '{stack}'")]
    PackageNotAllowed { package: Package, stack: Stack },

    #[error("Message must be a non-empty string")]
    EmptyMessage,
}

/// Everything that can stop a record from being accepted by the collector.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to encode log record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to send log to server: {0}")]
    Transport(#[from] TransportError),

    #[error("Logging failed with status: {status}")]
    Rejected { status: u16 },
}

impl SubmitError {
    /// Whether the record never left the process because a transport failed
    /// (as opposed to being rejected locally or answered with a bad status).
    pub fn is_transport(&self) -> bool {
        matches!(self, SubmitError::Transport(_))
    }

    /// Whether a valid record failed to reach storage: the send failed or the
    /// collector answered with a status outside the success set.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, SubmitError::Transport(_) | SubmitError::Rejected { .. })
    }
}
