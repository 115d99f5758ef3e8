//! Domain layer for logging-middleware.
//!
//! Contains the canonical types shared across all modules:
//! - `LogRecord`: A validated record ready for transmission
//! - `Stack` / `Level` / `Package`: The fixed vocabularies a record is checked against
//! - `ValidationError` / `SubmitError`: Error types for the submission path

pub mod error;
pub mod log_record;
pub mod vocabulary;

pub use error::{SubmitError, ValidationError};
pub use log_record::LogRecord;
pub use vocabulary::{
    BACKEND_PACKAGES, FRONTEND_PACKAGES, Level, Package, PackageScope, SHARED_PACKAGES, Stack,
    VALID_LEVELS, VALID_STACKS, packages_for,
};
