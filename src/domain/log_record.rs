use super::error::ValidationError;
use super::vocabulary::{Level, Package, Stack};
use serde::{Deserialize, Serialize};

/// A log record that has passed validation.
///
/// Serializes to exactly four string fields, in wire order:
/// `{"stack":..,"level":..,"package":..,"message":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub stack: Stack,
    pub level: Level,
    pub package: Package,
    pub message: String,
}

impl LogRecord {
    /// Builds a record from typed parts, checking the package/stack pairing
    /// and the message.
    pub fn new(
        stack: Stack,
        level: Level,
        package: Package,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if !package.is_allowed_for(stack) {
            return Err(ValidationError::PackageNotAllowed { package, stack });
        }

        let message = message.into();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        Ok(Self {
            stack,
            level,
            package,
            message,
        })
    }

    /// Validates raw values in order: stack, level, package membership,
    /// package/stack pairing, message. The first failing check wins.
    pub fn validate(
        stack: &str,
        level: &str,
        package: &str,
        message: &str,
    ) -> Result<Self, ValidationError> {
        let stack: Stack = stack.parse()?;
        let level: Level = level.parse()?;
        let package: Package = package.parse()?;
        Self::new(stack, level, package, message)
    }

    /// `[stack][level][package] message`
    pub fn fallback_line(&self) -> String {
        format!(
            "[{}][{}][{}] {}",
            self.stack, self.level, self.package, self.message
        )
    }
}
