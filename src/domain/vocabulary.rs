use super::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of an application a record originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Backend,
    Frontend,
}

/// Severity of a record, ordered `debug < info < warn < error < fatal`.
///
/// This is the wire-level severity sent to the collector. It is distinct from
/// `app::LogLevel`, which only configures this process's own tracing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Namespace tag identifying the subsystem that emitted a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    // backend-only
    Cache,
    Controller,
    CronJob,
    Db,
    Domain,
    Handler,
    Repository,
    Route,
    Service,
    // frontend-only
    Api,
    Component,
    Hook,
    Page,
    State,
    Style,
    // shared
    Auth,
    Config,
    Middleware,
    Utils,
}

/// Which package set a `Package` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageScope {
    Backend,
    Frontend,
    Shared,
}

pub const VALID_STACKS: &[Stack] = &[Stack::Backend, Stack::Frontend];

pub const VALID_LEVELS: &[Level] = &[
    Level::Debug,
    Level::Info,
    Level::Warn,
    Level::Error,
    Level::Fatal,
];

pub const BACKEND_PACKAGES: &[Package] = &[
    Package::Cache,
    Package::Controller,
    Package::CronJob,
    Package::Db,
    Package::Domain,
    Package::Handler,
    Package::Repository,
    Package::Route,
    Package::Service,
];

pub const FRONTEND_PACKAGES: &[Package] = &[
    Package::Api,
    Package::Component,
    Package::Hook,
    Package::Page,
    Package::State,
    Package::Style,
];

pub const SHARED_PACKAGES: &[Package] = &[
    Package::Auth,
    Package::Config,
    Package::Middleware,
    Package::Utils,
];

impl Stack {
    pub const fn as_str(self) -> &'static str {
        match self {
            Stack::Backend => "backend",
            Stack::Frontend => "frontend",
        }
    }
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl Package {
    /// Every known package: backend, then frontend, then shared.
    pub const ALL: &'static [Package] = &[
        Package::Cache,
        Package::Controller,
        Package::CronJob,
        Package::Db,
        Package::Domain,
        Package::Handler,
        Package::Repository,
        Package::Route,
        Package::Service,
        Package::Api,
        Package::Component,
        Package::Hook,
        Package::Page,
        Package::State,
        Package::Style,
        Package::Auth,
        Package::Config,
        Package::Middleware,
        Package::Utils,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Package::Cache => "cache",
            Package::Controller => "controller",
            Package::CronJob => "cron_job",
            Package::Db => "db",
            Package::Domain => "domain",
            Package::Handler => "handler",
            Package::Repository => "repository",
            Package::Route => "route",
            Package::Service => "service",
            Package::Api => "api",
            Package::Component => "component",
            Package::Hook => "hook",
            Package::Page => "page",
            Package::State => "state",
            Package::Style => "style",
            Package::Auth => "auth",
            Package::Config => "config",
            Package::Middleware => "middleware",
            Package::Utils => "utils",
        }
    }

    pub const fn scope(self) -> PackageScope {
        match self {
            Package::Cache
            | Package::Controller
            | Package::CronJob
            | Package::Db
            | Package::Domain
            | Package::Handler
            | Package::Repository
            | Package::Route
            | Package::Service => PackageScope::Backend,
            Package::Api
            | Package::Component
            | Package::Hook
            | Package::Page
            | Package::State
            | Package::Style => PackageScope::Frontend,
            Package::Auth | Package::Config | Package::Middleware | Package::Utils => {
                PackageScope::Shared
            }
        }
    }

    /// A package is valid for a stack iff it is in that stack's dedicated set
    /// or in the shared set.
    pub const fn is_allowed_for(self, stack: Stack) -> bool {
        matches!(
            (self.scope(), stack),
            (PackageScope::Shared, _)
                | (PackageScope::Backend, Stack::Backend)
                | (PackageScope::Frontend, Stack::Frontend)
        )
    }
}

/// Packages accepted for `stack`: its dedicated set followed by the shared set.
pub fn packages_for(stack: Stack) -> impl Iterator<Item = Package> {
    let dedicated = match stack {
        Stack::Backend => BACKEND_PACKAGES,
        Stack::Frontend => FRONTEND_PACKAGES,
    };
    dedicated.iter().chain(SHARED_PACKAGES).copied()
}

pub(crate) fn join_names<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stack {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VALID_STACKS
            .iter()
            .copied()
            .find(|stack| stack.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStack(s.to_string()))
    }
}

impl FromStr for Level {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VALID_LEVELS
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidLevel(s.to_string()))
    }
}

impl FromStr for Package {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Package::ALL
            .iter()
            .copied()
            .find(|package| package.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidPackage(s.to_string()))
    }
}
