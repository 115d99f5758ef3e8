use super::config::Config;
use crate::domain::{Stack, packages_for};
use clap::Parser;

/// Validate a structured log record and submit it to the collector.
#[derive(Parser, Debug, Clone)]
#[command(name = "logging-middleware", author, version)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// Print the accepted packages (for STACK when given) and exit
    #[arg(long)]
    pub list_packages: bool,

    /// Originating stack: backend | frontend
    #[arg(required_unless_present = "list_packages")]
    pub stack: Option<String>,

    /// Severity: debug | info | warn | error | fatal
    #[arg(required_unless_present = "list_packages")]
    pub level: Option<String>,

    /// Package tag, e.g. db, page, auth
    #[arg(required_unless_present = "list_packages")]
    pub package: Option<String>,

    /// Log message
    #[arg(required_unless_present = "list_packages")]
    pub message: Option<String>,
}

/// Plain-text listing of the package vocabulary, one stack per line.
pub fn render_packages(stack: Option<Stack>) -> String {
    let stacks: &[Stack] = match stack {
        Some(ref stack) => std::slice::from_ref(stack),
        None => crate::domain::VALID_STACKS,
    };

    stacks
        .iter()
        .map(|stack| {
            let names: Vec<&str> = packages_for(*stack).map(|p| p.as_str()).collect();
            format!("{stack}: {}\n", names.join(", "))
        })
        .collect()
}
