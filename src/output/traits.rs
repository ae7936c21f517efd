//! Reporter trait and severity levels

use std::fmt;

/// Severity of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A link was fetched and stored
    Info,

    /// A link was rejected or could not be fetched or stored
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Sink for user-facing result lines
///
/// Every input link produces exactly one call, unless the run is cut short
/// by its deadline. Implementations are shared by all fetch tasks.
pub trait Reporter: Send + Sync {
    /// Reports one formatted message
    fn report(&self, severity: Severity, message: &str);

    /// Reports an informational message
    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    /// Reports an error message
    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }
}
