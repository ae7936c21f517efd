use crate::output::traits::{Reporter, Severity};
use colored::Colorize;

/// Prefix put in front of every error line
const ERROR_PREFIX: &str = "[ERR]";

/// Formats `message` for the console: green for info, red with a prefix for errors
pub fn colorize(message: &str, severity: Severity) -> String {
    match severity {
        Severity::Info => message.green().to_string(),
        Severity::Error => format!("{ERROR_PREFIX} {message}").red().to_string(),
    }
}

/// Reporter writing info lines to stdout and error lines to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, severity: Severity, message: &str) {
        let line = colorize(message, severity);
        match severity {
            Severity::Info => println!("{line}"),
            Severity::Error => eprintln!("{line}"),
        }
    }
}
