//! Output module for reporting per-link results
//!
//! This module handles:
//! - The [`Reporter`] sink that receives one result line per link
//! - Colorized console output for the command-line tool
//! - The end-of-run [`RunSummary`]

mod console;
pub mod stats;
mod traits;

pub use console::{colorize, ConsoleReporter};
pub use stats::RunSummary;
pub use traits::{Reporter, Severity};
