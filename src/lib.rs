//! Page-Keeper: fetch web pages and keep them for later browsing
//!
//! This crate fetches a handful of URLs concurrently, retrying transient
//! network failures with exponential backoff, optionally counts the links and
//! images on each page, and stores the raw HTML in a file named after the
//! page's domain.

pub mod config;
pub mod fetch;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error;

/// Main error type for Page-Keeper operations
#[derive(Debug, Error)]
pub enum KeeperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Maximum run time of {minutes} minute(s) reached")]
    DeadlineExceeded { minutes: f64 },

    #[error("Invalid task state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::TaskState,
        to: state::TaskState,
    },
}

/// Configuration-specific errors
///
/// Every variant is fatal: it is raised before any network activity starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(
        "Not allowed app timeout of {0}. Please provide positive number less than or equal to {max}",
        max = config::MAX_TIMEOUT_MINUTES
    )]
    InvalidTimeout(f64),

    #[error(
        "Links are limited to {limit}. Use flag --override-max-links if you want to proceed with unlimited links."
    )]
    TooManyLinks { count: usize, limit: usize },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Not an absolute URL with a host: {0}")]
    Invalid(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Result type alias for Page-Keeper operations
pub type Result<T> = std::result::Result<T, KeeperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{RunConfig, RunOptions, Settings};
pub use fetch::{FetchCommand, Fetcher, HttpOutcome};
pub use output::{Reporter, RunSummary, Severity};
pub use state::TaskState;
pub use crate::url::{domain_file_name, is_valid_url, validate_link};
