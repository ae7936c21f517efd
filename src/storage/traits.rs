//! Storage traits and error types

use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors that can occur while storing a page
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Cannot derive a file name from {0}")]
    MissingDomain(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for page storage backends
///
/// Implementations must be shareable across fetch tasks. Saving the same
/// domain twice replaces the earlier content.
pub trait PageStore: Send + Sync {
    /// Stores the HTML fetched from `url`
    ///
    /// # Returns
    ///
    /// The absolute path (or backend-specific location) the page was written to
    fn save(&self, url: &Url, html: &str) -> StorageResult<PathBuf>;
}
