//! Storage module for persisting fetched pages
//!
//! Pages are written as one HTML file per domain. The orchestrator only sees
//! the [`PageStore`] trait so tests can swap in an in-memory store.

mod file;
mod traits;

pub use file::FileStore;
pub use traits::{PageStore, StorageError, StorageResult};
