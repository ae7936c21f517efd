//! Fetch module: the page-fetch pipeline
//!
//! This module contains:
//! - HTTP fetching with exponential-backoff retry on transport failures
//! - Link and image counting for the optional metadata line
//! - The orchestrator that runs one task per link under a global deadline

mod coordinator;
mod fetcher;
mod metadata;

pub use coordinator::{FetchCommand, FetchRequest};
pub use fetcher::{
    build_http_client, Fetcher, HttpOutcome, RawResponse, ReqwestTransport, RetryPolicy,
    Transport, TransportError,
};
pub use metadata::{extract_metadata, PageMetadata};
