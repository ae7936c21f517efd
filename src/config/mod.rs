//! Configuration module for Page-Keeper
//!
//! Two layers of configuration exist:
//!
//! - [`RunConfig`]: per-invocation limits (timeout, link cap, metadata flag)
//!   built from command-line options and validated before anything is fetched.
//! - [`Settings`]: optional TOML file with HTTP client and output settings.
//!
//! # Example
//!
//! ```
//! use page_keeper::config::{RunConfig, RunOptions};
//!
//! let options = RunOptions {
//!     set_max_timeout: Some(2.0),
//!     ..RunOptions::default()
//! };
//! let config = RunConfig::from_options(&options, 3).unwrap();
//! assert_eq!(config.timeout_minutes, 2.0);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    HttpSettings, OutputSettings, RunConfig, RunOptions, Settings, DEFAULT_LINK_LIMIT,
    DEFAULT_TIMEOUT_MINUTES, MAX_TIMEOUT_MINUTES,
};

// Re-export parser and validation functions
pub use parser::load_settings;
pub use validation::{validate_run_options, validate_settings};
