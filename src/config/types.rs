use crate::config::validation::validate_run_options;
use crate::ConfigResult;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default wall-clock budget for a whole run, in minutes
pub const DEFAULT_TIMEOUT_MINUTES: f64 = 5.0;

/// Largest wall-clock budget a run may ask for, in minutes
pub const MAX_TIMEOUT_MINUTES: f64 = 10.0;

/// Number of links accepted per run unless the cap is overridden
pub const DEFAULT_LINK_LIMIT: usize = 5;

/// Options recognised on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Include the metadata summary in each success line
    pub metadata: bool,

    /// Disable the link cap
    pub override_max_links: bool,

    /// Overall run budget in minutes
    pub set_max_timeout: Option<f64>,
}

/// Validated run-level configuration
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Wall-clock budget for the whole run, in minutes
    pub timeout_minutes: f64,

    /// Maximum number of links, `None` when the cap is overridden
    pub link_limit: Option<usize>,

    /// Whether success lines carry link and image counts
    pub metadata_enabled: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: DEFAULT_TIMEOUT_MINUTES,
            link_limit: Some(DEFAULT_LINK_LIMIT),
            metadata_enabled: false,
        }
    }
}

impl RunConfig {
    /// Builds the run configuration for `link_count` links
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidTimeout` - timeout outside (0, 10] minutes
    /// * `ConfigError::TooManyLinks` - more than 5 links without the override
    pub fn from_options(options: &RunOptions, link_count: usize) -> ConfigResult<Self> {
        validate_run_options(options, link_count)?;

        Ok(Self {
            timeout_minutes: options.set_max_timeout.unwrap_or(DEFAULT_TIMEOUT_MINUTES),
            link_limit: if options.override_max_links {
                None
            } else {
                Some(DEFAULT_LINK_LIMIT)
            },
            metadata_enabled: options.metadata,
        })
    }

    /// The run budget as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_minutes * 60.0)
    }
}

/// Settings loaded from an optional TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// HTTP client and retry settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HttpSettings {
    /// User agent sent with every request
    pub user_agent: String,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    pub connect_timeout_secs: u64,

    /// Retries after transport failures, on top of the first attempt
    pub max_retries: u32,

    /// First backoff delay; doubled after every retry (milliseconds)
    pub backoff_base_ms: u64,

    /// Redirect hops followed before giving up
    pub max_redirects: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: format!("page-keeper/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 5,
            backoff_base_ms: 1000,
            max_redirects: 10,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Directory the HTML files are written into
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}
