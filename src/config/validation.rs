use crate::config::types::{
    HttpSettings, OutputSettings, RunOptions, Settings, DEFAULT_LINK_LIMIT, MAX_TIMEOUT_MINUTES,
};
use crate::ConfigError;

/// Upper bound on `max-retries`; 2^10 seconds of backoff already exceeds any run budget
const MAX_RETRIES_LIMIT: u32 = 10;

/// Upper bound on `max-redirects`
const MAX_REDIRECTS_LIMIT: usize = 20;

/// Validates command-line options for a run over `link_count` links
///
/// The timeout is checked first, then the link cap.
pub fn validate_run_options(options: &RunOptions, link_count: usize) -> Result<(), ConfigError> {
    if let Some(timeout) = options.set_max_timeout {
        validate_timeout(timeout)?;
    }

    if !options.override_max_links && link_count > DEFAULT_LINK_LIMIT {
        return Err(ConfigError::TooManyLinks {
            count: link_count,
            limit: DEFAULT_LINK_LIMIT,
        });
    }

    Ok(())
}

/// Validates a run timeout in minutes; must lie in (0, 10]
fn validate_timeout(minutes: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons, so test for the accepted range
    if minutes > 0.0 && minutes <= MAX_TIMEOUT_MINUTES {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeout(minutes))
    }
}

/// Validates settings loaded from a TOML file
pub fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    validate_http_settings(&settings.http)?;
    validate_output_settings(&settings.output)?;
    Ok(())
}

fn validate_http_settings(settings: &HttpSettings) -> Result<(), ConfigError> {
    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if settings.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            settings.request_timeout_secs
        )));
    }

    if settings.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            settings.connect_timeout_secs
        )));
    }

    if settings.max_retries > MAX_RETRIES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= {}, got {}",
            MAX_RETRIES_LIMIT, settings.max_retries
        )));
    }

    if settings.backoff_base_ms < 1 {
        return Err(ConfigError::Validation(
            "backoff-base-ms must be >= 1".to_string(),
        ));
    }

    if settings.max_redirects > MAX_REDIRECTS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= {}, got {}",
            MAX_REDIRECTS_LIMIT, settings.max_redirects
        )));
    }

    Ok(())
}

fn validate_output_settings(settings: &OutputSettings) -> Result<(), ConfigError> {
    if settings.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
