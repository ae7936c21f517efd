use crate::config::types::Settings;
use crate::config::validation::validate_settings;
use crate::ConfigError;
use std::path::Path;

/// Loads and validates a settings file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use page_keeper::config::load_settings;
///
/// let settings = load_settings(Path::new("page-keeper.toml")).unwrap();
/// println!("Max retries: {}", settings.http.max_retries);
/// ```
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let settings: Settings = toml::from_str(&content)?;

    validate_settings(&settings)?;

    Ok(settings)
}
