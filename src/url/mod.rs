//! URL handling module for Page-Keeper
//!
//! This module decides which command-line links are fetchable and derives
//! the file name a page is stored under.

mod domain;

use crate::{UrlError, UrlResult};
use url::Url;

pub use domain::{domain_file_name, extract_domain};

/// Schemes the fetcher is allowed to request
const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];

/// Returns true if `s` parses as an absolute URL with a host
///
/// Scheme restriction is not applied here; see [`is_supported_scheme`].
/// Malformed input simply yields `false`.
///
/// # Examples
///
/// ```
/// use page_keeper::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/page"));
/// assert!(is_valid_url("ftp://example.com/file"));
/// assert!(!is_valid_url("invalid-url"));
/// assert!(!is_valid_url(""));
/// ```
pub fn is_valid_url(s: &str) -> bool {
    Url::parse(s).map(|url| url.has_host()).unwrap_or(false)
}

/// Returns true if the URL uses exactly `http` or `https`
pub fn is_supported_scheme(url: &Url) -> bool {
    SUPPORTED_SCHEMES.contains(&url.scheme())
}

/// Parses a link and checks that it can be fetched
///
/// # Returns
///
/// * `Ok(Url)` - An absolute http(s) URL with a host
/// * `Err(UrlError)` - The link is not a valid URL or uses another scheme
pub fn validate_link(link: &str) -> UrlResult<Url> {
    let link = link.trim();
    if !is_valid_url(link) {
        return Err(UrlError::Invalid(link.to_string()));
    }

    let url = Url::parse(link).map_err(|e| UrlError::Invalid(format!("{link}: {e}")))?;
    if !is_supported_scheme(&url) {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    Ok(url)
}
