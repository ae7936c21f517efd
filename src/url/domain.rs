use url::Url;

/// Extension appended to stored pages
const PAGE_EXTENSION: &str = "html";

/// Extracts the domain from a URL, without a leading `www.`
///
/// The host is lowercased by the URL parser already. Ports, paths, queries
/// and fragments are not part of the domain.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_keeper::url::extract_domain;
///
/// let url = Url::parse("https://www.example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    let domain = host.strip_prefix("www.").unwrap_or(&host);

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

/// Derives the file name a page is stored under: `<domain>.html`
///
/// Two links on the same domain map to the same file.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_keeper::url::domain_file_name;
///
/// let url = Url::parse("http://www.example.com/a/b").unwrap();
/// assert_eq!(domain_file_name(&url), Some("example.com.html".to_string()));
/// ```
pub fn domain_file_name(url: &Url) -> Option<String> {
    extract_domain(url).map(|domain| format!("{domain}.{PAGE_EXTENSION}"))
}
