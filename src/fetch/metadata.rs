//! Page metadata extraction
//!
//! Counts the externally navigable links and the images of a fetched page.
//! Parsing is lenient: malformed markup is repaired by the HTML5 parser and
//! never causes an error.

use chrono::{DateTime, Local};
use scraper::{Html, Selector};

/// Counts extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// `<a>` elements whose `href` starts with `http://` or `https://`
    pub link_count: usize,

    /// `<img>` elements with a non-empty `src`
    pub image_count: usize,

    /// When the counts were taken
    pub extracted_at: DateTime<Local>,
}

impl PageMetadata {
    /// Builds the leading part of a metadata success line for `link`
    pub fn summary_for(&self, link: &str) -> String {
        format!(
            "Visited page of {} at {} with num_of_links: {}, num_of_images: {},",
            link,
            self.extracted_at.to_rfc2822(),
            self.link_count,
            self.image_count
        )
    }
}

/// Extracts link and image counts from HTML
///
/// Relative and fragment links are not counted. Image `src` values are not
/// validated beyond being present and non-empty.
///
/// # Example
///
/// ```
/// use page_keeper::fetch::extract_metadata;
///
/// let html = r#"<a href="http://x.com">a</a><a href="/rel">b</a><img src="y.png">"#;
/// let metadata = extract_metadata(html);
/// assert_eq!(metadata.link_count, 1);
/// assert_eq!(metadata.image_count, 1);
/// ```
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    PageMetadata {
        link_count: count_external_links(&document),
        image_count: count_images(&document),
        extracted_at: Local::now(),
    }
}

fn count_external_links(document: &Html) -> usize {
    let Ok(selector) = Selector::parse("a[href]") else {
        return 0;
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.starts_with("http://") || href.starts_with("https://"))
        .count()
}

fn count_images(document: &Html) -> usize {
    let Ok(selector) = Selector::parse("img[src]") else {
        return 0;
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .filter(|src| !src.is_empty())
        .count()
}
