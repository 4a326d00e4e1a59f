//! Lightweight link extraction for crawled pages
//!
//! Pages are not parsed into a DOM. Link targets are found by splitting the
//! raw text on `href=` and by scanning for absolute URLs, which is enough to
//! discover the download and release-note pages of a project site.

use regex::Regex;

/// Matches absolute `http`, `https` and `ftp` URLs with a dotted host
const ABSOLUTE_URL_PATTERN: &str =
    r"(?:https?|ftp)://[\w\-]+(?:\.[\w\-]+)+(?:[\w\-.,@?^=%&;:/~+#]*[\w\-@?^=%&;/~+#])?";

/// Extracts link targets from raw page text
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    /// Scheme given to protocol-relative (`//host/path`) links
    default_scheme: String,

    /// Compiled absolute URL pattern
    absolute: Regex,
}

impl LinkExtractor {
    /// Creates an extractor that gives `default_scheme` to protocol-relative links
    ///
    /// # Example
    ///
    /// ```
    /// use getver::crawler::LinkExtractor;
    ///
    /// let extractor = LinkExtractor::new("https").unwrap();
    /// let links = extractor.extract_links(r#"<a href="/download">Get it</a>"#);
    /// assert_eq!(links, vec!["/download".to_string()]);
    /// ```
    pub fn new(default_scheme: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            default_scheme: default_scheme.to_string(),
            absolute: Regex::new(ABSOLUTE_URL_PATTERN)?,
        })
    }

    /// Extracts every link found in `data`
    ///
    /// # Link Extraction Rules
    ///
    /// 1. For every `href=` attribute, the character right after `=` is taken
    ///    as the quote; the value runs up to the next occurrence of it.
    ///    Values without a closing quote or containing a space are skipped.
    /// 2. Values without `://` are relative: `//x` gets the default scheme,
    ///    `/x` is kept as is, anything else is prefixed with `/`.
    ///    `javascript:`, `mailto:`, `tel:`, `data:` and fragment-only values
    ///    are skipped.
    /// 3. Every absolute `http`/`https`/`ftp` URL anywhere in the text is
    ///    added as well, even when it was already found in step 1.
    ///
    /// Duplicates are kept; the crawler deduplicates visits.
    pub fn extract_links(&self, data: &str) -> Vec<String> {
        let mut links = Vec::new();

        // Relative links first. The text before the first "href=" is not a value.
        for fragment in data.split("href=").skip(1) {
            if let Some(link) = self.relative_link(fragment) {
                links.push(link);
            }
        }

        // Then the absolute links
        links.extend(self.absolute.find_iter(data).map(|m| m.as_str().to_string()));

        links
    }

    /// Extracts the links that look like crawlable pages
    pub fn sub_pages(&self, data: &str) -> Vec<String> {
        self.extract_links(data)
            .into_iter()
            .filter(|link| link_is_page(link))
            .collect()
    }

    /// Turns the text following one `href=` into a relative link
    fn relative_link(&self, fragment: &str) -> Option<String> {
        let mut chars = fragment.chars();
        let quote = chars.next()?;
        let rest = chars.as_str();
        let value = &rest[..rest.find(quote)?];

        if value.contains("://") || value.contains(' ') || is_skipped_target(value) {
            return None;
        }

        if value.starts_with("//") {
            Some(format!("{}:{}", self.default_scheme, value))
        } else if value.starts_with('/') {
            Some(value.to_string())
        } else {
            Some(format!("/{}", value))
        }
    }
}

/// Targets that never lead to another page
fn is_skipped_target(value: &str) -> bool {
    value.starts_with('#')
        || value.starts_with("javascript:")
        || value.starts_with("mailto:")
        || value.starts_with("tel:")
        || value.starts_with("data:")
}

/// Judges whether a link looks like a crawlable page rather than an asset
///
/// # Rules
///
/// 1. Ends with `.htm` or `.html` -> page
/// 2. Contains `?` -> not a page
/// 3. The part after the last `/` has no `.` -> page
/// 4. Anything else -> not a page
///
/// # Examples
///
/// ```
/// use getver::crawler::link_is_page;
///
/// assert!(link_is_page("/docs/index.html"));
/// assert!(link_is_page("/about"));
/// assert!(!link_is_page("/img/logo.png"));
/// assert!(!link_is_page("/download?id=1"));
/// ```
pub fn link_is_page(link: &str) -> bool {
    if link.ends_with(".html") || link.ends_with(".htm") {
        return true;
    }

    if link.contains('?') {
        return false;
    }

    match link.rfind('/') {
        Some(pos) => !link[pos..].contains('.'),
        None => false,
    }
}
