use crate::UrlError;
use url::Url;

/// Scheme assumed when the root URL is given without one
const FALLBACK_SCHEME: &str = "http";

/// Normalizes the crawl root given on the command line
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. If there is no `://`, prefix `http://`
/// 3. Parse the URL; reject if malformed
/// 4. Only HTTP and HTTPS are crawlable
/// 5. A host is required
///
/// # Examples
///
/// ```
/// use getver::url::normalize_root;
///
/// let url = normalize_root("golang.org").unwrap();
/// assert_eq!(url.as_str(), "http://golang.org/");
/// ```
pub fn normalize_root(input: &str) -> Result<Url, UrlError> {
    let input = input.trim();
    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("{}://{}", FALLBACK_SCHEME, input)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    Ok(url)
}

/// Scheme used for protocol-relative links found during a crawl of `root`
pub fn default_scheme(root: &Url) -> &'static str {
    if root.scheme() == "https" {
        "https"
    } else {
        FALLBACK_SCHEME
    }
}
