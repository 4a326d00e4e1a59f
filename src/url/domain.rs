use crate::url::CrawlScope;
use url::Url;

/// Converts a host to its canonical domain or subdomain
///
/// Hosts with more than one dot are cut down to their last two labels
/// ([`CrawlScope::Domain`]) or last three labels ([`CrawlScope::Subdomain`]).
/// Hosts with at most one dot are returned unchanged.
///
/// # Examples
///
/// ```
/// use getver::url::{to_domain, CrawlScope};
///
/// assert_eq!(to_domain("a.b.c.example.com", CrawlScope::Domain), "example.com");
/// assert_eq!(to_domain("a.b.c.example.com", CrawlScope::Subdomain), "c.example.com");
/// assert_eq!(to_domain("localhost", CrawlScope::Domain), "localhost");
/// ```
pub fn to_domain(host: &str, scope: CrawlScope) -> String {
    if host.matches('.').count() > 1 {
        let labels: Vec<&str> = host.split('.').collect();
        let keep = scope.label_count().min(labels.len());
        labels[labels.len() - keep..].join(".")
    } else {
        host.to_string()
    }
}

/// Returns `host[:port]` for a URL, or an empty string if it has no host
pub fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

/// Keeps only the links that stay on the same domain or subdomain as `root`
///
/// Absolute links are kept when their canonical host matches the root's.
/// Site-relative links (`/path`) are always kept and resolved against the
/// root's scheme and authority. Protocol-relative links (`//host/path`) get
/// the root's scheme and then go through the same host comparison, so a
/// `//` link to another site is dropped rather than admitted unchecked.
/// Links that fail to parse are dropped.
///
/// # Arguments
///
/// * `links` - Links as produced by the link extractor
/// * `root` - The page the links were found on
/// * `scope` - Whether to compare domains or subdomains
///
/// # Returns
///
/// Absolute URLs, in input order
pub fn same_domain(links: &[String], root: &Url, scope: CrawlScope) -> Vec<String> {
    let root_domain = to_domain(root.host_str().unwrap_or_default(), scope);
    let origin = format!("{}://{}", root.scheme(), authority(root));

    let mut result = Vec::new();
    for link in links {
        let absolute = if link.starts_with("//") {
            format!("{}:{}", root.scheme(), link)
        } else if link.starts_with('/') {
            result.push(format!("{}{}", origin, link));
            continue;
        } else {
            link.clone()
        };

        let parsed = match Url::parse(&absolute) {
            Ok(u) => u,
            Err(e) => {
                tracing::trace!("Dropping unparsable link {}: {}", link, e);
                continue;
            }
        };

        let host = parsed.host_str().unwrap_or_default();
        if to_domain(host, scope) == root_domain {
            result.push(absolute);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Url {
        Url::parse("https://www.example.com/docs/").unwrap()
    }

    fn links(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_to_domain_ignoring_subdomain() {
        assert_eq!(to_domain("a.b.c.example.com", CrawlScope::Domain), "example.com");
        assert_eq!(to_domain("www.example.com", CrawlScope::Domain), "example.com");
    }

    #[test]
    fn test_to_domain_respecting_subdomain() {
        assert_eq!(
            to_domain("a.b.c.example.com", CrawlScope::Subdomain),
            "c.example.com"
        );
        assert_eq!(
            to_domain("docs.example.com", CrawlScope::Subdomain),
            "docs.example.com"
        );
    }

    #[test]
    fn test_to_domain_short_hosts_unchanged() {
        assert_eq!(to_domain("localhost", CrawlScope::Domain), "localhost");
        assert_eq!(to_domain("example.com", CrawlScope::Domain), "example.com");
        assert_eq!(to_domain("", CrawlScope::Subdomain), "");
    }

    #[test]
    fn test_authority_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(authority(&url), "127.0.0.1:8080");

        let url = Url::parse("https://example.com:443/page").unwrap();
        assert_eq!(authority(&url), "example.com");
    }

    #[test]
    fn test_keeps_same_domain_links() {
        let result = same_domain(
            &links(&["https://example.com/a", "http://blog.example.com/b"]),
            &root(),
            CrawlScope::Domain,
        );
        assert_eq!(
            result,
            vec!["https://example.com/a", "http://blog.example.com/b"]
        );
    }

    #[test]
    fn test_drops_foreign_links() {
        let result = same_domain(
            &links(&["https://other.org/a", "https://example.com.evil.net/"]),
            &root(),
            CrawlScope::Domain,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_subdomain_scope_is_stricter() {
        let result = same_domain(
            &links(&["https://blog.example.com/b", "https://www.example.com/c"]),
            &root(),
            CrawlScope::Subdomain,
        );
        assert_eq!(result, vec!["https://www.example.com/c"]);
    }

    #[test]
    fn test_resolves_site_relative_links() {
        let result = same_domain(&links(&["/download"]), &root(), CrawlScope::Domain);
        assert_eq!(result, vec!["https://www.example.com/download"]);
    }

    #[test]
    fn test_resolves_site_relative_links_with_port() {
        let root = Url::parse("http://127.0.0.1:3000/").unwrap();
        let result = same_domain(&links(&["/news.html"]), &root, CrawlScope::Domain);
        assert_eq!(result, vec!["http://127.0.0.1:3000/news.html"]);
    }

    #[test]
    fn test_protocol_relative_links_to_other_sites_are_dropped() {
        let result = same_domain(
            &links(&["//example.com/a", "//other.org/b"]),
            &root(),
            CrawlScope::Domain,
        );
        assert_eq!(result, vec!["https://example.com/a"]);
    }

    #[test]
    fn test_drops_unparsable_links() {
        let result = same_domain(&links(&["http://", "not a url"]), &root(), CrawlScope::Domain);
        assert!(result.is_empty());
    }
}
