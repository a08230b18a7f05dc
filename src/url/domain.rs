use url::Url;

/// Extracts the lowercase host from a URL
///
/// Returns `None` for URLs without a host, which cannot be fetched.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use ripple_search::url::extract_domain;
///
/// let url = Url::parse("https://EN.Wikipedia.org/wiki/Rust").unwrap();
/// assert_eq!(extract_domain(&url), Some("en.wikipedia.org".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://en.wikipedia.org/wiki/Page").unwrap();
        assert_eq!(extract_domain(&url), Some("en.wikipedia.org".to_string()));
    }

    #[test]
    fn test_port_is_not_part_of_domain() {
        let url = Url::parse("http://127.0.0.1:8080/wiki/A").unwrap();
        assert_eq!(extract_domain(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_mixed_case_lowered() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(extract_domain(&url), None);
    }
}
