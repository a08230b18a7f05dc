/// Checks if a host belongs to a site pattern
///
/// Two kinds of pattern are supported:
/// 1. Exact host: "en.wikipedia.org" matches only "en.wikipedia.org"
/// 2. Wildcard: "*.wikipedia.org" matches "wikipedia.org" itself and any
///    subdomain of it, however deeply nested
///
/// Comparison ignores ASCII case on both sides.
///
/// # Examples
///
/// ```
/// use ripple_search::url::matches_site;
///
/// assert!(matches_site("en.wikipedia.org", "en.wikipedia.org"));
/// assert!(!matches_site("en.wikipedia.org", "de.wikipedia.org"));
///
/// assert!(matches_site("*.wikipedia.org", "wikipedia.org"));
/// assert!(matches_site("*.wikipedia.org", "de.wikipedia.org"));
/// assert!(!matches_site("*.wikipedia.org", "wikipedia.com"));
/// ```
pub fn matches_site(pattern: &str, host: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    match pattern.strip_prefix("*.") {
        Some(base) => host == base || host.ends_with(&format!(".{}", base)),
        None => host == pattern,
    }
}
