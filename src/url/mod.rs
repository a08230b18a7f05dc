//! URL handling module for Ripple-Search
//!
//! This module provides URL normalization, host extraction, site pattern
//! matching, and the `LinkFilter` deciding which discovered links the
//! crawler may follow.

mod domain;
mod matcher;
mod normalize;

use crate::config::LinkConfig;
use crate::{UrlError, UrlResult};
use ::url::Url;

pub use domain::extract_domain;
pub use matcher::matches_site;
pub use normalize::normalize_url;

/// Decides whether a discovered link is a same-site article link
///
/// A link is accepted when:
/// - it uses HTTP or HTTPS
/// - its host matches the site pattern
/// - its path starts with the configured prefix
/// - its path contains none of the excluded characters (by default `:`,
///   which marks namespaced pages such as `/wiki/Talk:Rust`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFilter {
    site: String,
    path_prefix: String,
    excluded_path_chars: Vec<char>,
}

impl LinkFilter {
    /// Creates a filter from explicit parts
    pub fn new(
        site: impl Into<String>,
        path_prefix: impl Into<String>,
        excluded_path_chars: Vec<char>,
    ) -> Self {
        Self {
            site: site.into(),
            path_prefix: path_prefix.into(),
            excluded_path_chars,
        }
    }

    /// Builds the filter for a crawl, defaulting the site to the seed's host
    ///
    /// # Returns
    ///
    /// * `Ok(LinkFilter)` - The filter for this crawl
    /// * `Err(UrlError)` - The seed has no host and no site was configured
    pub fn for_seed(seed: &Url, config: &LinkConfig) -> UrlResult<Self> {
        let site = match &config.site {
            Some(site) => site.clone(),
            None => extract_domain(seed).ok_or(UrlError::MissingDomain)?,
        };

        Ok(Self::new(
            site,
            config.path_prefix.clone(),
            config.excluded_path_chars.clone(),
        ))
    }

    /// The site pattern this filter accepts
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Returns true if the crawler may follow this URL
    pub fn accepts(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        let Some(host) = url.host_str() else {
            return false;
        };

        if !matches_site(&self.site, host) {
            return false;
        }

        let path = url.path();
        path.starts_with(&self.path_prefix)
            && !path.chars().any(|c| self.excluded_path_chars.contains(&c))
    }
}
