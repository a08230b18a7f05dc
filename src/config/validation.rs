use crate::config::types::{
    Config, CrawlerConfig, IndexConfig, LinkConfig, StoreConfig, UserAgentConfig,
};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_link_config(&config.links)?;
    validate_store_config(&config.store)?;
    validate_index_config(&config.index)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    // max_depth and max_pages are unsigned; 0 pages means "crawl nothing"

    let seed = Url::parse(&config.seed_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed_url, e))
    })?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use HTTP or HTTPS",
            config.seed_url
        )));
    }

    if seed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            config.seed_url
        )));
    }

    if config.keyword.trim().is_empty() {
        return Err(ConfigError::Validation(
            "keyword cannot be empty".to_string(),
        ));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.fetch_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_ms must be >= 100ms, got {}ms",
            config.fetch_timeout_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates link filter configuration
fn validate_link_config(config: &LinkConfig) -> ConfigResult<()> {
    if let Some(site) = &config.site {
        validate_site_pattern(site)?;
    }

    if !config.path_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "path_prefix must start with '/', got '{}'",
            config.path_prefix
        )));
    }

    if config.excluded_path_chars.contains(&'/') {
        return Err(ConfigError::Validation(
            "excluded_path_chars cannot contain '/'".to_string(),
        ));
    }

    Ok(())
}

/// Validates document store configuration
fn validate_store_config(config: &StoreConfig) -> ConfigResult<()> {
    if config.documents_dir.is_empty() {
        return Err(ConfigError::Validation(
            "documents_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates ranking parameters
fn validate_index_config(config: &IndexConfig) -> ConfigResult<()> {
    if config.k1 <= 0.0 || !config.k1.is_finite() {
        return Err(ConfigError::Validation(format!(
            "k1 must be a positive number, got {}",
            config.k1
        )));
    }

    if !(0.0..=1.0).contains(&config.b) {
        return Err(ConfigError::Validation(format!(
            "b must be between 0 and 1, got {}",
            config.b
        )));
    }

    if config.max_results < 1 {
        return Err(ConfigError::Validation(format!(
            "max_results must be >= 1, got {}",
            config.max_results
        )));
    }

    Ok(())
}

/// Validates a site pattern (supports a leading "*." wildcard)
fn validate_site_pattern(pattern: &str) -> ConfigResult<()> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Site pattern cannot be empty".to_string(),
        ));
    }

    let host = pattern.strip_prefix("*.").unwrap_or(pattern);

    if host.is_empty() {
        return Err(ConfigError::InvalidPattern(format!(
            "Site pattern '{}' has no host",
            pattern
        )));
    }

    if !host
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Site '{}' contains invalid characters",
            pattern
        )));
    }

    if host.starts_with('.')
        || host.ends_with('.')
        || host.starts_with('-')
        || host.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Site '{}' cannot start or end with '.' or '-'",
            pattern
        )));
    }

    if host.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Site '{}' cannot contain consecutive dots",
            pattern
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> ConfigResult<()> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
