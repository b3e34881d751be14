//! Configuration for the SafeSus API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use safesus_core::cache::{CacheConfig, DEFAULT_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default production API URL
pub const DEFAULT_API_URL: &str = "https://safesus.app/api";

/// Local development API URL
const DEVELOPMENT_API_URL: &str = "http://localhost:3000/api";

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development server
    Development,
    /// Production API
    #[default]
    Production,
}

impl Environment {
    /// Parse from the `SAFESUS_ENV` value
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            _ => Self::Production,
        }
    }

    /// Parse from environment variable
    pub fn from_env() -> Self {
        Self::parse(&env::var("SAFESUS_ENV").unwrap_or_default())
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://safesus.app/api`
    pub base_url: String,
    /// Supabase anonymous key, sent as the `apikey` header
    pub anon_key: Option<String>,
    /// Bearer token for the initial session
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    /// Request timeout
    #[serde(with = "secs")]
    pub timeout: Duration,
    /// Response cache time-to-live
    #[serde(with = "secs")]
    pub cache_ttl: Duration,
    /// Current environment
    pub environment: Environment,
}

mod secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            anon_key: None,
            access_token: None,
            timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SAFESUS_API_URL`: API base URL
    /// - `SAFESUS_ENV`: Environment (development/production)
    /// - `SAFESUS_TIMEOUT_SECS`: Request timeout in seconds
    /// - `SAFESUS_CACHE_TTL_SECS`: Response cache TTL in seconds
    /// - `SUPABASE_ANON_KEY`: Anonymous key for public endpoints
    /// - `SAFESUS_ACCESS_TOKEN`: Bearer token for an existing session
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let environment = Environment::parse(&lookup("SAFESUS_ENV").unwrap_or_default());

        let base_url = lookup("SAFESUS_API_URL").unwrap_or_else(|| match environment {
            Environment::Development => DEVELOPMENT_API_URL.to_string(),
            Environment::Production => DEFAULT_API_URL.to_string(),
        });

        let timeout = parse_secs(&lookup, "SAFESUS_TIMEOUT_SECS")?.unwrap_or(Duration::from_secs(30));
        let cache_ttl = parse_secs(&lookup, "SAFESUS_CACHE_TTL_SECS")?
            .unwrap_or(Duration::from_secs(DEFAULT_TTL_SECS));

        let config = Self {
            base_url,
            anon_key: lookup("SUPABASE_ANON_KEY").filter(|k| !k.is_empty()),
            access_token: lookup("SAFESUS_ACCESS_TOKEN").filter(|t| !t.is_empty()),
            timeout,
            cache_ttl,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create development configuration (local API server)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: DEVELOPMENT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            environment: Environment::Development,
            ..Self::default()
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set the initial session token
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the cache TTL
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Cache configuration derived from this config
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::with_ttl(self.cache_ttl)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> ApiResult<Option<Duration>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| ApiError::config(format!("{key} must be a whole number of seconds, got {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://safesus.app/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert!(config.base_url.contains("localhost"));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("dev"), Environment::Development);
        assert_eq!(Environment::parse(" Local "), Environment::Development);
        assert_eq!(Environment::parse("staging"), Environment::Production);
        assert_eq!(Environment::parse(""), Environment::Production);
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.anon_key.is_none());
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_from_lookup_reads_vars() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SAFESUS_API_URL", "https://staging.safesus.app/api"),
            ("SAFESUS_TIMEOUT_SECS", "5"),
            ("SAFESUS_CACHE_TTL_SECS", "0"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("SAFESUS_ACCESS_TOKEN", "token"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://staging.safesus.app/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert_eq!(config.anon_key.as_deref(), Some("anon"));
        assert_eq!(config.access_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_from_lookup_development_url() {
        let config = ClientConfig::from_lookup(lookup(&[("SAFESUS_ENV", "development")])).unwrap();
        assert_eq!(config.base_url, DEVELOPMENT_API_URL);
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let err = ClientConfig::from_lookup(lookup(&[("SAFESUS_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:8080/api")
            .with_timeout(Duration::from_secs(60))
            .with_cache_ttl(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.cache_config().ttl_secs, 5);
    }

    #[test]
    fn test_validation() {
        let valid = ClientConfig::default();
        assert!(valid.validate().is_ok());

        let invalid = ClientConfig::default().with_base_url("");
        assert!(invalid.validate().is_err());

        let invalid = ClientConfig::default().with_base_url("ftp://safesus.app");
        assert!(invalid.validate().is_err());

        let invalid = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_access_token_not_serialized() {
        let config = ClientConfig::default().with_access_token("secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
