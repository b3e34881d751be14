//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{CitiesApi, LiveApi, NotificationsApi, PinsApi, TipsApi, WaitlistApi};
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response, Url};
use safesus_core::cache::ResponseCache;
use safesus_telemetry::{metrics, Timer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header for Supabase
const APIKEY_HEADER: &str = "apikey";

/// User agent sent with every request
const CLIENT_USER_AGENT: &str = concat!("safesus-api-client/", env!("CARGO_PKG_VERSION"));

/// SafeSus API client.
///
/// Cloning is cheap; clones share the HTTP pool, the response cache and the
/// session token.
#[derive(Clone)]
pub struct SafeSusClient {
    inner: Client,
    config: Arc<ClientConfig>,
    base: Url,
    cache: Arc<ResponseCache>,
    session: Arc<RwLock<Option<String>>>,
}

impl SafeSusClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        let cache = Arc::new(ResponseCache::new(config.cache_config()));
        Self::with_cache(config, cache)
    }

    /// Create a client around an existing response cache
    pub fn with_cache(config: ClientConfig, cache: Arc<ResponseCache>) -> ApiResult<Self> {
        config.validate()?;

        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        // Add API key header if available
        if let Some(ref key) = config.anon_key {
            match HeaderValue::from_str(key) {
                Ok(value) => {
                    default_headers.insert(APIKEY_HEADER, value);
                }
                Err(_) => warn!("SUPABASE_ANON_KEY is not a valid header value, ignoring"),
            }
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let session = Arc::new(RwLock::new(config.access_token.clone()));

        Ok(Self {
            inner,
            config: Arc::new(config),
            base,
            cache,
            session,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The response cache shared by this client and its clones
    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Drop every cached response
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Start a session with a bearer token.
    ///
    /// Cached responses belong to the previous session and are dropped.
    pub fn set_session(&self, token: impl Into<String>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
        self.cache.clear();
        debug!("Session started, response cache cleared");
    }

    /// End the session and drop cached responses
    pub fn clear_session(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.cache.clear();
        debug!("Session cleared, response cache cleared");
    }

    /// Returns true if a bearer token is set
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access city endpoints
    #[must_use]
    pub fn cities(&self) -> CitiesApi {
        CitiesApi::new(self.clone())
    }

    /// Access live/nearby endpoints
    #[must_use]
    pub fn live(&self) -> LiveApi {
        LiveApi::new(self.clone())
    }

    /// Access tip endpoints
    #[must_use]
    pub fn tips(&self) -> TipsApi {
        TipsApi::new(self.clone())
    }

    /// Access pin endpoints
    #[must_use]
    pub fn pins(&self) -> PinsApi {
        PinsApi::new(self.clone())
    }

    /// Access notification endpoints
    #[must_use]
    pub fn notifications(&self) -> NotificationsApi {
        NotificationsApi::new(self.clone())
    }

    /// Access waitlist endpoints
    #[must_use]
    pub fn waitlist(&self) -> WaitlistApi {
        WaitlistApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Build an absolute URL from path segments and query pairs.
    ///
    /// Segments and query values are percent-encoded.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Perform a GET request, bypassing the cache
    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = self.url(segments, query)?;
        let value = self.execute(Method::GET, url, Option::<&()>::None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Perform a GET request through the response cache.
    ///
    /// The cache key is the full request URL. Only successful responses are
    /// cached.
    pub async fn get_cached<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = self.url(segments, query)?;
        let key = url.to_string();
        let mut fetched = false;

        let value: Value = self
            .cache
            .cached(&key, || {
                fetched = true;
                self.execute(Method::GET, url, Option::<&()>::None)
            })
            .await?;

        metrics().increment(if fetched { "cache.misses" } else { "cache.hits" });
        Ok(serde_json::from_value(value)?)
    }

    /// Perform a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: Option<&B>,
    ) -> ApiResult<T> {
        let url = self.url(segments, &[])?;
        let value = self.execute(Method::POST, url, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Perform a DELETE request
    pub async fn delete<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: Option<&B>,
    ) -> ApiResult<T> {
        let url = self.url(segments, &[])?;
        let value = self.execute(Method::DELETE, url, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Perform a PATCH request without a body
    pub async fn patch<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.url(segments, &[])?;
        let value = self.execute(Method::PATCH, url, Option::<&()>::None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send one request and decode the JSON body
    #[instrument(skip_all, fields(method = %method, url = %url, request_id))]
    async fn execute<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> ApiResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let mut request = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, &request_id);

        if let Some(token) = self.session.read().unwrap_or_else(PoisonError::into_inner).as_deref() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        metrics().increment("api.requests");
        let timer = Timer::start("api.latency_ms");

        let result = match request.send().await {
            Ok(response) => self.handle_response(response).await,
            Err(e) => Err(ApiError::Request(e)),
        };
        let elapsed = timer.stop();

        match &result {
            Ok(_) => debug!(elapsed_ms = elapsed.as_millis(), "Request succeeded"),
            Err(e) => {
                metrics().increment("api.errors");
                warn!(elapsed_ms = elapsed.as_millis(), error = %e, "Request failed");
            }
        }

        result
    }

    /// Handle HTTP response and decode the body
    async fn handle_response(&self, response: Response) -> ApiResult<Value> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(ApiError::Request)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_response(
                status.as_u16(),
                status.canonical_reason(),
                &body,
            ))
        }
    }
}

impl std::fmt::Debug for SafeSusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeSusClient")
            .field("base_url", &self.config.base_url)
            .field("has_session", &self.has_session())
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> SafeSusClient {
        SafeSusClient::with_config(ClientConfig::default().with_base_url(base)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let config = ClientConfig::development();
        let client = SafeSusClient::with_config(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_url_joins_segments() {
        let client = client("https://safesus.app/api");
        let url = client.url(&["city", "chiang-mai"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://safesus.app/api/city/chiang-mai");
    }

    #[test]
    fn test_url_handles_trailing_slash() {
        let client = client("https://safesus.app/api/");
        let url = client.url(&["cities"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://safesus.app/api/cities");
    }

    #[test]
    fn test_url_encodes_query_and_segments() {
        let client = client("https://safesus.app/api");
        let url = client
            .url(&["search-tips"], &[("q", "night market & bars".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://safesus.app/api/search-tips?q=night+market+%26+bars"
        );

        let url = client.url(&["city", "a/b"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://safesus.app/api/city/a%2Fb");
    }

    #[test]
    fn test_session_changes_clear_cache() {
        let client = client("https://safesus.app/api");
        client.cache().set("k", serde_json::json!(1));

        client.set_session("token");
        assert!(client.has_session());
        assert!(client.cache().is_empty());

        client.cache().set("k", serde_json::json!(1));
        client.clear_session();
        assert!(!client.has_session());
        assert!(client.cache().is_empty());
    }

    #[test]
    fn test_initial_session_from_config() {
        let config = ClientConfig::default().with_access_token("abc");
        let client = SafeSusClient::with_config(config).unwrap();
        assert!(client.has_session());
    }

    #[test]
    fn test_clones_share_cache() {
        let a = client("https://safesus.app/api");
        let b = a.clone();
        a.cache().set("k", serde_json::json!(1));
        assert_eq!(b.cache().len(), 1);
    }
}
