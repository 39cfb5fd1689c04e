//! Inventory API client implementation.
//!
//! Plain JSON over HTTP via `reqwest` 0.13. The catalog is cached with
//! `moka` (5-minute TTL) and invalidated whenever a product is created.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use shoeworld_core::ShoeId;
use tracing::{debug, instrument};

use crate::config::ShoeWorldConfig;

use super::ShoeWorldError;
use super::cache::{CacheKey, CacheValue};
use super::types::{ApiMessage, LoginRequest, LoginResponse, NewShoe, NewUser, Shoe};

// =============================================================================
// ShoeWorldClient
// =============================================================================

/// Client for the Shoe World inventory API.
///
/// Cheap to clone; all clones share one HTTP connection pool and one catalog
/// cache, so one upstream fetch serves every session for the TTL window.
#[derive(Clone)]
pub struct ShoeWorldClient {
    inner: Arc<ShoeWorldClientInner>,
}

struct ShoeWorldClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl ShoeWorldClient {
    /// Create a new inventory API client.
    #[must_use]
    pub fn new(config: &ShoeWorldConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let base_url = config.base_url.as_str().trim_end_matches('/').to_string();

        Self {
            inner: Arc::new(ShoeWorldClientInner {
                client: reqwest::Client::new(),
                base_url,
                cache,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Read a response body, mapping non-success statuses to errors.
    async fn read_body(response: reqwest::Response) -> Result<String, ShoeWorldError> {
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShoeWorldError::RateLimited(retry_after));
        }

        let text = response.text().await?;

        if !status.is_success() {
            // The API wraps failures as {"message": ...}; fall back to a
            // body excerpt when it does not
            let message = serde_json::from_str::<ApiMessage>(&text)
                .map(|body| body.message)
                .unwrap_or_else(|_| text.chars().take(200).collect());

            if status.is_server_error() {
                tracing::error!(status = %status, message = %message, "inventory API failure");
            } else {
                tracing::warn!(status = %status, message = %message, "inventory API rejected request");
            }

            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    ShoeWorldError::Unauthorized(message)
                }
                reqwest::StatusCode::NOT_FOUND => ShoeWorldError::NotFound(message),
                _ => ShoeWorldError::Api { status, message },
            });
        }

        Ok(text)
    }

    /// Read a response body and parse it as JSON.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ShoeWorldError> {
        let text = Self::read_body(response).await?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse inventory API response"
                );
                Err(ShoeWorldError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Get the full catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self))]
    pub async fn list_shoes(&self) -> Result<Vec<Shoe>, ShoeWorldError> {
        // Check cache
        if let Some(CacheValue::Shoes(shoes)) = self.inner.cache.get(&CacheKey::Catalog).await {
            debug!("Cache hit for catalog");
            return Ok(shoes);
        }

        let response = self.inner.client.get(self.url("/shoes")).send().await?;
        let shoes: Vec<Shoe> = Self::read_json(response).await?;

        // Cache the result
        self.inner
            .cache
            .insert(CacheKey::Catalog, CacheValue::Shoes(shoes.clone()))
            .await;

        Ok(shoes)
    }

    /// Look up a single shoe in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeWorldError::NotFound`] if no shoe has this id, or any
    /// error from [`list_shoes`](Self::list_shoes).
    #[instrument(skip(self), fields(shoe_id = %shoe_id))]
    pub async fn get_shoe(&self, shoe_id: ShoeId) -> Result<Shoe, ShoeWorldError> {
        self.list_shoes()
            .await?
            .into_iter()
            .find(|shoe| shoe.id == shoe_id)
            .ok_or_else(|| ShoeWorldError::NotFound(format!("Shoe not found: {shoe_id}")))
    }

    /// Create a product. Requires an admin bearer token.
    ///
    /// The catalog cache is invalidated on success so the next page load
    /// sees the new shoe.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeWorldError::Unauthorized`] when the token is missing its
    /// privileges or has expired, or any transport/API error.
    #[instrument(skip(self, token, new_shoe), fields(name = %new_shoe.name))]
    pub async fn create_shoe(&self, token: &str, new_shoe: &NewShoe) -> Result<(), ShoeWorldError> {
        let response = self
            .inner
            .client
            .post(self.url("/shoes"))
            .bearer_auth(token)
            .json(new_shoe)
            .send()
            .await?;

        // The API does not commit to a response body shape here; only the
        // status matters
        Self::read_body(response).await?;

        self.invalidate_catalog().await;

        Ok(())
    }

    // =========================================================================
    // Accounts (not cached - credential exchanges)
    // =========================================================================

    /// Exchange credentials for a bearer token and account data.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeWorldError::Unauthorized`] for rejected credentials, or
    /// any transport/parse error.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ShoeWorldError> {
        let response = self
            .inner
            .client
            .post(self.url("/api/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns an API error carrying the backend's message (e.g. a taken
    /// username), or any transport error.
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn register(&self, new_user: &NewUser) -> Result<(), ShoeWorldError> {
        let response = self
            .inner
            .client
            .post(self.url("/api/register"))
            .json(new_user)
            .send()
            .await?;

        Self::read_body(response).await?;

        Ok(())
    }

    /// Probe the API without touching the cache.
    ///
    /// # Errors
    ///
    /// Returns an error when the API is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), ShoeWorldError> {
        let response = self.inner.client.get(self.url("/shoes")).send().await?;
        Self::read_body(response).await?;
        Ok(())
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate the cached catalog.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate(&CacheKey::Catalog).await;
    }
}
