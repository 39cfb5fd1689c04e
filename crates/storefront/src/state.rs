//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::shoeworld::ShoeWorldClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the inventory API client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shoeworld: ShoeWorldClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let shoeworld = ShoeWorldClient::new(&config.shoeworld);

        Self {
            inner: Arc::new(AppStateInner { config, shoeworld }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the inventory API client.
    #[must_use]
    pub fn shoeworld(&self) -> &ShoeWorldClient {
        &self.inner.shoeworld
    }
}
