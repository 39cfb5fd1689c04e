//! Session middleware configuration.
//!
//! Sets up in-memory sessions with signed cookies using tower-sessions.
//! Sessions hold the logged-in user (with their API token) and the
//! shopping cart, so losing the process loses both. That matches the
//! storefront's scope: carts are per-visit, not durable.

use secrecy::ExposeSecret;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sw_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store and signed cookies.
///
/// # Arguments
///
/// * `config` - Storefront configuration (for the signing secret and
///   HTTPS detection)
///
/// # Panics
///
/// Panics if the session secret is shorter than 32 bytes. Config
/// validation rejects such secrets at startup, so this cannot trigger
/// for a config built via [`StorefrontConfig::from_env`].
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();

    // Cookie signing key derived from the validated session secret.
    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.uses_https())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
