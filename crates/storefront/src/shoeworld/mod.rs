//! Shoe World inventory API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; the inventory API is the source of
//!   truth - NO local product storage, direct API calls
//! - In-memory caching via `moka` for the catalog (5 minute TTL)
//!
//! # Endpoints
//!
//! - `GET /shoes` - the full catalog (cached)
//! - `POST /shoes` - create a product (bearer token required, invalidates
//!   the catalog cache)
//! - `POST /api/login` - exchange credentials for a bearer token
//! - `POST /api/register` - create an account
//!
//! # Example
//!
//! ```rust,ignore
//! use shoeworld_storefront::shoeworld::ShoeWorldClient;
//!
//! let client = ShoeWorldClient::new(&config.shoeworld);
//!
//! // Browse the catalog
//! let shoes = client.list_shoes().await?;
//!
//! // Sign in, then add a product with the issued token
//! let session = client.login("dmoney", "hunter2").await?;
//! client.create_shoe(&session.token, &new_shoe).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::ShoeWorldClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the inventory API.
#[derive(Debug, Error)]
pub enum ShoeWorldError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// Status code of the response.
        status: reqwest::StatusCode,
        /// Message parsed from the response body, or a body excerpt.
        message: String,
    },

    /// The API rejected the credentials or bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl ShoeWorldError {
    /// Message safe to show to the user who caused the call.
    ///
    /// API-provided messages pass through; transport and parse failures are
    /// collapsed into a generic line so internals never reach the page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized(message) => message.clone(),
            Self::NotFound(what) => what.clone(),
            Self::RateLimited(_) => "Too many requests, please try again shortly".to_string(),
            Self::Http(_) | Self::Parse(_) => {
                "The shoe service is unavailable right now".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShoeWorldError::NotFound("shoe 123".to_string());
        assert_eq!(err.to_string(), "Not found: shoe 123");

        let err = ShoeWorldError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");

        let err = ShoeWorldError::Api {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: "Missing required fields".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (400 Bad Request): Missing required fields"
        );
    }

    #[test]
    fn test_user_message_passes_api_messages_through() {
        let err = ShoeWorldError::Api {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: "Shoe name already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Shoe name already exists");

        let err = ShoeWorldError::Unauthorized("Invalid credentials".to_string());
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_user_message_hides_internals() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").expect_err("bad json");
        let err = ShoeWorldError::Parse(parse_err);
        assert_eq!(
            err.user_message(),
            "The shoe service is unavailable right now"
        );
    }
}
