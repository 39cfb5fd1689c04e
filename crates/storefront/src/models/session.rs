//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use shoeworld_core::{UserId, UserRole};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user, plus
/// the bearer token the inventory API issued at login. The token never
/// leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The API's user ID.
    pub id: UserId,
    /// Display name, shown in the nav.
    pub username: String,
    /// Role controlling access to the admin form.
    pub role: UserRole,
    /// Bearer token for authenticated inventory API calls.
    pub api_token: String,
}

impl CurrentUser {
    /// Whether this user may use the admin surface.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Session keys for authentication and cart data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the shopping cart.
    pub const CART: &str = "cart";
}
