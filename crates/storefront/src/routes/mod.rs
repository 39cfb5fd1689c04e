//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (inventory API reachable)
//!
//! # Shop
//! GET  /shop                   - Shop page (filter bar + product grid)
//! GET  /shop/grid              - Product grid fragment (HTMX), ?category=
//!
//! # Cart (HTMX fragments; session-backed)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add shoe (returns badge, triggers cart-updated)
//! POST /cart/increase          - Increment line quantity
//! POST /cart/decrease          - Decrement line quantity (removes at 1)
//! POST /cart/remove            - Remove line
//! GET  /cart/count             - Cart count badge fragment
//! GET  /cart/items             - Cart body fragment
//! POST /cart/checkout          - Checkout stub (confirmation page)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Admin (requires admin role)
//! GET  /admin                  - Product creation form
//! GET  /admin/fields           - Category attribute input fragment, ?category=
//! POST /admin/shoes            - Create product
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
///
/// Rate limited tightly: these are the brute-forceable endpoints.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/grid", get(shop::grid))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/items", get(cart::items))
        .route("/checkout", post(cart::checkout))
        .layer(api_rate_limiter())
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::index))
        .route("/fields", get(admin::fields))
        .route("/shoes", post(admin::create))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Shop routes
        .nest("/shop", shop_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Auth routes
        .nest("/auth", auth_routes())
        // Admin routes
        .nest("/admin", admin_routes())
}
