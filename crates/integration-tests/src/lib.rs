//! Integration tests for Shoe World.
//!
//! Boots the real storefront router together with an in-process mock of
//! the inventory API, both on ephemeral ports, so tests exercise the full
//! HTTP stack (sessions, middleware, HTMX fragments) without external
//! services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shoeworld-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `health` - Liveness and readiness probes
//! - `auth_flow` - Login, registration, and logout
//! - `shop` - Catalog browsing and category filtering
//! - `cart_flow` - Cart mutations and fragment responses
//! - `admin` - Product creation and access control
//! - `middleware` - Security headers, request IDs, rate limits
//!
//! # Caveats
//!
//! The storefront caches the catalog for five minutes. Tests that flip
//! the mock into failure mode must do so before the first catalog fetch
//! of their [`TestApp`], and tests relying on fresh data go through the
//! admin create flow, which invalidates the cache.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use url::Url;

use shoeworld_storefront::config::{ShoeWorldConfig, StorefrontConfig};
use shoeworld_storefront::state::AppState;

// =============================================================================
// Mock accounts
// =============================================================================

/// Bearer token the mock issues to the admin account.
pub const ADMIN_TOKEN: &str = "test-admin-token";
/// Bearer token the mock issues to the customer account.
pub const CUSTOMER_TOKEN: &str = "test-customer-token";

/// Admin credentials the mock accepts.
pub const ADMIN_USER: (&str, &str) = ("admin", "admin-pass-1");
/// Customer credentials the mock accepts.
pub const CUSTOMER_USER: (&str, &str) = ("alice", "alice-pass-1");

// =============================================================================
// Mock inventory API
// =============================================================================

/// In-process stand-in for the inventory API.
///
/// Serves the same JSON shapes on the same paths: `GET /shoes`,
/// `POST /shoes`, `POST /api/login`, `POST /api/register`.
#[derive(Clone)]
pub struct MockInventory {
    state: Arc<InventoryState>,
}

struct InventoryState {
    shoes: Mutex<Vec<Value>>,
    next_id: AtomicI32,
    accounts: Mutex<Vec<Account>>,
    next_user_id: AtomicI32,
    fail_catalog: AtomicBool,
}

/// A mock user account; admins get [`ADMIN_TOKEN`], everyone else
/// [`CUSTOMER_TOKEN`].
struct Account {
    id: i32,
    username: String,
    password: String,
    role: String,
}

impl Account {
    fn token(&self) -> &'static str {
        if self.role == "admin" {
            ADMIN_TOKEN
        } else {
            CUSTOMER_TOKEN
        }
    }
}

/// The three seeded shoes: one per category, the casual one out of stock.
fn seed_shoes() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Air Zoom",
            "brand": "Nike",
            "price": 129.99,
            "size": "10",
            "stock": 5,
            "color": "White",
            "category": "athletic",
            "image": null,
            "created_at": "2024-01-01 10:00:00"
        }),
        json!({
            "id": 2,
            "name": "Classic Derby",
            "brand": "Clarks",
            "price": 89.5,
            "size": "9",
            "stock": 2,
            "color": "Brown",
            "category": "formal"
        }),
        json!({
            "id": 3,
            "name": "Canvas Low",
            "brand": "Vans",
            "price": 59.0,
            "size": "8",
            "stock": 0,
            "color": "Black",
            "category": "casual"
        }),
    ]
}

impl Default for MockInventory {
    fn default() -> Self {
        Self {
            state: Arc::new(InventoryState {
                shoes: Mutex::new(seed_shoes()),
                next_id: AtomicI32::new(4),
                accounts: Mutex::new(vec![
                    Account {
                        id: 1,
                        username: ADMIN_USER.0.to_string(),
                        password: ADMIN_USER.1.to_string(),
                        role: "admin".to_string(),
                    },
                    Account {
                        id: 2,
                        username: CUSTOMER_USER.0.to_string(),
                        password: CUSTOMER_USER.1.to_string(),
                        role: "customer".to_string(),
                    },
                ]),
                next_user_id: AtomicI32::new(3),
                fail_catalog: AtomicBool::new(false),
            }),
        }
    }
}

impl MockInventory {
    /// Make `GET /shoes` answer 500 until reset.
    pub fn set_catalog_failing(&self, failing: bool) {
        self.state.fail_catalog.store(failing, Ordering::SeqCst);
    }

    /// Number of shoes currently in the mock catalog.
    pub async fn shoe_count(&self) -> usize {
        self.state.shoes.lock().await.len()
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/shoes", get(list_shoes).post(create_shoe))
            .route("/api/login", post(login))
            .route("/api/register", post(register))
            .with_state(self.clone())
    }
}

async fn list_shoes(State(mock): State<MockInventory>) -> Response {
    if mock.state.fail_catalog.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Database error"})),
        )
            .into_response();
    }

    let shoes = mock.state.shoes.lock().await.clone();
    Json(shoes).into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn create_shoe(
    State(mock): State<MockInventory>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    match bearer_token(&headers) {
        Some(ADMIN_TOKEN) => {}
        Some(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Token is invalid or expired"})),
            )
                .into_response();
        }
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Token is missing"})),
            )
                .into_response();
        }
    }

    let id = mock.state.next_id.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(id);
    body["created_at"] = json!("2024-06-01 12:00:00");
    mock.state.shoes.lock().await.push(body);

    (
        StatusCode::CREATED,
        Json(json!({"message": "Shoe added successfully", "id": id})),
    )
        .into_response()
}

async fn login(State(mock): State<MockInventory>, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let accounts = mock.state.accounts.lock().await;
    let Some(account) = accounts
        .iter()
        .find(|a| a.username == username && a.password == password)
    else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response();
    };

    Json(json!({
        "token": account.token(),
        "user": {
            "id": account.id,
            "username": account.username,
            "email": format!("{}@shoeworld.test", account.username),
            "role": account.role,
        }
    }))
    .into_response()
}

async fn register(State(mock): State<MockInventory>, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default().to_string();

    let mut accounts = mock.state.accounts.lock().await;
    if accounts.iter().any(|a| a.username == username) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Username already exists"})),
        )
            .into_response();
    }

    accounts.push(Account {
        id: mock.state.next_user_id.fetch_add(1, Ordering::SeqCst),
        username,
        password: body["password"].as_str().unwrap_or_default().to_string(),
        role: body["role"].as_str().unwrap_or("customer").to_string(),
    });

    (
        StatusCode::CREATED,
        Json(json!({"message": "User registered successfully"})),
    )
        .into_response()
}

// =============================================================================
// Test application
// =============================================================================

/// A running storefront wired to its own mock inventory API.
pub struct TestApp {
    base_url: String,
    /// Cookie-holding client; one logged-in identity per `TestApp`.
    pub client: reqwest::Client,
    /// Handle to the mock inventory API behind the storefront.
    pub inventory: MockInventory,
}

impl TestApp {
    /// Start the mock API and the storefront on ephemeral ports.
    pub async fn spawn() -> Self {
        let inventory = MockInventory::default();

        let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API listener");
        let api_addr = api_listener
            .local_addr()
            .expect("Failed to read mock API address");
        let api_router = inventory.router();
        tokio::spawn(async move {
            axum::serve(api_listener, api_router)
                .await
                .expect("Mock API server error");
        });

        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("Failed to parse host"),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("kJ8$mN2@pQ5^rS9!tU3&vW6*xY1/zA4+"),
            shoeworld: ShoeWorldConfig {
                base_url: Url::parse(&format!("http://{api_addr}"))
                    .expect("Failed to parse mock API URL"),
            },
            sentry_dsn: None,
            sentry_environment: "test".to_string(),
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let app = shoeworld_storefront::router(AppState::new(config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind storefront listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read storefront address");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Storefront server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: cookie_client(),
            inventory,
        }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Submit the login form with the given credentials.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to send login request")
    }

    /// Log in as the mock customer account.
    pub async fn login_as_customer(&self) {
        let resp = self.login(CUSTOMER_USER.0, CUSTOMER_USER.1).await;
        assert!(
            resp.status().is_success(),
            "customer login should land on the shop page, got {}",
            resp.status()
        );
    }

    /// Log in as the mock admin account.
    pub async fn login_as_admin(&self) {
        let resp = self.login(ADMIN_USER.0, ADMIN_USER.1).await;
        assert!(
            resp.status().is_success(),
            "admin login should land on the shop page, got {}",
            resp.status()
        );
    }
}

/// Create a cookie-holding client that follows redirects.
#[must_use]
pub fn cookie_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Create a cookie-holding client that does NOT follow redirects, for
/// asserting on redirect targets.
#[must_use]
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
