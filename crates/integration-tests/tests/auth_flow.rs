//! Integration tests for login, registration, and logout.
//!
//! Each test boots its own [`TestApp`], so the per-IP auth rate limiter
//! (burst of 5) is fresh; tests stay well under that budget.

use shoeworld_integration_tests::{CUSTOMER_USER, TestApp};
use uuid::Uuid;

/// A username that passes registration validation and is unique per run.
fn fresh_username() -> String {
    Uuid::new_v4().simple().to_string()
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::spawn().await;
    let username = fresh_username();

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .form(&[
            ("username", username.as_str()),
            ("email", "fresh@shoeworld.test"),
            ("password", "s3cret-pass"),
            ("role", "customer"),
        ])
        .send()
        .await
        .expect("Failed to submit registration");

    // Lands on the login page with the success banner
    assert!(resp.status().is_success());
    assert!(resp.url().path().ends_with("/auth/login"));
    let body = resp.text().await.expect("Failed to read login page");
    assert!(body.contains("Registration successful! Please login."));

    // The new account can sign in
    let resp = app.login(&username, "s3cret-pass").await;
    assert!(resp.status().is_success());
    assert!(resp.url().path().ends_with("/shop"));
    let body = resp.text().await.expect("Failed to read shop page");
    assert!(body.contains(&username));
    assert!(body.contains("Logout"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .form(&[
            ("username", CUSTOMER_USER.0),
            ("email", "other@shoeworld.test"),
            ("password", "s3cret-pass"),
            ("role", "customer"),
        ])
        .send()
        .await
        .expect("Failed to submit registration");

    // The form re-renders with the API's message
    let body = resp.text().await.expect("Failed to read register page");
    assert!(body.contains("Username already exists"));
}

#[tokio::test]
async fn test_register_rejects_invalid_username() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .form(&[
            ("username", "ab"),
            ("email", "ab@shoeworld.test"),
            ("password", "s3cret-pass"),
            ("role", "customer"),
        ])
        .send()
        .await
        .expect("Failed to submit registration");

    let body = resp.text().await.expect("Failed to read register page");
    assert!(body.contains("username must be at least 3 characters"));
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .form(&[
            ("username", ""),
            ("email", ""),
            ("password", ""),
            ("role", "customer"),
        ])
        .send()
        .await
        .expect("Failed to submit registration");

    let body = resp.text().await.expect("Failed to read register page");
    assert!(body.contains("Please fill in all fields"));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::spawn().await;

    let resp = app.login(CUSTOMER_USER.0, "not-the-password").await;

    // Bounced back to the login page with the generic error
    assert!(resp.url().path().ends_with("/auth/login"));
    let body = resp.text().await.expect("Failed to read login page");
    assert!(body.contains("Login failed"));
}

#[tokio::test]
async fn test_login_shows_user_in_nav() {
    let app = TestApp::spawn().await;
    app.login_as_customer().await;

    let resp = app
        .client
        .get(app.url("/shop"))
        .send()
        .await
        .expect("Failed to request shop page");

    let body = resp.text().await.expect("Failed to read shop page");
    assert!(body.contains(CUSTOMER_USER.0));
    assert!(body.contains("Logout"));
    assert!(!body.contains(">Login</a>"));
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_clears_session() {
    let app = TestApp::spawn().await;
    app.login_as_customer().await;

    let resp = app
        .client
        .post(app.url("/auth/logout"))
        .send()
        .await
        .expect("Failed to submit logout");

    // Back on the home page as an anonymous visitor
    assert!(resp.status().is_success());
    let body = resp.text().await.expect("Failed to read home page");
    assert!(body.contains(">Login</a>"));
    assert!(!body.contains("Logout"));

    // Protected pages redirect to login again
    let resp = app
        .client
        .get(app.url("/cart"))
        .send()
        .await
        .expect("Failed to request cart page");
    assert!(resp.url().path().ends_with("/auth/login"));
}
