//! Integration tests for the admin product-creation form.

use reqwest::StatusCode;
use shoeworld_integration_tests::{TestApp, no_redirect_client};

/// Submit the product form with the given fields.
async fn create_shoe(app: &TestApp, fields: &[(&str, &str)]) -> reqwest::Response {
    app.client
        .post(app.url("/admin/shoes"))
        .form(fields)
        .send()
        .await
        .expect("Failed to submit product form")
}

// ============================================================================
// Access Control
// ============================================================================

#[tokio::test]
async fn test_admin_requires_login() {
    let app = TestApp::spawn().await;

    let client = no_redirect_client();
    let resp = client
        .get(app.url("/admin"))
        .send()
        .await
        .expect("Failed to request admin page");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/auth/login")
    );
}

#[tokio::test]
async fn test_admin_rejects_customers() {
    let app = TestApp::spawn().await;
    app.login_as_customer().await;

    let resp = app
        .client
        .get(app.url("/admin"))
        .send()
        .await
        .expect("Failed to request admin page");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = resp.text().await.expect("Failed to read error body");
    assert!(body.contains("Admin access required"));

    // The form endpoint is equally closed
    let resp = create_shoe(&app, &[("name", "Sneakmaster")]).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Form Rendering
// ============================================================================

#[tokio::test]
async fn test_admin_page_renders_blank_form() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let resp = app
        .client
        .get(app.url("/admin"))
        .send()
        .await
        .expect("Failed to request admin page");
    assert!(resp.status().is_success());

    let body = resp.text().await.expect("Failed to read admin page");
    assert!(body.contains("Add New Shoe"));

    // Casual is the default category, with its attribute input swapped in
    assert!(body.contains(r#"value="casual" selected"#));
    assert!(body.contains(r#"name="style""#));
    assert!(body.contains(r#"placeholder="sneaker""#));
}

#[tokio::test]
async fn test_fields_fragment_follows_category() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let resp = app
        .client
        .get(app.url("/admin/fields?category=formal"))
        .send()
        .await
        .expect("Failed to request fields fragment");
    let body = resp.text().await.expect("Failed to read fields fragment");
    assert!(body.contains(r#"name="material""#));
    assert!(body.contains(r#"placeholder="leather""#));

    let resp = app
        .client
        .get(app.url("/admin/fields?category=athletic"))
        .send()
        .await
        .expect("Failed to request fields fragment");
    let body = resp.text().await.expect("Failed to read fields fragment");
    assert!(body.contains(r#"name="sport_type""#));
}

// ============================================================================
// Product Creation
// ============================================================================

#[tokio::test]
async fn test_create_requires_name_brand_price() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let resp = create_shoe(
        &app,
        &[
            ("name", "Trail Runner"),
            ("brand", ""),
            ("price", ""),
            ("category", "athletic"),
        ],
    )
    .await;

    let body = resp.text().await.expect("Failed to read form fragment");
    assert!(body.contains("Please fill in required fields (Name, Brand, Price)"));
    // The submitted values survive the round trip
    assert!(body.contains(r#"value="Trail Runner""#));
}

#[tokio::test]
async fn test_create_rejects_invalid_price() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let resp = create_shoe(
        &app,
        &[
            ("name", "Trail Runner"),
            ("brand", "Salomon"),
            ("price", "cheap"),
            ("category", "athletic"),
        ],
    )
    .await;

    let body = resp.text().await.expect("Failed to read form fragment");
    assert!(body.contains("Please enter a valid price"));
}

#[tokio::test]
async fn test_create_adds_shoe_and_refreshes_catalog() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    // Warm the catalog cache first so success proves invalidation
    let resp = app
        .client
        .get(app.url("/shop"))
        .send()
        .await
        .expect("Failed to request shop page");
    let body = resp.text().await.expect("Failed to read shop page");
    assert!(!body.contains("Trail Runner"));

    let resp = create_shoe(
        &app,
        &[
            ("name", "Trail Runner"),
            ("brand", "Salomon"),
            ("price", "149.99"),
            ("size", "11"),
            ("stock", "7"),
            ("color", "Red"),
            ("category", "athletic"),
            ("image", ""),
            ("sport_type", "Trail"),
        ],
    )
    .await;
    assert!(resp.status().is_success());
    let body = resp.text().await.expect("Failed to read form fragment");
    assert!(body.contains("Shoe added successfully!"));

    assert_eq!(app.inventory.shoe_count().await, 4);

    // The new shoe is visible immediately despite the catalog cache
    let resp = app
        .client
        .get(app.url("/shop"))
        .send()
        .await
        .expect("Failed to request shop page");
    let body = resp.text().await.expect("Failed to read shop page");
    assert!(body.contains("Trail Runner"));
    assert!(body.contains("$149.99"));
    assert!(body.contains("7 in stock"));
}

#[tokio::test]
async fn test_create_defaults_optional_fields() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let resp = create_shoe(
        &app,
        &[
            ("name", "Plain Pair"),
            ("brand", "Generic"),
            ("price", "20"),
            ("category", "formal"),
        ],
    )
    .await;
    let body = resp.text().await.expect("Failed to read form fragment");
    assert!(body.contains("Shoe added successfully!"));

    // Size, color, and the category attribute fall back to defaults
    let resp = app
        .client
        .get(app.url("/shop/grid?category=formal"))
        .send()
        .await
        .expect("Failed to request grid fragment");
    let body = resp.text().await.expect("Failed to read grid fragment");
    assert!(body.contains("Plain Pair"));
    assert!(body.contains("Size: 10"));
    assert!(body.contains("Black"));
}
