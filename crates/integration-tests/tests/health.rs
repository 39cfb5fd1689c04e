//! Integration tests for the health and readiness probes.

use reqwest::StatusCode;
use shoeworld_integration_tests::TestApp;

#[tokio::test]
async fn test_health_returns_ok() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("Failed to request health probe");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read health body");
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_readiness_reflects_inventory_api() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/health/ready"))
        .send()
        .await
        .expect("Failed to request readiness probe");
    assert_eq!(resp.status(), StatusCode::OK);

    // Readiness is uncached, so an inventory outage shows up immediately
    app.inventory.set_catalog_failing(true);
    let resp = app
        .client
        .get(app.url("/health/ready"))
        .send()
        .await
        .expect("Failed to request readiness probe");
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    app.inventory.set_catalog_failing(false);
    let resp = app
        .client
        .get(app.url("/health/ready"))
        .send()
        .await
        .expect("Failed to request readiness probe");
    assert_eq!(resp.status(), StatusCode::OK);
}
