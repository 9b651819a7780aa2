//! Integration tests for the health endpoints.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_check() {
    let app = helpers::TestApp::offline();

    let response = app.request("GET", "/api/v1/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = helpers::TestApp::offline();

    let response = app.request("GET", "/api/v1/nope", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
