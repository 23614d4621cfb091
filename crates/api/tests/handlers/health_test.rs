use axum::http::StatusCode;
use serde_json::Value;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_check() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_version() {
    let server = TestContext::new().server();

    let response = server.get("/version").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>()["version"],
        env!("CARGO_PKG_VERSION")
    );
}
