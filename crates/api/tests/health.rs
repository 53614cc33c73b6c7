//! Health endpoint test.

mod common;

use axum::http::StatusCode;
use sqlx::SqlitePool;

use common::{body_json, build_test_app, get};

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_reports_ok(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["dbHealthy"], true);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
