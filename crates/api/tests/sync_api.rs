mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn seed_blog(app: &axum::Router) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/blogs",
            serde_json::json!({
                "name": "Coffee Notes",
                "domain": "coffee.example",
                "wp_base_url": "https://coffee.example",
                "wp_username": "editor",
                "wp_app_password": "pw"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sync_for_unknown_blog_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/sync",
            serde_json::json!({ "blog_id": 9999, "direction": "store_to_wp" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sync_for_disabled_blog_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let blog_id = seed_blog(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/v1/blogs/{blog_id}"),
            serde_json::json!({ "is_active": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/sync",
            serde_json::json!({ "blog_id": blog_id, "direction": "wp_to_store" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_sync_requires_post_ids(pool: PgPool) {
    let app = common::build_test_app(pool);
    let blog_id = seed_blog(&app).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/sync/bulk",
            serde_json::json!({
                "blog_id": blog_id,
                "post_ids": [],
                "direction": "store_to_wp"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sync_log_history_starts_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let blog_id = seed_blog(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/blogs/{blog_id}/sync-logs"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
