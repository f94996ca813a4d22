mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use sha2::Sha256;
use sqlx::PgPool;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn seed_blog(app: &axum::Router, webhook_secret: Option<&str>) -> i64 {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/blogs")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "name": "Coffee Notes",
                        "domain": "coffee.example",
                        "wp_base_url": "https://coffee.example",
                        "wp_username": "editor",
                        "wp_app_password": "pw",
                        "webhook_secret": webhook_secret
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

fn remote_post_payload() -> String {
    serde_json::json!({
        "id": 321,
        "title": { "rendered": "Pushed From WordPress" },
        "content": { "rendered": "<p>pushed body</p>" },
        "excerpt": { "rendered": "<p>pushed excerpt</p>" },
        "status": "publish",
        "slug": "pushed-from-wordpress",
        "link": "https://coffee.example/pushed-from-wordpress/"
    })
    .to_string()
}

fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

#[sqlx::test(migrations = "../db/migrations")]
async fn webhook_imports_a_single_post(pool: PgPool) {
    let app = common::build_test_app(pool);
    let blog_id = seed_blog(&app, None).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(format!("/api/v1/webhooks/wordpress/{blog_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(remote_post_payload()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let imported = body_json(response).await;
    assert_eq!(imported["data"]["wp_post_id"], 321);
    assert_eq!(imported["data"]["title"], "Pushed From WordPress");
    assert_eq!(imported["data"]["excerpt"], "pushed excerpt");

    // A second delivery for the same remote id updates in place.
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(format!("/api/v1/webhooks/wordpress/{blog_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(remote_post_payload()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let again = body_json(response).await;
    assert_eq!(again["data"]["id"], imported["data"]["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn webhook_with_secret_requires_valid_signature(pool: PgPool) {
    let app = common::build_test_app(pool);
    let blog_id = seed_blog(&app, Some("topsecret")).await;
    let payload = remote_post_payload();

    // Missing signature.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(format!("/api/v1/webhooks/wordpress/{blog_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.clone()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Valid signature.
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(format!("/api/v1/webhooks/wordpress/{blog_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-pressroom-signature", sign("topsecret", payload.as_bytes()))
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
