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
async fn post_lifecycle_with_derived_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let blog_id = seed_blog(&app).await;

    // Create: slug, excerpt, word count, and reading time are derived.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/posts",
            serde_json::json!({
                "blog_id": blog_id,
                "title": "Café com Açúcar!",
                "body": "<p>Doce e forte como deve ser</p>"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["data"]["slug"], "cafe-com-acucar");
    assert_eq!(created["data"]["status"], "draft");
    assert_eq!(created["data"]["word_count"], 6);
    assert_eq!(created["data"]["reading_time_minutes"], 1);
    assert_eq!(created["data"]["excerpt"], "Doce e forte como deve ser");
    let post_id = created["data"]["id"].as_i64().unwrap();

    // Update the body: derived fields follow.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/v1/posts/{post_id}"),
            serde_json::json!({ "body": "<p>curto</p>" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["word_count"], 1);

    // Substring search finds it.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/posts?blog_id={blog_id}&search=a%C3%A7%C3%BAcar"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    // Delete.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/v1/posts/{post_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/posts/{post_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_status_filter_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let blog_id = seed_blog(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/posts?blog_id={blog_id}&status=archived"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seo_score_is_computed_and_stored(pool: PgPool) {
    let app = common::build_test_app(pool);
    let blog_id = seed_blog(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/posts",
            serde_json::json!({
                "blog_id": blog_id,
                "title": "Espresso Brewing: A Complete Guide for Beginners",
                "body": "<p>Brewing espresso starts with the grind.</p>"
            }),
        ))
        .await
        .unwrap();
    let post_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/posts/{post_id}/seo-score"),
            serde_json::json!({ "focus_keyword": "espresso" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let scored = body_json(response).await;
    let score = scored["data"]["seo_score"].as_i64().unwrap();
    assert!(score > 0);
    assert!(score <= 100);
}
