//! End-to-end tests for the events API.
//!
//! These drive the real router against a PostgreSQL database named by
//! `TEST_DATABASE_URL` and are ignored by default. Run them with:
//!
//! ```text
//! TEST_DATABASE_URL=postgres://localhost/verdelab_test \
//!     cargo test -- --ignored --test-threads=1
//! ```

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use verdelab_server::models::event::{DEFAULT_TITLE, ORGANIZER_NAME};
use verdelab_server::routes::create_routes;
use verdelab_server::store::EventStore;

async fn test_app() -> (Router, PgPool) {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE events")
        .execute(&pool)
        .await
        .expect("Failed to reset events table");

    (create_routes(EventStore::new(pool.clone())), pool)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn put(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("PUT")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn set_capacity(pool: &PgPool, id: &str, capacity: i32) {
    sqlx::query("UPDATE events SET max_participants = $1 WHERE id = $2::uuid")
        .bind(capacity)
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to adjust capacity");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn create_with_empty_body_uses_placeholders() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/events")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["event"]["title"], DEFAULT_TITLE);
    assert_eq!(body["event"]["participants"], 0);
    assert_eq!(body["event"]["organizerName"], ORGANIZER_NAME);
    assert!(body["event"]["id"].is_string());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn create_keeps_supplied_fields_and_forces_organizer() {
    let (app, _pool) = test_app().await;

    let (status, body) = post_json(
        &app,
        "/events",
        json!({
            "title": "Plantação no Monsanto",
            "location": "Monsanto",
            "organizerName": "Intruso"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["event"]["title"], "Plantação no Monsanto");
    assert_eq!(body["event"]["location"], "Monsanto");
    assert_eq!(body["event"]["organizerName"], ORGANIZER_NAME);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn join_increments_until_capacity_then_rejects() {
    let (app, pool) = test_app().await;

    let (_, body) = post_json(&app, "/events", json!({})).await;
    let id = body["event"]["id"].as_str().unwrap().to_string();
    set_capacity(&pool, &id, 2).await;

    let (status, body) = put(&app, &format!("/events/{id}/join")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["participants"], 1);

    let (status, body) = put(&app, &format!("/events/{id}/join")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["participants"], 2);

    // At capacity: rejected and unchanged.
    let (status, body) = put(&app, &format!("/events/{id}/join")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (_, listed) = get(&app, "/events").await;
    assert_eq!(listed[0]["participants"], 2);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn join_missing_event_is_not_found() {
    let (app, _pool) = test_app().await;

    let (status, body) = put(
        &app,
        "/events/00000000-0000-0000-0000-000000000000/join",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Evento não encontrado.");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn delete_is_terminal() {
    let (app, _pool) = test_app().await;

    let (_, body) = post_json(&app, "/events", json!({})).await;
    let id = body["event"]["id"].as_str().unwrap().to_string();

    let (status, _) = delete(&app, &format!("/events/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = delete(&app, &format!("/events/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = put(&app, &format!("/events/{id}/join")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn list_returns_survivors_newest_first() {
    let (app, _pool) = test_app().await;

    let mut ids = Vec::new();
    for i in 0..3 {
        let (_, body) = post_json(&app, "/events", json!({ "title": format!("Evento {i}") })).await;
        ids.push(body["event"]["id"].as_str().unwrap().to_string());
    }
    delete(&app, &format!("/events/{}", ids[1])).await;

    let (status, body) = get(&app, "/events").await;
    assert_eq!(status, StatusCode::OK);

    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Evento 2");
    assert_eq!(events[1]["title"], "Evento 0");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn malformed_id_is_not_found() {
    let (app, _pool) = test_app().await;

    let (status, _) = delete(&app, "/events/not-a-uuid").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
