//! Metrics accounting through the router
//!
//! Kept in its own test binary: counters are process-wide, so exact deltas
//! only hold when nothing else in the process touches them.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use helpboard::api::create_app;
use helpboard::{AppState, Config, Store};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(
        Store::from_json_str("{}").unwrap(),
        Store::from_json_str("{}").unwrap(),
        Config::default(),
    )
    .unwrap();
    create_app(state)
}

async fn queries_total(app: &Router) -> u64 {
    let response = app
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    text.lines()
        .find_map(|line| line.strip_prefix("hb_queries_total "))
        .map(|value| value.trim().parse().unwrap())
        .unwrap_or(0)
}

#[tokio::test]
async fn every_listing_counts_as_a_query() {
    let app = app();
    let before = queries_total(&app).await;

    let response = app
        .clone()
        .oneshot(Request::get("/requests.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(queries_total(&app).await, before + 1);

    let create = Request::post("/requests")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json")
        .body(Body::from(r#"{"from": "ann", "title": "Ladder", "description": "borrow one"}"#))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(queries_total(&app).await, before + 2);
}
