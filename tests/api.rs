//! End-to-end tests driving the router in-process

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use helpboard::api::create_app;
use helpboard::constants::NORMAL_PRIORITY;
use helpboard::{AppState, Config, Store};
use serde_json::{json, Value};
use tower::ServiceExt;

const BUSINESSES: &str = r#"{
    "a1b2c3": {"name": "Joe's", "description": "diner", "category": "restaurant"}
}"#;

const REQUESTS: &str = r#"{
    "req001": {"from": "ann", "title": "Flat tire", "description": "need a pump",
               "priority": 1, "time": "2015-02-10T09:15:00.000000"},
    "req002": {"from": "bo", "title": "Moving", "description": "boxes to carry",
               "priority": 3, "time": "2015-02-09T08:00:00.000000"}
}"#;

fn app() -> Router {
    let state = AppState::new(
        Store::from_json_str(BUSINESSES).unwrap(),
        Store::from_json_str(REQUESTS).unwrap(),
        Config::default(),
    )
    .unwrap();
    create_app(state)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn business_listing_filters_by_query() {
    let app = app();

    let response = get(&app, "/businesses.json?q=diner").await;
    assert_eq!(response.status(), StatusCode::OK);
    let listing = json_body(response).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["id"], "a1b2c3");

    let listing = json_body(get(&app, "/businesses.json?q=pizza").await).await;
    assert_eq!(listing, json!([]));

    let listing = json_body(get(&app, "/businesses.json?q=JOE").await).await;
    assert_eq!(listing[0]["name"], "Joe's");
}

#[tokio::test]
async fn business_item_json_is_raw_entity() {
    let app = app();

    let response = get(&app, "/business/a1b2c3.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"name": "Joe's", "description": "diner", "category": "restaurant"})
    );

    let response = get(&app, "/business/zzzzzz.json").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"message": "Business zzzzzz doesn't exist"})
    );
}

#[tokio::test]
async fn html_views_render() {
    let app = app();

    let response = get(&app, "/business/a1b2c3").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(text_body(response).await.contains("diner"));

    let html = text_body(get(&app, "/requests?q=tire").await).await;
    assert!(html.contains("Flat tire"));
    assert!(!html.contains("Moving"));

    assert_eq!(get(&app, "/request/nope00").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_listing_sorts_descending() {
    let app = app();

    let by_time = json_body(get(&app, "/requests.json").await).await;
    let ids: Vec<_> = by_time.as_array().unwrap().iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!("req001"), json!("req002")]);

    let by_priority = json_body(get(&app, "/requests.json?sort-by=priority").await).await;
    let ids: Vec<_> = by_priority.as_array().unwrap().iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!("req002"), json!("req001")]);
}

#[tokio::test]
async fn unknown_sort_key_is_rejected() {
    let app = app();
    let response = get(&app, "/businesses.json?sort-by=priority").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("'sort-by'"));
}

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let app = app();

    let response = send(
        &app,
        json_request(
            Method::POST,
            "/requests",
            json!({"from": "cy", "title": "Jump start", "description": "car battery died"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let listing = json_body(response).await;
    let created = listing
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["title"] == "Jump start")
        .expect("new request is listed")
        .clone();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 6);
    assert!(id.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));

    let fetched = json_body(get(&app, &format!("/request/{}.json", id)).await).await;
    assert_eq!(fetched["from"], "cy");
    assert_eq!(fetched["title"], "Jump start");
    assert_eq!(fetched["description"], "car battery died");
    assert_eq!(fetched["priority"], json!(NORMAL_PRIORITY));
    assert!(fetched["time"].is_string());
    assert!(fetched.get("id").is_none());
}

#[tokio::test]
async fn create_requires_fields() {
    let app = app();

    let response = send(
        &app,
        json_request(Method::POST, "/requests", json!({"from": "cy", "description": "x"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"message": "'title' is a required value"})
    );

    let response = send(
        &app,
        json_request(Method::POST, "/requests", json!({"from": "", "title": "t", "description": "x"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, Request::post("/requests").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"message": "'from' is a required value"})
    );
}

#[tokio::test]
async fn create_from_html_form() {
    let app = app();

    let request = Request::post("/requests")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("from=dee&title=Ladder&description=borrow+a+ladder"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(text_body(response).await.contains("Ladder"));

    let health = json_body(get(&app, "/health").await).await;
    assert_eq!(health["help_requests"], 3);
}

#[tokio::test]
async fn update_sets_priority_and_appends_comments() {
    let app = app();

    let response = send(
        &app,
        json_request(Method::PATCH, "/request/req001.json", json!({"priority": 3, "comment": "  ok  "})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["priority"], 3);
    assert_eq!(updated["comments"], json!(["  ok  "]));

    let response = send(
        &app,
        json_request(Method::PATCH, "/request/req001", json!({"comment": "   "})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["priority"], json!(NORMAL_PRIORITY));
    assert_eq!(updated["comments"], json!(["  ok  "]));

    let form = Request::patch("/request/req001")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("priority=0&comment=done"))
        .unwrap();
    let response = send(&app, form).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text_body(response).await.contains("done"));

    let fetched = json_body(get(&app, "/request/req001.json").await).await;
    assert_eq!(fetched["priority"], 0);
    assert_eq!(fetched["comments"], json!(["  ok  ", "done"]));
    assert_eq!(fetched["time"], "2015-02-10T09:15:00.000000");
}

#[tokio::test]
async fn update_rejects_bad_input() {
    let app = app();

    let response = send(
        &app,
        json_request(Method::PATCH, "/request/req001.json", json!({"priority": 7, "comment": "x"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = json_body(get(&app, "/request/req001.json").await).await;
    assert_eq!(fetched["priority"], 1);
    assert!(fetched.get("comments").is_none());

    let response = send(
        &app,
        json_request(Method::PATCH, "/request/zzzzzz.json", json!({"priority": 1})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"message": "Help request zzzzzz doesn't exist"})
    );
}

#[tokio::test]
async fn metrics_are_exposed() {
    let app = app();
    get(&app, "/businesses.json").await;
    let text = text_body(get(&app, "/metrics").await).await;
    assert!(text.contains("hb_queries_total"));
}

#[tokio::test]
async fn malformed_query_string_gets_json_error() {
    let app = app();

    for uri in ["/businesses.json?q=a&q=b", "/requests?sort-by=time&sort-by=title"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("application/json"));
        let body = json_body(response).await;
        assert!(body["message"].is_string());
    }
}
