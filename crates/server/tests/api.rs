use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use ledger::Ledger;
use migration::MigratorTrait;
use server::{ServerState, router};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    router(ServerState::new(Ledger::new(db)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, body.to_vec())
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/expenses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_json(date: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/expenses/{date}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::empty())
        .unwrap()
}

async fn record_json(app: &Router, payee: &str, amount: f64, date: &str) -> i64 {
    let (status, _, body) = send(
        app,
        post_json(json!({"payee": payee, "amount": amount, "date": date})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    body["expense_id"].as_i64().unwrap()
}

#[tokio::test]
async fn records_submitted_expenses_and_lists_them_by_date() {
    let app = app().await;

    let coffee = record_json(&app, "Starbucks", 5.75, "2014-10-17").await;
    let zoo = record_json(&app, "Zoo", 15.25, "2014-10-17").await;
    let groceries = record_json(&app, "Whole Foods", 95.20, "2014-10-18").await;
    assert_ne!(coffee, zoo);
    assert_ne!(zoo, groceries);

    let (status, content_type, body) = send(&app, get_json("2014-10-17")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let listed: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        listed,
        vec![
            json!({"id": coffee, "payee": "Starbucks", "amount": 5.75, "date": "2014-10-17"}),
            json!({"id": zoo, "payee": "Zoo", "amount": 15.25, "date": "2014-10-17"}),
        ]
    );
}

#[tokio::test]
async fn missing_required_fields_answer_422_with_every_clause() {
    let app = app().await;

    let (status, content_type, body) = send(&app, post_json(json!({"some": "data"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body["error"],
        "Invalid expense: `payee` is required, `amount` is required, `date` is required"
    );

    // Nothing was persisted.
    let (_, _, listed) = send(&app, get_json("2014-10-17")).await;
    assert_eq!(listed, b"[]");
}

#[tokio::test]
async fn single_missing_field_is_named() {
    let app = app().await;

    let (status, _, body) = send(
        &app,
        post_json(json!({"payee": "Starbucks", "date": "2014-10-17"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Invalid expense: `amount` is required");
}

#[tokio::test]
async fn unknown_body_keys_are_ignored() {
    let app = app().await;

    let (status, _, body) = send(
        &app,
        post_json(json!({
            "payee": "Starbucks",
            "amount": 5.75,
            "date": "2014-10-17",
            "currency": "EUR"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["expense_id"].is_i64());
}

#[tokio::test]
async fn missing_content_type_answers_406_and_writes_nothing() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/expenses")
        .body(Body::from(
            json!({"payee": "Starbucks", "amount": 5.75, "date": "2014-10-17"}).to_string(),
        ))
        .unwrap();
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert!(body.is_empty());

    let (_, _, listed) = send(&app, get_json("2014-10-17")).await;
    assert_eq!(listed, b"[]");
}

#[tokio::test]
async fn unsupported_content_type_answers_406_even_with_matching_accept() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/expenses")
        .header(header::CONTENT_TYPE, "text/html")
        .header(header::ACCEPT, "text/html")
        .body(Body::from("payee=Starbucks"))
        .unwrap();
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert!(body.is_empty());
}

#[tokio::test]
async fn get_without_content_type_answers_406() {
    let app = app().await;

    let request = Request::builder()
        .uri("/expenses/2014-10-17")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert!(body.is_empty());
}

#[tokio::test]
async fn date_with_no_expenses_lists_empty() {
    let app = app().await;

    record_json(&app, "Starbucks", 5.75, "2014-10-17").await;

    let (status, _, body) = send(&app, get_json("2073-10-12")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn malformed_body_answers_400_without_touching_the_ledger() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/expenses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, content_type, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].is_string());

    let (_, _, listed) = send(&app, get_json("2014-10-17")).await;
    assert_eq!(listed, b"[]");
}

#[tokio::test]
async fn xml_requests_get_xml_responses() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/expenses")
        .header(header::CONTENT_TYPE, "application/xml")
        .body(Body::from(
            "<expense><payee>Starbucks</payee><amount>5.75</amount>\
             <date>2014-10-17</date></expense>",
        ))
        .unwrap();
    let (status, content_type, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/xml"));

    let body = String::from_utf8(body).unwrap();
    assert!(body.starts_with("<response>"));
    assert!(body.contains("<expense_id>"));

    let request = Request::builder()
        .uri("/expenses/2014-10-17")
        .header(header::CONTENT_TYPE, "application/xml")
        .body(Body::empty())
        .unwrap();
    let (status, content_type, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/xml"));

    let body = String::from_utf8(body).unwrap();
    assert!(body.starts_with("<expenses>"));
    assert!(body.contains("<payee>Starbucks</payee>"));
    assert!(body.contains("<date>2014-10-17</date>"));
}

#[tokio::test]
async fn xml_validation_failure_answers_422_in_xml() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/expenses")
        .header(header::CONTENT_TYPE, "application/xml")
        .body(Body::from("<expense><payee>Starbucks</payee></expense>"))
        .unwrap();
    let (status, content_type, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(content_type.as_deref(), Some("application/xml"));

    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("`amount` is required, `date` is required"));
}

#[tokio::test]
async fn accept_header_never_changes_the_format() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/expenses")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/xml")
        .body(Body::from(
            json!({"payee": "Starbucks", "amount": 5.75, "date": "2014-10-17"}).to_string(),
        ))
        .unwrap();
    let (status, content_type, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["expense_id"].is_i64());
}

#[tokio::test]
async fn empty_xml_list_is_a_bare_envelope() {
    let app = app().await;

    let request = Request::builder()
        .uri("/expenses/2073-10-12")
        .header(header::CONTENT_TYPE, "application/xml")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<expenses/>");
}
