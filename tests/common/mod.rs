use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::{DateTime, Duration, Utc};
use migration::{Migrator, MigratorTrait};
use reservation_admin::{AppState, models::reservation::ReservationFilter, routes};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde_json::Value;
use tower::ServiceExt;

/// Fresh in-memory SQLite database with the schema migrated.
/// A single pooled connection keeps every query on the same database.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn build_test_app() -> (Router, AppState) {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    let state = AppState::new(db);
    (routes::router(state.clone()), state)
}

/// Rows currently stored, counted through the repository
pub async fn stored_count(state: &AppState) -> u64 {
    state
        .reservations
        .list(&ReservationFilter::default(), 1)
        .await
        .unwrap()
        .total
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// GET asking for the JSON page object
pub fn page_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-Inertia", "true")
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Inertia", "true")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(method: &str, uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Whole-minute instant `days` days from now, always in the future
pub fn future_at(days: i64, hour: u32, minute: u32) -> DateTime<Utc> {
    (Utc::now() + Duration::days(days))
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_utc()
}

pub fn reservation_json(
    name: &str,
    phone: &str,
    party_size: i64,
    reserved_at: DateTime<Utc>,
    status: &str,
) -> Value {
    serde_json::json!({
        "customer_name": name,
        "phone": phone,
        "party_size": party_size,
        "reserved_at": reserved_at.to_rfc3339(),
        "status": status,
    })
}

/// Create through the HTTP surface and assert the redirect
pub async fn create_reservation(app: &Router, body: Value) {
    let response = send(app, json_request("POST", "/reservations", &body)).await;
    assert_eq!(response.status(), 303, "create failed for {body}");
}

/// Reservations on one list page (JSON page props)
pub async fn list_page(app: &Router, uri: &str) -> Value {
    let response = send(app, page_request(uri)).await;
    assert_eq!(response.status(), 200);
    let page = body_json(response).await;
    page["props"]["reservations"].clone()
}

pub fn names(reservations: &Value) -> Vec<String> {
    reservations["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["customer_name"].as_str().unwrap().to_string())
        .collect()
}
