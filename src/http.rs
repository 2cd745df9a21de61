//! HTTP transport — maps registry operations onto REST routes.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /bloodbank` — create an entry. 201 + stored record.
//! - `GET /bloodbank` — all entries.
//! - `GET /bloodbank/:id` — one entry.
//! - `PUT /bloodbank/:id` — replace all fields except the id. 204.
//! - `DELETE /bloodbank/:id` — remove. 204.
//! - `GET /bloodbank/page?page=&size=` — one insertion-ordered window.
//! - `GET /bloodbank/search/donorname?donorName=` — substring search.
//! - `GET /bloodbank/search/bloodtype?bloodType=` — exact search.
//! - `GET /bloodbank/search/status?status=` — substring search.
//! - `GET /bloodbank/sort?sortBy=&sortOrder=` — sorted copy.
//! - `GET /bloodbank/filter?bloodType=&status=&donorName=` — AND filter.
//! - `GET /health` — `{ "ok": true, "entries": n }`.
//!
//! Failed operations become `(status, { "error": "<message>" })` via
//! [`RegistryError::status_code`]; `NoContent` is a bare 204.
//!
//! ## Example
//!
//! ```ignore
//! use bloodbank_rust::{http, Registry};
//!
//! let registry = Registry::new();
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(registry.clone());
//!
//! // Or serve directly
//! http::serve(registry, "0.0.0.0:3000").await?;
//! ```

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::entry::EntryInput;
use crate::error::RegistryError;
use crate::registry::Registry;

/// Build an axum `Router` serving the registry.
pub fn router(registry: Registry) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/bloodbank", get(get_all).post(create))
        .route("/bloodbank/page", get(page))
        .route("/bloodbank/search/donorname", get(search_donor_name))
        .route("/bloodbank/search/bloodtype", get(search_blood_type))
        .route("/bloodbank/search/status", get(search_status))
        .route("/bloodbank/sort", get(sort))
        .route("/bloodbank/filter", get(filter))
        .route("/bloodbank/:id", get(get_by_id).put(update).delete(delete))
        .with_state(registry)
}

/// Serve the registry over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(registry: Registry, addr: &str) -> Result<(), std::io::Error> {
    let app = router(registry);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "blood bank registry listening");
    axum::serve(listener, app).await
}

fn error_response(err: RegistryError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status == StatusCode::NO_CONTENT {
        return status.into_response();
    }
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

async fn health(State(registry): State<Registry>) -> Response {
    match registry.count() {
        Ok(entries) => Json(json!({ "ok": true, "entries": entries })).into_response(),
        Err(err) => error_response(err),
    }
}

async fn create(State(registry): State<Registry>, Json(input): Json<EntryInput>) -> Response {
    match registry.create(input) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_all(State(registry): State<Registry>) -> Response {
    match registry.all() {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_by_id(State(registry): State<Registry>, Path(id): Path<u32>) -> Response {
    match registry.get(id) {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => error_response(err),
    }
}

async fn update(
    State(registry): State<Registry>,
    Path(id): Path<u32>,
    Json(input): Json<EntryInput>,
) -> Response {
    match registry.update(id, input) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

async fn delete(State(registry): State<Registry>, Path(id): Path<u32>) -> Response {
    match registry.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct PageParams {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_size")]
    size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

async fn page(State(registry): State<Registry>, Query(params): Query<PageParams>) -> Response {
    match registry.page(params.page, params.size) {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DonorNameParams {
    donor_name: Option<String>,
}

async fn search_donor_name(
    State(registry): State<Registry>,
    Query(params): Query<DonorNameParams>,
) -> Response {
    match registry.search_by_donor_name(params.donor_name.as_deref()) {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BloodTypeParams {
    blood_type: Option<String>,
}

async fn search_blood_type(
    State(registry): State<Registry>,
    Query(params): Query<BloodTypeParams>,
) -> Response {
    match registry.search_by_blood_type(params.blood_type.as_deref()) {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct StatusParams {
    status: Option<String>,
}

async fn search_status(
    State(registry): State<Registry>,
    Query(params): Query<StatusParams>,
) -> Response {
    match registry.search_by_status(params.status.as_deref()) {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SortParams {
    #[serde(default = "default_sort_by")]
    sort_by: String,
    #[serde(default = "default_sort_order")]
    sort_order: String,
}

fn default_sort_by() -> String {
    "BloodType".to_string()
}

fn default_sort_order() -> String {
    "asc".to_string()
}

async fn sort(State(registry): State<Registry>, Query(params): Query<SortParams>) -> Response {
    match registry.sort(&params.sort_by, &params.sort_order) {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterParams {
    blood_type: Option<String>,
    status: Option<String>,
    donor_name: Option<String>,
}

async fn filter(State(registry): State<Registry>, Query(params): Query<FilterParams>) -> Response {
    match registry.filter(
        params.blood_type.as_deref(),
        params.status.as_deref(),
        params.donor_name.as_deref(),
    ) {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}
