use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{PointsView, ProcessedReceipt, Receipt, ReceiptId};
use super::service::{ReceiptService, ReceiptServiceError};
use super::store::{EntropyError, ReceiptStore, StoreError};

pub(crate) const POST_ONLY: &str = "Only POST method is allowed";
pub(crate) const GET_ONLY: &str = "Only GET method is allowed";
pub(crate) const JSON_ONLY: &str = "Content-Type must be application/json";
pub(crate) const NOT_FOUND: &str = "Endpoint not found";

/// Router builder exposing the receipt processing and lookup endpoints.
pub fn receipt_router<S>(service: Arc<ReceiptService<S>>) -> Router
where
    S: ReceiptStore + 'static,
{
    Router::new()
        .route(
            "/receipts/process",
            post(process_handler::<S>).fallback(post_only),
        )
        .route(
            "/receipts/{id}/points",
            get(points_handler::<S>)
                .head(get_only)
                .fallback(get_only),
        )
        .fallback(receipts_fallback)
        .with_state(service)
}

pub(crate) async fn process_handler<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: ReceiptStore + 'static,
{
    tracing::debug!("received POST request for /receipts/process");

    if !is_json_request(&headers) {
        return error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, JSON_ONLY);
    }

    let receipt: Receipt = match serde_json::from_slice(&body) {
        Ok(receipt) => receipt,
        Err(err) => {
            tracing::warn!(error = %err, "rejected undecodable receipt payload");
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid JSON payload: {err}"),
            );
        }
    };

    match service.process(&receipt) {
        Ok(id) => (StatusCode::OK, Json(ProcessedReceipt { id })).into_response(),
        Err(ReceiptServiceError::Validation(error)) => {
            tracing::warn!(field = error.field(), ?error, "rejected invalid receipt");
            error_response(StatusCode::BAD_REQUEST, &error.to_string())
        }
        Err(ReceiptServiceError::Store(StoreError::Entropy(error))) => halt_on_entropy_failure(&error),
        Err(other) => {
            tracing::error!(error = %other, "failed to process receipt");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string())
        }
    }
}

pub(crate) async fn points_handler<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: ReceiptStore + 'static,
{
    let id = ReceiptId(id);
    tracing::debug!(%id, "received GET request for receipt points");

    match service.points(&id) {
        Ok(points) => {
            tracing::info!(%id, points, "retrieved receipt points");
            (StatusCode::OK, Json(PointsView { points })).into_response()
        }
        Err(error @ ReceiptServiceError::NotFound(_)) => {
            tracing::info!(%id, "receipt not found");
            error_response(StatusCode::NOT_FOUND, &error.to_string())
        }
        Err(other) => {
            tracing::error!(%id, error = %other, "failed to look up receipt");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string())
        }
    }
}

async fn post_only() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, POST_ONLY)
}

async fn get_only() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, GET_ONLY)
}

/// Anything under `/receipts/` is read-only; other paths are unknown.
pub(crate) async fn receipts_fallback(method: Method, uri: Uri) -> Response {
    tracing::debug!(%method, path = uri.path(), "no route matched");
    if uri.path().starts_with("/receipts/") && method != Method::GET {
        error_response(StatusCode::METHOD_NOT_ALLOWED, GET_ONLY)
    } else {
        error_response(StatusCode::NOT_FOUND, NOT_FOUND)
    }
}

fn is_json_request(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == mime::APPLICATION_JSON.as_ref())
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Identifier generation has no degraded mode: the process stops.
fn halt_on_entropy_failure(error: &EntropyError) -> ! {
    tracing::error!(%error, "entropy source failed, terminating");
    std::process::exit(1)
}
