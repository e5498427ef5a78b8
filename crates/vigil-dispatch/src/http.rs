//! `POST /service` over axum.
//!
//! Transport problems are answered with a plain-text status. Everything that
//! decodes as an envelope gets HTTP 200 and a JSON envelope body; the service
//! outcome lives inside it.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;

use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::service::Dispatcher;

/// The only route.
pub const SERVICE_PATH: &str = "/service";

/// Builds the router serving [`SERVICE_PATH`].
pub fn service_router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route(
            SERVICE_PATH,
            post(handle_service).fallback(method_not_allowed),
        )
        .with_state(dispatcher)
}

async fn handle_service(
    State(dispatcher): State<Dispatcher>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(source = "SR05", "cannot read body: {e}");
            return plain_error(StatusCode::BAD_REQUEST, "cannot read body");
        }
    };

    let request = match RequestEnvelope::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(source = "SR05", "invalid json: {e}");
            return plain_error(StatusCode::BAD_REQUEST, "invalid json");
        }
    };

    let response = dispatcher.dispatch(&request).await;
    encode(&response)
}

async fn method_not_allowed() -> Response {
    let mut response = plain_error(StatusCode::METHOD_NOT_ALLOWED, "only POST allowed");
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("POST"));
    response
}

/// Newline-terminated `text/plain` error body.
fn plain_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        format!("{message}\n"),
    )
        .into_response()
}

/// Serializes an envelope as the 200 body, newline-terminated.
fn encode(response: &ResponseEnvelope) -> Response {
    match serde_json::to_vec(response) {
        Ok(mut body) => {
            body.push(b'\n');
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(source = "SR05", "failed to write response: {e}");
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to write response")
        }
    }
}
