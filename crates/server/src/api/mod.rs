use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use server_api::submit_contact;
use shared::{
    error::{ContactError, ErrorBody},
    protocol::{ContactAck, ContactSubmission, CONTACT_ROUTE},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::warn;

use crate::app_state::AppState;

pub(crate) const MAX_CONTACT_BODY_BYTES: usize = 64 * 1024;

type HttpError = (StatusCode, Json<ErrorBody>);

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            CONTACT_ROUTE,
            post(http_submit_contact).fallback(method_not_allowed),
        )
        .layer(RequestBodyLimitLayer::new(MAX_CONTACT_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, StatusCode> {
    state.storage.health_check().await.map_err(|error| {
        warn!(error = %format!("{error:#}"), "health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}

/// The body is read raw so that a non-JSON body, or one with non-string
/// fields, is reported like any other missing field.
async fn http_submit_contact(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ContactAck>, HttpError> {
    let submission = ContactSubmission::from_slice(&body);
    let ack = submit_contact(&state.api, submission)
        .await
        .map_err(|err| contact_error(&err))?;
    Ok(Json(ack))
}

async fn method_not_allowed() -> HttpError {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::method_not_allowed()),
    )
}

fn contact_error(err: &ContactError) -> HttpError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.to_body()))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
