//! HTTP request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::providers::Provider;
use crate::search::SearchRequest;
use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

/// Search handler. Forwards the upstream body untouched.
///
/// The query string is read raw so that malformed input (such as a repeated `wd`)
/// still gets a JSON validation error.
pub async fn search(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let request = SearchRequest::from_query(query.as_deref()).inspect_err(|e| {
        info!(query = ?query, reason = %e, "Rejected search request");
    })?;

    let outcome = state.relay.execute(&request).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        outcome.into_body().into_raw(),
    )
        .into_response())
}

/// Route listing for the front-end selector
pub async fn routes(State(state): State<AppState>) -> impl IntoResponse {
    let providers: Vec<Provider> = state.registry.all().to_vec();
    Json(providers)
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
