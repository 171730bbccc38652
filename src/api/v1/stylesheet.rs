//! Stylesheet endpoint handlers

use std::collections::HashMap;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap},
    response::Response,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{preflight_response, StylesheetResponse};
use crate::domain::LicenseRequest;
use crate::infrastructure::observability::record_license_outcome;

/// GET /v1/css (HEAD is answered by the same handler)
pub async fn get_stylesheet(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    headers: HeaderMap,
) -> StylesheetResponse {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable query string, treating as empty");
            HashMap::new()
        }
    };

    let request = LicenseRequest::from_query(&params);

    match state.license_service.evaluate(&request).await {
        Ok(outcome) => {
            record_license_outcome(outcome.label());
            StylesheetResponse::from_outcome(&outcome, state.cache_max_age)
                .revalidate(headers.get(header::IF_NONE_MATCH))
        }
        Err(e) => {
            record_license_outcome("internal_error");
            StylesheetResponse::from(e)
        }
    }
}

/// OPTIONS /v1/css
pub async fn stylesheet_preflight() -> Response {
    preflight_response()
}
