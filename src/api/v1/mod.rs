//! Versioned public endpoints

pub mod stylesheet;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new().route(
        "/css",
        get(stylesheet::get_stylesheet).options(stylesheet::stylesheet_preflight),
    )
}
