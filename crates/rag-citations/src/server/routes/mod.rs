//! Routes for the form server

pub mod ask;
pub mod query;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Router,
};
use crate::server::state::AppState;

/// Page routes (the form itself)
pub fn page_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new().route(
        "/",
        get(ask::show_form)
            .post(ask::submit_form)
            .layer(DefaultBodyLimit::max(max_upload_size)),
    )
}

/// JSON API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/query",
            post(query::query_json).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let cohere = &state.config().cohere;
    axum::Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A form backed by a hosted chat model, with citations",
        "model": cohere.model,
        "connectors": cohere.connectors,
        "ground_on_uploads": cohere.ground_on_uploads,
        "ready": state.is_ready(),
        "endpoints": {
            "GET /": "Form page",
            "POST /": "Submit the form (multipart: query, files)",
            "POST /api/query": "Submit the form, answer as JSON",
            "GET /api/info": "This document",
            "GET /health": "Liveness",
            "GET /ready": "Credential configured"
        }
    }))
}
