//! HTTP handler modules for people-api.

pub mod notes;
pub mod pages;
pub mod people;

use axum::{response::IntoResponse, Json};

/// Liveness check.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
