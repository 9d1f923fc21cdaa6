//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness report: the service name, a fixed status, and the crate
/// version the binary was built from.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service identifier.
    pub service: &'static str,
    /// Always "ok" while the process is serving requests.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "caixa",
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the health route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
