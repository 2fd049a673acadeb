/// Health check endpoint
///
/// Reports whether the server is up and whether the configured storage
/// backend answers.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "storage": "postgres"
/// }
/// ```
///
/// When the backend does not answer, `status` is `degraded` and `storage`
/// is `unavailable`. The status code is 200 either way.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Storage backend name, or `unavailable`
    pub storage: String,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, storage) = match state.storage.ping().await {
        Ok(()) => ("healthy", state.config.storage.backend_name()),
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            ("degraded", "unavailable")
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage.to_string(),
    })
}
