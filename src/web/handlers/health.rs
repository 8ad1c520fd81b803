//! Health check handler.

use axum::Json;

use crate::datetime::{now_db_string, to_rfc3339};
use crate::web::dto::HealthResponse;

/// GET /health - Liveness check.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: to_rfc3339(&now_db_string()),
    })
}
