use axum::Json;

use crate::types::ProbeResponse;

/// Readiness probe
#[utoipa::path(
    get,
    path = "/readyz",
    tag = "monitoring",
    responses(
        (status = 200, description = "Server is ready to accept traffic", body = ProbeResponse)
    )
)]
pub async fn readyz() -> Json<ProbeResponse> {
    Json(ProbeResponse::ok())
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/livez",
    tag = "monitoring",
    responses(
        (status = 200, description = "Server is alive", body = ProbeResponse)
    )
)]
pub async fn livez() -> Json<ProbeResponse> {
    Json(ProbeResponse::ok())
}
