//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use core_kernel::HealthCheckResult;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub open_declarations: usize,
    pub gateway: HealthCheckResult,
}

pub async fn health_check() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Ready while the submission gateway can take claims; 503 otherwise
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let gateway = state.gateway.health_check().await;
    let open_declarations = state.store.len().await;

    if gateway.is_usable() {
        let body = ReadinessResponse { status: "ready", open_declarations, gateway };
        (StatusCode::OK, Json(body))
    } else {
        tracing::warn!(adapter = %gateway.adapter_id, "Submission gateway unhealthy");
        let body = ReadinessResponse { status: "unavailable", open_declarations, gateway };
        (StatusCode::SERVICE_UNAVAILABLE, Json(body))
    }
}
