//! Root, health, and patient-id listing endpoints.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::types::{ApiContext, Identity};
use crate::config;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

/// `GET /` — service banner. Public.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: config::APP_NAME,
        version: config::APP_VERSION,
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /health` — liveness check. Public.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

#[derive(Serialize)]
pub struct PatientIdsResponse {
    pub patient_ids: Vec<String>,
}

/// `GET /patient_ids` — every patient identifier, in clinical-table order.
pub async fn patient_ids(
    State(ctx): State<ApiContext>,
    Extension(_identity): Extension<Identity>,
) -> Json<PatientIdsResponse> {
    Json(PatientIdsResponse {
        patient_ids: ctx.store().patient_ids(),
    })
}
