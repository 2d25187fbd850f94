//! Dosing recommendation endpoint.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Identity};
use crate::dosing::recommend;
use crate::models::DosingRecommendation;

/// `GET /dosing/recommendation/:patient_id` — compute the warfarin dosing
/// recommendation for one patient. The recommendation is derived fresh on
/// every request and never persisted.
pub async fn recommendation(
    State(ctx): State<ApiContext>,
    Extension(_identity): Extension<Identity>,
    Path(patient_id): Path<String>,
) -> Result<Json<DosingRecommendation>, ApiError> {
    let patient = ctx
        .view()
        .get(&patient_id)
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    Ok(Json(recommend(patient)))
}
