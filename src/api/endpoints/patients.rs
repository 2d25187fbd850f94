//! Assembled patient endpoints: paginated list, lookup by id, and search.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};

use crate::api::endpoints::PageQuery;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Identity};
use crate::models::{Patient, PatientSearch};

/// `GET /patients` — paginated list of assembled patient records.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(_identity): Extension<Identity>,
    Query(page): Query<PageQuery>,
) -> Json<Vec<Patient>> {
    Json(ctx.view().list(page.limit, page.offset).to_vec())
}

/// `GET /patients/:patient_id` — complete patient record by id.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(_identity): Extension<Identity>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    ctx.view()
        .get(&patient_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))
}

/// `POST /patients/search` — conjunctive filtering over the merged view.
pub async fn search(
    State(ctx): State<ApiContext>,
    Extension(_identity): Extension<Identity>,
    Json(body): Json<PatientSearch>,
) -> Json<Vec<Patient>> {
    let hits = ctx.view().search(&body).into_iter().cloned().collect();
    Json(hits)
}
