//! Raw table endpoints: per-silo row listing and single-row lookup.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};

use crate::api::endpoints::PageQuery;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Identity};
use crate::store::{RawRow, TableKind};

/// `GET /:table` — raw rows of one source table, paginated. Unknown table
/// names are a client error, not a 404.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(_identity): Extension<Identity>,
    Path(table): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<RawRow>>, ApiError> {
    let kind: TableKind = table.parse()?;
    Ok(Json(ctx.store().rows(kind, page.limit, page.offset).to_vec()))
}

/// `GET /:table/:patient_id` — one raw row by patient id.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(_identity): Extension<Identity>,
    Path((table, patient_id)): Path<(String, String)>,
) -> Result<Json<RawRow>, ApiError> {
    let kind: TableKind = table.parse()?;
    ctx.store()
        .record_by_id(kind, &patient_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!("Patient not found in {} data", kind.as_str()))
        })
}
