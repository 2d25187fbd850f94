//! Genomics-specific endpoints: variant statistics and genotype lookup.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Serialize;
use serde_json::Value;

use crate::api::types::{ApiContext, Identity};
use crate::models::Patient;
use crate::store::{Table, TableKind};

#[derive(Serialize)]
pub struct GenomicsStats {
    pub cyp2c9_distribution: HashMap<String, usize>,
    pub vkorc1_distribution: HashMap<String, usize>,
    pub cyp4f2_distribution: HashMap<String, usize>,
    pub total_patients: usize,
}

/// Per-genotype value counts for one column; null cells are excluded.
fn value_counts(table: &Table, column: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for row in table.rows() {
        if let Some(Value::String(genotype)) = row.get(column) {
            *counts.entry(genotype.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// `GET /genomics/stats` — genotype frequency counts over the raw genomics
/// table (not the merged view).
pub async fn stats(
    State(ctx): State<ApiContext>,
    Extension(_identity): Extension<Identity>,
) -> Json<GenomicsStats> {
    let table = ctx.store().table(TableKind::Genomics);
    Json(GenomicsStats {
        cyp2c9_distribution: value_counts(table, "CYP2C9"),
        vkorc1_distribution: value_counts(table, "VKORC1"),
        cyp4f2_distribution: value_counts(table, "CYP4F2"),
        total_patients: table.len(),
    })
}

/// `GET /genomics/patients/:genotype` — merged patient records whose
/// CYP2C9 genotype matches exactly.
pub async fn by_genotype(
    State(ctx): State<ApiContext>,
    Extension(_identity): Extension<Identity>,
    Path(genotype): Path<String>,
) -> Json<Vec<Patient>> {
    let hits = ctx
        .view()
        .patients()
        .iter()
        .filter(|p| p.genomics.cyp2c9 == genotype)
        .cloned()
        .collect();
    Json(hits)
}
