use serde::{Deserialize, Serialize};

/// Dosing recommendation derived for one patient. Computed fresh on every
/// request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DosingRecommendation {
    pub patient_id: String,
    /// Recommended daily dose in mg, rounded to one decimal.
    pub recommended_dose: f64,
    /// Heuristic completeness score in [0, 1]; 0.85 with full genetic data,
    /// 0.6 when a genotype is missing. Not a statistical measure.
    pub confidence_score: f64,
    pub factors: DoseFactors,
    pub warnings: Vec<String>,
}

/// Fixed per-factor contributions reported alongside the dose. These are
/// display constants, intentionally decoupled from the multiplicative
/// adjustments actually applied to the dose.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoseFactors {
    pub genetic_impact: f64,
    pub age_impact: f64,
    pub weight_impact: f64,
    pub amiodarone_impact: f64,
}
