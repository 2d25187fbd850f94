use serde::{Deserialize, Serialize};

/// Conjunctive patient search filters. Omitted predicates are ignored;
/// supplied ones each narrow the candidate set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientSearch {
    /// Inclusive lower bound on Age.
    pub age_min: Option<u32>,
    /// Inclusive upper bound on Age.
    pub age_max: Option<u32>,
    /// Exact CYP2C9 genotype match.
    pub genotype: Option<String>,
    /// Exact match on the historical Adverse_Event outcome.
    pub adverse_event: Option<String>,
}
