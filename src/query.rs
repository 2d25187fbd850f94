//! Query Engine — pagination, lookup, and multi-predicate filtering over
//! the merged patient view.

use std::ops::Range;

use crate::config::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use crate::models::{Patient, PatientSearch};
use crate::view::PatientView;

/// Shared pagination rule for every list endpoint: limit defaults to 100
/// and is clamped to [1, 1000]; an out-of-range offset yields an empty
/// range, never an error.
pub fn page_bounds(len: usize, limit: Option<usize>, offset: Option<usize>) -> Range<usize> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    let start = offset.unwrap_or(0).min(len);
    let end = start.saturating_add(limit).min(len);
    start..end
}

impl PatientView {
    /// Stable, insertion-order-preserving page of the merged view.
    pub fn list(&self, limit: Option<usize>, offset: Option<usize>) -> &[Patient] {
        let patients = self.patients();
        &patients[page_bounds(patients.len(), limit, offset)]
    }

    /// Conjunctive filter; every supplied predicate must hold. The genotype
    /// predicate matches CYP2C9 only. Result order is the stable list order.
    pub fn search(&self, search: &PatientSearch) -> Vec<&Patient> {
        self.patients()
            .iter()
            .filter(|p| search.age_min.map_or(true, |min| p.age >= min))
            .filter(|p| search.age_max.map_or(true, |max| p.age <= max))
            .filter(|p| {
                search
                    .genotype
                    .as_deref()
                    .map_or(true, |g| p.genomics.cyp2c9 == g)
            })
            .filter(|p| {
                search
                    .adverse_event
                    .as_deref()
                    .map_or(true, |e| p.dosing.adverse_event == e)
            })
            .collect()
    }
}
