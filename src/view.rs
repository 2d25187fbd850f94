//! Patient View Builder — inner-joins the four source tables on
//! `Patient_ID` into one assembled [`Patient`] per identifier.
//!
//! Join policy: a patient absent from any one table is silently dropped
//! from the merged view. Every field of the assembled record is
//! null-coalesced to a type-appropriate default, so downstream consumers
//! never see a null marker; `Height_cm` is the single genuinely optional
//! attribute.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::{
    Comorbidities, DosingOutcome, Genomics, Lifestyle, Medications, Patient,
};
use crate::store::{RawRow, TableKind, TableStore};

/// The merged, immutable patient view. Order follows the clinical table.
#[derive(Debug)]
pub struct PatientView {
    patients: Vec<Patient>,
    index: HashMap<String, usize>,
}

impl PatientView {
    /// Build the merged view from a loaded store. Infallible: rows that
    /// cannot be joined are dropped, cells that cannot be coerced fall back
    /// to their defaults.
    pub fn build(store: &TableStore) -> Self {
        let mut patients = Vec::new();
        let mut index = HashMap::new();

        for clinical in store.table(TableKind::Clinical).rows() {
            let Some(id) = clinical.patient_id() else {
                continue;
            };
            let Some(genomics) = store.record_by_id(TableKind::Genomics, id) else {
                tracing::debug!(patient_id = id, "dropped from merged view: no genomics row");
                continue;
            };
            let Some(lifestyle) = store.record_by_id(TableKind::Lifestyle, id) else {
                tracing::debug!(patient_id = id, "dropped from merged view: no lifestyle row");
                continue;
            };
            let Some(outcomes) = store.record_by_id(TableKind::Outcomes, id) else {
                tracing::debug!(patient_id = id, "dropped from merged view: no outcomes row");
                continue;
            };

            let patient = assemble(id, clinical, genomics, lifestyle, outcomes);
            index.entry(id.to_string()).or_insert(patients.len());
            patients.push(patient);
        }

        tracing::info!(patients = patients.len(), "merged patient view built");
        Self { patients, index }
    }

    pub fn get(&self, patient_id: &str) -> Option<&Patient> {
        self.index.get(patient_id).map(|&i| &self.patients[i])
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

fn assemble(
    id: &str,
    clinical: &RawRow,
    genomics: &RawRow,
    lifestyle: &RawRow,
    outcomes: &RawRow,
) -> Patient {
    Patient {
        patient_id: id.to_string(),
        age: int_or_zero(clinical.get("Age")),
        sex: string_or_empty(clinical.get("Sex")),
        weight_kg: float_or_zero(clinical.get("Weight_kg")),
        ethnicity: string_or_empty(clinical.get("Ethnicity")),
        height_cm: optional_int(clinical.get("Height_cm")),
        genomics: Genomics {
            cyp2c9: string_or_empty(genomics.get("CYP2C9")),
            vkorc1: string_or_empty(genomics.get("VKORC1")),
            cyp4f2: string_or_empty(genomics.get("CYP4F2")),
        },
        lifestyle: Lifestyle {
            alcohol_intake: string_or_empty(lifestyle.get("Alcohol_Intake")),
            smoking_status: string_or_empty(lifestyle.get("Smoking_Status")),
            diet_vitk_intake: string_or_empty(lifestyle.get("Diet_VitK_Intake")),
        },
        dosing: DosingOutcome {
            final_stable_dose_mg: float_or_zero(outcomes.get("Final_Stable_Dose_mg")),
            inr_stabilization_days: int_or_zero(outcomes.get("INR_Stabilization_Days")),
            adverse_event: adverse_event_or_none(outcomes.get("Adverse_Event")),
            time_in_therapeutic_range_pct: float_or_zero(
                outcomes.get("Time_in_Therapeutic_Range_Pct"),
            ),
        },
        comorbidities: Comorbidities {
            hypertension: truthy(clinical.get("Hypertension")),
            diabetes: truthy(clinical.get("Diabetes")),
            chronic_kidney_disease: truthy(clinical.get("Chronic_Kidney_Disease")),
            heart_failure: truthy(clinical.get("Heart_Failure")),
        },
        medications: Medications {
            amiodarone: truthy(clinical.get("Amiodarone")),
            antibiotics: truthy(clinical.get("Antibiotics")),
            aspirin: truthy(clinical.get("Aspirin")),
            statins: truthy(clinical.get("Statins")),
        },
    }
}

// ── Coercion rules ──────────────────────────────────────────

fn string_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn float_or_zero(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn int_or_zero(value: Option<&Value>) -> u32 {
    float_or_zero(value).max(0.0) as u32
}

fn optional_int(value: Option<&Value>) -> Option<u32> {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(|f| f.max(0.0) as u32),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

/// `Adverse_Event` distinguishes the literal category `"None"` from an
/// absent cell; both coalesce to `"None"`.
fn adverse_event_or_none(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "None".to_string(),
    }
}

/// Truth-coercion for comorbidity/medication flags. Nonzero numbers and
/// the strings `true`/`yes`/`y`/`1` (case-insensitive) are true; null,
/// absent, and everything else is false.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => {
            matches!(s.to_ascii_lowercase().as_str(), "true" | "yes" | "y" | "1")
        }
        _ => false,
    }
}
