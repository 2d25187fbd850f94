use serde::{Deserialize, Serialize};

/// One assembled patient record, denormalized from all four source tables.
///
/// Field names mirror the wire contract exactly; every field is always
/// present and typed except `Height_cm`, which is omitted when the source
/// cell is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "Patient_ID")]
    pub patient_id: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Weight_kg")]
    pub weight_kg: f64,
    #[serde(rename = "Ethnicity")]
    pub ethnicity: String,
    #[serde(rename = "Height_cm", default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<u32>,
    #[serde(rename = "Genomics")]
    pub genomics: Genomics,
    #[serde(rename = "Lifestyle")]
    pub lifestyle: Lifestyle,
    #[serde(rename = "Dosing")]
    pub dosing: DosingOutcome,
    #[serde(rename = "Comorbidities")]
    pub comorbidities: Comorbidities,
    #[serde(rename = "Medications")]
    pub medications: Medications,
}

/// Pharmacogene genotypes. A missing genotype is the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Genomics {
    #[serde(rename = "CYP2C9")]
    pub cyp2c9: String,
    #[serde(rename = "VKORC1")]
    pub vkorc1: String,
    #[serde(rename = "CYP4F2")]
    pub cyp4f2: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lifestyle {
    #[serde(rename = "Alcohol_Intake")]
    pub alcohol_intake: String,
    #[serde(rename = "Smoking_Status")]
    pub smoking_status: String,
    #[serde(rename = "Diet_VitK_Intake")]
    pub diet_vitk_intake: String,
}

/// Historical dosing outcome for the patient — training data, not the
/// recommendation produced by this service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DosingOutcome {
    #[serde(rename = "Final_Stable_Dose_mg")]
    pub final_stable_dose_mg: f64,
    #[serde(rename = "INR_Stabilization_Days")]
    pub inr_stabilization_days: u32,
    #[serde(rename = "Adverse_Event")]
    pub adverse_event: String,
    #[serde(rename = "Time_in_Therapeutic_Range_Pct")]
    pub time_in_therapeutic_range_pct: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comorbidities {
    #[serde(rename = "Hypertension")]
    pub hypertension: bool,
    #[serde(rename = "Diabetes")]
    pub diabetes: bool,
    #[serde(rename = "Chronic_Kidney_Disease")]
    pub chronic_kidney_disease: bool,
    #[serde(rename = "Heart_Failure")]
    pub heart_failure: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Medications {
    #[serde(rename = "Amiodarone")]
    pub amiodarone: bool,
    #[serde(rename = "Antibiotics")]
    pub antibiotics: bool,
    #[serde(rename = "Aspirin")]
    pub aspirin: bool,
    #[serde(rename = "Statins")]
    pub statins: bool,
}
