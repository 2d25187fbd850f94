//! Dosing Recommendation Engine — a pure, deterministic rule set mapping
//! an assembled patient record to a warfarin dose recommendation.
//!
//! Not a learned model: the genotype factor tables and clinical
//! adjustments below are fixed constants.

use crate::models::{DoseFactors, DosingRecommendation, Patient};

/// Starting daily dose in mg before any adjustment.
pub const BASE_DOSE_MG: f64 = 5.0;

pub const WARN_POOR_METABOLIZER: &str = "Poor metabolizer - monitor closely for bleeding";
pub const WARN_ELDERLY: &str = "Elderly patient - increased bleeding risk";
pub const WARN_AMIODARONE: &str = "Amiodarone use detected - significant dose reduction needed";
pub const WARN_INCOMPLETE_GENETICS: &str =
    "Incomplete genetic data - recommendation less reliable";

/// CYP2C9 metabolizer factor. Unmapped genotypes are a no-op multiplier,
/// not an error.
fn cyp2c9_factor(genotype: &str) -> f64 {
    match genotype {
        "*1/*1" => 1.0,
        "*1/*2" => 0.8,
        "*1/*3" => 0.6,
        "*2/*2" => 0.5,
        "*2/*3" => 0.4,
        "*3/*3" => 0.3,
        _ => 1.0,
    }
}

/// VKORC1 sensitivity factor. Unmapped genotypes are a no-op multiplier.
fn vkorc1_factor(genotype: &str) -> f64 {
    match genotype {
        "G/G" => 1.0,
        "A/G" => 0.7,
        "A/A" => 0.5,
        _ => 1.0,
    }
}

/// Round to one decimal, half away from zero (`f64::round` semantics):
/// 1.25 → 1.3.
fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Compute the dosing recommendation for one patient.
///
/// Deterministic and side-effect-free; never fails given a well-formed
/// patient. Callers are responsible for resolving the patient first and
/// signalling `NotFound` when the identifier is unknown.
pub fn recommend(patient: &Patient) -> DosingRecommendation {
    let cyp2c9 = patient.genomics.cyp2c9.as_str();
    let vkorc1 = patient.genomics.vkorc1.as_str();
    let on_amiodarone = patient.medications.amiodarone;

    let mut dose = BASE_DOSE_MG;
    dose *= cyp2c9_factor(cyp2c9);
    dose *= vkorc1_factor(vkorc1);

    if patient.age > 75 {
        dose *= 0.8;
    }
    if patient.weight_kg < 60.0 {
        dose *= 0.9;
    }
    if on_amiodarone {
        dose *= 0.7;
    }

    // Fixed reporting constants, intentionally decoupled from the
    // multiplicative adjustments above.
    let factors = DoseFactors {
        genetic_impact: 0.6,
        age_impact: if patient.age > 75 { 0.2 } else { 0.0 },
        weight_impact: if patient.weight_kg < 60.0 { 0.1 } else { 0.0 },
        amiodarone_impact: if on_amiodarone { 0.3 } else { 0.0 },
    };

    let mut warnings = Vec::new();
    if cyp2c9 == "*2/*3" || cyp2c9 == "*3/*3" {
        warnings.push(WARN_POOR_METABOLIZER.to_string());
    }
    if patient.age > 80 {
        warnings.push(WARN_ELDERLY.to_string());
    }
    if on_amiodarone {
        warnings.push(WARN_AMIODARONE.to_string());
    }

    let mut confidence_score = 0.85;
    if cyp2c9.is_empty() || vkorc1.is_empty() {
        confidence_score = 0.6;
        warnings.push(WARN_INCOMPLETE_GENETICS.to_string());
    }

    DosingRecommendation {
        patient_id: patient.patient_id.clone(),
        recommended_dose: round_to_tenth(dose),
        confidence_score,
        factors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Comorbidities, DosingOutcome, Genomics, Lifestyle, Medications};
    use approx::assert_relative_eq;

    fn patient(cyp2c9: &str, vkorc1: &str, age: u32, weight_kg: f64, amiodarone: bool) -> Patient {
        Patient {
            patient_id: "P000".into(),
            age,
            sex: "F".into(),
            weight_kg,
            ethnicity: "Caucasian".into(),
            height_cm: Some(170),
            genomics: Genomics {
                cyp2c9: cyp2c9.into(),
                vkorc1: vkorc1.into(),
                cyp4f2: "C/C".into(),
            },
            lifestyle: Lifestyle::default(),
            dosing: DosingOutcome::default(),
            comorbidities: Comorbidities::default(),
            medications: Medications {
                amiodarone,
                ..Default::default()
            },
        }
    }

    #[test]
    fn wild_type_patient_gets_base_dose() {
        let rec = recommend(&patient("*1/*1", "G/G", 45, 80.0, false));
        assert_relative_eq!(rec.recommended_dose, 5.0);
        assert_relative_eq!(rec.confidence_score, 0.85);
        assert!(rec.warnings.is_empty());
        assert_relative_eq!(rec.factors.genetic_impact, 0.6);
        assert_relative_eq!(rec.factors.age_impact, 0.0);
    }

    #[test]
    fn all_reductions_stack_multiplicatively() {
        // 5.0 * 0.3 * 0.5 * 0.8 * 0.9 * 0.7 = 0.378 → 0.4
        let rec = recommend(&patient("*3/*3", "A/A", 85, 55.0, true));
        assert_relative_eq!(rec.recommended_dose, 0.4);
        assert_relative_eq!(rec.confidence_score, 0.85);
        assert_eq!(
            rec.warnings,
            vec![WARN_POOR_METABOLIZER, WARN_ELDERLY, WARN_AMIODARONE]
        );
        assert_relative_eq!(rec.factors.age_impact, 0.2);
        assert_relative_eq!(rec.factors.weight_impact, 0.1);
        assert_relative_eq!(rec.factors.amiodarone_impact, 0.3);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 5.0 * 0.5 * 0.5 = 1.25 exactly (every factor is a power of two
        // over ten), so this exercises the .x5 boundary: 1.25 → 1.3.
        let rec = recommend(&patient("*2/*2", "A/A", 50, 70.0, false));
        assert_relative_eq!(rec.recommended_dose, 1.3);
    }

    #[test]
    fn unknown_genotypes_are_noop_multipliers() {
        let rec = recommend(&patient("*9/*9", "X/X", 45, 80.0, false));
        assert_relative_eq!(rec.recommended_dose, 5.0);
        assert!(rec.warnings.is_empty());
    }

    #[test]
    fn missing_genotype_lowers_confidence() {
        let rec = recommend(&patient("", "A/A", 45, 80.0, false));
        assert_relative_eq!(rec.confidence_score, 0.6);
        assert_eq!(rec.warnings, vec![WARN_INCOMPLETE_GENETICS]);
        // Empty genotype is also a no-op multiplier: 5.0 * 0.5 = 2.5.
        assert_relative_eq!(rec.recommended_dose, 2.5);

        let rec = recommend(&patient("*1/*1", "", 45, 80.0, false));
        assert_relative_eq!(rec.confidence_score, 0.6);
    }

    #[test]
    fn missing_genotype_overrides_other_confidence_paths() {
        // Incomplete genetics wins regardless of every other factor firing.
        let rec = recommend(&patient("", "", 85, 50.0, true));
        assert_relative_eq!(rec.confidence_score, 0.6);
        assert_eq!(rec.warnings.last().map(String::as_str), Some(WARN_INCOMPLETE_GENETICS));
    }

    #[test]
    fn age_boundaries() {
        // 75 is not "over 75"; 76 is.
        let rec = recommend(&patient("*1/*1", "G/G", 75, 80.0, false));
        assert_relative_eq!(rec.recommended_dose, 5.0);
        assert_relative_eq!(rec.factors.age_impact, 0.0);

        let rec = recommend(&patient("*1/*1", "G/G", 76, 80.0, false));
        assert_relative_eq!(rec.recommended_dose, 4.0);
        assert_relative_eq!(rec.factors.age_impact, 0.2);

        // Elderly warning starts above 80.
        let rec = recommend(&patient("*1/*1", "G/G", 80, 80.0, false));
        assert!(rec.warnings.is_empty());
        let rec = recommend(&patient("*1/*1", "G/G", 81, 80.0, false));
        assert_eq!(rec.warnings, vec![WARN_ELDERLY]);
    }

    #[test]
    fn weight_boundary() {
        let rec = recommend(&patient("*1/*1", "G/G", 45, 60.0, false));
        assert_relative_eq!(rec.recommended_dose, 5.0);

        let rec = recommend(&patient("*1/*1", "G/G", 45, 59.9, false));
        assert_relative_eq!(rec.recommended_dose, 4.5);
        assert_relative_eq!(rec.factors.weight_impact, 0.1);
    }

    #[test]
    fn poor_metabolizer_warning_covers_both_genotypes() {
        for genotype in ["*2/*3", "*3/*3"] {
            let rec = recommend(&patient(genotype, "G/G", 45, 80.0, false));
            assert_eq!(rec.warnings, vec![WARN_POOR_METABOLIZER]);
        }
        let rec = recommend(&patient("*2/*2", "G/G", 45, 80.0, false));
        assert!(rec.warnings.is_empty());
    }

    #[test]
    fn recommendation_is_deterministic() {
        let p = patient("*1/*3", "A/G", 70, 62.0, true);
        let a = recommend(&p);
        let b = recommend(&p);
        assert_eq!(a.recommended_dose, b.recommended_dose);
        assert_eq!(a.warnings, b.warnings);
        assert_eq!(a.confidence_score, b.confidence_score);
    }
}
