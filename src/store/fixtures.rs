//! Shared test fixtures: a small synthetic dataset exercising missing
//! cells, inner-join drops, truthy flag text, and genotype edge cases.

use super::TableStore;

const GENOMICS: &str = "\
Patient_ID,CYP2C9,VKORC1,CYP4F2
P001,*1/*1,G/G,C/C
P002,*3/*3,A/A,T/T
P003,,A/G,C/T
P005,*2/*2,A/A,C/T
P006,*9/*9,G/G,C/C
";

// P004 is present here but absent from genomics, so the merged view drops it.
const CLINICAL: &str = "\
Patient_ID,Age,Sex,Weight_kg,Ethnicity,Height_cm,Hypertension,Diabetes,Chronic_Kidney_Disease,Heart_Failure,Amiodarone,Antibiotics,Aspirin,Statins
P001,45,M,80.5,Caucasian,178,0,0,0,0,0,0,0,1
P002,85,F,55.0,Asian,150,1,1,0,1,1,0,1,0
P003,62,F,70.2,Hispanic,,0,1,0,0,0,1,0,0
P004,58,M,90.0,African,182,1,0,0,0,0,0,0,0
P005,50,F,70.0,Caucasian,165,0,0,0,0,0,0,0,0
P006,30,M,95.5,Asian,180,0,0,1,0,0,0,true,yes
";

const LIFESTYLE: &str = "\
Patient_ID,Alcohol_Intake,Smoking_Status,Diet_VitK_Intake
P001,Moderate,Never,High
P002,None,Former,Low
P003,,Current,Medium
P004,High,Never,Low
P005,Low,Never,Medium
P006,Moderate,Current,High
";

const OUTCOMES: &str = "\
Patient_ID,Final_Stable_Dose_mg,INR_Stabilization_Days,Adverse_Event,Time_in_Therapeutic_Range_%
P001,5.0,10,None,82.4
P002,1.5,21,Bleeding,61.0
P003,4.0,14,,75.5
P004,6.5,9,None,88.1
P005,2.5,12,Bleeding,70.3
P006,5.5,11,Clotting,79.9
";

pub(crate) fn sample_data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("genomics.csv"), GENOMICS).unwrap();
    std::fs::write(dir.path().join("clinical.csv"), CLINICAL).unwrap();
    std::fs::write(dir.path().join("lifestyle.csv"), LIFESTYLE).unwrap();
    std::fs::write(dir.path().join("outcomes.csv"), OUTCOMES).unwrap();
    dir
}

pub(crate) fn sample_store() -> TableStore {
    let dir = sample_data_dir();
    TableStore::load(dir.path()).unwrap()
}
