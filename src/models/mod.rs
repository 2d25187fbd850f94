pub mod patient;
pub mod recommendation;
pub mod search;

pub use patient::{Comorbidities, DosingOutcome, Genomics, Lifestyle, Medications, Patient};
pub use recommendation::{DoseFactors, DosingRecommendation};
pub use search::PatientSearch;
