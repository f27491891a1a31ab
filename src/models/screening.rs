use serde::{Deserialize, Serialize};

/// Normalized intake data for contraindication screening.
///
/// Free-text lists hold short keywords (medication names, diagnoses), never
/// raw notes. `patient_id` is the pseudonymous subject id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeScreeningData {
    pub patient_id: String,
    /// e.g. "psilocybin", "mdma", "ketamine"
    pub session_substance: String,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub psychiatric_history: Vec<String>,
    #[serde(default)]
    pub family_history: Vec<String>,
    #[serde(default)]
    pub cssrs_score: Option<u16>,
    /// Most recent session reading, mmHg.
    #[serde(default)]
    pub last_systolic_bp: Option<f64>,
    #[serde(default)]
    pub is_pregnant: Option<bool>,
    #[serde(default)]
    pub age_years: Option<u32>,
    #[serde(default)]
    pub phq9_score: Option<u16>,
    #[serde(default)]
    pub gad7_score: Option<u16>,
    #[serde(default)]
    pub pcl5_score: Option<u16>,
    #[serde(default)]
    pub bmi: Option<f64>,
}

impl IntakeScreeningData {
    pub fn new(patient_id: impl Into<String>, session_substance: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            session_substance: session_substance.into(),
            ..Default::default()
        }
    }

    pub fn is_mdma_session(&self) -> bool {
        self.session_substance.trim().eq_ignore_ascii_case("mdma")
    }
}
