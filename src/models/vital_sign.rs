use serde::{Deserialize, Serialize};

/// One observation of session vitals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    /// Beats per minute.
    pub heart_rate: f64,
    /// Personal resting heart rate recorded during Preparation.
    #[serde(default)]
    pub baseline_heart_rate: Option<f64>,
    pub blood_pressure_systolic: f64,
    pub blood_pressure_diastolic: f64,
    /// Oxygen saturation, percent.
    #[serde(default)]
    pub spo2: Option<f64>,
    /// Degrees Fahrenheit.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Corrected QT interval from the primary EKG device, milliseconds.
    #[serde(default)]
    pub qtc_interval_ms: Option<f64>,
    /// Same reading from the secondary EKG device, when dual monitoring is on.
    #[serde(default)]
    pub qtc_secondary_ms: Option<f64>,
}

impl VitalSigns {
    pub fn new(heart_rate: f64, systolic: f64, diastolic: f64) -> Self {
        Self {
            heart_rate,
            baseline_heart_rate: None,
            blood_pressure_systolic: systolic,
            blood_pressure_diastolic: diastolic,
            spo2: None,
            temperature: None,
            qtc_interval_ms: None,
            qtc_secondary_ms: None,
        }
    }
}
