use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BaselineRisk, FlagKind, FlagSource, ProgressTrend, RiskLevel, VitalSigns};

use super::escalation::EscalationAction;

// ---------------------------------------------------------------------------
// RiskFlag
// ---------------------------------------------------------------------------

/// A single warning emitted by an evaluator.
///
/// Flags only exist for met conditions: the absence of a flag is the
/// "normal" signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub source: FlagSource,
    pub kind: FlagKind,
    /// Instrument or vital name, e.g. "PHQ-9" or "heart_rate".
    pub metric: String,
    pub severity: RiskLevel,
    /// Observed value, formatted for display.
    pub value: String,
    /// The cutoff that fired, when a single number describes it.
    pub threshold: Option<f64>,
    pub message: String,
    pub recommendation: String,
    /// Hard safety signal. Consumers must block and require escalation.
    pub critical: bool,
}

// ---------------------------------------------------------------------------
// Input & result
// ---------------------------------------------------------------------------

/// Everything the forms currently know about the patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskDetectionInput {
    #[serde(default)]
    pub baseline: Option<BaselineRisk>,
    #[serde(default)]
    pub vitals: Option<VitalSigns>,
    #[serde(default)]
    pub progress_trends: Vec<ProgressTrend>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskDetectionResult {
    /// Baseline, then vital, then progress flags.
    pub all_flags: Vec<RiskFlag>,
    pub baseline_flags: Vec<RiskFlag>,
    pub vital_flags: Vec<RiskFlag>,
    pub progress_flags: Vec<RiskFlag>,
    pub overall_risk_level: RiskLevel,
    pub has_high_risk: bool,
    pub has_moderate_risk: bool,
    pub requires_escalation: bool,
    pub counts: FlagCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FlagCounts {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
    pub critical: usize,
}

impl FlagCounts {
    pub fn from_flags(flags: &[RiskFlag]) -> Self {
        let mut counts = Self::default();
        for flag in flags {
            match flag.severity {
                RiskLevel::Low => counts.low += 1,
                RiskLevel::Moderate => counts.moderate += 1,
                RiskLevel::High => counts.high += 1,
            }
            if flag.critical {
                counts.critical += 1;
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.low + self.moderate + self.high
    }
}

// ---------------------------------------------------------------------------
// RiskError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Threshold file load failed ({0}): {1}")]
    ThresholdLoad(String, String),

    #[error("Threshold file parse failed ({0}): {1}")]
    ThresholdParse(String, String),

    #[error("Invalid clinical thresholds: {0}")]
    InvalidThresholds(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// RiskEngine trait
// ---------------------------------------------------------------------------

/// Entry point the forms call on every relevant input change.
pub trait RiskEngine {
    /// Run every evaluator over the current input and aggregate the flags.
    fn detect(&self, input: &RiskDetectionInput) -> RiskDetectionResult;

    /// Escalation actions for the critical flags in a result.
    fn escalations(&self, result: &RiskDetectionResult) -> Vec<EscalationAction>;
}
