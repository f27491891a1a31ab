use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{ContraindicationCategory, ContraindicationSeverity, ScreeningVerdict};

/// One fired screening rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContraindicationFlag {
    /// Stable rule id, e.g. `ABS-MEDICATION-LITHIUM`.
    pub id: String,
    pub severity: ContraindicationSeverity,
    pub category: ContraindicationCategory,
    pub headline: String,
    pub detail: String,
    /// Intake form section the rule read from.
    pub source: String,
    pub regulatory_basis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContraindicationResult {
    pub verdict: ScreeningVerdict,
    pub absolute_flags: Vec<ContraindicationFlag>,
    pub relative_flags: Vec<ContraindicationFlag>,
    pub generated_at: NaiveDateTime,
    pub patient_id: String,
    pub session_substance: String,
}

impl ContraindicationResult {
    pub fn flag_ids(&self) -> Vec<&str> {
        self.absolute_flags
            .iter()
            .chain(&self.relative_flags)
            .map(|f| f.id.as_str())
            .collect()
    }

    pub fn is_clear(&self) -> bool {
        self.verdict == ScreeningVerdict::Clear
    }
}

/// Verdict precedence: any absolute flag blocks, any relative flag cautions.
pub fn verdict_for(absolute: &[ContraindicationFlag], relative: &[ContraindicationFlag]) -> ScreeningVerdict {
    if !absolute.is_empty() {
        ScreeningVerdict::DoNotProceed
    } else if !relative.is_empty() {
        ScreeningVerdict::ProceedWithCaution
    } else {
        ScreeningVerdict::Clear
    }
}
