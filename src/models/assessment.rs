use serde::{Deserialize, Serialize};

/// Snapshot of baseline screening scores collected during Preparation.
///
/// Every instrument is optional. `None` means "not assessed" and is never
/// read as a zero score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineRisk {
    #[serde(default)]
    pub phq9: Option<u16>,
    #[serde(default)]
    pub gad7: Option<u16>,
    #[serde(default)]
    pub pcl5: Option<u16>,
    #[serde(default)]
    pub ace: Option<u16>,
    /// Columbia Suicide Severity Rating Scale (0-5).
    #[serde(default)]
    pub cssrs: Option<u16>,
}

impl BaselineRisk {
    /// True when no instrument has been scored yet.
    pub fn is_empty(&self) -> bool {
        self.phq9.is_none()
            && self.gad7.is_none()
            && self.pcl5.is_none()
            && self.ace.is_none()
            && self.cssrs.is_none()
    }
}

/// Integration-phase check-in history used by the red-alert rules.
/// Sequences are chronological, newest last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationSnapshot {
    #[serde(default)]
    pub cssrs_scores: Vec<u16>,
    #[serde(default)]
    pub phq9_scores: Vec<u16>,
    /// Daily pulse-check connection level (1-5).
    #[serde(default)]
    pub pulse_connection: Vec<u8>,
    #[serde(default)]
    pub psqi_scores: Vec<u16>,
    /// Consecutive days without a completed assessment, counted back from today.
    #[serde(default)]
    pub missed_assessment_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscored_baseline_is_empty() {
        assert!(BaselineRisk::default().is_empty());
    }

    #[test]
    fn any_score_makes_baseline_non_empty() {
        let zero_cssrs = BaselineRisk {
            cssrs: Some(0),
            ..Default::default()
        };
        assert!(!zero_cssrs.is_empty());

        let parsed: BaselineRisk = serde_json::from_str(r#"{"ace": 2}"#).unwrap();
        assert!(!parsed.is_empty());
        assert_eq!(parsed.phq9, None);
    }
}
