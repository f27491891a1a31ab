use crate::models::RiskLevel;

use super::types::{FlagCounts, RiskDetectionResult, RiskFlag};

/// Highest severity across all flags; `Low` when there are none.
pub fn get_overall_risk_level(flags: &[RiskFlag]) -> RiskLevel {
    flags
        .iter()
        .map(|f| f.severity)
        .max()
        .unwrap_or(RiskLevel::Low)
}

pub fn has_high_risk(flags: &[RiskFlag]) -> bool {
    flags.iter().any(|f| f.severity == RiskLevel::High)
}

/// True when any flag is exactly `Moderate`, independent of high flags.
pub fn has_moderate_risk(flags: &[RiskFlag]) -> bool {
    flags.iter().any(|f| f.severity == RiskLevel::Moderate)
}

pub fn requires_escalation(flags: &[RiskFlag]) -> bool {
    flags.iter().any(|f| f.critical)
}

/// Assemble the result view-model. `all_flags` is baseline, then vital,
/// then progress, each group in evaluator order.
pub fn build_result(
    baseline_flags: Vec<RiskFlag>,
    vital_flags: Vec<RiskFlag>,
    progress_flags: Vec<RiskFlag>,
) -> RiskDetectionResult {
    let all_flags: Vec<RiskFlag> = baseline_flags
        .iter()
        .chain(&vital_flags)
        .chain(&progress_flags)
        .cloned()
        .collect();

    RiskDetectionResult {
        overall_risk_level: get_overall_risk_level(&all_flags),
        has_high_risk: has_high_risk(&all_flags),
        has_moderate_risk: has_moderate_risk(&all_flags),
        requires_escalation: requires_escalation(&all_flags),
        counts: FlagCounts::from_flags(&all_flags),
        all_flags,
        baseline_flags,
        vital_flags,
        progress_flags,
    }
}
