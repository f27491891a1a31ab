use std::time::Instant;

use super::aggregate::build_result;
use super::baseline::calculate_baseline_risks;
use super::escalation::{EscalationAction, EscalationProtocol};
use super::progress::calculate_progress_risks;
use super::thresholds::ClinicalThresholds;
use super::types::{RiskDetectionInput, RiskDetectionResult, RiskEngine};
use super::vitals::calculate_vital_anomalies;

/// Default implementation of the risk engine.
/// Runs the baseline, vitals and progress evaluators and aggregates their flags.
pub struct DefaultRiskEngine {
    pub(crate) thresholds: ClinicalThresholds,
}

impl DefaultRiskEngine {
    pub fn new(thresholds: ClinicalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClinicalThresholds {
        &self.thresholds
    }
}

impl Default for DefaultRiskEngine {
    fn default() -> Self {
        Self::new(ClinicalThresholds::default())
    }
}

impl RiskEngine for DefaultRiskEngine {
    fn detect(&self, input: &RiskDetectionInput) -> RiskDetectionResult {
        let start = Instant::now();

        let baseline_flags = input
            .baseline
            .as_ref()
            .map(|b| calculate_baseline_risks(b, &self.thresholds))
            .unwrap_or_default();

        let vital_flags = input
            .vitals
            .as_ref()
            .map(|v| calculate_vital_anomalies(v, &self.thresholds))
            .unwrap_or_default();

        let progress_flags = input
            .progress_trends
            .iter()
            .flat_map(|t| calculate_progress_risks(t, &self.thresholds))
            .collect();

        let result = build_result(baseline_flags, vital_flags, progress_flags);

        tracing::info!(
            total = result.counts.total(),
            high = result.counts.high,
            moderate = result.counts.moderate,
            critical = result.counts.critical,
            overall = result.overall_risk_level.as_str(),
            processing_us = start.elapsed().as_micros() as u64,
            "Risk detection complete"
        );

        result
    }

    fn escalations(&self, result: &RiskDetectionResult) -> Vec<EscalationAction> {
        EscalationProtocol::process_critical_flags(&result.all_flags)
    }
}
