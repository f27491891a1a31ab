//! Clinical risk detection.
//!
//! Three independent evaluators feed one aggregator:
//! 1. Baseline screening scores (PHQ-9, GAD-7, PCL-5, ACE, C-SSRS)
//! 2. Session vitals (heart rate, blood pressure, SpO2, temperature, QTc)
//! 3. Progress trends against the pre-treatment baseline
//!
//! Evaluators are pure and recomputed on every input change. Critical flags
//! are turned into blocking actions by the escalation protocol.

pub mod aggregate;
pub mod baseline;
pub mod engine;
pub mod escalation;
pub mod messages;
pub mod progress;
pub mod thresholds;
pub mod types;
pub mod vitals;

pub use aggregate::{
    build_result, get_overall_risk_level, has_high_risk, has_moderate_risk, requires_escalation,
};
pub use baseline::calculate_baseline_risks;
pub use engine::DefaultRiskEngine;
pub use escalation::{EscalationAction, EscalationActionType, EscalationProtocol};
pub use progress::calculate_progress_risks;
pub use thresholds::ClinicalThresholds;
pub use types::{FlagCounts, RiskDetectionInput, RiskDetectionResult, RiskEngine, RiskError, RiskFlag};
pub use vitals::calculate_vital_anomalies;
