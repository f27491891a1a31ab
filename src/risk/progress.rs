use crate::models::{FlagKind, FlagSource, ProgressTrend, RiskLevel, TrendDirection};

use super::messages::MessageTemplates;
use super::thresholds::ClinicalThresholds;
use super::types::RiskFlag;

/// Evaluate one metric's series against its pre-treatment baseline.
///
/// Emits at most one flag: worsening takes precedence over stagnation, and
/// improvement never flags.
pub fn calculate_progress_risks(
    trend: &ProgressTrend,
    thresholds: &ClinicalThresholds,
) -> Vec<RiskFlag> {
    let t = &thresholds.trend;
    let Some(latest) = trend.latest() else {
        return Vec::new();
    };
    if trend.values.len() < 2 {
        return Vec::new();
    }

    let change = worsening_amount(trend.direction, latest - trend.baseline);

    if change > t.worsening_delta {
        let run = trailing_worsening_steps(trend);
        let severity = if run >= t.escalating_worsening_steps {
            RiskLevel::High
        } else {
            RiskLevel::Moderate
        };
        return vec![RiskFlag {
            source: FlagSource::Progress,
            kind: FlagKind::Worsening,
            metric: trend.metric.clone(),
            severity,
            value: format!("{}", latest),
            threshold: Some(t.worsening_delta),
            message: MessageTemplates::worsening(&trend.metric, change),
            recommendation: MessageTemplates::worsening_recommendation(),
            critical: false,
        }];
    }

    let flat = trend
        .values
        .iter()
        .all(|v| (v - trend.baseline).abs() <= t.worsening_delta);

    if flat && trend.values.len() >= t.stagnation_min_observations {
        return vec![RiskFlag {
            source: FlagSource::Progress,
            kind: FlagKind::Stagnant,
            metric: trend.metric.clone(),
            severity: RiskLevel::Low,
            value: format!("{}", latest),
            threshold: Some(t.worsening_delta),
            message: MessageTemplates::stagnant(&trend.metric, trend.values.len()),
            recommendation: MessageTemplates::stagnant_recommendation(),
            critical: false,
        }];
    }

    Vec::new()
}

/// Signed change oriented so that positive always means "worse".
fn worsening_amount(direction: TrendDirection, raw_change: f64) -> f64 {
    match direction {
        TrendDirection::HigherIsWorse => raw_change,
        TrendDirection::HigherIsBetter => -raw_change,
    }
}

/// Length of the run of worsening steps ending at the latest observation.
fn trailing_worsening_steps(trend: &ProgressTrend) -> usize {
    trend
        .values
        .windows(2)
        .rev()
        .take_while(|w| worsening_amount(trend.direction, w[1] - w[0]) > 0.0)
        .count()
}
