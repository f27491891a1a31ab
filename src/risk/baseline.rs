use crate::models::{BaselineRisk, FlagKind, FlagSource, RiskLevel};

use super::messages::MessageTemplates;
use super::thresholds::{
    ClinicalThresholds, InstrumentScale, ACE, CSSRS_MAX, CSSRS_METRIC, GAD7, PCL5, PHQ9,
};
use super::types::RiskFlag;

/// Evaluate baseline screening scores.
///
/// Instruments are evaluated independently, in the fixed order PHQ-9, GAD-7,
/// PCL-5, ACE, C-SSRS. Unscored instruments produce nothing.
pub fn calculate_baseline_risks(
    baseline: &BaselineRisk,
    thresholds: &ClinicalThresholds,
) -> Vec<RiskFlag> {
    let scored = [
        (&PHQ9, baseline.phq9, "Depression"),
        (&GAD7, baseline.gad7, "Anxiety"),
        (&PCL5, baseline.pcl5, "PTSD Symptoms"),
        (&ACE, baseline.ace, "Childhood Adversity"),
    ];

    let mut flags: Vec<RiskFlag> = scored
        .into_iter()
        .filter_map(|(scale, score, condition)| {
            score.and_then(|s| evaluate_scale(scale, s, condition))
        })
        .collect();

    if let Some(score) = baseline.cssrs {
        if let Some(flag) = evaluate_cssrs(score, thresholds) {
            flags.push(flag);
        }
    }

    flags
}

fn evaluate_scale(scale: &InstrumentScale, raw: u16, condition: &str) -> Option<RiskFlag> {
    let (score, clamped) = scale.clamp(raw);
    if clamped {
        tracing::warn!(
            metric = scale.metric,
            raw,
            max = scale.max,
            "Score above instrument range, clamped"
        );
    }

    let band = scale.band_for(score);
    let severity = band.severity?;

    Some(RiskFlag {
        source: FlagSource::Baseline,
        kind: FlagKind::ScoreBand,
        metric: scale.metric.to_string(),
        severity,
        value: score.to_string(),
        threshold: Some(f64::from(band.lower)),
        message: MessageTemplates::score_band(band.label, condition),
        recommendation: MessageTemplates::score_band_recommendation(
            scale.metric,
            severity == RiskLevel::High,
        ),
        critical: false,
    })
}

/// C-SSRS is a hard rule, not a band table: at or above the critical score
/// it always yields a critical high flag.
fn evaluate_cssrs(raw: u16, thresholds: &ClinicalThresholds) -> Option<RiskFlag> {
    let score = if raw > CSSRS_MAX {
        tracing::warn!(raw, max = CSSRS_MAX, "C-SSRS above range, clamped");
        CSSRS_MAX
    } else {
        raw
    };

    if score < thresholds.cssrs.critical_score {
        return None;
    }

    Some(RiskFlag {
        source: FlagSource::Baseline,
        kind: FlagKind::SuicideRisk,
        metric: CSSRS_METRIC.to_string(),
        severity: RiskLevel::High,
        value: score.to_string(),
        threshold: Some(f64::from(thresholds.cssrs.critical_score)),
        message: MessageTemplates::suicide_risk(score),
        recommendation: MessageTemplates::suicide_risk_recommendation(),
        critical: true,
    })
}
