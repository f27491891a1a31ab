use crate::models::{AlertSeverity, IntegrationSnapshot, RedAlertType};
use crate::risk::thresholds::ClinicalThresholds;

use super::types::RedAlert;

/// Run every red-alert rule over the integration check-in history.
/// Order: C-SSRS, PHQ-9, pulse check, PSQI, missed assessments.
pub fn detect_red_alerts(
    snapshot: &IntegrationSnapshot,
    thresholds: &ClinicalThresholds,
) -> Vec<RedAlert> {
    [
        detect_cssrs_spike(snapshot, thresholds),
        detect_phq9_regression(snapshot, thresholds),
        detect_pulse_drop(snapshot, thresholds),
        detect_psqi_decline(snapshot, thresholds),
        detect_missed_assessments(snapshot, thresholds),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn detect_cssrs_spike(s: &IntegrationSnapshot, t: &ClinicalThresholds) -> Option<RedAlert> {
    let latest = *s.cssrs_scores.last()?;
    if latest < t.cssrs.critical_score {
        return None;
    }
    Some(RedAlert::new(
        RedAlertType::CssrsSpike,
        AlertSeverity::Critical,
        format!(
            "C-SSRS score {} indicates elevated suicide risk. Immediate clinician contact required.",
            latest
        ),
        latest.to_string(),
    ))
}

/// Rise from the first integration PHQ-9 to the latest.
fn detect_phq9_regression(s: &IntegrationSnapshot, t: &ClinicalThresholds) -> Option<RedAlert> {
    let rise = rise_since_first(&s.phq9_scores)?;
    if rise <= i32::from(t.red_alerts.phq9_regression_points) {
        return None;
    }
    Some(RedAlert::new(
        RedAlertType::Phq9Regression,
        AlertSeverity::High,
        format!(
            "PHQ-9 increased by {} points since integration began. Schedule an urgent check-in.",
            rise
        ),
        format!("+{}", rise),
    ))
}

fn detect_pulse_drop(s: &IntegrationSnapshot, t: &ClinicalThresholds) -> Option<RedAlert> {
    let rules = &t.red_alerts;
    let days = rules.pulse_drop_days.max(1);
    if s.pulse_connection.len() < days {
        return None;
    }
    let recent = &s.pulse_connection[s.pulse_connection.len() - days..];
    if !recent.iter().all(|&level| level < rules.pulse_drop_level) {
        return None;
    }
    Some(RedAlert::new(
        RedAlertType::PulseDrop,
        AlertSeverity::Moderate,
        format!(
            "Connection level below {} for {} consecutive days. Trigger a full PHQ-9 assessment.",
            rules.pulse_drop_level, days
        ),
        recent
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    ))
}

/// PSQI rises as sleep gets worse.
fn detect_psqi_decline(s: &IntegrationSnapshot, t: &ClinicalThresholds) -> Option<RedAlert> {
    let rise = rise_since_first(&s.psqi_scores)?;
    if rise <= i32::from(t.red_alerts.psqi_decline_points) {
        return None;
    }
    Some(RedAlert::new(
        RedAlertType::PsqiDecline,
        AlertSeverity::Moderate,
        format!(
            "Sleep quality declined by {} PSQI points. Sleep decline often precedes relapse.",
            rise
        ),
        format!("+{}", rise),
    ))
}

fn detect_missed_assessments(s: &IntegrationSnapshot, t: &ClinicalThresholds) -> Option<RedAlert> {
    if s.missed_assessment_days < t.red_alerts.missed_assessment_days {
        return None;
    }
    Some(RedAlert::new(
        RedAlertType::MissedAssessments,
        AlertSeverity::Low,
        format!(
            "{} consecutive days without a completed check-in. Reach out to the patient.",
            s.missed_assessment_days
        ),
        s.missed_assessment_days.to_string(),
    ))
}

fn rise_since_first(scores: &[u16]) -> Option<i32> {
    if scores.len() < 2 {
        return None;
    }
    let first = i32::from(*scores.first()?);
    let latest = i32::from(*scores.last()?);
    Some(latest - first)
}
