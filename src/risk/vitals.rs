use crate::models::{BloodPressureStage, FlagKind, FlagSource, RiskLevel, VitalSigns};

use super::messages::MessageTemplates;
use super::thresholds::ClinicalThresholds;
use super::types::RiskFlag;

/// Evaluate one vitals observation.
///
/// Rules are independent and may all fire. Order: absolute heart rate,
/// heart rate relative to personal baseline, blood pressure, SpO2,
/// temperature, QTc. Absolute and relative heart-rate flags are both kept.
pub fn calculate_vital_anomalies(
    vitals: &VitalSigns,
    thresholds: &ClinicalThresholds,
) -> Vec<RiskFlag> {
    let mut flags = Vec::new();

    flags.extend(absolute_heart_rate(vitals.heart_rate, thresholds));
    if let Some(baseline) = vitals.baseline_heart_rate {
        flags.extend(relative_heart_rate(vitals.heart_rate, baseline, thresholds));
    }
    flags.extend(blood_pressure(
        vitals.blood_pressure_systolic,
        vitals.blood_pressure_diastolic,
        thresholds,
    ));
    if let Some(spo2) = vitals.spo2 {
        flags.extend(oxygen_saturation(spo2, thresholds));
    }
    if let Some(temperature) = vitals.temperature {
        flags.extend(body_temperature(temperature, thresholds));
    }
    flags.extend(qtc_interval(
        vitals.qtc_interval_ms,
        vitals.qtc_secondary_ms,
        thresholds,
    ));

    flags
}

fn vital_flag(
    kind: FlagKind,
    metric: &str,
    severity: RiskLevel,
    value: String,
    threshold: Option<f64>,
    message: String,
    recommendation: String,
) -> RiskFlag {
    RiskFlag {
        source: FlagSource::Vital,
        kind,
        metric: metric.to_string(),
        severity,
        value,
        threshold,
        message,
        recommendation,
        critical: false,
    }
}

fn absolute_heart_rate(hr: f64, thresholds: &ClinicalThresholds) -> Option<RiskFlag> {
    let t = &thresholds.heart_rate;

    if hr > t.high_bpm {
        let severity = if hr > t.severe_high_bpm {
            RiskLevel::High
        } else {
            RiskLevel::Moderate
        };
        Some(vital_flag(
            FlagKind::Tachycardia,
            "heart_rate",
            severity,
            format!("{:.0} bpm", hr),
            Some(t.high_bpm),
            MessageTemplates::tachycardia(hr),
            MessageTemplates::heart_rate_recommendation(),
        ))
    } else if hr < t.low_bpm {
        let severity = if hr < t.severe_low_bpm {
            RiskLevel::High
        } else {
            RiskLevel::Moderate
        };
        Some(vital_flag(
            FlagKind::Bradycardia,
            "heart_rate",
            severity,
            format!("{:.0} bpm", hr),
            Some(t.low_bpm),
            MessageTemplates::bradycardia(hr),
            MessageTemplates::heart_rate_recommendation(),
        ))
    } else {
        None
    }
}

/// A non-positive baseline cannot anchor a percentage and disables the rule.
fn relative_heart_rate(hr: f64, baseline: f64, thresholds: &ClinicalThresholds) -> Option<RiskFlag> {
    let t = &thresholds.heart_rate;
    if baseline <= 0.0 {
        tracing::debug!(baseline, "Non-positive baseline heart rate, relative rule skipped");
        return None;
    }

    let percent_change = (hr - baseline) / baseline * 100.0;
    if percent_change.abs() <= t.baseline_deviation_pct {
        return None;
    }

    let severity = if percent_change > t.baseline_deviation_high_pct {
        RiskLevel::High
    } else {
        RiskLevel::Moderate
    };

    Some(vital_flag(
        FlagKind::HeartRateDeviation,
        "heart_rate",
        severity,
        format!("{:.0} bpm ({:+.0}% from baseline)", hr, percent_change),
        Some(t.baseline_deviation_pct),
        MessageTemplates::heart_rate_deviation(hr, percent_change),
        MessageTemplates::heart_rate_recommendation(),
    ))
}

fn blood_pressure(systolic: f64, diastolic: f64, thresholds: &ClinicalThresholds) -> Option<RiskFlag> {
    let stage = thresholds.blood_pressure.stage(systolic, diastolic);
    let (severity, label, critical) = match stage {
        BloodPressureStage::Normal | BloodPressureStage::Elevated => return None,
        BloodPressureStage::Stage1 => (RiskLevel::Moderate, "Stage 1 Hypertension", false),
        BloodPressureStage::Stage2 => (RiskLevel::High, "Stage 2 Hypertension", false),
        BloodPressureStage::Crisis => (RiskLevel::High, "Hypertensive Crisis", true),
    };

    let mut flag = vital_flag(
        FlagKind::Hypertension,
        "blood_pressure",
        severity,
        format!("{:.0}/{:.0} mmHg", systolic, diastolic),
        None,
        MessageTemplates::blood_pressure(label, systolic, diastolic),
        MessageTemplates::blood_pressure_recommendation(critical),
    );
    flag.critical = critical;
    Some(flag)
}

fn oxygen_saturation(spo2: f64, thresholds: &ClinicalThresholds) -> Option<RiskFlag> {
    let t = &thresholds.spo2;
    if spo2 >= t.low_pct {
        return None;
    }
    let severity = if spo2 < t.severe_low_pct {
        RiskLevel::High
    } else {
        RiskLevel::Moderate
    };
    Some(vital_flag(
        FlagKind::Hypoxia,
        "spo2",
        severity,
        format!("{:.0}%", spo2),
        Some(t.low_pct),
        MessageTemplates::hypoxia(spo2),
        MessageTemplates::hypoxia_recommendation(),
    ))
}

fn body_temperature(temperature: f64, thresholds: &ClinicalThresholds) -> Option<RiskFlag> {
    let t = &thresholds.temperature;
    let fever = temperature > t.high;
    if !fever && temperature >= t.low {
        return None;
    }

    let severity = if temperature > t.severe_high || temperature < t.severe_low {
        RiskLevel::High
    } else {
        RiskLevel::Moderate
    };

    Some(vital_flag(
        if fever {
            FlagKind::Fever
        } else {
            FlagKind::Hypothermia
        },
        "temperature",
        severity,
        format!("{:.1}°F", temperature),
        Some(if fever { t.high } else { t.low }),
        MessageTemplates::temperature(fever, temperature),
        MessageTemplates::temperature_recommendation(),
    ))
}

/// Worst single-device reading drives prolongation; disagreement between two
/// devices is reported separately.
fn qtc_interval(
    primary: Option<f64>,
    secondary: Option<f64>,
    thresholds: &ClinicalThresholds,
) -> Vec<RiskFlag> {
    let t = &thresholds.qtc;
    let mut flags = Vec::new();

    let worst = match (primary, secondary) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };

    if let Some(qtc) = worst {
        if qtc >= t.caution_ms {
            let danger = qtc >= t.danger_ms;
            let mut flag = vital_flag(
                FlagKind::QtcProlongation,
                "qtc_interval",
                if danger {
                    RiskLevel::High
                } else {
                    RiskLevel::Moderate
                },
                format!("{:.0} ms", qtc),
                Some(if danger { t.danger_ms } else { t.caution_ms }),
                MessageTemplates::qtc_prolongation(qtc, danger),
                MessageTemplates::qtc_recommendation(danger),
            );
            flag.critical = danger;
            flags.push(flag);
        }
    }

    if let (Some(a), Some(b)) = (primary, secondary) {
        let delta = (a - b).abs();
        if delta >= t.divergence_ms {
            flags.push(vital_flag(
                FlagKind::QtcDivergence,
                "qtc_interval",
                RiskLevel::Low,
                format!("{:.0} ms / {:.0} ms", a, b),
                Some(t.divergence_ms),
                MessageTemplates::qtc_divergence(delta),
                MessageTemplates::qtc_divergence_recommendation(),
            ));
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> ClinicalThresholds {
        ClinicalThresholds::default()
    }

    /// Normal in every dimension.
    fn calm() -> VitalSigns {
        VitalSigns::new(72.0, 118.0, 76.0)
    }

    fn kinds(flags: &[RiskFlag]) -> Vec<FlagKind> {
        flags.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn normal_vitals_yield_no_flags() {
        let mut v = calm();
        v.spo2 = Some(98.0);
        v.temperature = Some(98.6);
        v.baseline_heart_rate = Some(70.0);
        v.qtc_interval_ms = Some(420.0);
        assert!(calculate_vital_anomalies(&v, &t()).is_empty());
    }

    #[test]
    fn heart_rate_115_without_baseline_is_one_tachycardia_flag() {
        let mut v = calm();
        v.heart_rate = 115.0;
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(kinds(&flags), vec![FlagKind::Tachycardia]);
        assert_eq!(flags[0].severity, RiskLevel::Moderate);
    }

    #[test]
    fn heart_rate_115_with_baseline_72_keeps_both_flags() {
        let mut v = calm();
        v.heart_rate = 115.0;
        v.baseline_heart_rate = Some(72.0);
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(
            kinds(&flags),
            vec![FlagKind::Tachycardia, FlagKind::HeartRateDeviation]
        );
        // +59.7% is past the 50% escalation point
        assert_eq!(flags[1].severity, RiskLevel::High);
    }

    #[test]
    fn tachycardia_escalates_above_120() {
        let mut v = calm();
        v.heart_rate = 121.0;
        assert_eq!(calculate_vital_anomalies(&v, &t())[0].severity, RiskLevel::High);
        v.heart_rate = 100.0;
        assert!(calculate_vital_anomalies(&v, &t()).is_empty());
    }

    #[test]
    fn bradycardia_bands() {
        let mut v = calm();
        v.heart_rate = 45.0;
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(kinds(&flags), vec![FlagKind::Bradycardia]);
        assert_eq!(flags[0].severity, RiskLevel::Moderate);

        v.heart_rate = 38.0;
        assert_eq!(calculate_vital_anomalies(&v, &t())[0].severity, RiskLevel::High);
    }

    #[test]
    fn relative_drop_flags_moderate() {
        let mut v = calm();
        v.heart_rate = 55.0;
        v.baseline_heart_rate = Some(85.0);
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(kinds(&flags), vec![FlagKind::HeartRateDeviation]);
        assert_eq!(flags[0].severity, RiskLevel::Moderate);
    }

    #[test]
    fn relative_change_at_exactly_thirty_percent_does_not_flag() {
        let mut v = calm();
        v.heart_rate = 91.0;
        v.baseline_heart_rate = Some(70.0);
        assert!(calculate_vital_anomalies(&v, &t()).is_empty());
    }

    #[test]
    fn zero_baseline_heart_rate_skips_relative_rule() {
        let mut v = calm();
        v.baseline_heart_rate = Some(0.0);
        assert!(calculate_vital_anomalies(&v, &t()).is_empty());
    }

    #[test]
    fn elevated_blood_pressure_does_not_flag() {
        let mut v = calm();
        v.blood_pressure_systolic = 126.0;
        assert!(calculate_vital_anomalies(&v, &t()).is_empty());
    }

    #[test]
    fn blood_pressure_stage_severities() {
        let mut v = calm();
        v.blood_pressure_systolic = 134.0;
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(flags[0].severity, RiskLevel::Moderate);
        assert!(!flags[0].critical);

        v.blood_pressure_systolic = 145.0;
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(flags[0].severity, RiskLevel::High);
        assert!(!flags[0].critical);

        v.blood_pressure_systolic = 185.0;
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(flags[0].severity, RiskLevel::High);
        assert!(flags[0].critical);
    }

    #[test]
    fn spo2_bands() {
        let mut v = calm();
        v.spo2 = Some(95.0);
        assert!(calculate_vital_anomalies(&v, &t()).is_empty());
        v.spo2 = Some(93.0);
        assert_eq!(calculate_vital_anomalies(&v, &t())[0].severity, RiskLevel::Moderate);
        v.spo2 = Some(88.0);
        assert_eq!(calculate_vital_anomalies(&v, &t())[0].severity, RiskLevel::High);
    }

    #[test]
    fn temperature_both_directions() {
        let mut v = calm();
        v.temperature = Some(100.0);
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(kinds(&flags), vec![FlagKind::Fever]);
        assert_eq!(flags[0].severity, RiskLevel::Moderate);

        v.temperature = Some(101.2);
        assert_eq!(calculate_vital_anomalies(&v, &t())[0].severity, RiskLevel::High);

        v.temperature = Some(96.5);
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(kinds(&flags), vec![FlagKind::Hypothermia]);
        assert_eq!(flags[0].severity, RiskLevel::Moderate);

        v.temperature = Some(95.5);
        assert_eq!(calculate_vital_anomalies(&v, &t())[0].severity, RiskLevel::High);
    }

    #[test]
    fn qtc_caution_and_danger() {
        let mut v = calm();
        v.qtc_interval_ms = Some(480.0);
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(kinds(&flags), vec![FlagKind::QtcProlongation]);
        assert_eq!(flags[0].severity, RiskLevel::Moderate);
        assert!(!flags[0].critical);

        v.qtc_interval_ms = Some(500.0);
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(flags[0].severity, RiskLevel::High);
        assert!(flags[0].critical);
    }

    #[test]
    fn qtc_devices_disagreeing_adds_divergence_flag() {
        let mut v = calm();
        v.qtc_interval_ms = Some(430.0);
        v.qtc_secondary_ms = Some(505.0);
        let flags = calculate_vital_anomalies(&v, &t());
        assert_eq!(
            kinds(&flags),
            vec![FlagKind::QtcProlongation, FlagKind::QtcDivergence]
        );
        assert!(flags[0].critical, "worst device reading drives danger");
        assert_eq!(flags[1].severity, RiskLevel::Low);
    }

    #[test]
    fn flag_order_is_stable() {
        let v = VitalSigns {
            heart_rate: 130.0,
            baseline_heart_rate: Some(70.0),
            blood_pressure_systolic: 150.0,
            blood_pressure_diastolic: 95.0,
            spo2: Some(91.0),
            temperature: Some(100.0),
            qtc_interval_ms: Some(480.0),
            qtc_secondary_ms: None,
        };
        let first = calculate_vital_anomalies(&v, &t());
        let second = calculate_vital_anomalies(&v, &t());
        assert_eq!(first, second);
        assert_eq!(
            kinds(&first),
            vec![
                FlagKind::Tachycardia,
                FlagKind::HeartRateDeviation,
                FlagKind::Hypertension,
                FlagKind::Hypoxia,
                FlagKind::Fever,
                FlagKind::QtcProlongation,
            ]
        );
    }
}
