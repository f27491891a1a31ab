/// Message and recommendation text for emitted flags.
/// Clinician-facing: direct wording, the action first.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Baseline instrument band, e.g. "Moderate Anxiety".
    pub fn score_band(band_label: &str, condition: &str) -> String {
        format!("{} {}", band_label, condition)
    }

    pub fn score_band_recommendation(metric: &str, severity_high: bool) -> String {
        match (metric, severity_high) {
            ("PHQ-9", true) | ("ACE", true) => {
                "Trauma-informed approach required. Close monitoring during session.".into()
            }
            ("GAD-7", true) => {
                "Have rescue medication available. Ensure experienced practitioner present.".into()
            }
            ("PCL-5", true) => {
                "Trauma-informed approach required. Have rescue medication available.".into()
            }
            ("GAD-7", false) => "Monitor for anxiety escalation during session.".into(),
            ("ACE", false) => "Be aware of potential trauma responses during session.".into(),
            _ => "Monitor closely during session.".into(),
        }
    }

    pub fn suicide_risk(score: u16) -> String {
        format!("CRITICAL: C-SSRS score {} indicates elevated suicide risk", score)
    }

    pub fn suicide_risk_recommendation() -> String {
        "Immediate clinician contact required. Complete safety plan before proceeding.".into()
    }

    pub fn tachycardia(bpm: f64) -> String {
        format!("Tachycardia: heart rate {:.0} bpm", bpm)
    }

    pub fn bradycardia(bpm: f64) -> String {
        format!("Bradycardia: heart rate {:.0} bpm", bpm)
    }

    pub fn heart_rate_deviation(bpm: f64, percent_change: f64) -> String {
        format!(
            "Heart rate anomaly: {:.0} bpm ({}{:.0}% from baseline)",
            bpm,
            if percent_change > 0.0 { "+" } else { "" },
            percent_change,
        )
    }

    pub fn heart_rate_recommendation() -> String {
        "Monitor closely. Consider reducing stimulation. Have rescue medication ready.".into()
    }

    pub fn blood_pressure(stage_label: &str, systolic: f64, diastolic: f64) -> String {
        format!("{}: {:.0}/{:.0} mmHg", stage_label, systolic, diastolic)
    }

    pub fn blood_pressure_recommendation(crisis: bool) -> String {
        if crisis {
            "Immediate medical attention. Pause the session and escalate.".into()
        } else {
            "Monitor closely. Consider reducing stimulation.".into()
        }
    }

    pub fn hypoxia(spo2: f64) -> String {
        format!("Low oxygen saturation: {:.0}%", spo2)
    }

    pub fn hypoxia_recommendation() -> String {
        "Check breathing. Consider supplemental oxygen if below 90%.".into()
    }

    pub fn temperature(fever: bool, temperature: f64) -> String {
        let label = if fever {
            "Elevated temperature"
        } else {
            "Low temperature"
        };
        format!("{}: {:.1}°F", label, temperature)
    }

    pub fn temperature_recommendation() -> String {
        "Monitor closely. Document in session notes.".into()
    }

    pub fn qtc_prolongation(qtc_ms: f64, danger: bool) -> String {
        if danger {
            format!("DANGER: QTc {:.0} ms", qtc_ms)
        } else {
            format!("CAUTION: QTc {:.0} ms approaching danger threshold", qtc_ms)
        }
    }

    pub fn qtc_recommendation(danger: bool) -> String {
        if danger {
            "hERG channel block risk. Stop dosing and obtain cardiology review.".into()
        } else {
            "Increase EKG monitoring frequency.".into()
        }
    }

    pub fn qtc_divergence(delta_ms: f64) -> String {
        format!("QTc divergence between devices: {:.0} ms", delta_ms)
    }

    pub fn qtc_divergence_recommendation() -> String {
        "Verify device leads, patient position, and calculation method before clinical decision-making."
            .into()
    }

    pub fn worsening(metric: &str, change: f64) -> String {
        format!("Declining progress on {}: {:+.0} from baseline", metric, change)
    }

    pub fn worsening_recommendation() -> String {
        "Schedule additional integration session. Assess for external stressors. Consider booster session."
            .into()
    }

    pub fn stagnant(metric: &str, observations: usize) -> String {
        format!(
            "No meaningful change on {} across {} observations",
            metric, observations
        )
    }

    pub fn stagnant_recommendation() -> String {
        "Review treatment plan. Consider booster session.".into()
    }
}
