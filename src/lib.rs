pub mod alerts; // Integration-phase red alerts
pub mod config;
pub mod contraindications; // Intake screening verdicts
pub mod interactions; // Substance/medication interaction gate
pub mod models;
pub mod risk; // Baseline, vitals and progress risk detection

use std::io::Read;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use risk::{ClinicalThresholds, DefaultRiskEngine, RiskDetectionInput, RiskEngine, RiskError};

/// Thresholds from the override file when it exists, defaults otherwise.
pub fn load_thresholds(path: Option<&Path>) -> Result<ClinicalThresholds, RiskError> {
    match path {
        Some(p) if p.exists() => {
            let thresholds = ClinicalThresholds::load(p)?;
            tracing::info!(path = %p.display(), "Loaded clinical threshold overrides");
            Ok(thresholds)
        }
        _ => {
            tracing::debug!("No threshold overrides, using defaults");
            Ok(ClinicalThresholds::default())
        }
    }
}

/// Evaluate one `RiskDetectionInput` JSON document and return the
/// `RiskDetectionResult` as pretty JSON.
pub fn process_input(engine: &DefaultRiskEngine, input_json: &str) -> Result<String, RiskError> {
    let input: RiskDetectionInput = serde_json::from_str(input_json)?;
    let result = engine.detect(&input);

    for action in engine.escalations(&result) {
        tracing::warn!(
            action = ?action.action_type,
            metric = %action.metric,
            "Escalation required: {}",
            action.banner_message
        );
    }

    Ok(serde_json::to_string_pretty(&result)?)
}

fn try_run() -> Result<(), RiskError> {
    let thresholds = load_thresholds(config::thresholds_path().as_deref())?;
    let engine = DefaultRiskEngine::new(thresholds);

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let output = process_input(&engine, &input)?;
    println!("{}", output);
    Ok(())
}

pub fn run() {
    // Logs go to stderr; stdout carries the result document
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    if let Err(e) = try_run() {
        tracing::error!(error = %e, "Risk detection failed");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn process_input_round_trip() {
        let engine = DefaultRiskEngine::default();
        let output = process_input(
            &engine,
            r#"{"vitals": {"heart_rate": 115, "blood_pressure_systolic": 118, "blood_pressure_diastolic": 76}}"#,
        )
        .unwrap();

        let result: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(result["overall_risk_level"], "moderate");
        assert_eq!(result["all_flags"].as_array().unwrap().len(), 1);
        assert_eq!(result["all_flags"][0]["kind"], "tachycardia");
    }

    #[test]
    fn process_input_rejects_malformed_json() {
        let engine = DefaultRiskEngine::default();
        match process_input(&engine, "{ nope") {
            Err(RiskError::Serialization(_)) => {}
            other => panic!("Expected Serialization, got: {:?}", other),
        }
    }

    #[test]
    fn negative_score_is_rejected_at_parse() {
        let engine = DefaultRiskEngine::default();
        assert!(process_input(&engine, r#"{"baseline": {"phq9": -3}}"#).is_err());
    }

    #[test]
    fn missing_override_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thresholds.json");
        let t = load_thresholds(Some(path.as_path())).unwrap();
        assert_eq!(t, ClinicalThresholds::default());
        assert_eq!(load_thresholds(None).unwrap(), ClinicalThresholds::default());
    }

    #[test]
    fn override_file_is_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"heart_rate": {{"high_bpm": 110.0}}}}"#).unwrap();
        let t = load_thresholds(Some(file.path())).unwrap();
        assert_eq!(t.heart_rate.high_bpm, 110.0);

        let engine = DefaultRiskEngine::new(t);
        let output = process_input(
            &engine,
            r#"{"vitals": {"heart_rate": 105, "blood_pressure_systolic": 118, "blood_pressure_diastolic": 76}}"#,
        )
        .unwrap();
        assert!(output.contains("\"all_flags\": []"));
    }
}
