use std::time::Instant;

use crate::models::IntakeScreeningData;

use super::rules::{check_absolute_contraindications, check_relative_contraindications};
use super::types::{verdict_for, ContraindicationResult};

/// Screen normalized intake data and return the verdict with every fired rule.
pub fn run_contraindication_engine(data: &IntakeScreeningData) -> ContraindicationResult {
    let start = Instant::now();

    let absolute_flags = check_absolute_contraindications(data);
    let relative_flags = check_relative_contraindications(data);
    let verdict = verdict_for(&absolute_flags, &relative_flags);

    // Subject id only; intake text is never logged
    tracing::info!(
        patient_id = %data.patient_id,
        absolute = absolute_flags.len(),
        relative = relative_flags.len(),
        verdict = verdict.as_str(),
        processing_us = start.elapsed().as_micros() as u64,
        "Contraindication screening complete"
    );

    ContraindicationResult {
        verdict,
        absolute_flags,
        relative_flags,
        generated_at: chrono::Local::now().naive_local(),
        patient_id: data.patient_id.clone(),
        session_substance: data.session_substance.clone(),
    }
}
