use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{Interaction, InteractionSeverity};

use super::gate::InteractionSelection;
use super::lookup::InteractionSource;
use super::InteractionError;

/// Substance/medication interaction reference table (loaded from
/// interactions.json).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionTable {
    pub interactions: Vec<Interaction>,
}

impl InteractionTable {
    pub fn load(path: &Path) -> Result<Self, InteractionError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            InteractionError::ReferenceDataLoad(path.display().to_string(), e.to_string())
        })?;
        let table: InteractionTable = serde_json::from_str(&json).map_err(|e| {
            InteractionError::ReferenceDataParse(path.display().to_string(), e.to_string())
        })?;
        tracing::debug!(entries = table.interactions.len(), "Interaction table loaded");
        Ok(table)
    }

    /// Create a table for tests (no file I/O).
    pub fn load_test() -> Self {
        Self {
            interactions: vec![
                Interaction {
                    substance_id: 1,
                    medication_id: 10,
                    interaction_severity: InteractionSeverity::Severe,
                    risk_description: "Serotonin syndrome risk".into(),
                    clinical_recommendation:
                        "Contraindicated. Requires supervised MAOI washout before dosing.".into(),
                    mechanism: "MAO inhibition prevents serotonin breakdown".into(),
                    pubmed_reference: None,
                    substance_name: Some("MDMA".into()),
                    medication_name: Some("Phenelzine".into()),
                },
                Interaction {
                    substance_id: 1,
                    medication_id: 12,
                    interaction_severity: InteractionSeverity::Mild,
                    risk_description: "Additive blood pressure changes".into(),
                    clinical_recommendation: "Monitor blood pressure during session.".into(),
                    mechanism: "Opposing sympathomimetic and antihypertensive effects".into(),
                    pubmed_reference: None,
                    substance_name: Some("MDMA".into()),
                    medication_name: Some("Lisinopril".into()),
                },
                Interaction {
                    substance_id: 2,
                    medication_id: 11,
                    interaction_severity: InteractionSeverity::Moderate,
                    risk_description: "Blunted subjective response".into(),
                    clinical_recommendation:
                        "Discuss reduced effect with patient. Do not taper without prescriber."
                            .into(),
                    mechanism: "5-HT2A receptor downregulation".into(),
                    pubmed_reference: None,
                    substance_name: Some("Psilocybin".into()),
                    medication_name: Some("Sertraline".into()),
                },
            ],
        }
    }
}

impl InteractionSource for InteractionTable {
    fn fetch(&self, selection: &InteractionSelection) -> Result<Vec<Interaction>, InteractionError> {
        let Some(substance_id) = selection.substance_id else {
            return Ok(Vec::new());
        };
        Ok(self
            .interactions
            .iter()
            .filter(|i| {
                i.substance_id == substance_id
                    && selection.medication_ids.contains(&i.medication_id)
            })
            .cloned()
            .collect())
    }
}
