use serde::{Deserialize, Serialize};

/// Reference severity of a substance/medication interaction.
/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionSeverity {
    Severe,
    Moderate,
    Mild,
}

impl InteractionSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severe => "SEVERE",
            Self::Moderate => "MODERATE",
            Self::Mild => "MILD",
        }
    }
}

/// A (substance, medication) pair from the interaction reference table.
/// Read-only: the classifier orders and gates these, never edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub substance_id: i64,
    pub medication_id: i64,
    pub interaction_severity: InteractionSeverity,
    pub risk_description: String,
    pub clinical_recommendation: String,
    pub mechanism: String,
    #[serde(default)]
    pub pubmed_reference: Option<String>,
    #[serde(default)]
    pub substance_name: Option<String>,
    #[serde(default)]
    pub medication_name: Option<String>,
}

impl Interaction {
    /// "Substance + Medication", falling back to ids when names were not joined.
    pub fn pair_label(&self) -> String {
        let substance = self
            .substance_name
            .clone()
            .unwrap_or_else(|| format!("substance #{}", self.substance_id));
        let medication = self
            .medication_name
            .clone()
            .unwrap_or_else(|| format!("medication #{}", self.medication_id));
        format!("{} + {}", substance, medication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction() -> Interaction {
        Interaction {
            substance_id: 1,
            medication_id: 10,
            interaction_severity: InteractionSeverity::Severe,
            risk_description: "Serotonin syndrome".into(),
            clinical_recommendation: "Do not combine".into(),
            mechanism: "MAO inhibition".into(),
            pubmed_reference: None,
            substance_name: Some("MDMA".into()),
            medication_name: Some("Phenelzine".into()),
        }
    }

    #[test]
    fn pair_label_uses_names() {
        assert_eq!(interaction().pair_label(), "MDMA + Phenelzine");
    }

    #[test]
    fn pair_label_falls_back_to_ids() {
        let mut i = interaction();
        i.substance_name = None;
        assert_eq!(i.pair_label(), "substance #1 + Phenelzine");
        i.medication_name = None;
        assert_eq!(i.pair_label(), "substance #1 + medication #10");
    }

    #[test]
    fn severity_wire_form() {
        let json = serde_json::to_string(&InteractionSeverity::Moderate).unwrap();
        assert_eq!(json, "\"MODERATE\"");
        assert_eq!(InteractionSeverity::Mild.as_str(), "MILD");
    }
}
