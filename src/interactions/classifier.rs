use serde::{Deserialize, Serialize};

use crate::models::{Interaction, InteractionSeverity};

/// Display tier for one severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionTier {
    Contraindicated,
    Caution,
    Monitor,
}

impl InteractionTier {
    pub fn for_severity(severity: InteractionSeverity) -> Self {
        match severity {
            InteractionSeverity::Severe => Self::Contraindicated,
            InteractionSeverity::Moderate => Self::Caution,
            InteractionSeverity::Mild => Self::Monitor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Contraindicated => "Contraindicated",
            Self::Caution => "Caution",
            Self::Monitor => "Monitor",
        }
    }
}

/// Interactions for one selection, bucketed by severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionReport {
    pub severe: Vec<Interaction>,
    pub moderate: Vec<Interaction>,
    pub mild: Vec<Interaction>,
    /// Any severe interaction forces an explicit clinician acknowledgment.
    pub acknowledgment_required: bool,
}

impl InteractionReport {
    /// Non-empty buckets, most severe first.
    pub fn tiers(&self) -> Vec<(InteractionTier, &[Interaction])> {
        [
            (InteractionTier::Contraindicated, self.severe.as_slice()),
            (InteractionTier::Caution, self.moderate.as_slice()),
            (InteractionTier::Monitor, self.mild.as_slice()),
        ]
        .into_iter()
        .filter(|(_, bucket)| !bucket.is_empty())
        .collect()
    }

    pub fn total(&self) -> usize {
        self.severe.len() + self.moderate.len() + self.mild.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Partition interactions by severity. Input order is kept within a bucket.
pub fn classify_interactions(interactions: &[Interaction]) -> InteractionReport {
    let mut report = InteractionReport::default();

    for interaction in interactions {
        let bucket = match interaction.interaction_severity {
            InteractionSeverity::Severe => &mut report.severe,
            InteractionSeverity::Moderate => &mut report.moderate,
            InteractionSeverity::Mild => &mut report.mild,
        };
        bucket.push(interaction.clone());
    }

    report.acknowledgment_required = !report.severe.is_empty();
    report
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn interaction(
        substance_id: i64,
        medication_id: i64,
        severity: InteractionSeverity,
    ) -> Interaction {
        Interaction {
            substance_id,
            medication_id,
            interaction_severity: severity,
            risk_description: format!("risk {}-{}", substance_id, medication_id),
            clinical_recommendation: "review".into(),
            mechanism: "mechanism".into(),
            pubmed_reference: None,
            substance_name: None,
            medication_name: None,
        }
    }

    #[test]
    fn severe_and_mild_partition_and_require_acknowledgment() {
        let report = classify_interactions(&[
            interaction(1, 10, InteractionSeverity::Severe),
            interaction(1, 12, InteractionSeverity::Mild),
        ]);
        assert_eq!(report.severe.len(), 1);
        assert!(report.moderate.is_empty());
        assert_eq!(report.mild.len(), 1);
        assert!(report.acknowledgment_required);
    }

    #[test]
    fn no_severe_means_no_acknowledgment() {
        let report = classify_interactions(&[
            interaction(1, 11, InteractionSeverity::Moderate),
            interaction(1, 12, InteractionSeverity::Mild),
        ]);
        assert!(!report.acknowledgment_required);
    }

    #[test]
    fn empty_input_is_empty_report() {
        let report = classify_interactions(&[]);
        assert!(report.is_empty());
        assert!(report.tiers().is_empty());
        assert!(!report.acknowledgment_required);
    }

    #[test]
    fn tiers_are_severe_first_and_keep_input_order() {
        let report = classify_interactions(&[
            interaction(1, 12, InteractionSeverity::Mild),
            interaction(1, 11, InteractionSeverity::Moderate),
            interaction(1, 10, InteractionSeverity::Severe),
            interaction(1, 13, InteractionSeverity::Severe),
        ]);
        let tiers = report.tiers();
        let labels: Vec<&str> = tiers.iter().map(|(t, _)| t.label()).collect();
        assert_eq!(labels, vec!["Contraindicated", "Caution", "Monitor"]);

        let severe_ids: Vec<i64> = tiers[0].1.iter().map(|i| i.medication_id).collect();
        assert_eq!(severe_ids, vec![10, 13]);
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn tier_for_severity() {
        assert_eq!(
            InteractionTier::for_severity(InteractionSeverity::Severe),
            InteractionTier::Contraindicated
        );
        assert_eq!(
            InteractionTier::for_severity(InteractionSeverity::Mild),
            InteractionTier::Monitor
        );
    }
}
