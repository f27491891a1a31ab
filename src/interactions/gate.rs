use serde::{Deserialize, Serialize};

use super::InteractionError;

/// The substance and medications an interaction lookup is keyed on.
///
/// Medication ids are sorted and deduplicated, so two selections naming the
/// same medications in a different order are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionSelection {
    pub substance_id: Option<i64>,
    pub medication_ids: Vec<i64>,
}

impl InteractionSelection {
    pub fn new(substance_id: Option<i64>, medication_ids: impl IntoIterator<Item = i64>) -> Self {
        let mut medication_ids: Vec<i64> = medication_ids.into_iter().collect();
        medication_ids.sort_unstable();
        medication_ids.dedup();
        Self {
            substance_id,
            medication_ids,
        }
    }

    /// Nothing to look up: no substance chosen or no medications listed.
    pub fn is_empty(&self) -> bool {
        self.substance_id.is_none() || self.medication_ids.is_empty()
    }
}

/// Clinician acknowledgment of severe interactions, bound to one selection.
///
/// The acknowledgment never outlives the selection it was given for.
#[derive(Debug, Clone, Default)]
pub struct AcknowledgmentGate {
    selection: InteractionSelection,
    required: bool,
    acknowledged: bool,
}

impl AcknowledgmentGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebind to a selection. A different selection clears both the
    /// requirement and any prior acknowledgment. Returns whether it changed.
    pub fn bind(&mut self, selection: &InteractionSelection) -> bool {
        if &self.selection == selection {
            return false;
        }
        self.selection = selection.clone();
        self.required = false;
        self.acknowledged = false;
        true
    }

    /// Apply the requirement of a freshly fetched result set. Every result
    /// set starts unacknowledged, even for an unchanged selection.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        self.acknowledged = false;
    }

    pub fn acknowledge(&mut self) -> Result<(), InteractionError> {
        if !self.required {
            return Err(InteractionError::AcknowledgmentNotRequired);
        }
        self.acknowledged = true;
        Ok(())
    }

    /// Clinician unchecked the box.
    pub fn revoke(&mut self) {
        self.acknowledged = false;
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn is_satisfied(&self) -> bool {
        !self.required || self.acknowledged
    }

    pub fn selection(&self) -> &InteractionSelection {
        &self.selection
    }
}
