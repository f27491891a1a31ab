use crate::models::Interaction;

use super::classifier::{classify_interactions, InteractionReport};
use super::gate::{AcknowledgmentGate, InteractionSelection};
use super::InteractionError;

/// The external interaction query, keyed on a selection.
pub trait InteractionSource {
    fn fetch(&self, selection: &InteractionSelection) -> Result<Vec<Interaction>, InteractionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    /// Nothing selected, nothing to check.
    Idle,
    Loading,
    /// Fetch failed. Never read as "no interactions".
    Failed(String),
    Ready(InteractionReport),
}

/// Interaction lookup state plus the acknowledgment gate for the current
/// selection. Gates the dosing workflow's proceed action.
#[derive(Debug)]
pub struct InteractionChecker {
    state: LookupState,
    gate: AcknowledgmentGate,
}

impl Default for InteractionChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionChecker {
    pub fn new() -> Self {
        Self {
            state: LookupState::Idle,
            gate: AcknowledgmentGate::new(),
        }
    }

    /// Apply a new selection. Returns `true` when a fetch must now be run
    /// for it; the state is then `Loading` until `complete_lookup`.
    pub fn select(&mut self, selection: InteractionSelection) -> bool {
        if !self.gate.bind(&selection) {
            return false;
        }
        if selection.is_empty() {
            self.state = LookupState::Idle;
            false
        } else {
            self.state = LookupState::Loading;
            true
        }
    }

    /// Apply a fetch result. Results for any selection other than the
    /// current one are stale and dropped.
    pub fn complete_lookup(
        &mut self,
        selection: &InteractionSelection,
        result: Result<Vec<Interaction>, InteractionError>,
    ) {
        if selection != self.gate.selection() {
            tracing::debug!(
                substance_id = ?selection.substance_id,
                "Dropping stale interaction lookup result"
            );
            return;
        }

        match result {
            Ok(interactions) => {
                let report = classify_interactions(&interactions);
                tracing::debug!(
                    severe = report.severe.len(),
                    moderate = report.moderate.len(),
                    mild = report.mild.len(),
                    "Interaction lookup complete"
                );
                self.gate.set_required(report.acknowledgment_required);
                self.state = LookupState::Ready(report);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Interaction lookup failed");
                self.gate.set_required(false);
                self.state = LookupState::Failed(e.to_string());
            }
        }
    }

    /// Put a failed lookup back into `Loading`. Returns the selection to
    /// fetch again, or `None` when the last lookup did not fail.
    pub fn retry(&mut self) -> Option<InteractionSelection> {
        match self.state {
            LookupState::Failed(_) => {
                self.state = LookupState::Loading;
                Some(self.gate.selection().clone())
            }
            _ => None,
        }
    }

    /// Select, fetch and complete in one step. A failed lookup for an
    /// unchanged selection is fetched again.
    pub fn check<S: InteractionSource + ?Sized>(
        &mut self,
        source: &S,
        selection: InteractionSelection,
    ) -> &LookupState {
        if self.select(selection) || self.retry().is_some() {
            let current = self.gate.selection().clone();
            let result = source.fetch(&current);
            self.complete_lookup(&current, result);
        }
        &self.state
    }

    /// Clinician confirms they understand the contraindication risk.
    pub fn acknowledge(&mut self) -> Result<(), InteractionError> {
        match self.state {
            LookupState::Ready(_) => self.gate.acknowledge(),
            _ => Err(InteractionError::NotReady),
        }
    }

    pub fn revoke_acknowledgment(&mut self) {
        self.gate.revoke();
    }

    /// The dosing workflow may continue only with nothing to check, or with a
    /// completed lookup whose acknowledgment requirement is met.
    pub fn can_proceed(&self) -> bool {
        match &self.state {
            LookupState::Idle => true,
            LookupState::Ready(_) => self.gate.is_satisfied(),
            LookupState::Loading | LookupState::Failed(_) => false,
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn report(&self) -> Option<&InteractionReport> {
        match &self.state {
            LookupState::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn acknowledgment_required(&self) -> bool {
        self.gate.is_required()
    }

    pub fn acknowledged(&self) -> bool {
        self.gate.is_acknowledged()
    }

    pub fn selection(&self) -> &InteractionSelection {
        self.gate.selection()
    }
}
