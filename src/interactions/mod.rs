//! Substance/medication interaction checking for the dosing workflow.
//!
//! A lookup returns raw `Interaction` records for the current selection. The
//! classifier buckets them by severity; any severe interaction puts an
//! acknowledgment gate in front of the proceed action. A failed lookup blocks
//! rather than reading as "no interactions".

pub mod classifier;
pub mod gate;
pub mod lookup;
pub mod reference;

pub use classifier::{classify_interactions, InteractionReport, InteractionTier};
pub use gate::{AcknowledgmentGate, InteractionSelection};
pub use lookup::{InteractionChecker, InteractionSource, LookupState};
pub use reference::InteractionTable;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InteractionError {
    #[error("Interaction lookup failed: {0}")]
    Fetch(String),

    #[error("No severe interactions in the current selection, acknowledgment not required")]
    AcknowledgmentNotRequired,

    #[error("No completed interaction lookup for the current selection")]
    NotReady,

    #[error("Reference data load failed ({0}): {1}")]
    ReferenceDataLoad(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    ReferenceDataParse(String, String),
}
