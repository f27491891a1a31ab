//! Integration-phase red alerts.
//!
//! Rules run over the patient's check-in history. Raised alerts live in an
//! in-memory store until a clinician resolves them with one of the fixed
//! resolution actions; critical alerts need an acknowledgment first.

pub mod detection;
pub mod store;
pub mod types;

pub use detection::detect_red_alerts;
pub use store::RedAlertStore;
pub use types::{AlertError, AlertResolution, RedAlert};
