//! Intake contraindication screening.
//!
//! Rule-based and synchronous. Absolute rules block the session, relative
//! rules allow it with a documented justification. Flags name the category
//! of concern, never the text that matched.

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::run_contraindication_engine;
pub use rules::{check_absolute_contraindications, check_relative_contraindications};
pub use types::{ContraindicationFlag, ContraindicationResult};
