use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AlertSeverity, RedAlertType, ResolutionAction};

/// An automated integration-phase safety alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedAlert {
    pub id: Uuid,
    pub alert_type: RedAlertType,
    pub severity: AlertSeverity,
    pub message: String,
    /// The observation that fired the rule, formatted for display.
    pub trigger_value: String,
    pub triggered_at: NaiveDateTime,
    pub acknowledged_at: Option<NaiveDateTime>,
    pub resolution: Option<AlertResolution>,
}

impl RedAlert {
    pub fn new(
        alert_type: RedAlertType,
        severity: AlertSeverity,
        message: String,
        trigger_value: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            alert_type,
            severity,
            message,
            trigger_value,
            triggered_at: chrono::Local::now().naive_local(),
            acknowledged_at: None,
            resolution: None,
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged_at.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertResolution {
    pub action: ResolutionAction,
    pub resolved_at: NaiveDateTime,
}

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alert not found: {0}")]
    NotFound(Uuid),

    #[error("Alert already resolved: {0}")]
    AlreadyResolved(Uuid),

    #[error("Critical alert {0} must be acknowledged before it can be resolved")]
    AcknowledgmentRequired(Uuid),

    #[error("Lock acquisition failed")]
    LockFailed,
}
