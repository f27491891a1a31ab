use uuid::Uuid;

use crate::models::{AlertSeverity, ResolutionAction};

use super::types::{AlertError, AlertResolution, RedAlert};

/// In-memory red-alert store backed by RwLock.
pub struct RedAlertStore {
    pub(crate) alerts: std::sync::RwLock<Vec<RedAlert>>,
}

impl RedAlertStore {
    pub fn new() -> Self {
        Self {
            alerts: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Store a new alert unless one of the same type is still unresolved.
    /// Returns true if the alert was stored.
    pub fn store_alert(&self, alert: RedAlert) -> Result<bool, AlertError> {
        let mut alerts = self.alerts.write().map_err(|_| AlertError::LockFailed)?;

        let already_active = alerts
            .iter()
            .any(|existing| existing.alert_type == alert.alert_type && !existing.is_resolved());

        if already_active {
            tracing::debug!(
                alert_type = alert.alert_type.as_str(),
                "Alert of this type already active, skipping"
            );
            return Ok(false);
        }

        tracing::info!(
            alert_id = %alert.id,
            alert_type = alert.alert_type.as_str(),
            severity = alert.severity.as_str(),
            "Red alert raised"
        );
        alerts.push(alert);
        Ok(true)
    }

    /// Store a batch. Returns only the newly stored alerts.
    pub fn store_all(&self, alerts: Vec<RedAlert>) -> Result<Vec<RedAlert>, AlertError> {
        let mut stored = Vec::new();
        for alert in alerts {
            if self.store_alert(alert.clone())? {
                stored.push(alert);
            }
        }
        Ok(stored)
    }

    /// Unresolved alerts, most severe first. Ties keep the order raised.
    pub fn active(&self) -> Result<Vec<RedAlert>, AlertError> {
        let alerts = self.alerts.read().map_err(|_| AlertError::LockFailed)?;

        let mut active: Vec<RedAlert> = alerts.iter().filter(|a| !a.is_resolved()).cloned().collect();
        active.sort_by(|a, b| b.severity.cmp(&a.severity));
        Ok(active)
    }

    /// Every alert ever stored, resolved ones included.
    pub fn history(&self) -> Result<Vec<RedAlert>, AlertError> {
        let alerts = self.alerts.read().map_err(|_| AlertError::LockFailed)?;
        Ok(alerts.clone())
    }

    /// Mark an alert as seen by a clinician. Acknowledging twice keeps the
    /// first timestamp.
    pub fn acknowledge(&self, alert_id: &Uuid) -> Result<(), AlertError> {
        let mut alerts = self.alerts.write().map_err(|_| AlertError::LockFailed)?;

        let alert = alerts
            .iter_mut()
            .find(|a| a.id == *alert_id)
            .ok_or(AlertError::NotFound(*alert_id))?;

        if alert.is_resolved() {
            return Err(AlertError::AlreadyResolved(*alert_id));
        }

        if alert.acknowledged_at.is_none() {
            alert.acknowledged_at = Some(chrono::Local::now().naive_local());
        }
        Ok(())
    }

    /// Close an alert with a controlled resolution action.
    /// Critical alerts must be acknowledged first.
    pub fn resolve(&self, alert_id: &Uuid, action: ResolutionAction) -> Result<(), AlertError> {
        let mut alerts = self.alerts.write().map_err(|_| AlertError::LockFailed)?;

        let alert = alerts
            .iter_mut()
            .find(|a| a.id == *alert_id)
            .ok_or(AlertError::NotFound(*alert_id))?;

        if alert.is_resolved() {
            return Err(AlertError::AlreadyResolved(*alert_id));
        }
        if alert.severity == AlertSeverity::Critical && !alert.is_acknowledged() {
            return Err(AlertError::AcknowledgmentRequired(*alert_id));
        }

        alert.resolution = Some(AlertResolution {
            action,
            resolved_at: chrono::Local::now().naive_local(),
        });

        tracing::info!(
            alert_id = %alert_id,
            action = action.as_str(),
            "Red alert resolved"
        );
        Ok(())
    }
}

impl Default for RedAlertStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RedAlertType;

    fn alert(alert_type: RedAlertType, severity: AlertSeverity) -> RedAlert {
        RedAlert::new(alert_type, severity, "test".into(), "x".into())
    }

    #[test]
    fn store_and_list_active() {
        let store = RedAlertStore::new();
        assert!(store
            .store_alert(alert(RedAlertType::MissedAssessments, AlertSeverity::Low))
            .unwrap());
        assert!(store
            .store_alert(alert(RedAlertType::CssrsSpike, AlertSeverity::Critical))
            .unwrap());

        let active = store.active().unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].alert_type, RedAlertType::CssrsSpike, "critical first");
    }

    #[test]
    fn duplicate_active_type_is_skipped() {
        let store = RedAlertStore::new();
        store
            .store_alert(alert(RedAlertType::PulseDrop, AlertSeverity::Moderate))
            .unwrap();
        let stored = store
            .store_alert(alert(RedAlertType::PulseDrop, AlertSeverity::Moderate))
            .unwrap();
        assert!(!stored);
        assert_eq!(store.active().unwrap().len(), 1);
    }

    #[test]
    fn same_type_may_be_raised_again_after_resolution() {
        let store = RedAlertStore::new();
        let first = alert(RedAlertType::PsqiDecline, AlertSeverity::Moderate);
        let id = first.id;
        store.store_alert(first).unwrap();
        store.resolve(&id, ResolutionAction::IncreasedMonitoring).unwrap();

        assert!(store
            .store_alert(alert(RedAlertType::PsqiDecline, AlertSeverity::Moderate))
            .unwrap());
        assert_eq!(store.history().unwrap().len(), 2);
    }

    #[test]
    fn critical_resolution_requires_acknowledgment() {
        let store = RedAlertStore::new();
        let critical = alert(RedAlertType::CssrsSpike, AlertSeverity::Critical);
        let id = critical.id;
        store.store_alert(critical).unwrap();

        match store.resolve(&id, ResolutionAction::UpdatedSafetyPlan) {
            Err(AlertError::AcknowledgmentRequired(got)) => assert_eq!(got, id),
            other => panic!("Expected AcknowledgmentRequired, got: {:?}", other),
        }

        store.acknowledge(&id).unwrap();
        store.resolve(&id, ResolutionAction::UpdatedSafetyPlan).unwrap();
        assert!(store.active().unwrap().is_empty());

        let resolved = &store.history().unwrap()[0];
        assert_eq!(
            resolved.resolution.as_ref().map(|r| r.action),
            Some(ResolutionAction::UpdatedSafetyPlan)
        );
    }

    #[test]
    fn non_critical_may_resolve_without_acknowledgment() {
        let store = RedAlertStore::new();
        let low = alert(RedAlertType::MissedAssessments, AlertSeverity::Low);
        let id = low.id;
        store.store_alert(low).unwrap();
        store.resolve(&id, ResolutionAction::ContactedPatient).unwrap();
    }

    #[test]
    fn resolving_twice_fails() {
        let store = RedAlertStore::new();
        let a = alert(RedAlertType::Phq9Regression, AlertSeverity::High);
        let id = a.id;
        store.store_alert(a).unwrap();
        store.resolve(&id, ResolutionAction::FalseAlarm).unwrap();

        match store.resolve(&id, ResolutionAction::FalseAlarm) {
            Err(AlertError::AlreadyResolved(_)) => {}
            other => panic!("Expected AlreadyResolved, got: {:?}", other),
        }
        match store.acknowledge(&id) {
            Err(AlertError::AlreadyResolved(_)) => {}
            other => panic!("Expected AlreadyResolved, got: {:?}", other),
        }
    }

    #[test]
    fn unknown_alert_is_not_found() {
        let store = RedAlertStore::new();
        let missing = Uuid::new_v4();
        match store.acknowledge(&missing) {
            Err(AlertError::NotFound(id)) => assert_eq!(id, missing),
            other => panic!("Expected NotFound, got: {:?}", other),
        }
    }

    #[test]
    fn acknowledge_keeps_first_timestamp() {
        let store = RedAlertStore::new();
        let a = alert(RedAlertType::CssrsSpike, AlertSeverity::Critical);
        let id = a.id;
        store.store_alert(a).unwrap();
        store.acknowledge(&id).unwrap();
        let first = store.active().unwrap()[0].acknowledged_at;
        store.acknowledge(&id).unwrap();
        assert_eq!(store.active().unwrap()[0].acknowledged_at, first);
    }

    #[test]
    fn store_all_returns_only_new() {
        let store = RedAlertStore::new();
        let stored = store
            .store_all(vec![
                alert(RedAlertType::PulseDrop, AlertSeverity::Moderate),
                alert(RedAlertType::PulseDrop, AlertSeverity::Moderate),
                alert(RedAlertType::PsqiDecline, AlertSeverity::Moderate),
            ])
            .unwrap();
        assert_eq!(stored.len(), 2);
    }
}
