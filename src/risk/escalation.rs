use serde::{Deserialize, Serialize};

use crate::models::FlagKind;

use super::types::RiskFlag;

/// Escalation handler for critical flags.
pub struct EscalationProtocol;

impl EscalationProtocol {
    /// One action per critical flag, in flag order.
    /// Every action blocks the session until both prompts are confirmed.
    pub fn process_critical_flags(flags: &[RiskFlag]) -> Vec<EscalationAction> {
        flags
            .iter()
            .filter(|f| f.critical)
            .map(|flag| match flag.kind {
                FlagKind::SuicideRisk => EscalationAction {
                    action_type: EscalationActionType::SuicideRisk,
                    metric: flag.metric.clone(),
                    banner_message: flag.message.clone(),
                    recommendation: flag.recommendation.clone(),
                    blocks_session: true,
                    confirmation_steps: 2,
                    confirmation_prompt_1:
                        "Has a clinician completed a safety assessment with the patient?"
                            .to_string(),
                    confirmation_prompt_2:
                        "Yes, a safety plan is in place and documented".to_string(),
                },
                FlagKind::Hypertension => EscalationAction {
                    action_type: EscalationActionType::HypertensiveCrisis,
                    metric: flag.metric.clone(),
                    banner_message: flag.message.clone(),
                    recommendation: flag.recommendation.clone(),
                    blocks_session: true,
                    confirmation_steps: 2,
                    confirmation_prompt_1:
                        "Has blood pressure been re-measured and medical staff notified?"
                            .to_string(),
                    confirmation_prompt_2:
                        "Yes, a physician has reviewed the reading".to_string(),
                },
                FlagKind::QtcProlongation => EscalationAction {
                    action_type: EscalationActionType::CardiacQtc,
                    metric: flag.metric.clone(),
                    banner_message: flag.message.clone(),
                    recommendation: flag.recommendation.clone(),
                    blocks_session: true,
                    confirmation_steps: 2,
                    confirmation_prompt_1: "Has dosing been paused?".to_string(),
                    confirmation_prompt_2:
                        "Yes, cardiology has reviewed the EKG".to_string(),
                },
                _ => EscalationAction {
                    action_type: EscalationActionType::Other,
                    metric: flag.metric.clone(),
                    banner_message: flag.message.clone(),
                    recommendation: flag.recommendation.clone(),
                    blocks_session: true,
                    confirmation_steps: 2,
                    confirmation_prompt_1: "Has a clinician addressed this?".to_string(),
                    confirmation_prompt_2: "Yes, a clinician has reviewed this".to_string(),
                },
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationAction {
    pub action_type: EscalationActionType,
    pub metric: String,
    /// Banner shown across the session screens.
    pub banner_message: String,
    pub recommendation: String,
    pub blocks_session: bool,
    /// Number of confirmations required (always 2).
    pub confirmation_steps: u8,
    /// Step 1 prompt.
    pub confirmation_prompt_1: String,
    /// Step 2 prompt: confirmation text.
    pub confirmation_prompt_2: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EscalationActionType {
    SuicideRisk,
    HypertensiveCrisis,
    CardiacQtc,
    Other,
}
