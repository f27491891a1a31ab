use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Severity of a single flag, and the derived overall level of a flag set.
    /// Declaration order is the severity order.
    #[derive(PartialOrd, Ord)]
    RiskLevel {
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
);

str_enum!(FlagSource {
    Baseline => "baseline",
    Vital => "vital",
    Progress => "progress",
});

str_enum!(FlagKind {
    ScoreBand => "score_band",
    SuicideRisk => "suicide_risk",
    Tachycardia => "tachycardia",
    Bradycardia => "bradycardia",
    HeartRateDeviation => "heart_rate_deviation",
    Hypertension => "hypertension",
    Hypoxia => "hypoxia",
    Fever => "fever",
    Hypothermia => "hypothermia",
    QtcProlongation => "qtc_prolongation",
    QtcDivergence => "qtc_divergence",
    Worsening => "worsening",
    Stagnant => "stagnant",
});

str_enum!(
    /// Which way a tracked metric moves when the patient gets worse.
    #[derive(Default)]
    TrendDirection {
        #[default]
        HigherIsWorse => "higher_is_worse",
        HigherIsBetter => "higher_is_better",
    }
);

str_enum!(BloodPressureStage {
    Normal => "normal",
    Elevated => "elevated",
    Stage1 => "stage1",
    Stage2 => "stage2",
    Crisis => "crisis",
});

str_enum!(RedAlertType {
    CssrsSpike => "cssrs_spike",
    Phq9Regression => "phq9_regression",
    PulseDrop => "pulse_drop",
    PsqiDecline => "psqi_decline",
    MissedAssessments => "missed_assessments",
});

impl RedAlertType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CssrsSpike => "Suicide Risk",
            Self::Phq9Regression => "Depression Worsening",
            Self::PulseDrop => "Connection Drop",
            Self::PsqiDecline => "Sleep Decline",
            Self::MissedAssessments => "Missed Check-ins",
        }
    }
}

str_enum!(
    /// Red-alert severity. Unlike `RiskLevel` this has a critical tier.
    #[derive(PartialOrd, Ord)]
    AlertSeverity {
        Low => "low",
        Moderate => "moderate",
        High => "high",
        Critical => "critical",
    }
);

str_enum!(
    /// Controlled resolution vocabulary. Free text is never accepted so
    /// resolutions stay free of patient identifiers.
    ResolutionAction {
        ContactedPatient => "contacted_patient",
        ReferredToCrisisServices => "referred_to_crisis_services",
        UpdatedSafetyPlan => "updated_safety_plan",
        MedicationAdjusted => "medication_adjusted",
        AdditionalSessionScheduled => "additional_session_scheduled",
        FalseAlarm => "false_alarm",
        SupportPersonContacted => "support_person_contacted",
        IncreasedMonitoring => "increased_monitoring",
        UrgentAssessmentScheduled => "urgent_assessment_scheduled",
    }
);

impl ResolutionAction {
    pub const ALL: [ResolutionAction; 9] = [
        Self::ContactedPatient,
        Self::ReferredToCrisisServices,
        Self::UpdatedSafetyPlan,
        Self::MedicationAdjusted,
        Self::AdditionalSessionScheduled,
        Self::FalseAlarm,
        Self::SupportPersonContacted,
        Self::IncreasedMonitoring,
        Self::UrgentAssessmentScheduled,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Self::ContactedPatient => "Contacted patient - situation resolved",
            Self::ReferredToCrisisServices => "Referred to crisis services",
            Self::UpdatedSafetyPlan => "Updated safety plan with patient",
            Self::MedicationAdjusted => "Medication adjustment made",
            Self::AdditionalSessionScheduled => "Additional therapy session scheduled",
            Self::FalseAlarm => "False alarm - patient stable",
            Self::SupportPersonContacted => "Family/support person contacted",
            Self::IncreasedMonitoring => "Increased monitoring frequency",
            Self::UrgentAssessmentScheduled => "Scheduled urgent clinical assessment",
        }
    }
}

str_enum!(
    /// Absolute rules block the session outright. Relative rules need a
    /// documented clinical justification.
    ContraindicationSeverity {
        Absolute => "absolute",
        Relative => "relative",
    }
);

str_enum!(ContraindicationCategory {
    Medication => "medication",
    Psychiatric => "psychiatric",
    Cardiovascular => "cardiovascular",
    Demographic => "demographic",
    Assessment => "assessment",
});

str_enum!(
    /// Outcome of intake contraindication screening.
    ScreeningVerdict {
        Clear => "clear",
        ProceedWithCaution => "proceed_with_caution",
        DoNotProceed => "do_not_proceed",
    }
);
