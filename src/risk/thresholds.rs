//! Clinical cutoffs shared by every evaluator.
//!
//! Two kinds of data live here:
//! - Published instrument bands (PHQ-9, GAD-7, PCL-5, ACE). These are fixed
//!   `const` tables and are not configurable.
//! - `ClinicalThresholds`: the tunable physiological and trend parameters.
//!   Defaults carry the values the clinical team signed off on; a JSON file
//!   may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{BloodPressureStage, RiskLevel};

use super::types::RiskError;

// ---------------------------------------------------------------------------
// Instrument bands
// ---------------------------------------------------------------------------

/// One band of an instrument's severity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBand {
    /// Inclusive lower bound.
    pub lower: u16,
    pub label: &'static str,
    /// `None` for bands that never flag.
    pub severity: Option<RiskLevel>,
}

const fn band(lower: u16, label: &'static str, severity: Option<RiskLevel>) -> ScoreBand {
    ScoreBand {
        lower,
        label,
        severity,
    }
}

/// A scored screening instrument with its valid range and bands.
#[derive(Debug, Clone, Copy)]
pub struct InstrumentScale {
    /// Metric name used on emitted flags.
    pub metric: &'static str,
    pub display_name: &'static str,
    pub max: u16,
    /// Ascending by `lower`; the first band starts at 0.
    pub bands: &'static [ScoreBand],
}

pub const PHQ9: InstrumentScale = InstrumentScale {
    metric: "PHQ-9",
    display_name: "PHQ-9 (Depression)",
    max: 27,
    bands: &[
        band(0, "Minimal", None),
        band(5, "Mild", Some(RiskLevel::Low)),
        band(10, "Moderate", Some(RiskLevel::Moderate)),
        band(15, "Moderately Severe", Some(RiskLevel::Moderate)),
        band(20, "Severe", Some(RiskLevel::High)),
    ],
};

pub const GAD7: InstrumentScale = InstrumentScale {
    metric: "GAD-7",
    display_name: "GAD-7 (Anxiety)",
    max: 21,
    bands: &[
        band(0, "Minimal", None),
        band(5, "Mild", Some(RiskLevel::Low)),
        band(10, "Moderate", Some(RiskLevel::Moderate)),
        band(15, "Severe", Some(RiskLevel::High)),
    ],
};

pub const PCL5: InstrumentScale = InstrumentScale {
    metric: "PCL-5",
    display_name: "PCL-5 (PTSD)",
    max: 80,
    bands: &[
        band(0, "Below Threshold", None),
        band(31, "Moderate", Some(RiskLevel::Moderate)),
        band(45, "Severe", Some(RiskLevel::High)),
    ],
};

pub const ACE: InstrumentScale = InstrumentScale {
    metric: "ACE",
    display_name: "ACE (Childhood Adversity)",
    max: 10,
    bands: &[
        band(0, "Low", None),
        band(4, "Moderate", Some(RiskLevel::Moderate)),
        band(7, "High", Some(RiskLevel::High)),
    ],
};

/// C-SSRS has no bands: a single hard rule applies (see `CssrsThresholds`).
pub const CSSRS_METRIC: &str = "C-SSRS";
pub const CSSRS_MAX: u16 = 5;

/// Highest C-SSRS score the critical rule may be configured to fire at.
pub const CSSRS_CRITICAL_CEILING: u16 = 3;

impl InstrumentScale {
    /// Band containing `score`. Scores above `max` fall into the top band.
    pub fn band_for(&self, score: u16) -> &'static ScoreBand {
        let bands: &'static [ScoreBand] = self.bands;
        let mut found = &bands[0];
        for b in bands {
            if score >= b.lower {
                found = b;
            }
        }
        found
    }

    /// Clamp into `0..=max`. Returns the clamped score and whether it changed.
    pub fn clamp(&self, score: u16) -> (u16, bool) {
        if score > self.max {
            (self.max, true)
        } else {
            (score, false)
        }
    }
}

// ---------------------------------------------------------------------------
// Tunable parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendThresholds {
    /// Minimum meaningful change, in metric points.
    pub worsening_delta: f64,
    /// A flat series needs at least this many observations to count as stagnant.
    pub stagnation_min_observations: usize,
    /// Trailing consecutive worsening steps that escalate a worsening flag to high.
    pub escalating_worsening_steps: usize,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            worsening_delta: 2.0,
            stagnation_min_observations: 3,
            escalating_worsening_steps: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartRateThresholds {
    pub low_bpm: f64,
    pub severe_low_bpm: f64,
    pub high_bpm: f64,
    pub severe_high_bpm: f64,
    /// Percent change from personal baseline that flags.
    pub baseline_deviation_pct: f64,
    /// Percent increase from personal baseline that escalates to high.
    pub baseline_deviation_high_pct: f64,
}

impl Default for HeartRateThresholds {
    fn default() -> Self {
        Self {
            low_bpm: 50.0,
            severe_low_bpm: 40.0,
            high_bpm: 100.0,
            severe_high_bpm: 120.0,
            baseline_deviation_pct: 30.0,
            baseline_deviation_high_pct: 50.0,
        }
    }
}

/// Staging boundaries, each an inclusive lower bound in mmHg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloodPressureThresholds {
    pub elevated_systolic: f64,
    pub stage1_systolic: f64,
    pub stage1_diastolic: f64,
    pub stage2_systolic: f64,
    pub stage2_diastolic: f64,
    pub crisis_systolic: f64,
    pub crisis_diastolic: f64,
}

impl Default for BloodPressureThresholds {
    fn default() -> Self {
        Self {
            elevated_systolic: 120.0,
            stage1_systolic: 130.0,
            stage1_diastolic: 80.0,
            stage2_systolic: 140.0,
            stage2_diastolic: 90.0,
            crisis_systolic: 180.0,
            crisis_diastolic: 120.0,
        }
    }
}

impl BloodPressureThresholds {
    /// Stage a systolic/diastolic pair, worst stage first.
    pub fn stage(&self, systolic: f64, diastolic: f64) -> BloodPressureStage {
        if systolic >= self.crisis_systolic || diastolic >= self.crisis_diastolic {
            BloodPressureStage::Crisis
        } else if systolic >= self.stage2_systolic || diastolic >= self.stage2_diastolic {
            BloodPressureStage::Stage2
        } else if systolic >= self.stage1_systolic || diastolic >= self.stage1_diastolic {
            BloodPressureStage::Stage1
        } else if systolic >= self.elevated_systolic {
            BloodPressureStage::Elevated
        } else {
            BloodPressureStage::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OxygenThresholds {
    pub low_pct: f64,
    pub severe_low_pct: f64,
}

impl Default for OxygenThresholds {
    fn default() -> Self {
        Self {
            low_pct: 95.0,
            severe_low_pct: 90.0,
        }
    }
}

/// Degrees Fahrenheit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureThresholds {
    pub low: f64,
    pub high: f64,
    pub severe_low: f64,
    pub severe_high: f64,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            low: 97.0,
            high: 99.5,
            severe_low: 96.0,
            severe_high: 100.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QtcThresholds {
    pub caution_ms: f64,
    pub danger_ms: f64,
    /// Disagreement between two devices that calls for lead verification.
    pub divergence_ms: f64,
}

impl Default for QtcThresholds {
    fn default() -> Self {
        Self {
            caution_ms: 475.0,
            danger_ms: 500.0,
            divergence_ms: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssrsThresholds {
    /// May be lowered, never raised above `CSSRS_CRITICAL_CEILING`.
    pub critical_score: u16,
}

impl Default for CssrsThresholds {
    fn default() -> Self {
        Self {
            critical_score: CSSRS_CRITICAL_CEILING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedAlertThresholds {
    pub phq9_regression_points: u16,
    /// Pulse-check connection level below which a day counts as low.
    pub pulse_drop_level: u8,
    pub pulse_drop_days: usize,
    pub psqi_decline_points: u16,
    pub missed_assessment_days: u32,
}

impl Default for RedAlertThresholds {
    fn default() -> Self {
        Self {
            phq9_regression_points: 5,
            pulse_drop_level: 3,
            pulse_drop_days: 2,
            psqi_decline_points: 3,
            missed_assessment_days: 3,
        }
    }
}

/// All tunable clinical parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalThresholds {
    pub trend: TrendThresholds,
    pub heart_rate: HeartRateThresholds,
    pub blood_pressure: BloodPressureThresholds,
    pub spo2: OxygenThresholds,
    pub temperature: TemperatureThresholds,
    pub qtc: QtcThresholds,
    pub cssrs: CssrsThresholds,
    pub red_alerts: RedAlertThresholds,
}

impl ClinicalThresholds {
    /// Load overrides from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, RiskError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            RiskError::ThresholdLoad(path.display().to_string(), e.to_string())
        })?;
        let thresholds: ClinicalThresholds = serde_json::from_str(&json).map_err(|e| {
            RiskError::ThresholdParse(path.display().to_string(), e.to_string())
        })?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Reject parameter sets whose bands overlap or invert.
    pub fn validate(&self) -> Result<(), RiskError> {
        let invalid = |msg: &str| Err(RiskError::InvalidThresholds(msg.to_string()));

        if self.trend.worsening_delta < 0.0 {
            return invalid("trend.worsening_delta must not be negative");
        }
        if self.trend.stagnation_min_observations < 2 {
            return invalid("trend.stagnation_min_observations must be at least 2");
        }
        let hr = &self.heart_rate;
        if !(hr.severe_low_bpm <= hr.low_bpm
            && hr.low_bpm < hr.high_bpm
            && hr.high_bpm <= hr.severe_high_bpm)
        {
            return invalid("heart_rate bands must ascend severe_low <= low < high <= severe_high");
        }
        if hr.baseline_deviation_high_pct < hr.baseline_deviation_pct {
            return invalid("heart_rate.baseline_deviation_high_pct below baseline_deviation_pct");
        }
        let bp = &self.blood_pressure;
        if !(bp.elevated_systolic <= bp.stage1_systolic
            && bp.stage1_systolic <= bp.stage2_systolic
            && bp.stage2_systolic <= bp.crisis_systolic
            && bp.stage1_diastolic <= bp.stage2_diastolic
            && bp.stage2_diastolic <= bp.crisis_diastolic)
        {
            return invalid("blood_pressure stages must ascend");
        }
        if self.spo2.severe_low_pct > self.spo2.low_pct {
            return invalid("spo2.severe_low_pct above spo2.low_pct");
        }
        let t = &self.temperature;
        if !(t.severe_low <= t.low && t.low < t.high && t.high <= t.severe_high) {
            return invalid("temperature bands must ascend severe_low <= low < high <= severe_high");
        }
        if self.qtc.caution_ms > self.qtc.danger_ms {
            return invalid("qtc.caution_ms above qtc.danger_ms");
        }
        if !(1..=CSSRS_CRITICAL_CEILING).contains(&self.cssrs.critical_score) {
            return invalid("cssrs.critical_score must be between 1 and 3");
        }
        if self.red_alerts.pulse_drop_days == 0 {
            return invalid("red_alerts.pulse_drop_days must be at least 1");
        }
        Ok(())
    }
}
