use serde::{Deserialize, Serialize};

use super::enums::TrendDirection;

/// One tracked metric over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressTrend {
    pub metric: String,
    /// Chronological, most recent last.
    pub values: Vec<f64>,
    /// Anchor the latest value is compared against. Usually `values[0]`, but
    /// callers may pass an earlier canonical baseline.
    pub baseline: f64,
    #[serde(default)]
    pub direction: TrendDirection,
}

impl ProgressTrend {
    pub fn new(metric: &str, values: Vec<f64>, baseline: f64) -> Self {
        Self {
            metric: metric.to_string(),
            values,
            baseline,
            direction: TrendDirection::HigherIsWorse,
        }
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }
}
