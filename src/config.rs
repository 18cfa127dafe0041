use serde::{Deserialize, Serialize};

/// Reporting knobs for one analysis run. Defaults reproduce the thresholds
/// the evaluation team signed off on; hosts may deserialize overrides from
/// their own config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// An employee with no evaluation for this many days picks up risk.
    pub stale_after_days: i64,
    /// Z-score magnitude above which an employee average is flagged.
    pub anomaly_z_threshold: f64,
    /// Minimum monthly-trend slope magnitude worth an insight.
    pub trend_emission_slope: f64,
    /// Minimum correlation magnitude worth an insight.
    pub correlation_emission_threshold: f64,
    /// Risk scores at or below this are left out of the risk matrix.
    pub risk_report_floor: f64,
    /// Opportunity scores at or below this are left out.
    pub opportunity_report_floor: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            stale_after_days: 90,
            anomaly_z_threshold: 1.5,
            trend_emission_slope: 0.1,
            correlation_emission_threshold: 0.6,
            risk_report_floor: 30.0,
            opportunity_report_floor: 60.0,
        }
    }
}
