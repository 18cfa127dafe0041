use uuid::Uuid;

use crate::models::{EmployeeProfile, Severity};
use crate::stats;

const CONFIDENCE_PER_SIGMA: f64 = 20.0;
const MAX_CONFIDENCE: f64 = 95.0;

/// Z-score verdict for one employee against the population of averages.
#[derive(Debug, Clone)]
pub struct AnomalyReport {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub average_score: f64,
    pub z_score: f64,
    pub is_anomaly: bool,
    pub severity: Severity,
    pub expected_min: f64,
    pub expected_max: f64,
    pub confidence: f64,
}

/// Flag employees whose average deviates abnormally from the population.
/// A zero population spread means nobody deviates.
pub fn detect(profiles: &[EmployeeProfile], z_threshold: f64) -> Vec<AnomalyReport> {
    let averages: Vec<f64> = profiles.iter().map(|p| p.average_score).collect();
    let population_mean = stats::mean(&averages);
    let population_std = stats::std_dev(&averages);

    profiles
        .iter()
        .map(|profile| {
            let z_score = if population_std == 0.0 {
                0.0
            } else {
                (profile.average_score - population_mean) / population_std
            };

            let severity = if z_score.abs() > 3.0 {
                Severity::High
            } else if z_score.abs() > 2.0 {
                Severity::Medium
            } else {
                Severity::Low
            };

            AnomalyReport {
                employee_id: profile.employee_id,
                employee_name: profile.display_name.clone(),
                average_score: profile.average_score,
                z_score,
                is_anomaly: z_score.abs() > z_threshold,
                severity,
                expected_min: population_mean - z_threshold * population_std,
                expected_max: population_mean + z_threshold * population_std,
                confidence: (z_score.abs() * CONFIDENCE_PER_SIGMA).min(MAX_CONFIDENCE),
            }
        })
        .collect()
}
