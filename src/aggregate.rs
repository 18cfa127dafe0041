use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{EmployeeProfile, EvaluationRecord};
use crate::scoring;
use crate::stats;

/// Group records by employee id and rebuild every profile from scratch.
///
/// The running average is recomputed over the accumulated history as each
/// record folds in, which keeps the bookkeeping identical to the source
/// system (and quadratic in history length; fine at evaluation-dataset
/// scale). Profiles come back sorted by employee id so downstream output
/// is deterministic.
pub fn build_profiles(records: &[EvaluationRecord]) -> Vec<EmployeeProfile> {
    let mut groups: HashMap<Uuid, Vec<EvaluationRecord>> = HashMap::new();
    for record in records {
        groups.entry(record.employee_id).or_default().push(record.clone());
    }

    let mut profiles: Vec<EmployeeProfile> = groups
        .into_iter()
        .map(|(employee_id, mut group)| {
            group.sort_by(|a, b| a.created_at.cmp(&b.created_at));

            let mut average_score = 0.0;
            let mut overalls: Vec<f64> = Vec::with_capacity(group.len());
            for record in group.iter() {
                overalls.push(scoring::score_record(record).overall);
                average_score = stats::mean(&overalls);
            }

            let latest = &group[group.len() - 1];
            EmployeeProfile {
                employee_id,
                display_name: latest.display_name(),
                position: latest.position.clone(),
                department: latest.department.clone(),
                average_score,
                evaluation_count: group.len(),
                last_evaluation: latest.created_at,
                records: group,
            }
        })
        .collect();

    profiles.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
    profiles
}

impl EmployeeProfile {
    /// Per-record overall scores in chronological order.
    pub fn overall_scores(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|record| scoring::score_record(record).overall)
            .collect()
    }
}
