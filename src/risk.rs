use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::AnalyticsConfig;
use crate::models::{
    EmployeeProfile, PerformancePrediction, PredictionTrend, RiskMatrix, RiskMatrixEntry,
};
use crate::stats;

const MAX_SCORE: f64 = 100.0;

/// Consistency bonus requires this much history and less spread than this.
const CONSISTENCY_MIN_EVALUATIONS: usize = 3;
const CONSISTENCY_MAX_VARIANCE: f64 = 0.5;

/// Additive rule-based scores for one employee, with the rules that fired.
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub risk_score: f64,
    pub risk_reasons: Vec<String>,
    pub opportunity_score: f64,
    pub opportunity_reasons: Vec<String>,
}

/// Score one employee. Risk and opportunity are independent tallies; both
/// cap at 100. Staleness is judged against `as_of` so a run is
/// reproducible.
pub fn assess(
    profile: &EmployeeProfile,
    prediction: Option<&PerformancePrediction>,
    as_of: DateTime<Utc>,
    stale_after_days: i64,
) -> RiskAssessment {
    let average = profile.average_score;
    let mut risk_score: f64 = 0.0;
    let mut risk_reasons = Vec::new();

    // Only the most severe matching average band fires.
    if average < 2.5 {
        risk_score += 40.0;
        risk_reasons.push(format!("critically low average score ({average:.2}/5)"));
    } else if average < 3.0 {
        risk_score += 25.0;
        risk_reasons.push(format!("below-target average score ({average:.2}/5)"));
    } else if average < 3.5 {
        risk_score += 10.0;
        risk_reasons.push(format!("marginal average score ({average:.2}/5)"));
    }

    match prediction.map(|p| p.trend) {
        Some(PredictionTrend::Declining) => {
            risk_score += 30.0;
            risk_reasons.push("forecast points downward".to_string());
        }
        Some(PredictionTrend::Stable) if average < 3.0 => {
            risk_score += 15.0;
            risk_reasons.push("stagnating below target".to_string());
        }
        _ => {}
    }

    if profile.evaluation_count < 2 {
        risk_score += 10.0;
        risk_reasons.push("too little evaluation history".to_string());
    }

    let days_since_last = (as_of - profile.last_evaluation).num_days();
    if days_since_last > stale_after_days {
        risk_score += 20.0;
        risk_reasons.push(format!("no evaluation for {days_since_last} days"));
    }

    let mut opportunity_score: f64 = 0.0;
    let mut opportunity_reasons = Vec::new();

    if average >= 4.0 {
        opportunity_score += 40.0;
        opportunity_reasons.push(format!("excellent average score ({average:.2}/5)"));
    } else if average >= 3.5 {
        opportunity_score += 25.0;
        opportunity_reasons.push(format!("strong average score ({average:.2}/5)"));
    }

    let overalls = profile.overall_scores();
    if profile.evaluation_count >= CONSISTENCY_MIN_EVALUATIONS
        && stats::variance(&overalls) < CONSISTENCY_MAX_VARIANCE
    {
        opportunity_score += 20.0;
        opportunity_reasons.push("consistent results across evaluations".to_string());
    }

    if let (Some(first), Some(last)) = (overalls.first(), overalls.last()) {
        if last > first {
            opportunity_score += 20.0;
            opportunity_reasons.push("improved since first evaluation".to_string());
        }
    }

    RiskAssessment {
        employee_id: profile.employee_id,
        employee_name: profile.display_name.clone(),
        risk_score: risk_score.min(MAX_SCORE),
        risk_reasons,
        opportunity_score: opportunity_score.min(MAX_SCORE),
        opportunity_reasons,
    }
}

/// Bucket every employee into the risk matrix. High >70, medium 50-70,
/// low down to the reporting floor; opportunities above their own floor.
/// Buckets are ordered by score, worst first.
pub fn build_matrix(
    profiles: &[EmployeeProfile],
    predictions: &[PerformancePrediction],
    as_of: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> RiskMatrix {
    let by_employee: HashMap<Uuid, &PerformancePrediction> =
        predictions.iter().map(|p| (p.employee_id, p)).collect();

    let mut matrix = RiskMatrix::default();
    for profile in profiles {
        let assessment = assess(
            profile,
            by_employee.get(&profile.employee_id).copied(),
            as_of,
            config.stale_after_days,
        );

        if assessment.risk_score > config.risk_report_floor {
            let entry = RiskMatrixEntry {
                employee_id: assessment.employee_id,
                employee_name: assessment.employee_name.clone(),
                score: assessment.risk_score,
                reasons: assessment.risk_reasons.clone(),
            };
            if assessment.risk_score > 70.0 {
                matrix.high_risk.push(entry);
            } else if assessment.risk_score >= 50.0 {
                matrix.medium_risk.push(entry);
            } else {
                matrix.low_risk.push(entry);
            }
        }

        if assessment.opportunity_score > config.opportunity_report_floor {
            matrix.opportunities.push(RiskMatrixEntry {
                employee_id: assessment.employee_id,
                employee_name: assessment.employee_name,
                score: assessment.opportunity_score,
                reasons: assessment.opportunity_reasons,
            });
        }
    }

    for bucket in [
        &mut matrix.high_risk,
        &mut matrix.medium_risk,
        &mut matrix.low_risk,
        &mut matrix.opportunities,
    ] {
        bucket.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
    }
    matrix
}
