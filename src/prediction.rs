use crate::models::{Category, EmployeeProfile, PerformancePrediction, PredictionTrend};
use crate::scoring;
use crate::trend;

/// Minimum history length before a forecast exists at all. Reporting a
/// forecast as an insight has its own, stricter gate in the aggregator.
pub const MIN_EVALUATIONS: usize = 2;

/// Band around the current score inside which a forecast counts as stable.
const STABLE_BAND: f64 = 0.2;

const WEAK_CATEGORY: f64 = 3.0;
const STRONG_CATEGORY: f64 = 4.0;

/// Forecast the next overall score from an employee's chronological
/// history. Employees with fewer than two evaluations are omitted.
pub fn predict(profile: &EmployeeProfile) -> Option<PerformancePrediction> {
    if profile.evaluation_count < MIN_EVALUATIONS {
        return None;
    }

    let scores = profile.overall_scores();
    let fit = trend::fit_series(&scores);
    let predicted_score = fit.predicted_next.clamp(0.0, 5.0);
    let current_score = profile.average_score;

    let trend = if predicted_score > current_score + STABLE_BAND {
        PredictionTrend::Improving
    } else if predicted_score < current_score - STABLE_BAND {
        PredictionTrend::Declining
    } else {
        PredictionTrend::Stable
    };

    Some(PerformancePrediction {
        employee_id: profile.employee_id,
        employee_name: profile.display_name.clone(),
        current_score,
        predicted_score,
        trend,
        confidence: fit.confidence,
        timeframe: "next evaluation".to_string(),
        factors: latest_record_factors(profile),
    })
}

pub fn predict_all(profiles: &[EmployeeProfile]) -> Vec<PerformancePrediction> {
    profiles.iter().filter_map(predict).collect()
}

/// Weaknesses and strengths read off the most recent evaluation.
fn latest_record_factors(profile: &EmployeeProfile) -> Vec<String> {
    let mut factors = Vec::new();
    let Some(latest) = profile.records.last() else {
        return factors;
    };

    let scores = scoring::score_record(latest);
    for category in Category::ALL {
        let score = scores.get(category);
        if score < WEAK_CATEGORY {
            factors.push(format!(
                "{} needs attention ({:.1}/5 on latest evaluation)",
                category.label(),
                score
            ));
        } else if score > STRONG_CATEGORY {
            factors.push(format!(
                "{} is a strength ({:.1}/5 on latest evaluation)",
                category.label(),
                score
            ));
        }
    }
    factors
}
