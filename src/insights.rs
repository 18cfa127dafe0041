use std::collections::HashMap;

use serde_json::json;
use uuid::Uuid;

use crate::anomaly;
use crate::config::AnalyticsConfig;
use crate::correlation;
use crate::models::{
    EmployeeProfile, EvaluationRecord, Insight, InsightKind, MetricTrend,
    PerformancePrediction, PredictionTrend, Severity, TrendDirection,
};

/// A forecast is only worth reporting with this much history and
/// confidence; eligibility for forecasting itself is looser on purpose.
const PREDICTION_INSIGHT_MIN_EVALUATIONS: usize = 3;
const PREDICTION_INSIGHT_MIN_CONFIDENCE: f64 = 60.0;

const TREND_HIGH_SLOPE: f64 = 0.3;
const CORRELATION_HIGH: f64 = 0.8;
const ANOMALY_INSIGHT_MIN_Z: f64 = 2.0;

/// Run every insight-producing analyzer and collect one severity-ranked
/// list. Ties break on confidence, then title, so output order is stable.
pub fn collect(
    records: &[EvaluationRecord],
    profiles: &[EmployeeProfile],
    predictions: &[PerformancePrediction],
    metric_trends: &[MetricTrend],
    config: &AnalyticsConfig,
) -> Vec<Insight> {
    let mut insights = Vec::new();
    trend_insights(metric_trends, config, &mut insights);
    anomaly_insights(profiles, config, &mut insights);
    correlation_insights(records, config, &mut insights);
    prediction_insights(profiles, predictions, &mut insights);

    insights.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.title.cmp(&b.title))
    });
    insights
}

fn trend_insights(
    metric_trends: &[MetricTrend],
    config: &AnalyticsConfig,
    insights: &mut Vec<Insight>,
) {
    for trend in metric_trends {
        if trend.slope.abs() <= config.trend_emission_slope {
            continue;
        }
        let severity = if trend.slope.abs() > TREND_HIGH_SLOPE {
            Severity::High
        } else {
            Severity::Medium
        };
        let direction_label = match trend.direction {
            TrendDirection::Increasing => "rising",
            TrendDirection::Decreasing => "falling",
            TrendDirection::Stable => "drifting",
        };
        insights.push(Insight {
            kind: InsightKind::Trend,
            severity,
            title: format!("Monthly {} scores are {}", trend.metric, direction_label),
            description: format!(
                "The monthly mean of {} moves {:+.2} points per month over {} months.",
                trend.metric, trend.slope, trend.points
            ),
            recommendation: if trend.slope < 0.0 {
                "Review recent sessions for this metric and adjust the program.".to_string()
            } else {
                "Keep the current program; the metric is trending up.".to_string()
            },
            confidence: trend.confidence,
            payload: Some(json!({
                "metric": trend.metric,
                "slope": trend.slope,
                "predicted_next": trend.predicted_next,
            })),
        });
    }
}

fn anomaly_insights(
    profiles: &[EmployeeProfile],
    config: &AnalyticsConfig,
    insights: &mut Vec<Insight>,
) {
    for report in anomaly::detect(profiles, config.anomaly_z_threshold) {
        // Stricter than the raw flag: both conditions must hold.
        if !(report.is_anomaly && report.z_score.abs() > ANOMALY_INSIGHT_MIN_Z) {
            continue;
        }
        let side = if report.z_score > 0.0 { "above" } else { "below" };
        insights.push(Insight {
            kind: InsightKind::Anomaly,
            severity: report.severity,
            title: format!("{} scores far {} the population", report.employee_name, side),
            description: format!(
                "Average {:.2}/5 sits {:.1} standard deviations {} the population mean \
                 (expected {:.2} to {:.2}).",
                report.average_score,
                report.z_score.abs(),
                side,
                report.expected_min,
                report.expected_max
            ),
            recommendation: if report.z_score < 0.0 {
                "Review this employee's situation individually.".to_string()
            } else {
                "Check whether this employee's practices can be shared.".to_string()
            },
            confidence: report.confidence,
            payload: Some(json!({
                "employee_id": report.employee_id,
                "z_score": report.z_score,
                "expected_min": report.expected_min,
                "expected_max": report.expected_max,
            })),
        });
    }
}

fn correlation_insights(
    records: &[EvaluationRecord],
    config: &AnalyticsConfig,
    insights: &mut Vec<Insight>,
) {
    for pair in correlation::pairwise(records) {
        if pair.r.abs() <= config.correlation_emission_threshold {
            continue;
        }
        let severity = if pair.r.abs() > CORRELATION_HIGH {
            Severity::High
        } else {
            Severity::Medium
        };
        let link = if pair.r > 0.0 { "rise together" } else { "move in opposite directions" };
        insights.push(Insight {
            kind: InsightKind::Correlation,
            severity,
            title: format!("{} and {} {}", pair.left, pair.right, link),
            description: format!(
                "Pearson correlation of {:.2} across {} evaluations.",
                pair.r,
                records.len()
            ),
            recommendation:
                "Consider whether one of these scores can serve as an early signal for the other."
                    .to_string(),
            confidence: pair.r.abs() * 100.0,
            payload: Some(json!({
                "left": pair.left,
                "right": pair.right,
                "r": pair.r,
            })),
        });
    }
}

fn prediction_insights(
    profiles: &[EmployeeProfile],
    predictions: &[PerformancePrediction],
    insights: &mut Vec<Insight>,
) {
    let counts: HashMap<Uuid, usize> = profiles
        .iter()
        .map(|p| (p.employee_id, p.evaluation_count))
        .collect();

    for prediction in predictions {
        let count = counts.get(&prediction.employee_id).copied().unwrap_or(0);
        if count < PREDICTION_INSIGHT_MIN_EVALUATIONS
            || prediction.confidence <= PREDICTION_INSIGHT_MIN_CONFIDENCE
        {
            continue;
        }

        let (severity, verb) = match prediction.trend {
            PredictionTrend::Declining => (Severity::High, "decline"),
            PredictionTrend::Improving => (Severity::Medium, "improve"),
            PredictionTrend::Stable => (Severity::Low, "hold steady"),
        };
        insights.push(Insight {
            kind: InsightKind::Prediction,
            severity,
            title: format!("{} is forecast to {}", prediction.employee_name, verb),
            description: format!(
                "Current score {:.2}/5, forecast {:.2}/5 at the next evaluation.",
                prediction.current_score, prediction.predicted_score
            ),
            recommendation: match prediction.trend {
                PredictionTrend::Declining => {
                    "Plan a preventive intervention before the next evaluation.".to_string()
                }
                PredictionTrend::Improving => {
                    "Recognize the progress and keep the current support in place.".to_string()
                }
                PredictionTrend::Stable => "No action needed beyond routine follow-up.".to_string(),
            },
            confidence: prediction.confidence,
            payload: Some(json!({
                "employee_id": prediction.employee_id,
                "predicted_score": prediction.predicted_score,
                "current_score": prediction.current_score,
            })),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use crate::prediction;
    use crate::trend;
    use chrono::{Duration, Utc};

    fn sample_record(employee_id: Uuid, rating: u8, days_ago: i64) -> EvaluationRecord {
        EvaluationRecord {
            employee_id,
            first_name: "Omar".to_string(),
            last_name: "Haddad".to_string(),
            position: "Engineer".to_string(),
            department: None,
            formation_theme: "Robotics".to_string(),
            created_at: Utc::now() - Duration::days(days_ago),
            content: vec![Some(rating); 8],
            methods: vec![Some(rating); 3],
            organization: vec![Some(rating); 4],
            behavior: vec![Some(rating); 8],
            cognitive: vec![Some(rating); 5],
            recommendation_score: Some(rating),
        }
    }

    fn declining_history(ratings: &[u8]) -> Vec<EvaluationRecord> {
        let id = Uuid::new_v4();
        ratings
            .iter()
            .enumerate()
            .map(|(i, r)| sample_record(id, *r, (ratings.len() - i) as i64 * 30))
            .collect()
    }

    #[test]
    fn declining_employee_yields_high_prediction_insight() {
        let records = declining_history(&[5, 3, 1]);
        let profiles = aggregate::build_profiles(&records);
        let predictions = prediction::predict_all(&profiles);
        let trends = trend::monthly_metric_trends(&records);
        let config = AnalyticsConfig::default();

        let insights = collect(&records, &profiles, &predictions, &trends, &config);
        let forecast = insights
            .iter()
            .find(|i| i.kind == InsightKind::Prediction)
            .unwrap();
        assert_eq!(forecast.severity, Severity::High);
        assert!(forecast.confidence > 60.0);
    }

    #[test]
    fn two_evaluation_forecast_is_not_reported() {
        let records = declining_history(&[5, 1]);
        let profiles = aggregate::build_profiles(&records);
        let predictions = prediction::predict_all(&profiles);
        assert_eq!(predictions.len(), 1);

        let config = AnalyticsConfig::default();
        let insights = collect(&records, &profiles, &predictions, &[], &config);
        assert!(insights.iter().all(|i| i.kind != InsightKind::Prediction));
    }

    #[test]
    fn mild_outlier_is_flagged_but_not_reported() {
        // z just past 1.5 but under 2: the raw anomaly flag fires, the
        // insight gate does not.
        let mut records = Vec::new();
        for _ in 0..3 {
            records.extend(declining_history(&[3]));
        }
        records.extend(declining_history(&[1]));
        let profiles = aggregate::build_profiles(&records);

        let config = AnalyticsConfig::default();
        let reports = crate::anomaly::detect(&profiles, config.anomaly_z_threshold);
        let outlier = reports.iter().find(|r| r.average_score < 2.0).unwrap();
        assert!(outlier.is_anomaly);
        assert!(outlier.z_score.abs() <= 2.0);

        let insights = collect(&records, &profiles, &[], &[], &config);
        assert!(insights.iter().all(|i| i.kind != InsightKind::Anomaly));
    }

    #[test]
    fn insights_come_back_severity_ranked() {
        let mut records = declining_history(&[5, 3, 1]);
        for _ in 0..6 {
            records.extend(declining_history(&[4, 4, 4]));
        }
        let profiles = aggregate::build_profiles(&records);
        let predictions = prediction::predict_all(&profiles);
        let trends = trend::monthly_metric_trends(&records);
        let config = AnalyticsConfig::default();

        let insights = collect(&records, &profiles, &predictions, &trends, &config);
        assert!(!insights.is_empty());
        for pair in insights.windows(2) {
            assert!(pair[0].severity >= pair[1].severity);
        }
    }

    #[test]
    fn weak_monthly_slope_is_not_reported() {
        let trends = vec![MetricTrend {
            metric: "overall".to_string(),
            slope: 0.08,
            intercept: 3.0,
            correlation: 0.9,
            direction: TrendDirection::Increasing,
            confidence: 90.0,
            predicted_next: 3.3,
            points: 4,
        }];
        let config = AnalyticsConfig::default();
        let insights = collect(&[], &[], &[], &trends, &config);
        assert!(insights.is_empty());
    }

    #[test]
    fn steep_monthly_slope_is_high_severity() {
        let trends = vec![MetricTrend {
            metric: "behavior".to_string(),
            slope: -0.4,
            intercept: 4.0,
            correlation: -0.95,
            direction: TrendDirection::Decreasing,
            confidence: 95.0,
            predicted_next: 2.4,
            points: 4,
        }];
        let config = AnalyticsConfig::default();
        let insights = collect(&[], &[], &[], &trends, &config);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Trend);
        assert_eq!(insights[0].severity, Severity::High);
    }
}
