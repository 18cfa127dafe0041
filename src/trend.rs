use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{CategoryScores, EvaluationRecord, MetricTrend, TrendDirection};
use crate::scoring;
use crate::stats;

/// Slope magnitude below which a fitted series counts as flat.
const STABLE_SLOPE: f64 = 0.05;
const MAX_CONFIDENCE: f64 = 95.0;

/// Result of fitting a time-ordered series against its index.
#[derive(Debug, Clone, Copy)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
    pub direction: TrendDirection,
    /// `min(|correlation| * 100, 95)`.
    pub confidence: f64,
    /// Extrapolation one step past the series.
    pub predicted_next: f64,
}

pub fn fit_series(values: &[f64]) -> TrendFit {
    if values.len() < 2 {
        return TrendFit {
            slope: 0.0,
            intercept: values.first().copied().unwrap_or(0.0),
            correlation: 0.0,
            direction: TrendDirection::Stable,
            confidence: 0.0,
            predicted_next: values.first().copied().unwrap_or(0.0),
        };
    }

    let (slope, intercept) = stats::linear_fit(values);
    let indices: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let correlation = stats::pearson(&indices, values);

    let direction = if slope > STABLE_SLOPE {
        TrendDirection::Increasing
    } else if slope < -STABLE_SLOPE {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    TrendFit {
        slope,
        intercept,
        correlation,
        direction,
        confidence: (correlation.abs() * 100.0).min(MAX_CONFIDENCE),
        predicted_next: intercept + slope * values.len() as f64,
    }
}

/// Monthly means of the six tracked metrics (overall plus the five category
/// scores), each fitted for direction over calendar months.
pub fn monthly_metric_trends(records: &[EvaluationRecord]) -> Vec<MetricTrend> {
    if records.is_empty() {
        return Vec::new();
    }

    // (year, month) -> per-record scores, ordered by the BTreeMap key.
    let mut months: BTreeMap<(i32, u32), Vec<CategoryScores>> = BTreeMap::new();
    for record in records {
        let key = (record.created_at.year(), record.created_at.month());
        months.entry(key).or_default().push(scoring::score_record(record));
    }

    let metrics: [(&str, fn(&CategoryScores) -> f64); 6] = [
        ("overall", |s| s.overall),
        ("content", |s| s.content),
        ("methods", |s| s.methods),
        ("organization", |s| s.organization),
        ("behavior", |s| s.behavior),
        ("cognitive", |s| s.cognitive),
    ];

    metrics
        .iter()
        .map(|(metric, extract)| {
            let series: Vec<f64> = months
                .values()
                .map(|scores| {
                    let values: Vec<f64> = scores.iter().map(|s| extract(s)).collect();
                    stats::mean(&values)
                })
                .collect();
            let fit = fit_series(&series);
            MetricTrend {
                metric: (*metric).to_string(),
                slope: fit.slope,
                intercept: fit.intercept,
                correlation: fit.correlation,
                direction: fit.direction,
                confidence: fit.confidence,
                predicted_next: fit.predicted_next,
                points: series.len(),
            }
        })
        .collect()
}
