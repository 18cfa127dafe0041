use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::aggregate;
use crate::config::AnalyticsConfig;
use crate::insights;
use crate::models::{AnalyticsBundle, EvaluationRecord};
use crate::prediction;
use crate::recommend;
use crate::risk;
use crate::tiers;
use crate::trend;

/// Stateless entry point for one analysis run. Holds only configuration;
/// every call takes the record snapshot as an argument and returns a fresh
/// bundle, so concurrent callers never share mutable state.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyze a snapshot of evaluation records, judging staleness against
    /// the current time.
    pub fn analyze(&self, records: &[EvaluationRecord]) -> AnalyticsBundle {
        self.analyze_at(records, Utc::now())
    }

    /// Same as [`analyze`](Self::analyze) with an explicit reference time,
    /// so repeated runs over the same snapshot are byte-identical.
    pub fn analyze_at(
        &self,
        records: &[EvaluationRecord],
        as_of: DateTime<Utc>,
    ) -> AnalyticsBundle {
        if records.is_empty() {
            debug!("no evaluation records, returning empty bundle");
            return AnalyticsBundle::default();
        }

        let profiles = aggregate::build_profiles(records);
        debug!(records = records.len(), employees = profiles.len(), "profiles rebuilt");

        let predictions = prediction::predict_all(&profiles);
        let performance_trends = trend::monthly_metric_trends(records);
        let insights = insights::collect(
            records,
            &profiles,
            &predictions,
            &performance_trends,
            &self.config,
        );
        let risk_matrix = risk::build_matrix(&profiles, &predictions, as_of, &self.config);
        let tiers = tiers::tier_profiles(&profiles);
        let recommendations = recommend::recommend(&profiles, &predictions);

        info!(
            insights = insights.len(),
            predictions = predictions.len(),
            at_risk = risk_matrix.high_risk.len() + risk_matrix.medium_risk.len(),
            opportunities = risk_matrix.opportunities.len(),
            recommendations = recommendations.len(),
            "analysis run complete"
        );

        AnalyticsBundle {
            insights,
            predictions,
            tiers,
            risk_matrix,
            performance_trends,
            recommendations,
        }
    }
}

/// One-shot convenience wrapper around a default-configured engine.
pub fn analyze(records: &[EvaluationRecord]) -> AnalyticsBundle {
    AnalyticsEngine::new().analyze(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn sample_record(employee_id: Uuid, rating: u8, days_ago: i64) -> EvaluationRecord {
        EvaluationRecord {
            employee_id,
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            position: "Technician".to_string(),
            department: Some("Production".to_string()),
            formation_theme: "Machine safety".to_string(),
            created_at: Utc::now() - Duration::days(days_ago),
            content: vec![Some(rating); 8],
            methods: vec![Some(rating); 3],
            organization: vec![Some(rating); 4],
            behavior: vec![Some(rating); 8],
            cognitive: vec![Some(rating); 5],
            recommendation_score: Some(rating),
        }
    }

    fn history(employee_id: Uuid, ratings: &[u8]) -> Vec<EvaluationRecord> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, r)| sample_record(employee_id, *r, (ratings.len() - i) as i64 * 30))
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_bundle() {
        let bundle = analyze(&[]);
        assert!(bundle.insights.is_empty());
        assert!(bundle.predictions.is_empty());
        assert!(bundle.tiers.is_empty());
        assert!(bundle.performance_trends.is_empty());
        assert!(bundle.recommendations.is_empty());
        assert!(bundle.risk_matrix.high_risk.is_empty());
        assert!(bundle.risk_matrix.opportunities.is_empty());
    }

    #[test]
    fn single_evaluation_employee_skips_predictions_not_tiers() {
        let id = Uuid::new_v4();
        let records = history(id, &[2]);
        let bundle = analyze(&records);

        assert!(bundle.predictions.is_empty());
        let tier_members: usize = bundle.tiers.iter().map(|t| t.members.len()).sum();
        assert_eq!(tier_members, 1);
        // Average 2.0 scores 40 risk from the band plus 10 for thin history.
        let reported: Vec<_> = bundle
            .risk_matrix
            .high_risk
            .iter()
            .chain(&bundle.risk_matrix.medium_risk)
            .chain(&bundle.risk_matrix.low_risk)
            .collect();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].employee_id, id);
    }

    #[test]
    fn declining_employee_flows_through_the_whole_bundle() {
        let id = Uuid::new_v4();
        let records = history(id, &[5, 3, 1]);
        let bundle = analyze(&records);

        let prediction = bundle
            .predictions
            .iter()
            .find(|p| p.employee_id == id)
            .unwrap();
        assert_eq!(prediction.trend, crate::models::PredictionTrend::Declining);
        assert!(prediction.predicted_score < prediction.current_score);

        assert!(bundle
            .recommendations
            .iter()
            .any(|r| r.category == crate::models::RecommendationCategory::Coaching));
        assert!(bundle
            .insights
            .iter()
            .any(|i| i.kind == crate::models::InsightKind::Prediction));
    }

    #[test]
    fn every_employee_lands_in_exactly_one_tier() {
        let mut records = Vec::new();
        for ratings in [&[5u8, 5][..], &[3, 3][..], &[1, 2][..], &[4, 3][..]] {
            records.extend(history(Uuid::new_v4(), ratings));
        }
        let bundle = analyze(&records);

        let mut members: Vec<Uuid> = bundle
            .tiers
            .iter()
            .flat_map(|t| t.members.iter().map(|m| m.employee_id))
            .collect();
        assert_eq!(members.len(), 4);
        members.sort();
        members.dedup();
        assert_eq!(members.len(), 4);
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let mut records = Vec::new();
        records.extend(history(Uuid::new_v4(), &[5, 3, 1]));
        records.extend(history(Uuid::new_v4(), &[4, 4, 4]));
        records.extend(history(Uuid::new_v4(), &[2, 3]));
        records.extend(history(Uuid::new_v4(), &[3]));

        let engine = AnalyticsEngine::new();
        let as_of = Utc::now();
        let first = serde_json::to_string(&engine.analyze_at(&records, as_of)).unwrap();
        let second = serde_json::to_string(&engine.analyze_at(&records, as_of)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn config_floors_are_honored() {
        let id = Uuid::new_v4();
        let records = history(id, &[3, 3, 3]); // marginal band only: risk 10
        let default_bundle = analyze(&records);
        assert!(default_bundle.risk_matrix.low_risk.is_empty());

        let lenient = AnalyticsEngine::with_config(AnalyticsConfig {
            risk_report_floor: 5.0,
            ..AnalyticsConfig::default()
        });
        let bundle = lenient.analyze(&records);
        assert_eq!(bundle.risk_matrix.low_risk.len(), 1);
    }
}
