use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{
    EmployeeProfile, PerformancePrediction, PredictionTrend, Priority, Recommendation,
    RecommendationCategory,
};

/// Rule-based recommendations, at most two per employee: one from the
/// average-score band, one from the forecast trend. Output is sorted by
/// priority, highest first.
pub fn recommend(
    profiles: &[EmployeeProfile],
    predictions: &[PerformancePrediction],
) -> Vec<Recommendation> {
    let by_employee: HashMap<Uuid, &PerformancePrediction> =
        predictions.iter().map(|p| (p.employee_id, p)).collect();

    let mut recommendations = Vec::new();
    for profile in profiles {
        let average = profile.average_score;

        if average < 3.0 {
            recommendations.push(Recommendation {
                employee_id: profile.employee_id,
                employee_name: profile.display_name.clone(),
                priority: Priority::High,
                category: RecommendationCategory::Training,
                title: "Urgent remediation plan".to_string(),
                description: format!(
                    "Average score {average:.2}/5 is below target; schedule a focused training plan."
                ),
            });
        } else if average >= 4.0 {
            recommendations.push(Recommendation {
                employee_id: profile.employee_id,
                employee_name: profile.display_name.clone(),
                priority: Priority::Medium,
                category: RecommendationCategory::Development,
                title: "Leadership potential".to_string(),
                description: format!(
                    "Average score {average:.2}/5; propose stretch assignments or a mentoring role."
                ),
            });
        }

        match by_employee.get(&profile.employee_id).map(|p| p.trend) {
            Some(PredictionTrend::Declining) => {
                recommendations.push(Recommendation {
                    employee_id: profile.employee_id,
                    employee_name: profile.display_name.clone(),
                    priority: Priority::High,
                    category: RecommendationCategory::Coaching,
                    title: "Preventive intervention".to_string(),
                    description:
                        "Scores are forecast to decline; arrange coaching before the next evaluation."
                            .to_string(),
                });
            }
            Some(PredictionTrend::Improving) => {
                recommendations.push(Recommendation {
                    employee_id: profile.employee_id,
                    employee_name: profile.display_name.clone(),
                    priority: Priority::Low,
                    category: RecommendationCategory::Recognition,
                    title: "Reinforce positive trend".to_string(),
                    description: "Scores are improving; acknowledge the progress to sustain it."
                        .to_string(),
                });
            }
            _ => {}
        }
    }

    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    recommendations
}
