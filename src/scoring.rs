use crate::models::{Category, CategoryScores, EvaluationRecord};

/// Mean of one category's criterion ratings. The divisor is the fixed
/// criterion count for the category; an unrated criterion counts as 0, the
/// same as an explicit zero rating.
pub fn category_score(record: &EvaluationRecord, category: Category) -> f64 {
    let expected = category.criterion_count();
    let ratings = record.ratings(category);

    let mut total = 0u32;
    for i in 0..expected {
        total += u32::from(ratings.get(i).copied().flatten().unwrap_or(0));
    }
    f64::from(total) / expected as f64
}

/// Derive the five category scores and the overall score for one record.
/// Overall is the plain mean of the category means, each category weighted
/// 1/5 no matter how many criteria it carries.
pub fn score_record(record: &EvaluationRecord) -> CategoryScores {
    let content = category_score(record, Category::Content);
    let methods = category_score(record, Category::Methods);
    let organization = category_score(record, Category::Organization);
    let behavior = category_score(record, Category::Behavior);
    let cognitive = category_score(record, Category::Cognitive);
    let overall = (content + methods + organization + behavior + cognitive) / 5.0;

    CategoryScores {
        content,
        methods,
        organization,
        behavior,
        cognitive,
        overall,
    }
}

pub fn recommendation_score(record: &EvaluationRecord) -> f64 {
    f64::from(record.recommendation_score.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_record() -> EvaluationRecord {
        EvaluationRecord {
            employee_id: Uuid::new_v4(),
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            position: "Technician".to_string(),
            department: Some("Maintenance".to_string()),
            formation_theme: "Safety procedures".to_string(),
            created_at: Utc::now(),
            content: vec![Some(4); 8],
            methods: vec![Some(3); 3],
            organization: vec![Some(5); 4],
            behavior: vec![Some(4); 8],
            cognitive: vec![Some(2); 5],
            recommendation_score: Some(4),
        }
    }

    #[test]
    fn category_means_use_fixed_criterion_counts() {
        let record = sample_record();
        assert!((category_score(&record, Category::Content) - 4.0).abs() < 1e-9);
        assert!((category_score(&record, Category::Methods) - 3.0).abs() < 1e-9);
        assert!((category_score(&record, Category::Cognitive) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn overall_is_mean_of_category_means() {
        let scores = score_record(&sample_record());
        let expected = (4.0 + 3.0 + 5.0 + 4.0 + 2.0) / 5.0;
        assert!((scores.overall - expected).abs() < 1e-9);
    }

    #[test]
    fn overall_stays_in_rating_range() {
        let mut record = sample_record();
        record.content = vec![Some(5); 8];
        record.methods = vec![Some(5); 3];
        record.organization = vec![Some(5); 4];
        record.behavior = vec![Some(5); 8];
        record.cognitive = vec![Some(5); 5];
        let scores = score_record(&record);
        assert!(scores.overall >= 0.0 && scores.overall <= 5.0);
        assert!((scores.overall - 5.0).abs() < 1e-9);

        record.content = vec![None; 8];
        record.methods = vec![];
        record.organization = vec![Some(0); 4];
        record.behavior = vec![None; 8];
        record.cognitive = vec![];
        let scores = score_record(&record);
        assert!(scores.overall >= 0.0 && scores.overall <= 5.0);
    }

    #[test]
    fn unrated_criteria_count_as_zero() {
        let mut record = sample_record();
        record.methods = vec![Some(3), None, None];
        assert!((category_score(&record, Category::Methods) - 1.0).abs() < 1e-9);

        // A short ratings vector behaves like trailing unrated criteria.
        record.methods = vec![Some(3)];
        assert!((category_score(&record, Category::Methods) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn missing_recommendation_scores_as_zero() {
        let mut record = sample_record();
        record.recommendation_score = None;
        assert_eq!(recommendation_score(&record), 0.0);
    }
}
