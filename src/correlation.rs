use crate::models::{Category, EvaluationRecord};
use crate::scoring;
use crate::stats;

/// Pearson correlation for one unordered pair of scoring variables.
#[derive(Debug, Clone)]
pub struct CorrelationPair {
    pub left: &'static str,
    pub right: &'static str,
    pub r: f64,
}

const VARIABLE_COUNT: usize = 6;

fn variable_label(index: usize) -> &'static str {
    match index {
        0..=4 => Category::ALL[index].label(),
        _ => "recommendation",
    }
}

/// All 15 unordered pairs over the five category scores plus the
/// recommendation score, in a fixed order. Degenerate series correlate
/// as 0 rather than erroring.
pub fn pairwise(records: &[EvaluationRecord]) -> Vec<CorrelationPair> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut series: Vec<Vec<f64>> = vec![Vec::with_capacity(records.len()); VARIABLE_COUNT];
    for record in records {
        let scores = scoring::score_record(record);
        for (i, category) in Category::ALL.iter().enumerate() {
            series[i].push(scores.get(*category));
        }
        series[5].push(scoring::recommendation_score(record));
    }

    let mut pairs = Vec::with_capacity(15);
    for i in 0..VARIABLE_COUNT {
        for j in (i + 1)..VARIABLE_COUNT {
            pairs.push(CorrelationPair {
                left: variable_label(i),
                right: variable_label(j),
                r: stats::pearson(&series[i], &series[j]),
            });
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn record_with(content: u8, recommendation: u8) -> EvaluationRecord {
        EvaluationRecord {
            employee_id: Uuid::new_v4(),
            first_name: "Lior".to_string(),
            last_name: "Adam".to_string(),
            position: "Manager".to_string(),
            department: None,
            formation_theme: "Leadership".to_string(),
            created_at: Utc::now(),
            content: vec![Some(content); 8],
            methods: vec![Some(3); 3],
            organization: vec![Some(3); 4],
            behavior: vec![Some(3); 8],
            cognitive: vec![Some(3); 5],
            recommendation_score: Some(recommendation),
        }
    }

    #[test]
    fn produces_all_fifteen_pairs() {
        let records = vec![record_with(1, 1), record_with(4, 4)];
        let pairs = pairwise(&records);
        assert_eq!(pairs.len(), 15);
    }

    #[test]
    fn linked_variables_correlate_strongly() {
        let records = vec![
            record_with(1, 1),
            record_with(2, 2),
            record_with(4, 4),
            record_with(5, 5),
        ];
        let pairs = pairwise(&records);
        let pair = pairs
            .iter()
            .find(|p| p.left == "content" && p.right == "recommendation")
            .unwrap();
        assert!((pair.r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn opposed_variables_correlate_negatively() {
        let records = vec![record_with(1, 5), record_with(3, 3), record_with(5, 1)];
        let pairs = pairwise(&records);
        let pair = pairs
            .iter()
            .find(|p| p.left == "content" && p.right == "recommendation")
            .unwrap();
        assert!((pair.r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_variables_correlate_as_zero() {
        let records = vec![record_with(2, 1), record_with(4, 5)];
        let pairs = pairwise(&records);
        let pair = pairs
            .iter()
            .find(|p| p.left == "methods" && p.right == "behavior")
            .unwrap();
        assert_eq!(pair.r, 0.0);
    }

    #[test]
    fn empty_input_has_no_pairs() {
        assert!(pairwise(&[]).is_empty());
    }
}
