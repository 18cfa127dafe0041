use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five fixed rating categories on an evaluation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Content,
    Methods,
    Organization,
    Behavior,
    Cognitive,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Content,
        Category::Methods,
        Category::Organization,
        Category::Behavior,
        Category::Cognitive,
    ];

    /// Number of criteria on the form for this category. Category means
    /// always divide by this count, not by how many criteria were rated.
    pub fn criterion_count(self) -> usize {
        match self {
            Category::Content => 8,
            Category::Methods => 3,
            Category::Organization => 4,
            Category::Behavior => 8,
            Category::Cognitive => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Content => "content",
            Category::Methods => "methods",
            Category::Organization => "organization",
            Category::Behavior => "behavior",
            Category::Cognitive => "cognitive",
        }
    }
}

/// One scored training-evaluation submission for one employee.
///
/// Criterion ratings are integers in `[0, 5]`. `None` means the criterion
/// was never rated; it is scored as `0`, indistinguishable from an explicit
/// zero. That unset-equals-zero policy matches the upstream evaluation
/// forms and is deliberate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub employee_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    #[serde(default)]
    pub department: Option<String>,
    pub formation_theme: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub content: Vec<Option<u8>>,
    #[serde(default)]
    pub methods: Vec<Option<u8>>,
    #[serde(default)]
    pub organization: Vec<Option<u8>>,
    #[serde(default)]
    pub behavior: Vec<Option<u8>>,
    #[serde(default)]
    pub cognitive: Vec<Option<u8>>,
    #[serde(default)]
    pub recommendation_score: Option<u8>,
}

impl EvaluationRecord {
    pub fn ratings(&self, category: Category) -> &[Option<u8>] {
        match category {
            Category::Content => &self.content,
            Category::Methods => &self.methods,
            Category::Organization => &self.organization,
            Category::Behavior => &self.behavior,
            Category::Cognitive => &self.cognitive,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Per-record derived scores, one mean per category plus the overall mean.
/// Each category contributes equal weight to the overall score regardless
/// of how many criteria it has; that is scoring policy, not an accident.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub content: f64,
    pub methods: f64,
    pub organization: f64,
    pub behavior: f64,
    pub cognitive: f64,
    pub overall: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Content => self.content,
            Category::Methods => self.methods,
            Category::Organization => self.organization,
            Category::Behavior => self.behavior,
            Category::Cognitive => self.cognitive,
        }
    }
}

/// Per-employee view rebuilt from scratch on every analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub employee_id: Uuid,
    pub display_name: String,
    pub position: String,
    pub department: Option<String>,
    /// Chronological by `created_at`.
    pub records: Vec<EvaluationRecord>,
    pub average_score: f64,
    pub evaluation_count: usize,
    pub last_evaluation: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Trend,
    Anomaly,
    Prediction,
    Risk,
    Opportunity,
    Correlation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A single typed finding produced by one analyzer. Created fresh on each
/// run, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    /// In `[0, 100]`.
    pub confidence: f64,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionTrend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformancePrediction {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub current_score: f64,
    /// Clamped to `[0, 5]`.
    pub predicted_score: f64,
    pub trend: PredictionTrend,
    pub confidence: f64,
    pub timeframe: String,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierLevel {
    Excellent,
    Average,
    AtRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierMember {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub average_score: f64,
}

/// One of three fixed performance bands. This is threshold tiering, not a
/// learned grouping; callers wanting real clustering need a different
/// component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeTier {
    pub level: TierLevel,
    pub name: String,
    pub description: String,
    pub characteristics: Vec<String>,
    pub members: Vec<TierMember>,
    pub average_score: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMatrixEntry {
    pub employee_id: Uuid,
    pub employee_name: String,
    /// In `[0, 100]`.
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Employees bucketed by risk score, plus advancement-ready employees by
/// opportunity score. Scores at or below the reporting floor are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskMatrix {
    pub high_risk: Vec<RiskMatrixEntry>,
    pub medium_risk: Vec<RiskMatrixEntry>,
    pub low_risk: Vec<RiskMatrixEntry>,
    pub opportunities: Vec<RiskMatrixEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Training,
    Development,
    Coaching,
    Recognition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub priority: Priority,
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Linear trend fitted over the monthly means of one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTrend {
    pub metric: String,
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
    pub direction: TrendDirection,
    pub confidence: f64,
    pub predicted_next: f64,
    pub points: usize,
}

/// Everything one analysis run produces. All collections empty for empty
/// input; no analyzer raises.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsBundle {
    pub insights: Vec<Insight>,
    pub predictions: Vec<PerformancePrediction>,
    pub tiers: Vec<EmployeeTier>,
    pub risk_matrix: RiskMatrix,
    pub performance_trends: Vec<MetricTrend>,
    pub recommendations: Vec<Recommendation>,
}
