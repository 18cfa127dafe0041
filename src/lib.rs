//! Analytics engine for post-training employee evaluation records.
//!
//! Callers hand in a flat list of [`EvaluationRecord`]s and get back one
//! [`AnalyticsBundle`]: severity-ranked insights, per-employee forecasts,
//! three fixed performance tiers, a risk/opportunity matrix, monthly metric
//! trends and rule-based recommendations. The engine is purely
//! computational: no I/O, no retained state, no panics on empty or sparse
//! input. Persistence and presentation belong to the caller.

pub mod aggregate;
pub mod anomaly;
pub mod config;
pub mod correlation;
pub mod engine;
pub mod insights;
pub mod models;
pub mod prediction;
pub mod recommend;
pub mod risk;
pub mod scoring;
pub mod stats;
pub mod tiers;
pub mod trend;

pub use config::AnalyticsConfig;
pub use engine::{analyze, AnalyticsEngine};
pub use models::{
    AnalyticsBundle, Category, CategoryScores, EmployeeProfile, EmployeeTier,
    EvaluationRecord, Insight, InsightKind, MetricTrend, PerformancePrediction,
    PredictionTrend, Priority, Recommendation, RecommendationCategory, RiskLevel,
    RiskMatrix, RiskMatrixEntry, Severity, TierLevel, TierMember, TrendDirection,
};
