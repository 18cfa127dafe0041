use crate::models::{EmployeeProfile, EmployeeTier, RiskLevel, TierLevel, TierMember};
use crate::stats;

impl TierLevel {
    pub fn tier_name(self) -> &'static str {
        match self {
            TierLevel::Excellent => "Excellent Performers",
            TierLevel::Average => "Average Performers",
            TierLevel::AtRisk => "At-Risk Performers",
        }
    }

    fn description(self) -> &'static str {
        match self {
            TierLevel::Excellent => "Consistently strong results, ready for broader responsibility",
            TierLevel::Average => "Solid results with clear room to grow",
            TierLevel::AtRisk => "Results below target, needs structured support",
        }
    }

    fn characteristics(self) -> &'static [&'static str] {
        match self {
            TierLevel::Excellent => &[
                "average score of 4.0 or higher",
                "candidates for mentoring roles",
                "low intervention need",
            ],
            TierLevel::Average => &[
                "average score between 3.0 and 4.0",
                "benefit from targeted development",
                "moderate follow-up cadence",
            ],
            TierLevel::AtRisk => &[
                "average score below 3.0",
                "priority for remediation plans",
                "close follow-up required",
            ],
        }
    }

    fn risk_level(self) -> RiskLevel {
        match self {
            TierLevel::Excellent => RiskLevel::Low,
            TierLevel::Average => RiskLevel::Medium,
            TierLevel::AtRisk => RiskLevel::High,
        }
    }
}

fn level_for(average_score: f64) -> TierLevel {
    if average_score >= 4.0 {
        TierLevel::Excellent
    } else if average_score >= 3.0 {
        TierLevel::Average
    } else {
        TierLevel::AtRisk
    }
}

/// Partition employees into the three fixed performance bands. This is
/// threshold tiering, not clustering. Non-empty input always yields all
/// three tiers, possibly with empty membership.
pub fn tier_profiles(profiles: &[EmployeeProfile]) -> Vec<EmployeeTier> {
    if profiles.is_empty() {
        return Vec::new();
    }

    [TierLevel::Excellent, TierLevel::Average, TierLevel::AtRisk]
        .into_iter()
        .map(|level| {
            let members: Vec<TierMember> = profiles
                .iter()
                .filter(|p| level_for(p.average_score) == level)
                .map(|p| TierMember {
                    employee_id: p.employee_id,
                    employee_name: p.display_name.clone(),
                    average_score: p.average_score,
                })
                .collect();

            let member_averages: Vec<f64> =
                members.iter().map(|m| m.average_score).collect();

            EmployeeTier {
                level,
                name: level.tier_name().to_string(),
                description: level.description().to_string(),
                characteristics: level
                    .characteristics()
                    .iter()
                    .map(|c| (*c).to_string())
                    .collect(),
                average_score: stats::mean(&member_averages),
                members,
                risk_level: level.risk_level(),
            }
        })
        .collect()
}
