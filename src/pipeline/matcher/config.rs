use serde::{Deserialize, Serialize};

/// Eligibility thresholds applied when matching interviewers to rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// A professional at or above this in-flight load receives no new work.
    pub max_active_interviews: u32,
    /// Minimum seniority to conduct a manager round.
    pub manager_min_years: u32,
    /// Minimum seniority to conduct an HR round.
    pub hr_min_years: u32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_active_interviews: 5,
            manager_min_years: 10,
            hr_min_years: 8,
        }
    }
}
