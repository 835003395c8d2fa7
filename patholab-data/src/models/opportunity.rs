//! Opportunity (turnaround) report records

use chrono::Datelike;
use serde::Serialize;

/// Per-test turnaround performance for a reporting period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityTest {
    pub code: String,
    pub name: String,
    /// Cases signed out inside the opportunity window
    pub within_opportunity: u64,
    /// Cases signed out past the window
    pub out_of_opportunity: u64,
    pub average_days: f64,
}

/// Per-pathologist turnaround performance for a reporting period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathologistPerformance {
    pub code: String,
    pub name: String,
    pub within_opportunity: u64,
    pub out_of_opportunity: u64,
    pub avg_time: f64,
}

/// Period totals attached to a monthly report when the backend provides them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpportunitySummary {
    pub total: u64,
    pub within: u64,
    pub out: u64,
}

/// Mapped monthly opportunity report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityReport {
    pub tests: Vec<OpportunityTest>,
    pub pathologists: Vec<PathologistPerformance>,
    pub summary: Option<OpportunitySummary>,
}

/// A reporting period (calendar month)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// 1-based month
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// The current calendar month in local time
    pub fn current() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_period_is_plausible() {
        let period = Period::current();
        assert!((1..=12).contains(&period.month));
        assert!(period.year >= 2024);
    }
}
