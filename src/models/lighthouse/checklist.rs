use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_IMPACT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Rank used by prioritization: critical 3, warning 2, info 1.
    pub fn rank(&self) -> u32 {
        match self {
            Severity::Critical => 3,
            Severity::Warning => 2,
            Severity::Info => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}", severity_str)
    }
}

// One of the four score categories, or a generic bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemCategory {
    Performance,
    Accessibility,
    BestPractices,
    Seo,
    Content,
    Technical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub category: ItemCategory,
    pub severity: Severity,
    pub message: String,
    pub explanation: String,
    pub fix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<u32>,
}

impl ChecklistItem {
    /// Impact weight, falling back to [`DEFAULT_IMPACT`] when absent or zero.
    pub fn impact(&self) -> u32 {
        self.impact.filter(|&i| i > 0).unwrap_or(DEFAULT_IMPACT)
    }

    pub fn priority_weight(&self) -> u32 {
        self.severity.rank() * 10 + self.impact()
    }
}
