use crate::models::lighthouse::category::CategoryScores;
use crate::models::lighthouse::checklist::ChecklistItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal artifact of one audit run.
///
/// `top_actions` is always a subsequence of `checklist` with at most ten entries. `id` is only
/// set once a store has persisted the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub url: String,
    pub date: DateTime<Utc>,
    pub global_score: u8,
    pub category_scores: CategoryScores,
    pub checklist: Vec<ChecklistItem>,
    pub top_actions: Vec<ChecklistItem>,
}
