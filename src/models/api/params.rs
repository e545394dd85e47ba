use crate::models::lighthouse::AuditReport;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditParams {
    pub url: String,
    #[serde(default)]
    pub tasks_done: Vec<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub url: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub report: Option<AuditReport>,
}
