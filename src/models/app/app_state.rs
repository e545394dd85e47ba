use crate::db::AuditStore;
use crate::services::site_audit_service::Auditor;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub auditor: Arc<Auditor>,
    pub store: Arc<dyn AuditStore>,
    pub history_limit: usize,
}
