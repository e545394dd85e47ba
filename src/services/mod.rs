pub mod site_audit_service;

pub use site_audit_service::{
    build_report, compute_global_score, prioritize, AuditRequest, Auditor, HtmlAnalyzer,
    PagespeedClient, ScoreFetcher,
};
