// src/services/site_audit_service/mod.rs

pub mod analyzer;
pub mod audit;
pub mod cache;
pub mod compute;
pub mod export;
pub mod lighthouse;

pub use analyzer::{Analysis, HtmlAnalyzer, PageFetcher};
pub use audit::{AuditRequest, Auditor};
pub use cache::TtlCache;
pub use compute::{build_report, compute_global_score, prioritize};
pub use export::render_report_html;
pub use lighthouse::{PagespeedClient, ScoreCache, ScoreFetcher, ScoreSource, Strategy};
