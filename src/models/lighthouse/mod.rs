pub mod category;
pub mod checklist;
pub mod report;

pub use category::{Categories, Category, CategoryScores, LighthouseResult, PagespeedResponse};
pub use checklist::{ChecklistItem, ItemCategory, Severity, DEFAULT_IMPACT};
pub use report::AuditReport;
