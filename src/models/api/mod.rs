pub mod params;

pub use params::{AuditParams, HistoryParams, ReportParams};
