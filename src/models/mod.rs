// src/models/mod.rs

pub mod api;
pub mod app;
pub mod lighthouse;

pub use api::{AuditParams, HistoryParams, ReportParams};
pub use app::{AppState, Config};
pub use lighthouse::{AuditReport, CategoryScores, ChecklistItem, ItemCategory, Severity};
