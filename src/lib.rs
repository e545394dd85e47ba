//! Website quality audits: PageSpeed category scores plus a fixed set of HTML checks,
//! reduced to one global score and a ranked list of actions.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::AuditError;
pub use models::{AuditReport, CategoryScores, ChecklistItem, Config};
pub use services::site_audit_service::{AuditRequest, Auditor};
