pub mod handler;

pub use handler::{export_report_handler, get_audit_handler, history_handler, run_audit_handler};
