pub mod scoring;

pub use scoring::{build_report, compute_global_score, prioritize, TOP_ACTIONS};
