use crate::error::AuditError;
use log::warn;

/// Turns a failed sub-step into its neutral default, leaving a warning behind.
pub fn recover<T>(result: Result<T, AuditError>, fallback: T, context: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("{} failed, using default: {}", context, e);
            fallback
        }
    }
}
