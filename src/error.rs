use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Invalid URL: {0}")]
    InvalidInput(String),
    #[error("{service} failed: {message}")]
    ExternalService { service: String, message: String },
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl AuditError {
    pub fn external(service: &str, message: impl Into<String>) -> Self {
        AuditError::ExternalService {
            service: service.to_owned(),
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for AuditError {
    fn from(e: rusqlite::Error) -> Self {
        AuditError::Persistence(e.to_string())
    }
}

impl From<r2d2::Error> for AuditError {
    fn from(e: r2d2::Error) -> Self {
        AuditError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(e: serde_json::Error) -> Self {
        AuditError::Persistence(e.to_string())
    }
}
