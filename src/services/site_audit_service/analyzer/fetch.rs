use crate::error::AuditError;
use async_trait::async_trait;
use std::time::Duration;

pub const DOCUMENT_TIMEOUT: Duration = Duration::from_secs(20);
pub const RESOURCE_TIMEOUT: Duration = Duration::from_secs(8);

/// Document fetch and resource existence checks used by the analyzer.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Raw markup of `url`.
    async fn fetch_document(&self, url: &str, timeout: Duration) -> Result<String, AuditError>;

    /// Whether `url` answers with HTTP 200.
    async fn resource_exists(&self, url: &str, timeout: Duration) -> Result<bool, AuditError>;
}
