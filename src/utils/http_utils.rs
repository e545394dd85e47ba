use crate::error::AuditError;
use crate::services::site_audit_service::analyzer::PageFetcher;
use async_trait::async_trait;
use log::warn;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("quickaudit/", env!("CARGO_PKG_VERSION"));

/// Plain reqwest client for page markup and root resources.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        let builder = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5));

        Self {
            client: build_or_default(builder),
        }
    }
}

fn build_or_default(builder: ClientBuilder) -> Client {
    builder.build().unwrap_or_else(|e| {
        warn!("Falling back to a default HTTP client: {}", e);
        Client::new()
    })
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_document(&self, url: &str, timeout: Duration) -> Result<String, AuditError> {
        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::external("page fetch", format!("HTTP {} for {}", status, url)));
        }
        Ok(response.text().await?)
    }

    async fn resource_exists(&self, url: &str, timeout: Duration) -> Result<bool, AuditError> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        Ok(response.status() == StatusCode::OK)
    }
}
