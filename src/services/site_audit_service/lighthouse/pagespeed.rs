use crate::error::AuditError;
use crate::models::lighthouse::{CategoryScores, PagespeedResponse};
use crate::services::site_audit_service::cache::TtlCache;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const PAGESPEED_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
pub const PAGESPEED_TIMEOUT: Duration = Duration::from_secs(20);

// Device profile requested from PageSpeed
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Mobile,
    Desktop,
}

impl Strategy {
    /// Mobile first, desktop when mobile yields nothing usable.
    pub const ORDER: [Strategy; 2] = [Strategy::Mobile, Strategy::Desktop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ScoreKey {
    pub url: String,
    pub strategy: Strategy,
}

pub type ScoreCache = TtlCache<ScoreKey, PagespeedResponse>;

/// Remote performance-scoring service.
#[async_trait]
pub trait ScoreSource: Send + Sync {
    async fn run_pagespeed(
        &self,
        url: &str,
        strategy: Strategy,
        api_key: Option<&str>,
    ) -> Result<PagespeedResponse, AuditError>;
}

/// reqwest-backed PageSpeed Insights client.
#[derive(Clone)]
pub struct PagespeedClient {
    client: Client,
    endpoint: String,
}

impl PagespeedClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for PagespeedClient {
    fn default() -> Self {
        Self::new(PAGESPEED_ENDPOINT)
    }
}

#[async_trait]
impl ScoreSource for PagespeedClient {
    async fn run_pagespeed(
        &self,
        url: &str,
        strategy: Strategy,
        api_key: Option<&str>,
    ) -> Result<PagespeedResponse, AuditError> {
        let mut query = vec![("url", url), ("strategy", strategy.as_str())];
        if let Some(key) = api_key {
            query.push(("key", key));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .timeout(PAGESPEED_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::external(
                "pagespeed",
                format!("HTTP {} for {} ({})", status, url, strategy),
            ));
        }
        Ok(response.json::<PagespeedResponse>().await?)
    }
}

/// Category score lookup with memoization and a mobile to desktop fallback.
pub struct ScoreFetcher {
    source: Arc<dyn ScoreSource>,
    cache: Arc<ScoreCache>,
}

impl ScoreFetcher {
    pub fn new(source: Arc<dyn ScoreSource>, cache: Arc<ScoreCache>) -> Self {
        Self { source, cache }
    }

    /// Never fails: an all-zero result means neither strategy produced a usable score.
    pub async fn get_category_scores(&self, url: &str, api_key: Option<&str>) -> CategoryScores {
        for strategy in Strategy::ORDER {
            match self.run_cached(url, strategy, api_key).await {
                Ok(response) => {
                    let scores = response.category_scores();
                    if !scores.is_empty() {
                        info!("PageSpeed scores for {} from {} strategy: {:?}", url, strategy, scores);
                        return scores;
                    }
                    debug!("PageSpeed {} strategy returned no usable scores for {}", strategy, url);
                }
                Err(e) => warn!("PageSpeed {} strategy failed for {}: {}", strategy, url, e),
            }
        }

        warn!("No PageSpeed scores available for {}, using zero scores", url);
        CategoryScores::default()
    }

    async fn run_cached(
        &self,
        url: &str,
        strategy: Strategy,
        api_key: Option<&str>,
    ) -> Result<PagespeedResponse, AuditError> {
        let key = ScoreKey {
            url: url.to_string(),
            strategy,
        };
        if let Some(cached) = self.cache.get(&key) {
            debug!("PageSpeed cache hit for {} ({})", url, strategy);
            return Ok(cached);
        }

        let response = self.source.run_pagespeed(url, strategy, api_key).await?;
        self.cache.set(&key, response.clone());
        Ok(response)
    }
}
