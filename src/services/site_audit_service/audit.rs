use crate::db::AuditStore;
use crate::error::AuditError;
use crate::models::lighthouse::AuditReport;
use crate::services::site_audit_service::analyzer::HtmlAnalyzer;
use crate::services::site_audit_service::compute::build_report;
use crate::services::site_audit_service::lighthouse::ScoreFetcher;
use crate::utils::{recover, validate_url};
use log::{info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct AuditRequest {
    pub url: String,
    pub tasks_done: Vec<String>,
    /// Overrides the auditor's default PageSpeed key.
    pub api_key: Option<String>,
}

impl AuditRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Runs score lookup and page analysis for one URL and assembles the report.
pub struct Auditor {
    scores: ScoreFetcher,
    analyzer: HtmlAnalyzer,
    store: Option<Arc<dyn AuditStore>>,
    api_key: Option<String>,
}

impl Auditor {
    pub fn new(scores: ScoreFetcher, analyzer: HtmlAnalyzer) -> Self {
        Self {
            scores,
            analyzer,
            store: None,
            api_key: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn AuditStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Fails only on a URL without scheme or host, before any network call. Every other
    /// failure degrades to zero scores, an empty checklist, or a report without an id.
    pub async fn run_audit(&self, request: AuditRequest) -> Result<AuditReport, AuditError> {
        let url = request.url.as_str();
        validate_url(url)?;
        info!("Starting audit for {}", url);

        let api_key = request.api_key.as_deref().or(self.api_key.as_deref());
        let (categories, analysis) = tokio::join!(
            self.scores.get_category_scores(url, api_key),
            self.analyzer.analyze_html(url),
        );
        let checklist = recover(
            analysis.map(|a| a.items),
            Vec::new(),
            &format!("HTML analysis for {}", url),
        );

        let mut report = build_report(url, categories, checklist, &request.tasks_done);
        info!(
            "Audit for {} complete: global score {}, {} findings",
            url,
            report.global_score,
            report.checklist.len()
        );

        if let Some(store) = &self.store {
            report.id = Self::persist(store.clone(), report.clone()).await;
        }
        Ok(report)
    }

    // rusqlite is blocking, keep it off the async workers
    async fn persist(store: Arc<dyn AuditStore>, report: AuditReport) -> Option<i64> {
        let url = report.url.clone();
        match tokio::task::spawn_blocking(move || store.save(&report)).await {
            Ok(Ok(id)) => Some(id),
            Ok(Err(e)) => {
                warn!("Could not persist audit for {}: {}", url, e);
                None
            }
            Err(e) => {
                warn!("Persisting audit for {} did not complete: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lighthouse::PagespeedResponse;
    use crate::services::site_audit_service::analyzer::{PageFetcher, RULES};
    use crate::services::site_audit_service::lighthouse::{ScoreCache, ScoreSource, Strategy};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl Counter {
        fn hit(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn get(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    // Every request fails, like a host that does not resolve.
    #[derive(Default)]
    struct Unreachable {
        calls: Counter,
    }

    #[async_trait]
    impl ScoreSource for Unreachable {
        async fn run_pagespeed(
            &self,
            _url: &str,
            _strategy: Strategy,
            _api_key: Option<&str>,
        ) -> Result<PagespeedResponse, AuditError> {
            self.calls.hit();
            Err(AuditError::external("pagespeed", "dns error"))
        }
    }

    #[async_trait]
    impl PageFetcher for Unreachable {
        async fn fetch_document(&self, _url: &str, _timeout: Duration) -> Result<String, AuditError> {
            self.calls.hit();
            Err(AuditError::external("page fetch", "dns error"))
        }

        async fn resource_exists(&self, _url: &str, _timeout: Duration) -> Result<bool, AuditError> {
            self.calls.hit();
            Err(AuditError::external("existence check", "dns error"))
        }
    }

    struct Healthy;

    #[async_trait]
    impl ScoreSource for Healthy {
        async fn run_pagespeed(
            &self,
            _url: &str,
            _strategy: Strategy,
            _api_key: Option<&str>,
        ) -> Result<PagespeedResponse, AuditError> {
            Ok(serde_json::from_value(json!({
                "lighthouseResult": { "categories": {
                    "performance": { "score": 0.9 },
                    "accessibility": { "score": 0.9 },
                    "best-practices": { "score": 0.9 },
                    "seo": { "score": 0.9 }
                }}
            }))
            .unwrap())
        }
    }

    #[async_trait]
    impl PageFetcher for Healthy {
        async fn fetch_document(&self, _url: &str, _timeout: Duration) -> Result<String, AuditError> {
            Ok("<html><head><title>Home</title></head><body><h1>Home</h1></body></html>".into())
        }

        async fn resource_exists(&self, _url: &str, _timeout: Duration) -> Result<bool, AuditError> {
            Ok(true)
        }
    }

    struct BrokenStore;

    impl AuditStore for BrokenStore {
        fn save(&self, _report: &AuditReport) -> Result<i64, AuditError> {
            Err(AuditError::Persistence("disk full".into()))
        }

        fn list(&self, _limit: usize, _url: Option<&str>) -> Result<Vec<AuditReport>, AuditError> {
            Ok(Vec::new())
        }

        fn get(&self, _id: i64) -> Result<Option<AuditReport>, AuditError> {
            Ok(None)
        }
    }

    fn auditor<S, F>(scores: Arc<S>, pages: Arc<F>) -> Auditor
    where
        S: ScoreSource + 'static,
        F: PageFetcher + 'static,
    {
        Auditor::new(
            ScoreFetcher::new(scores, Arc::new(ScoreCache::default())),
            HtmlAnalyzer::new(pages),
        )
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_any_request() {
        let net = Arc::new(Unreachable::default());
        let auditor = auditor(net.clone(), net.clone());

        let result = auditor.run_audit(AuditRequest::new("not-a-url")).await;

        assert!(matches!(result, Err(AuditError::InvalidInput(_))));
        assert_eq!(net.calls.get(), 0);
    }

    #[tokio::test]
    async fn unreachable_host_still_produces_a_report() {
        let net = Arc::new(Unreachable::default());
        let auditor = auditor(net.clone(), net.clone());
        let url = "https://example.invalid.domain";

        let report = auditor.run_audit(AuditRequest::new(url)).await.unwrap();

        assert_eq!(report.url, url);
        assert!(report.category_scores.is_empty());
        // every rule except the two image rules and https fails on an empty document
        assert_eq!(report.checklist.len(), RULES.len() - 3);
        assert_eq!(report.top_actions[0].id, "title");
        assert!(report.id.is_none());
    }

    #[tokio::test]
    async fn done_tasks_are_dropped_from_top_actions() {
        let healthy = Arc::new(Healthy);
        let auditor = auditor(healthy.clone(), healthy);
        let mut request = AuditRequest::new("https://example.com");
        request.tasks_done = vec!["meta_description".into()];

        let report = auditor.run_audit(request).await.unwrap();

        assert!(report.checklist.iter().any(|i| i.id == "meta_description"));
        assert!(report.top_actions.iter().all(|i| i.id != "meta_description"));
        assert_eq!(report.category_scores.seo, 90);
    }

    #[tokio::test]
    async fn persistence_failure_keeps_the_report() {
        let healthy = Arc::new(Healthy);
        let auditor = auditor(healthy.clone(), healthy).with_store(Arc::new(BrokenStore));

        let report = auditor.run_audit(AuditRequest::new("https://example.com")).await.unwrap();

        assert!(report.id.is_none());
        assert_eq!(report.category_scores.performance, 90);
    }

    struct PanickingStore;

    impl AuditStore for PanickingStore {
        fn save(&self, _report: &AuditReport) -> Result<i64, AuditError> {
            panic!("connection dropped mid-write")
        }

        fn list(&self, _limit: usize, _url: Option<&str>) -> Result<Vec<AuditReport>, AuditError> {
            Ok(Vec::new())
        }

        fn get(&self, _id: i64) -> Result<Option<AuditReport>, AuditError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn crashed_save_keeps_the_report() {
        let healthy = Arc::new(Healthy);
        let auditor = auditor(healthy.clone(), healthy).with_store(Arc::new(PanickingStore));

        let report = auditor.run_audit(AuditRequest::new("https://example.com")).await.unwrap();

        assert!(report.id.is_none());
        assert_eq!(report.category_scores.seo, 90);
    }

    #[tokio::test]
    async fn report_keeps_the_url_exactly_as_given() {
        let healthy = Arc::new(Healthy);
        let auditor = auditor(healthy.clone(), healthy);
        let url = " https://example.com/ ";

        let report = auditor.run_audit(AuditRequest::new(url)).await.unwrap();

        assert_eq!(report.url, url);
        assert_eq!(report.category_scores.performance, 90);
    }

    #[tokio::test]
    async fn saved_reports_get_an_id() {
        let healthy = Arc::new(Healthy);
        let store = Arc::new(crate::db::SqliteAuditStore::open_in_memory().unwrap());
        let auditor = auditor(healthy.clone(), healthy).with_store(store.clone());

        let report = auditor.run_audit(AuditRequest::new("https://example.com")).await.unwrap();

        let id = report.id.unwrap();
        assert_eq!(store.get(id).unwrap().unwrap().global_score, report.global_score);
    }
}
