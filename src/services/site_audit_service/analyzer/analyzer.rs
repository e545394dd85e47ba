use crate::error::AuditError;
use crate::models::lighthouse::ChecklistItem;
use crate::services::site_audit_service::analyzer::facts::PageFacts;
use crate::services::site_audit_service::analyzer::fetch::{
    PageFetcher, DOCUMENT_TIMEOUT, RESOURCE_TIMEOUT,
};
use crate::services::site_audit_service::analyzer::rules::RULES;
use crate::utils::{is_https, recover, root_resource, validate_url};
use futures::future::join;
use log::info;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub items: Vec<ChecklistItem>,
    /// Rules the page passed. Not used by scoring.
    pub ok_count: usize,
}

pub struct HtmlAnalyzer {
    fetcher: Arc<dyn PageFetcher>,
}

impl HtmlAnalyzer {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches the page plus robots.txt and sitemap.xml and runs every rule.
    ///
    /// Fetch failures never abort the analysis: an unreachable page is analyzed as an empty
    /// document and a failed existence check counts as "not found". Only an unparseable URL
    /// is an error.
    pub async fn analyze_html(&self, url: &str) -> Result<Analysis, AuditError> {
        let parsed = validate_url(url)?;

        let html = recover(
            self.fetcher.fetch_document(url, DOCUMENT_TIMEOUT).await,
            String::new(),
            &format!("Document fetch for {}", url),
        );

        let (robots_found, sitemap_found) = join(
            self.exists(root_resource(&parsed, "robots.txt")),
            self.exists(root_resource(&parsed, "sitemap.xml")),
        )
        .await;

        let facts = PageFacts {
            https: is_https(&parsed),
            robots_found,
            sitemap_found,
            ..PageFacts::from_html(&html)
        };

        let analysis = evaluate(&facts);
        info!(
            "Analyzed {}: {} findings, {} checks passed",
            url,
            analysis.items.len(),
            analysis.ok_count
        );
        Ok(analysis)
    }

    async fn exists(&self, resource: Option<String>) -> bool {
        let Some(resource) = resource else {
            return false;
        };
        recover(
            self.fetcher.resource_exists(&resource, RESOURCE_TIMEOUT).await,
            false,
            &format!("Existence check for {}", resource),
        )
    }
}

pub fn evaluate(facts: &PageFacts) -> Analysis {
    let mut analysis = Analysis::default();
    for rule in RULES.iter() {
        match rule.evaluate(facts) {
            Some(item) => analysis.items.push(item),
            None => analysis.ok_count += 1,
        }
    }
    analysis
}
