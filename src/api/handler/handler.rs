use crate::db::AuditStore;
use crate::error::AuditError;
use crate::models::{AppState, AuditParams, AuditReport, HistoryParams, ReportParams};
use crate::services::site_audit_service::{render_report_html, AuditRequest};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use log::info;
use std::sync::Arc;

pub async fn run_audit_handler(
    State(state): State<AppState>,
    Json(params): Json<AuditParams>,
) -> Result<Json<AuditReport>, AuditError> {
    info!("Audit requested for {}", params.url);
    let request = AuditRequest {
        url: params.url,
        tasks_done: params.tasks_done,
        api_key: params.api_key,
    };
    let report = state.auditor.run_audit(request).await?;
    Ok(Json(report))
}

pub async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<AuditReport>>, AuditError> {
    let limit = params
        .limit
        .filter(|&l| l > 0)
        .unwrap_or(state.history_limit);

    let reports = with_store(state.store, move |store| {
        store.list(limit, params.url.as_deref())
    })
    .await?;
    Ok(Json(reports))
}

pub async fn get_audit_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AuditError> {
    if id <= 0 {
        return Ok((StatusCode::BAD_REQUEST, "Missing id").into_response());
    }

    match with_store(state.store, move |store| store.get(id)).await? {
        Some(report) => Ok(Json(report).into_response()),
        None => Ok((StatusCode::NOT_FOUND, "Not found").into_response()),
    }
}

pub async fn export_report_handler(Json(params): Json<ReportParams>) -> Response {
    match params.report {
        Some(report) if !report.url.is_empty() => {
            info!("Exporting report for {}", report.url);
            Html(render_report_html(&report)).into_response()
        }
        _ => (StatusCode::BAD_REQUEST, "Missing report").into_response(),
    }
}

// rusqlite is blocking, keep it off the async workers
async fn with_store<T, F>(store: Arc<dyn AuditStore>, f: F) -> Result<T, AuditError>
where
    T: Send + 'static,
    F: FnOnce(&dyn AuditStore) -> Result<T, AuditError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| AuditError::Persistence(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteAuditStore;
    use crate::models::lighthouse::PagespeedResponse;
    use crate::services::site_audit_service::analyzer::PageFetcher;
    use crate::services::site_audit_service::lighthouse::{ScoreCache, ScoreSource, Strategy};
    use crate::services::site_audit_service::{Auditor, HtmlAnalyzer, ScoreFetcher};
    use async_trait::async_trait;
    use std::time::Duration;

    struct Offline;

    #[async_trait]
    impl ScoreSource for Offline {
        async fn run_pagespeed(
            &self,
            _url: &str,
            _strategy: Strategy,
            _api_key: Option<&str>,
        ) -> Result<PagespeedResponse, AuditError> {
            Err(AuditError::external("pagespeed", "offline"))
        }
    }

    #[async_trait]
    impl PageFetcher for Offline {
        async fn fetch_document(&self, _url: &str, _timeout: Duration) -> Result<String, AuditError> {
            Err(AuditError::external("page fetch", "offline"))
        }

        async fn resource_exists(&self, _url: &str, _timeout: Duration) -> Result<bool, AuditError> {
            Ok(false)
        }
    }

    fn state() -> AppState {
        let store: Arc<dyn AuditStore> = Arc::new(SqliteAuditStore::open_in_memory().unwrap());
        let auditor = Auditor::new(
            ScoreFetcher::new(Arc::new(Offline), Arc::new(ScoreCache::default())),
            HtmlAnalyzer::new(Arc::new(Offline)),
        )
        .with_store(store.clone());

        AppState {
            auditor: Arc::new(auditor),
            store,
            history_limit: 20,
        }
    }

    fn params(url: &str) -> AuditParams {
        AuditParams {
            url: url.to_string(),
            tasks_done: vec!["https".into()],
            api_key: None,
        }
    }

    #[tokio::test]
    async fn audit_then_fetch_by_id_and_history() {
        let state = state();

        let Json(report) = run_audit_handler(State(state.clone()), Json(params("http://example.com")))
            .await
            .unwrap();
        let id = report.id.unwrap();
        assert!(report.top_actions.iter().all(|i| i.id != "https"));

        let response = get_audit_handler(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let Json(history) = history_handler(State(state), Query(HistoryParams::default()))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].url, "http://example.com");
    }

    #[tokio::test]
    async fn invalid_url_maps_to_bad_request() {
        let err = run_audit_handler(State(state()), Json(params("not-a-url")))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_renders_a_finished_report() {
        let state = state();
        let Json(report) = run_audit_handler(State(state), Json(params("http://example.com")))
            .await
            .unwrap();

        let response = export_report_handler(Json(ReportParams { report: Some(report) })).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[axum::http::header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn export_without_report_is_bad_request() {
        let missing = export_report_handler(Json(ReportParams::default())).await;
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let body: ReportParams = serde_json::from_value(serde_json::json!({
            "report": {
                "url": "",
                "date": "2024-03-01T09:30:00Z",
                "globalScore": 0,
                "categoryScores": { "performance": 0, "accessibility": 0, "bestPractices": 0, "seo": 0 },
                "checklist": [],
                "topActions": []
            }
        }))
        .unwrap();
        let no_url = export_report_handler(Json(body)).await;
        assert_eq!(no_url.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_and_invalid_ids() {
        let missing = get_audit_handler(State(state()), Path(99)).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let invalid = get_audit_handler(State(state()), Path(0)).await.unwrap();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }
}
