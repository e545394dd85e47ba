use anyhow::Context;
use quickaudit::{
    api,
    db::{AuditStore, SqliteAuditStore},
    models::{AppState, Config},
    services::site_audit_service::{
        Auditor, HtmlAnalyzer, PagespeedClient, ScoreCache, ScoreFetcher,
    },
    utils::HttpClient,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // initialize tracing, `log` records are forwarded too
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    let store: Arc<dyn AuditStore> = Arc::new(
        SqliteAuditStore::open(&config.database_path)
            .with_context(|| format!("Failed to open database at {}", config.database_path))?,
    );

    // one score cache for the whole process
    let cache = Arc::new(ScoreCache::new(config.cache_ttl));
    let scores = ScoreFetcher::new(
        Arc::new(PagespeedClient::new(config.pagespeed_endpoint.clone())),
        cache,
    );
    let analyzer = HtmlAnalyzer::new(Arc::new(HttpClient::new()));
    let auditor = Auditor::new(scores, analyzer)
        .with_store(store.clone())
        .with_api_key(config.pagespeed_api_key.clone());

    let shared_state = AppState {
        auditor: Arc::new(auditor),
        store,
        history_limit: config.history_limit,
    };
    let app = api::router(shared_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    log::info!("🚀 Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
