// src/api/mod.rs

pub mod handler;

pub use handler::{export_report_handler, get_audit_handler, history_handler, run_audit_handler};

use crate::error::AuditError;
use crate::models::AppState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/audit", post(run_audit_handler))
        .route("/audit/{id}", get(get_audit_handler))
        .route("/history", get(history_handler))
        .route("/report", post(export_report_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for AuditError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuditError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuditError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuditError::ExternalService { .. } | AuditError::Http(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}
