// HTTP surface: batch submission and last-result lookup over a shared engine.

use crate::adapters::InMemoryReportStore;
use crate::core::engine::ResolutionEngine;
use crate::domain::model::{BatchReport, BatchRequest};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ResolutionEngine<InMemoryReportStore>>,
    pub default_api_key: Option<String>,
}

impl AppState {
    pub fn new(engine: ResolutionEngine<InMemoryReportStore>, default_api_key: Option<String>) -> Self {
        Self {
            engine: Arc::new(engine),
            default_api_key,
        }
    }
}

/// POST /api/check-emails
///
/// 執行一個批次並取代最新報告；空的 `emails` 也回傳（空的）報告。
/// 請求未帶 key 時改用配置中的 key
async fn check_emails(
    State(state): State<AppState>,
    Json(mut request): Json<BatchRequest>,
) -> Json<BatchReport> {
    if request.api_key().is_none() {
        request.api_key = state.default_api_key.clone();
    }

    tracing::info!("📨 Received batch of {} emails", request.emails.len());
    Json(state.engine.check_emails(&request).await)
}

/// GET /api/results
async fn last_results(State(state): State<AppState>) -> Json<BatchReport> {
    Json(state.engine.last_report().await)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/check-emails", post(check_emails))
        .route("/api/results", get(last_results))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
