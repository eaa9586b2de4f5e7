use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::engine::AlertEngine;
use crate::metrics::Metrics;
use crate::scheduler;

pub const ROUTES: &[&str] = &["/", "/force_check", "/health", "/metrics"];

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AlertEngine>,
    pub config: Arc<AppConfig>,
    pub metrics: Option<Metrics>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/force_check", get(force_check))
        .route("/health", get(|| async { "ok" }))
        .route("/metrics", get(metrics_text))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct StatusOut {
    status: &'static str,
    interval_sec: u64,
    threshold: u32,
    cooldown_min: u64,
    window_min: u64,
    feeds: Vec<String>,
    routes: &'static [&'static str],
}

async fn status(State(state): State<AppState>) -> Json<StatusOut> {
    Json(StatusOut {
        status: "viral news watch running",
        interval_sec: state.config.fetch_interval_sec,
        threshold: state.config.alert_threshold,
        cooldown_min: state.config.cooldown_min,
        window_min: state.config.window_minutes,
        feeds: state.engine.provider_names(),
        routes: ROUTES,
    })
}

#[derive(serde::Serialize)]
struct ForceCheckOut {
    ok: bool,
    found: usize,
    sent: usize,
}

/// Runs one cycle synchronously; shares dedup and cooldown with the loop.
async fn force_check(State(state): State<AppState>) -> impl IntoResponse {
    match scheduler::run_guarded(state.engine.clone()).await {
        Some(report) => (
            StatusCode::OK,
            Json(ForceCheckOut {
                ok: true,
                found: report.candidates.len(),
                sent: report.dispatched,
            }),
        ),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ForceCheckOut {
                ok: false,
                found: 0,
                sent: 0,
            }),
        ),
    }
}

async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(m) => (StatusCode::OK, m.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}
