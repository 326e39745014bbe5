use std::sync::Arc;

use shuttle_axum::axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::pipeline::ReportPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReportPipeline>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/run", post(run_report))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct RunResponse {
    message: &'static str,
    signals: usize,
}

#[derive(serde::Serialize)]
struct RunError {
    error: &'static str,
}

/// Trigger one pipeline run. The response mirrors the process exit
/// contract: a count of signals delivered on success, a generic failure
/// indicator otherwise.
async fn run_report(
    State(state): State<AppState>,
) -> Result<Json<RunResponse>, (StatusCode, Json<RunError>)> {
    match state.pipeline.run_once().await {
        Ok(signals) => Ok(Json(RunResponse {
            message: "Success",
            signals,
        })),
        Err(e) => {
            tracing::error!(target: "api", error = %e, "pipeline run failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RunError {
                    error: "Failed to process signals",
                }),
            ))
        }
    }
}
