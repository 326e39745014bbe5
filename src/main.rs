//! Intent Signal Reporter — Binary Entrypoint
//! Boots the Axum HTTP server and wires the report pipeline: live feed
//! client, generative fallback, SMTP sink, and the optional daily task.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use intent_signal_reporter::api::{self, AppState};
use intent_signal_reporter::assembler::SignalAssembler;
use intent_signal_reporter::metrics::Metrics;
use intent_signal_reporter::notify::EmailSender;
use intent_signal_reporter::pipeline::{
    spawn_daily_report_task, ReportPipeline, ENV_DAILY_ENABLED,
};
use intent_signal_reporter::sources::{GptSignalGenerator, SocialFeedClient};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - REPORT_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("REPORT_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pipeline=info,assembler=info,sources=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments. This enables the
    // source/SMTP credentials below to come from .env.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    // --- Wire the pipeline ---
    let feed = Arc::new(SocialFeedClient::from_env());
    let generator = Arc::new(GptSignalGenerator::from_env());
    let assembler = SignalAssembler::new(feed, generator);

    let metrics = Metrics::init(assembler.cap());

    let sink = Arc::new(EmailSender::from_env());
    let pipeline = Arc::new(ReportPipeline::new(assembler, sink));

    // One external scheduler trigger per day is the expected invocation
    // path; the built-in task covers deployments without one.
    if std::env::var(ENV_DAILY_ENABLED).ok().as_deref() == Some("1") {
        spawn_daily_report_task(pipeline.clone());
    }

    let state = AppState { pipeline };
    let router = api::create_router(state).merge(metrics.router());

    Ok(router.into())
}
