//! One pipeline run: assemble → render → deliver. Sourcing failures are
//! handled inside the assembler; only delivery failure propagates.

use std::sync::Arc;

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;

use crate::assembler::SignalAssembler;
use crate::notify::ReportSink;
use crate::report;

pub const REPORT_SUBJECT: &str = "Daily B2B Intent Signals";

pub const ENV_DAILY_ENABLED: &str = "REPORT_DAILY_ENABLED";

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("report_runs_total", "Pipeline runs started.");
        describe_counter!("report_signals_total", "Signals delivered across runs.");
        describe_counter!(
            "report_send_failures_total",
            "Runs that failed at the delivery step."
        );
        describe_gauge!("report_last_run_ts", "Unix ts when the pipeline last ran.");
    });
}

pub struct ReportPipeline {
    assembler: SignalAssembler,
    sink: Arc<dyn ReportSink>,
}

impl ReportPipeline {
    pub fn new(assembler: SignalAssembler, sink: Arc<dyn ReportSink>) -> Self {
        Self { assembler, sink }
    }

    /// Execute one full run. Returns the number of signals delivered; the
    /// only error path is the delivery transport.
    pub async fn run_once(&self) -> Result<usize> {
        ensure_metrics_described();
        counter!("report_runs_total").increment(1);

        let assembled = self.assembler.assemble().await;
        let html = report::render(&assembled);

        self.sink
            .deliver(REPORT_SUBJECT, &html)
            .await
            .inspect_err(|_| counter!("report_send_failures_total").increment(1))
            .context("deliver report")?;

        let now = chrono::Utc::now().timestamp().max(0) as u64;
        counter!("report_signals_total").increment(assembled.signals.len() as u64);
        gauge!("report_last_run_ts").set(now as f64);

        tracing::info!(
            target: "pipeline",
            signals = assembled.signals.len(),
            primary_worked = assembled.primary_worked,
            "report delivered"
        );
        Ok(assembled.signals.len())
    }
}

/// Simple daily tokio task for deployments without an external scheduler.
/// Wire this from app startup behind `REPORT_DAILY_ENABLED=1`.
pub fn spawn_daily_report_task(pipeline: Arc<ReportPipeline>) {
    // 24h interval
    let period = std::time::Duration::from_secs(24 * 3600);
    tokio::spawn(async move {
        loop {
            if let Err(e) = pipeline.run_once().await {
                tracing::error!(target: "pipeline", error = %e, "scheduled report run failed");
            }
            tokio::time::sleep(period).await;
        }
    });
}
