// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod assembler;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod signal;
pub mod sources;

// Delivery transport
pub mod notify;

// ---- Re-exports for stable public API ----
pub use crate::api::create_router;
pub use crate::assembler::{AssembledReport, SignalAssembler, DEFAULT_BATCH_CAP};
pub use crate::pipeline::{spawn_daily_report_task, ReportPipeline, REPORT_SUBJECT};
pub use crate::signal::{placeholder_signal, Industry, Intent, Signal, PLACEHOLDER_COMPANY};
pub use crate::sources::{SignalGenerator, SocialFeed, SourceError};

// Re-export delivery types for easy use in bins/tests
pub use crate::notify::{EmailSender, MockSink, ReportSink};
