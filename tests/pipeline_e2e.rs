// tests/pipeline_e2e.rs
//
// Full pipeline runs against trait-object doubles: assemble → render →
// deliver, plus the delivery-failure contract.

use std::sync::Arc;

use async_trait::async_trait;

use intent_signal_reporter::assembler::SignalAssembler;
use intent_signal_reporter::notify::MockSink;
use intent_signal_reporter::pipeline::{ReportPipeline, REPORT_SUBJECT};
use intent_signal_reporter::signal::{Industry, Intent, Signal};
use intent_signal_reporter::sources::types::{
    AuthorProfile, RawPost, Result as SourceResult, SignalGenerator, SocialFeed, SourceError,
};

struct DownFeed;

#[async_trait]
impl SocialFeed for DownFeed {
    async fn search(&self, _query: &str, _max_results: u32) -> SourceResult<Vec<RawPost>> {
        Err(SourceError::Unavailable("dns failure".to_string()))
    }

    async fn resolve_author(&self, _author_id: &str) -> SourceResult<AuthorProfile> {
        Err(SourceError::Unavailable("dns failure".to_string()))
    }

    fn name(&self) -> &'static str {
        "down-feed"
    }
}

struct FixedGenerator(Vec<Signal>);

#[async_trait]
impl SignalGenerator for FixedGenerator {
    async fn generate(&self, _target_count: usize) -> Vec<Signal> {
        self.0.clone()
    }

    fn name(&self) -> &'static str {
        "fixed-generator"
    }
}

fn gen_signal(company: &str) -> Signal {
    Signal {
        company: company.to_string(),
        location: "Oslo, Norway".to_string(),
        industry: Industry::Fintech,
        signal: "Hiring a CRO after flat quarter".to_string(),
        intent: Intent::VeryHigh,
        hook: "Embed GTM engine".to_string(),
    }
}

#[tokio::test]
async fn run_delivers_html_report_and_counts_signals() {
    let assembler = SignalAssembler::new(
        Arc::new(DownFeed),
        Arc::new(FixedGenerator(vec![gen_signal("Northwind"), gen_signal("Contoso")])),
    )
    .with_query("q");
    let sink = Arc::new(MockSink::new());
    let pipeline = ReportPipeline::new(assembler, sink.clone());

    let delivered = pipeline.run_once().await.unwrap();
    assert_eq!(delivered, 2);

    let sent = sink.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (subject, html) = &sent[0];
    assert_eq!(subject, REPORT_SUBJECT);
    assert!(html.contains("Northwind"));
    assert!(html.contains("Contoso"));
    // Fallback provenance shows up in the footer.
    assert!(html.contains("AI enrichment"));
}

#[tokio::test]
async fn delivery_failure_is_the_only_surfaced_error() {
    let assembler = SignalAssembler::new(
        Arc::new(DownFeed),
        Arc::new(FixedGenerator(vec![gen_signal("Northwind")])),
    )
    .with_query("q");
    let pipeline = ReportPipeline::new(assembler, Arc::new(MockSink::failing()));

    let err = pipeline.run_once().await.unwrap_err();
    assert!(err.to_string().contains("deliver report"));
}
