//! # Signal Assembler
//! Pipeline orchestrator: tries the live feed, falls back to the generative
//! source when the feed errors or yields nothing usable, and degrades to a
//! static placeholder as the last resort. The two sources are never merged
//! into one batch, so every report has uniform provenance.

use std::sync::Arc;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

use crate::scoring;
use crate::signal::{placeholder_signal, summarize, Industry, Intent, Signal, SIGNAL_SUMMARY_MAX_CHARS};
use crate::sources::types::{SignalGenerator, SocialFeed, SourceError};

/// Report batches never exceed this many rows.
pub const DEFAULT_BATCH_CAP: usize = 10;

/// How many candidate posts to request from the feed per run. Larger than
/// the batch cap so Medium-scored posts can be discarded without starving
/// the report.
pub const DEFAULT_SEARCH_LIMIT: u32 = 30;

pub const ENV_FEED_QUERY: &str = "FEED_QUERY";

/// Boolean search query for the primary feed: B2B/GTM vocabulary, consumer
/// and gaming chatter excluded, retweets dropped.
pub const DEFAULT_FEED_QUERY: &str = "(\"need GTM\" OR \"pipeline weak\" OR \"hire a CRO\" OR \
     \"B2B SaaS\" OR martech OR fintech) -consumer -gaming -is:retweet lang:en";

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "primary_source_errors_total",
            "Primary feed calls aborted by a network/auth/parse error."
        );
        describe_counter!(
            "posts_discarded_total",
            "Feed posts dropped for scoring Medium."
        );
        describe_counter!(
            "fallback_used_total",
            "Runs that assembled their batch from the generative source."
        );
        describe_counter!(
            "placeholder_used_total",
            "Runs that degraded to the static placeholder row."
        );
        describe_histogram!(
            "primary_fetch_ms",
            "Primary feed collection time in milliseconds."
        );
    });
}

/// Finalized output of one pipeline run: the capped, ordered batch plus a
/// provenance flag for the renderer's footer note.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledReport {
    pub signals: Vec<Signal>,
    pub primary_worked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TryPrimary,
    TryFallback,
    Assembled,
}

pub struct SignalAssembler {
    feed: Arc<dyn SocialFeed>,
    generator: Arc<dyn SignalGenerator>,
    query: String,
    search_limit: u32,
    cap: usize,
}

impl SignalAssembler {
    pub fn new(feed: Arc<dyn SocialFeed>, generator: Arc<dyn SignalGenerator>) -> Self {
        let query = std::env::var(ENV_FEED_QUERY)
            .unwrap_or_else(|_| DEFAULT_FEED_QUERY.to_string());
        Self {
            feed,
            generator,
            query,
            search_limit: DEFAULT_SEARCH_LIMIT,
            cap: DEFAULT_BATCH_CAP,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Run the `TryPrimary → TryFallback → Assembled` machine once. All
    /// source failures are absorbed here; the result is always a non-empty
    /// batch.
    pub async fn assemble(&self) -> AssembledReport {
        ensure_metrics_described();

        let mut signals: Vec<Signal> = Vec::new();
        let mut primary_worked = false;
        let mut stage = Stage::TryPrimary;

        loop {
            match stage {
                Stage::TryPrimary => {
                    let t0 = std::time::Instant::now();
                    let collected = self.collect_from_feed().await;
                    histogram!("primary_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

                    match collected {
                        Ok(batch) if !batch.is_empty() => {
                            signals = batch;
                            primary_worked = true;
                            stage = Stage::Assembled;
                        }
                        Ok(_) => {
                            tracing::info!(
                                target: "assembler",
                                feed = self.feed.name(),
                                "primary feed yielded nothing usable"
                            );
                            stage = Stage::TryFallback;
                        }
                        Err(e) => {
                            tracing::warn!(
                                target: "assembler",
                                feed = self.feed.name(),
                                error = %e,
                                "primary feed failed"
                            );
                            counter!("primary_source_errors_total").increment(1);
                            stage = Stage::TryFallback;
                        }
                    }
                }
                Stage::TryFallback => {
                    counter!("fallback_used_total").increment(1);
                    let generated = self.generator.generate(self.cap).await;
                    signals = if generated.is_empty() {
                        counter!("placeholder_used_total").increment(1);
                        vec![placeholder_signal()]
                    } else {
                        // Trusted as pre-classified; no re-scoring.
                        generated
                    };
                    stage = Stage::Assembled;
                }
                Stage::Assembled => {
                    return AssembledReport {
                        signals,
                        primary_worked,
                    };
                }
            }
        }
    }

    /// TryPrimary body: search, score in post order, resolve authors for the
    /// kept posts, shape into canonical records, stop at the cap. Any error
    /// (including per-post author resolution) aborts the whole pass.
    async fn collect_from_feed(&self) -> Result<Vec<Signal>, SourceError> {
        let posts = self.feed.search(&self.query, self.search_limit).await?;

        let mut out = Vec::new();
        let mut discarded = 0u64;
        for post in posts {
            if out.len() >= self.cap {
                break;
            }

            let score = scoring::score(&post.text);
            if score.intent == Intent::Medium {
                discarded += 1;
                continue;
            }

            let author = match (&post.author_name, &post.author_location) {
                (Some(name), _) => crate::sources::types::AuthorProfile {
                    name: name.clone(),
                    location: post.author_location.clone(),
                },
                _ => self.feed.resolve_author(&post.author_id).await?,
            };
            if author.name.trim().is_empty() {
                discarded += 1;
                continue;
            }

            out.push(Signal {
                company: author.name,
                location: author.location.unwrap_or_else(|| "Unknown".to_string()),
                industry: Industry::infer(&post.text),
                signal: summarize(&post.text, SIGNAL_SUMMARY_MAX_CHARS),
                intent: score.intent,
                hook: score.hook.to_string(),
            });
        }

        if discarded > 0 {
            counter!("posts_discarded_total").increment(discarded);
        }
        tracing::info!(
            target: "assembler",
            kept = out.len(),
            discarded,
            "primary feed pass finished"
        );
        Ok(out)
    }
}
