// src/sources/types.rs
use thiserror::Error;

use crate::signal::Signal;

pub type Result<T> = std::result::Result<T, SourceError>;

/// Failure taxonomy shared by both acquisition paths. Primary-source errors
/// never leave the assembler; they only drive the fallback transition.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

/// One candidate post from the social feed. Ephemeral; author metadata may
/// arrive unresolved and require a secondary lookup.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct RawPost {
    pub author_id: String,
    pub author_name: Option<String>,
    pub author_location: Option<String>,
    pub text: String,
    pub published_at: u64, // unix seconds
}

/// Resolved author identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorProfile {
    pub name: String,
    pub location: Option<String>,
}

/// Primary acquisition path: live social search + per-post author lookup.
#[async_trait::async_trait]
pub trait SocialFeed: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<RawPost>>;
    async fn resolve_author(&self, author_id: &str) -> Result<AuthorProfile>;
    fn name(&self) -> &'static str;
}

/// Fallback acquisition path: synthetic signals in the canonical schema.
/// Absorbing by contract — call errors and parse failures degrade to an
/// empty batch so the assembler can apply the static placeholder.
#[async_trait::async_trait]
pub trait SignalGenerator: Send + Sync {
    async fn generate(&self, target_count: usize) -> Vec<Signal>;
    fn name(&self) -> &'static str;
}
