// src/sources/social.rs
//! Live social-feed source: X API v2 recent search plus per-post author
//! lookup. The author lookup is the dominant latency and failure surface;
//! any error here fails the whole source call and no retry is performed.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

use crate::sources::types::{AuthorProfile, RawPost, Result, SocialFeed, SourceError};

const BASE_URL: &str = "https://api.x.com/2";

pub const ENV_SOCIAL_BEARER: &str = "SOCIAL_BEARER_TOKEN";

pub struct SocialFeedClient {
    http: reqwest::Client,
    bearer: String,
    base_url: String,
}

impl SocialFeedClient {
    pub fn new(bearer: String) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("intent-signal-reporter/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self {
            http,
            bearer,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Bearer token from `SOCIAL_BEARER_TOKEN`; an absent token yields a
    /// client whose calls fail fast as `Unavailable`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(ENV_SOCIAL_BEARER).unwrap_or_default())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.bearer)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(resp.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchPost>,
}

#[derive(Debug, Deserialize)]
struct SearchPost {
    author_id: String,
    text: String,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    data: UserRecord,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    name: String,
    location: Option<String>,
}

fn parse_rfc3339_to_unix(ts: &str) -> u64 {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.timestamp())
        .and_then(|x| u64::try_from(x).ok())
        .unwrap_or(0)
}

#[async_trait]
impl SocialFeed for SocialFeedClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<RawPost>> {
        if self.bearer.is_empty() {
            return Err(SourceError::Unavailable(
                "no social bearer token configured".to_string(),
            ));
        }

        // The recent-search endpoint accepts 10..=100 results per call.
        let max_results = max_results.clamp(10, 100);
        let url = format!(
            "{}/tweets/search/recent?query={}&max_results={}&tweet.fields=author_id,created_at",
            self.base_url,
            urlencode(query),
            max_results
        );

        tracing::debug!(target: "sources", max_results, "searching social feed");
        let body: SearchResponse = self.get_json(&url).await?;

        let posts = body
            .data
            .into_iter()
            .map(|p| RawPost {
                author_id: p.author_id,
                author_name: None,
                author_location: None,
                text: p.text,
                published_at: p
                    .created_at
                    .as_deref()
                    .map(parse_rfc3339_to_unix)
                    .unwrap_or(0),
            })
            .collect::<Vec<_>>();

        tracing::info!(target: "sources", count = posts.len(), "social search returned posts");
        Ok(posts)
    }

    async fn resolve_author(&self, author_id: &str) -> Result<AuthorProfile> {
        let url = format!(
            "{}/users/{}?user.fields=location",
            self.base_url, author_id
        );
        let body: UserResponse = self.get_json(&url).await?;
        Ok(AuthorProfile {
            name: body.data.name,
            location: body.data.location,
        })
    }

    fn name(&self) -> &'static str {
        "x-recent-search"
    }
}

/// Percent-encode a query string for a URL parameter. Covers the characters
/// the boolean feed query actually uses.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => {
                use std::fmt::Write as _;
                let _ = write!(&mut out, "%{:02X}", b);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_parses_to_unix_seconds() {
        assert_eq!(parse_rfc3339_to_unix("1970-01-01T00:01:00Z"), 60);
        assert_eq!(parse_rfc3339_to_unix("not a date"), 0);
    }

    #[test]
    fn urlencode_escapes_query_syntax() {
        assert_eq!(urlencode("a b"), "a%20b");
        assert_eq!(urlencode("\"need GTM\" -is:retweet"), "%22need%20GTM%22%20-is%3Aretweet");
    }

    #[tokio::test]
    async fn search_without_token_fails_fast() {
        let client = SocialFeedClient::new(String::new());
        let err = client.search("b2b", 10).await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }
}
