//! Canonical report data types: intent tiers, industry labels, and the
//! `Signal` record the renderer consumes.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How many characters the `signal` summary column may carry.
pub const SIGNAL_SUMMARY_MAX_CHARS: usize = 60;

/// Confidence tier attached to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Medium => "Medium",
            Intent::High => "High",
            Intent::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Industry bucket for a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Industry {
    SaaS,
    Martech,
    Fintech,
    Tech,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::SaaS => "SaaS",
            Industry::Martech => "Martech",
            Industry::Fintech => "Fintech",
            Industry::Tech => "Tech",
        }
    }

    /// Map free-form text (a post body or a generated label like
    /// "B2B SaaS / AI") onto a bucket. Unknown labels fall back to `Tech`.
    pub fn infer(text: &str) -> Self {
        let t = text.to_ascii_lowercase();
        if t.contains("martech") {
            Industry::Martech
        } else if t.contains("fintech") {
            Industry::Fintech
        } else if t.contains("saas") || t.contains("b2b") {
            Industry::SaaS
        } else {
            Industry::Tech
        }
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Industry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// The generative source emits arbitrary industry labels; accept anything and
// bucket it rather than failing the whole array on one label.
impl<'de> Deserialize<'de> for Industry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Industry::infer(&label))
    }
}

/// One inferred buying/need-for-help indicator about one company.
/// Immutable once created; batch order is insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub company: String,
    #[serde(default = "unknown_location")]
    pub location: String,
    pub industry: Industry,
    pub signal: String,
    pub intent: Intent,
    pub hook: String,
}

fn unknown_location() -> String {
    "Unknown".to_string()
}

/// Company name used for the last-resort static row.
pub const PLACEHOLDER_COMPANY: &str = "No qualifying signals";

/// Static row used when both sources come back empty, so the report is
/// never an empty table.
pub fn placeholder_signal() -> Signal {
    Signal {
        company: PLACEHOLDER_COMPANY.to_string(),
        location: "Unknown".to_string(),
        industry: Industry::Tech,
        signal: "No fresh intent activity surfaced in the last 24h".to_string(),
        intent: Intent::Medium,
        hook: "Revisit tomorrow".to_string(),
    }
}

/// Collapse whitespace and cap at `max_chars`, ellipsizing on truncation.
/// Cuts on char boundaries only.
pub fn summarize(text: &str, max_chars: usize) -> String {
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").expect("whitespace regex"));
    let collapsed = re_ws.replace_all(text.trim(), " ").to_string();

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut out: String = collapsed
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_serde_uses_report_labels() {
        let json = serde_json::to_string(&Intent::VeryHigh).unwrap();
        assert_eq!(json, r#""Very High""#);
        let back: Intent = serde_json::from_str(r#""Very High""#).unwrap();
        assert_eq!(back, Intent::VeryHigh);
        let high: Intent = serde_json::from_str(r#""High""#).unwrap();
        assert_eq!(high, Intent::High);
    }

    #[test]
    fn industry_infer_buckets_free_form_labels() {
        assert_eq!(Industry::infer("B2B SaaS"), Industry::SaaS);
        assert_eq!(Industry::infer("Martech platform"), Industry::Martech);
        assert_eq!(Industry::infer("embedded FinTech"), Industry::Fintech);
        assert_eq!(Industry::infer("AI infrastructure"), Industry::Tech);
    }

    #[test]
    fn signal_location_defaults_to_unknown() {
        let s: Signal = serde_json::from_str(
            r#"{"company":"Acme","industry":"SaaS","signal":"x","intent":"High","hook":"y"}"#,
        )
        .unwrap();
        assert_eq!(s.location, "Unknown");
    }

    #[test]
    fn summarize_collapses_and_caps() {
        let short = summarize("hiring   a\nCRO", 60);
        assert_eq!(short, "hiring a CRO");

        let long = "x".repeat(200);
        let capped = summarize(&long, 60);
        assert_eq!(capped.chars().count(), 60);
        assert!(capped.ends_with('…'));
    }
}
