//! Heuristic intent scorer: pure, deterministic, two-tier keyword
//! classification over post text. No weighting, no magnitudes — the first
//! matching tier decides.

use crate::signal::Intent;

/// Phrases that read as an explicit ask for GTM/revenue help.
const HIGH_INTENT_PHRASES: &[&str] = &[
    "need gtm",
    "need go-to-market",
    "pipeline weak",
    "pipeline is weak",
    "hire cro",
    "hire a cro",
    "funding sales help",
    "revenue stalled",
    "struggling with sales",
];

/// Generic B2B vocabulary; a softer buying signal.
const GENERIC_B2B_TERMS: &[&str] = &[
    "b2b",
    "saas",
    "martech",
    "fintech",
    "analytics",
    "crm",
    "demand gen",
];

pub const HOOK_VERY_HIGH: &str = "Embed GTM engine";
pub const HOOK_HIGH: &str = "Boost B2B sales";

/// Scorer output: a tier plus the suggested sales angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub intent: Intent,
    pub hook: &'static str,
}

/// Classify one post body. Case-insensitive substring matching; the
/// high-intent set takes priority regardless of how many generic terms also
/// appear, and a single match within a set is sufficient.
pub fn score(text: &str) -> Score {
    let t = text.to_lowercase();

    if HIGH_INTENT_PHRASES.iter().any(|p| t.contains(p)) {
        return Score {
            intent: Intent::VeryHigh,
            hook: HOOK_VERY_HIGH,
        };
    }
    if GENERIC_B2B_TERMS.iter().any(|p| t.contains(p)) {
        return Score {
            intent: Intent::High,
            hook: HOOK_HIGH,
        };
    }
    Score {
        intent: Intent::Medium,
        hook: "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_intent_phrase_scores_very_high() {
        let s = score("We really NEED GTM support after our seed round");
        assert_eq!(s.intent, Intent::VeryHigh);
        assert_eq!(s.hook, HOOK_VERY_HIGH);
    }

    #[test]
    fn high_intent_wins_over_generic_terms() {
        // Both sets match; first set decides.
        let s = score("B2B SaaS founder, pipeline weak this quarter");
        assert_eq!(s.intent, Intent::VeryHigh);
        assert_eq!(s.hook, HOOK_VERY_HIGH);
    }

    #[test]
    fn generic_term_scores_high() {
        let s = score("Shipping a martech integration next week");
        assert_eq!(s.intent, Intent::High);
        assert_eq!(s.hook, HOOK_HIGH);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(score("FINTECH roadmap review").intent, Intent::High);
        assert_eq!(score("Hire A CRO yesterday").intent, Intent::VeryHigh);
    }

    #[test]
    fn no_keywords_scores_medium() {
        let s = score("Lovely weather in Lisbon today");
        assert_eq!(s.intent, Intent::Medium);
        assert!(s.hook.is_empty());
    }
}
