//! Spam warning signal extraction
//!
//! Scans the raw input text for keyword taxonomy hits and cheap surface
//! statistics (caps ratio, exclamation marks, URL count). Everything here
//! runs over the original text, not the normalized form, so the reported
//! hits match what a human reader sees.

use regex::Regex;
use serde::Serialize;

use super::patterns::URL_PATTERN;
use crate::error::Result;

/// Keyword hit lists are capped so reports stay bounded on adversarial input
const MAX_HITS: usize = 10;

const SPAM_KEYWORDS: &[&str] = &[
    "free",
    "win",
    "winner",
    "cash",
    "prize",
    "claim",
    "urgent",
    "limited",
    "offer",
    "deal",
    "discount",
    "save",
    "money",
    "credit",
    "loan",
    "debt",
    "guarantee",
    "bonus",
    "gift",
    "congratulations",
    "selected",
    "apply now",
    "click here",
    "act now",
    "order now",
    "buy now",
    "subscribe",
    "unsubscribe",
];

const MONEY_KEYWORDS: &[&str] = &[
    "$", "€", "£", "usd", "dollar", "price", "cost", "pay", "payment", "money", "cash", "credit",
    "account", "bank", "invest", "profit",
];

const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "immediate",
    "now",
    "hurry",
    "limited time",
    "expires",
    "act now",
    "don't miss",
    "last chance",
    "today only",
    "asap",
];

/// Warning signals detected in one input text
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSet {
    /// Spam trigger phrases found, upper-cased, taxonomy order
    pub suspicious_keywords: Vec<String>,
    pub url_count: usize,
    /// Share of upper-case characters, 0-100, two decimals
    pub caps_percentage: f64,
    pub exclamation_count: usize,
    pub money_terms: Vec<String>,
    pub urgency_words: Vec<String>,
}

/// Extracts an [`IndicatorSet`] from raw text
pub struct SignalExtractor {
    url_re: Regex,
}

impl SignalExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            url_re: Regex::new(URL_PATTERN)?,
        })
    }

    pub fn extract(&self, text: &str) -> IndicatorSet {
        let text_lower = text.to_lowercase();

        let suspicious_keywords = keyword_hits(SPAM_KEYWORDS, &text_lower);
        let money_terms = keyword_hits(MONEY_KEYWORDS, &text_lower);
        let urgency_words = keyword_hits(URGENCY_KEYWORDS, &text_lower);

        let char_count = text.chars().count();
        let caps_percentage = if char_count > 0 {
            let caps_count = text.chars().filter(|c| c.is_uppercase()).count();
            super::round_to(caps_count as f64 / char_count as f64 * 100.0, 2)
        } else {
            0.0
        };

        IndicatorSet {
            suspicious_keywords,
            url_count: self.url_re.find_iter(text).count(),
            caps_percentage,
            exclamation_count: text.matches('!').count(),
            money_terms,
            urgency_words,
        }
    }
}

fn keyword_hits(taxonomy: &[&str], text_lower: &str) -> Vec<String> {
    taxonomy
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .take(MAX_HITS)
        .map(|keyword| keyword.to_uppercase())
        .collect()
}
