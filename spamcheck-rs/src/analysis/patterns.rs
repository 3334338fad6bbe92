//! Structured pattern extraction
//!
//! Pulls URLs, addresses, phone numbers and money figures out of the raw
//! text so the report can show the reader exactly which artifacts tripped
//! the alarm. Matches are non-overlapping, left to right, capped per list.

use regex::Regex;
use serde::Serialize;

use crate::error::Result;

/// Shared with the signal extractor's URL counter
pub(crate) const URL_PATTERN: &str =
    r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+";

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";
const PHONE_PATTERN: &str = r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}";
const IP_PATTERN: &str = r"\b(?:\d{1,3}\.){3}\d{1,3}\b";
const DOLLAR_PATTERN: &str = r"\$\s*\d+(?:,\d{3})*(?:\.\d{2})?";
const PERCENTAGE_PATTERN: &str = r"\d+(?:\.\d+)?%";

const MAX_MATCHES: usize = 10;

/// Pattern hits detected in one input text
#[derive(Debug, Clone, Serialize)]
pub struct PatternSet {
    pub urls: Vec<String>,
    pub email_addresses: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub ip_addresses: Vec<String>,
    pub dollar_amounts: Vec<String>,
    pub percentages: Vec<String>,
}

/// Extracts a [`PatternSet`] from raw text
pub struct PatternExtractor {
    url_re: Regex,
    email_re: Regex,
    phone_re: Regex,
    ip_re: Regex,
    dollar_re: Regex,
    percentage_re: Regex,
}

impl PatternExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            url_re: Regex::new(URL_PATTERN)?,
            email_re: Regex::new(EMAIL_PATTERN)?,
            phone_re: Regex::new(PHONE_PATTERN)?,
            ip_re: Regex::new(IP_PATTERN)?,
            dollar_re: Regex::new(DOLLAR_PATTERN)?,
            percentage_re: Regex::new(PERCENTAGE_PATTERN)?,
        })
    }

    pub fn extract(&self, text: &str) -> PatternSet {
        PatternSet {
            urls: collect_matches(&self.url_re, text),
            email_addresses: collect_matches(&self.email_re, text),
            phone_numbers: collect_matches(&self.phone_re, text),
            ip_addresses: collect_matches(&self.ip_re, text),
            dollar_amounts: collect_matches(&self.dollar_re, text),
            percentages: collect_matches(&self.percentage_re, text),
        }
    }
}

fn collect_matches(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text)
        .take(MAX_MATCHES)
        .map(|m| m.as_str().to_string())
        .collect()
}
