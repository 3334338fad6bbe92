//! Text normalization pipeline
//!
//! Cleans raw message text before vectorization: lowercasing, markup and
//! address removal, punctuation and digit stripping, stopword removal, and
//! English stemming. The trained vectorizer vocabulary was built over text
//! cleaned the same way, so the steps and their order matter.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::config::AnalysisConfig;
use crate::error::Result;

/// Common English stopwords removed before stemming
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "you", "your", "yours", "yourself", "yourselves",
];

/// Toggles for the optional normalization steps
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    pub strip_digits: bool,
    pub remove_stopwords: bool,
    pub stem_tokens: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strip_digits: true,
            remove_stopwords: true,
            stem_tokens: true,
        }
    }
}

impl From<&AnalysisConfig> for NormalizeOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            strip_digits: config.strip_digits,
            remove_stopwords: config.remove_stopwords,
            stem_tokens: config.stem_tokens,
        }
    }
}

/// Text normalizer with precompiled patterns
pub struct Normalizer {
    url_re: Regex,
    html_re: Regex,
    email_re: Regex,
    stemmer: Stemmer,
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with the given step toggles
    pub fn new(options: NormalizeOptions) -> Result<Self> {
        Ok(Self {
            url_re: Regex::new(r"https?://\S+|www\.\S+")?,
            html_re: Regex::new(r"<.*?>")?,
            email_re: Regex::new(r"\S+@\S+")?,
            stemmer: Stemmer::create(Algorithm::English),
            options,
        })
    }

    /// Run the full pipeline over raw text
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        // Markup and addresses go before punctuation stripping, otherwise
        // their separators leak into the token stream.
        let cleaned = self.url_re.replace_all(&lowered, " ");
        let cleaned = self.html_re.replace_all(&cleaned, " ");
        let cleaned = self.email_re.replace_all(&cleaned, " ");

        let cleaned: String = cleaned
            .chars()
            .map(|c| {
                if c.is_ascii_punctuation() || (self.options.strip_digits && c.is_ascii_digit()) {
                    ' '
                } else {
                    c
                }
            })
            .collect();

        let mut tokens: Vec<String> = Vec::new();
        for token in cleaned.split_whitespace() {
            if self.options.remove_stopwords && STOPWORDS.contains(&token) {
                continue;
            }
            if self.options.stem_tokens {
                tokens.push(self.stemmer.stem(token).to_string());
            } else {
                tokens.push(token.to_string());
            }
        }

        tokens.join(" ")
    }
}
