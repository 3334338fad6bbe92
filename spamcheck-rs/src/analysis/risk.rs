//! Risk tier classification
//!
//! Pure mapping from a verdict plus detected indicators to one of four
//! ordered tiers. Ham never rises above Medium: a low-confidence ham call
//! is itself treated as a signal worth flagging.

use serde::{Deserialize, Serialize};

use super::indicators::IndicatorSet;
use crate::model::Label;

/// Caps ratio above this contributes one point to the indicator score
const CAPS_ALERT_PERCENTAGE: f64 = 30.0;

/// Ordered risk tier attached to every report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weighted, capped sum of the individual warning signals
pub fn indicator_score(indicators: &IndicatorSet) -> u32 {
    let mut score = indicators.suspicious_keywords.len().min(5) as u32;
    score += indicators.url_count.min(3) as u32;
    if indicators.caps_percentage > CAPS_ALERT_PERCENTAGE {
        score += 1;
    }
    score += (indicators.exclamation_count / 3).min(2) as u32;
    score += indicators.money_terms.len().min(3) as u32;
    score += indicators.urgency_words.len().min(2) as u32;
    score
}

/// Combine the verdict with the indicator score into a tier.
///
/// Spam tiers are checked top down, so the strictest matching rule wins.
pub fn assess(label: Label, confidence: f64, indicators: &IndicatorSet) -> RiskLevel {
    match label {
        Label::Ham => {
            if confidence > 0.9 {
                RiskLevel::Low
            } else {
                RiskLevel::Medium
            }
        }
        Label::Spam => {
            let score = indicator_score(indicators);
            if confidence > 0.95 && score >= 8 {
                RiskLevel::Critical
            } else if confidence > 0.85 || score >= 6 {
                RiskLevel::High
            } else if confidence > 0.7 || score >= 3 {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators(
        keywords: usize,
        urls: usize,
        caps: f64,
        exclamations: usize,
        money: usize,
        urgency: usize,
    ) -> IndicatorSet {
        IndicatorSet {
            suspicious_keywords: vec!["FREE".to_string(); keywords],
            url_count: urls,
            caps_percentage: caps,
            exclamation_count: exclamations,
            money_terms: vec!["$".to_string(); money],
            urgency_words: vec!["NOW".to_string(); urgency],
        }
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_ham_never_rises_above_medium() {
        let quiet = indicators(0, 0, 0.0, 0, 0, 0);
        assert_eq!(assess(Label::Ham, 0.96, &quiet), RiskLevel::Low);
        assert_eq!(assess(Label::Ham, 0.85, &quiet), RiskLevel::Medium);
        assert_eq!(assess(Label::Ham, 0.2, &quiet), RiskLevel::Medium);

        // indicators do not matter for ham
        let noisy = indicators(10, 5, 80.0, 20, 5, 5);
        assert_eq!(assess(Label::Ham, 0.5, &noisy), RiskLevel::Medium);
    }

    #[test]
    fn test_spam_critical_needs_confidence_and_score() {
        let heavy = indicators(5, 1, 40.0, 6, 1, 1);
        assert_eq!(indicator_score(&heavy), 11);
        assert_eq!(assess(Label::Spam, 0.97, &heavy), RiskLevel::Critical);

        // high score alone is not enough
        assert_eq!(assess(Label::Spam, 0.9, &heavy), RiskLevel::High);

        // high confidence alone is not enough
        let light = indicators(3, 0, 0.0, 0, 1, 0);
        assert_eq!(indicator_score(&light), 4);
        assert_eq!(assess(Label::Spam, 0.99, &light), RiskLevel::High);
    }

    #[test]
    fn test_spam_high_by_score() {
        let scored = indicators(4, 2, 0.0, 0, 0, 0);
        assert_eq!(indicator_score(&scored), 6);
        assert_eq!(assess(Label::Spam, 0.5, &scored), RiskLevel::High);
    }

    #[test]
    fn test_spam_medium_and_low() {
        let quiet = indicators(0, 0, 0.0, 0, 0, 0);
        assert_eq!(assess(Label::Spam, 0.75, &quiet), RiskLevel::Medium);

        let mild = indicators(2, 1, 0.0, 0, 0, 0);
        assert_eq!(indicator_score(&mild), 3);
        assert_eq!(assess(Label::Spam, 0.5, &mild), RiskLevel::Medium);

        let faint = indicators(2, 0, 0.0, 0, 0, 0);
        assert_eq!(assess(Label::Spam, 0.5, &faint), RiskLevel::Low);
    }

    #[test]
    fn test_spam_tier_never_drops_as_confidence_rises() {
        let confidences = [0.1, 0.5, 0.75, 0.86, 0.9, 0.96, 0.99];

        for set in [indicators(0, 0, 0.0, 0, 0, 0), indicators(5, 1, 40.0, 6, 1, 1)] {
            let mut previous = RiskLevel::Low;
            for confidence in confidences {
                let tier = assess(Label::Spam, confidence, &set);
                assert!(tier >= previous, "tier dropped at confidence {}", confidence);
                previous = tier;
            }
        }
    }

    #[test]
    fn test_indicator_score_caps_each_signal() {
        let flooded = indicators(10, 10, 90.0, 30, 10, 10);
        assert_eq!(indicator_score(&flooded), 16);
    }

    #[test]
    fn test_exclamations_count_in_threes() {
        assert_eq!(indicator_score(&indicators(0, 0, 0.0, 2, 0, 0)), 0);
        assert_eq!(indicator_score(&indicators(0, 0, 0.0, 3, 0, 0)), 1);
        assert_eq!(indicator_score(&indicators(0, 0, 0.0, 9, 0, 0)), 2);
    }

    #[test]
    fn test_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Critical).unwrap(),
            "\"Critical\""
        );
    }
}
