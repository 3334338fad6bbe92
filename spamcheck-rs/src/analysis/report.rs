//! Report assembly
//!
//! Runs the full pipeline for one text or a batch: normalize, vectorize,
//! predict with the primary model, then attach indicators, risk tier,
//! guidance, word importance, pattern hits and the ensemble comparison.
//! Batch items are processed concurrently and re-associated by caller id.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::ensemble::{self, EnsembleReport};
use super::importance::{self, WordContribution};
use super::indicators::{IndicatorSet, SignalExtractor};
use super::patterns::{PatternExtractor, PatternSet};
use super::recommend;
use super::risk::{self, RiskLevel};
use super::round_to;
use crate::error::{Result, SpamCheckError};
use crate::model::{ConfidenceSource, Label, ModelRegistry};
use crate::text::{NormalizeOptions, Normalizer};

/// Full explainable verdict for one input text
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub prediction: Label,
    /// Confidence in the predicted class, 0-1, four decimals
    pub confidence: f64,
    pub text_length: usize,
    pub normalized_length: usize,
    pub indicators: IndicatorSet,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub word_importance: Vec<WordContribution>,
    pub patterns: PatternSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ensemble: Option<EnsembleReport>,
}

/// One input of a batch request
#[derive(Debug, Clone, Deserialize)]
pub struct BatchItem {
    #[serde(default = "default_item_id")]
    pub id: Value,
    #[serde(default)]
    pub text: String,
}

fn default_item_id() -> Value {
    Value::String(String::new())
}

/// Per-item batch outcome, tagged so callers can filter failures
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchEntry {
    Success {
        id: Value,
        #[serde(flatten)]
        report: AnalysisReport,
    },
    Error {
        id: Value,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub spam_count: usize,
    pub ham_count: usize,
    /// Average over successfully processed items, four decimals
    pub avg_confidence: f64,
}

/// Batch response payload: per-item entries in input order plus the summary
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub results: Vec<BatchEntry>,
    pub summary: BatchSummary,
}

/// The analysis pipeline, shared read-only across requests
pub struct AnalysisEngine {
    registry: Arc<ModelRegistry>,
    normalizer: Normalizer,
    signals: SignalExtractor,
    patterns: PatternExtractor,
}

impl AnalysisEngine {
    pub fn new(registry: Arc<ModelRegistry>, options: NormalizeOptions) -> Result<Self> {
        Ok(Self {
            registry,
            normalizer: Normalizer::new(options)?,
            signals: SignalExtractor::new()?,
            patterns: PatternExtractor::new()?,
        })
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Analyze one text and build the merged report
    pub fn analyze(&self, text: &str) -> Result<AnalysisReport> {
        if text.trim().is_empty() {
            return Err(SpamCheckError::InvalidInput(
                "Empty text provided".to_string(),
            ));
        }

        let normalized = self.normalizer.normalize(text);
        let input = self.registry.vectorizer().vectorize(&normalized);

        let primary = self.registry.primary();
        let prediction = primary.model.predict(&input)?;
        let confidence = match primary.profile.confidence {
            ConfidenceSource::Probabilities => primary
                .model
                .probabilities(&input)
                .map(|p| p[0].max(p[1]))
                .unwrap_or(0.5),
            ConfidenceSource::Margin => primary
                .model
                .decision_margin(&input)
                .map(|margin| 1.0 / (1.0 + margin.abs()))
                .unwrap_or(0.5),
            ConfidenceSource::Fixed => 0.5,
        };

        let indicators = self.signals.extract(text);
        let risk_level = risk::assess(prediction, confidence, &indicators);
        let recommendations = recommend::safety_recommendations(prediction, risk_level)
            .iter()
            .map(|line| (*line).to_string())
            .collect();
        let word_importance =
            importance::rank(&input, primary.model.as_ref(), self.registry.vectorizer());
        let patterns = self.patterns.extract(text);

        let ensemble = ensemble::aggregate(self.registry.models(), &input);
        let ensemble = (ensemble.total_models > 0).then_some(ensemble);

        Ok(AnalysisReport {
            prediction,
            confidence: round_to(confidence, 4),
            text_length: text.chars().count(),
            normalized_length: normalized.chars().count(),
            indicators,
            risk_level,
            recommendations,
            word_importance,
            patterns,
            ensemble,
        })
    }

    /// Analyze a batch concurrently, one task per item, preserving input order
    pub async fn analyze_batch(self: Arc<Self>, items: Vec<BatchItem>) -> BatchReport {
        let total = items.len();
        let mut handles = Vec::with_capacity(total);

        for item in items {
            let engine = Arc::clone(&self);
            handles.push(tokio::spawn(async move {
                let BatchItem { id, text } = item;
                match engine.analyze(&text) {
                    Ok(report) => BatchEntry::Success { id, report },
                    Err(e) => BatchEntry::Error {
                        id,
                        message: e.to_string(),
                    },
                }
            }));
        }

        let mut results = Vec::with_capacity(total);
        let mut processed = 0usize;
        let mut spam_count = 0usize;
        let mut ham_count = 0usize;
        let mut confidence_sum = 0.0f64;

        for handle in handles {
            let entry = match handle.await {
                Ok(entry) => entry,
                Err(e) => BatchEntry::Error {
                    id: Value::Null,
                    message: format!("Analysis task failed: {}", e),
                },
            };
            if let BatchEntry::Success { report, .. } = &entry {
                processed += 1;
                confidence_sum += report.confidence;
                match report.prediction {
                    Label::Spam => spam_count += 1,
                    Label::Ham => ham_count += 1,
                }
            }
            results.push(entry);
        }

        let avg_confidence = if processed > 0 {
            round_to(confidence_sum / processed as f64, 4)
        } else {
            0.0
        };

        BatchReport {
            results,
            summary: BatchSummary {
                total,
                processed,
                failed: total - processed,
                spam_count,
                ham_count,
                avg_confidence,
            },
        }
    }
}
