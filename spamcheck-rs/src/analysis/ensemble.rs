//! Ensemble comparison across loaded models
//!
//! Every registered model votes on the same vectorized input. A model that
//! fails to predict is dropped from the vote and logged, it never aborts
//! the aggregation.

use serde::Serialize;
use tracing::warn;

use super::round_to;
use crate::model::{ConfidenceSource, Label, RegisteredModel, SparseVector};

/// One model's verdict on the input
#[derive(Debug, Clone, Serialize)]
pub struct ModelVote {
    pub model_name: String,
    pub prediction: Label,
    /// Confidence in the predicted class, as a percentage
    pub confidence: f64,
}

/// All votes plus how strongly the majority agrees
#[derive(Debug, Clone, Serialize)]
pub struct EnsembleReport {
    pub models: Vec<ModelVote>,
    /// Share of successful votes backing the majority label, one decimal
    pub agreement: f64,
    pub total_models: usize,
}

pub fn aggregate(models: &[RegisteredModel], input: &SparseVector) -> EnsembleReport {
    let mut votes = Vec::with_capacity(models.len());
    let mut spam_votes = 0usize;
    let mut ham_votes = 0usize;

    for registered in models {
        let prediction = match registered.model.predict(input) {
            Ok(label) => label,
            Err(e) => {
                warn!("Model '{}' dropped from ensemble vote: {}", registered.name, e);
                continue;
            }
        };

        let confidence = match registered.profile.confidence {
            ConfidenceSource::Probabilities => registered
                .model
                .probabilities(input)
                .map(|p| p[0].max(p[1]))
                .unwrap_or(0.5),
            ConfidenceSource::Margin => registered
                .model
                .decision_margin(input)
                .map(|margin| margin.clamp(0.0, 1.0))
                .unwrap_or(0.5),
            ConfidenceSource::Fixed => 0.5,
        };

        match prediction {
            Label::Spam => spam_votes += 1,
            Label::Ham => ham_votes += 1,
        }

        votes.push(ModelVote {
            model_name: registered.name.clone(),
            prediction,
            confidence: round_to(confidence * 100.0, 2),
        });
    }

    let total_models = votes.len();
    let agreement = if total_models > 0 {
        round_to(
            spam_votes.max(ham_votes) as f64 / total_models as f64 * 100.0,
            1,
        )
    } else {
        0.0
    };

    EnsembleReport {
        models: votes,
        agreement,
        total_models,
    }
}
