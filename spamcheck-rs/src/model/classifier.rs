//! Classifier trait and capability model
//!
//! Every model declares what it can report (probabilities, a decision
//! margin, a term weight table) through a capability profile fixed at
//! registration time. Consumers dispatch on the stored profile instead of
//! probing the trait object per call.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::vectorizer::SparseVector;
use crate::error::{Result, SpamCheckError};

/// Classification label. Class index 0 is ham, 1 is spam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Ham,
    Spam,
}

impl Label {
    pub fn from_index(index: usize) -> Self {
        if index == 1 {
            Label::Spam
        } else {
            Label::Ham
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Label::Ham => 0,
            Label::Spam => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ham" => Some(Label::Ham),
            "spam" => Some(Label::Spam),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a model reports confidence in a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceSource {
    /// Native per-class probabilities
    Probabilities,
    /// Signed decision margin only
    Margin,
    /// Neither; confidence is a fixed neutral 0.5
    Fixed,
}

/// What kind of per-term weight table a model exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    /// One signed weight per vocabulary term
    Linear,
    /// Class-conditional log probabilities per term
    LogProb,
    /// No term weights
    Unavailable,
}

/// Capability profile fixed when a model is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityProfile {
    pub confidence: ConfidenceSource,
    pub weights: WeightSource,
}

impl CapabilityProfile {
    pub fn describe(&self) -> String {
        let confidence = match self.confidence {
            ConfidenceSource::Probabilities => "class probabilities",
            ConfidenceSource::Margin => "decision margin",
            ConfidenceSource::Fixed => "fixed confidence",
        };
        let weights = match self.weights {
            WeightSource::Linear => "linear term weights",
            WeightSource::LogProb => "log-probability term weights",
            WeightSource::Unavailable => "no term weights",
        };
        format!("{}, {}", confidence, weights)
    }
}

/// Borrowed view of a model's term weight table
#[derive(Debug, Clone, Copy)]
pub enum TermWeights<'a> {
    Linear(&'a [f64]),
    LogProb { ham: &'a [f64], spam: &'a [f64] },
}

/// A binary spam/ham classifier over sparse TF-IDF vectors
pub trait Classifier: Send + Sync {
    /// Predict the label for a vectorized input
    fn predict(&self, input: &SparseVector) -> Result<Label>;

    /// Per-class probabilities [ham, spam], when the model supports them
    fn probabilities(&self, input: &SparseVector) -> Option<[f64; 2]>;

    /// Signed decision margin (positive = spam side), when supported
    fn decision_margin(&self, input: &SparseVector) -> Option<f64>;

    /// The model's term weight table, when it exposes one
    fn term_weights(&self) -> Option<TermWeights<'_>>;

    /// Capability profile, queried once at registration
    fn capabilities(&self) -> CapabilityProfile;
}

/// Reject inputs whose feature indices exceed the model dimension
pub(crate) fn ensure_dim(input: &SparseVector, dim: usize) -> Result<()> {
    if let Some(max_index) = input.max_index() {
        if max_index >= dim {
            return Err(SpamCheckError::Predict(format!(
                "Input references feature {} but the model has {} features",
                max_index, dim
            )));
        }
    }
    Ok(())
}
