//! Linear model inference: logistic regression and linear SVM
//!
//! Both share the same artifact shape (a weight per vocabulary term plus an
//! intercept) and the same decision function; they differ in how confidence
//! is reported. Logistic regression maps the decision through a sigmoid into
//! probabilities, the SVM only exposes the raw signed margin.

use serde::{Deserialize, Serialize};

use super::classifier::{
    ensure_dim, CapabilityProfile, Classifier, ConfidenceSource, Label, TermWeights, WeightSource,
};
use super::vectorizer::SparseVector;
use crate::error::{Result, SpamCheckError};

/// Serialized parameters of a binary linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    /// Signed weight per vocabulary term (positive = spam side)
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LinearArtifact {
    fn check_dim(&self, kind: &str, dim: usize) -> Result<()> {
        if self.coef.len() != dim {
            return Err(SpamCheckError::Artifact(format!(
                "{} coef has {} entries, expected {}",
                kind,
                self.coef.len(),
                dim
            )));
        }
        Ok(())
    }
}

fn decision(coef: &[f64], intercept: f64, input: &SparseVector) -> f64 {
    intercept + input.dot(coef)
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

pub struct LogisticRegression {
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn from_artifact(artifact: LinearArtifact, dim: usize) -> Result<Self> {
        artifact.check_dim("logistic_regression", dim)?;
        Ok(Self {
            coef: artifact.coef,
            intercept: artifact.intercept,
        })
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, input: &SparseVector) -> Result<Label> {
        ensure_dim(input, self.coef.len())?;
        let d = decision(&self.coef, self.intercept, input);
        Ok(if d > 0.0 { Label::Spam } else { Label::Ham })
    }

    fn probabilities(&self, input: &SparseVector) -> Option<[f64; 2]> {
        let spam = sigmoid(decision(&self.coef, self.intercept, input));
        Some([1.0 - spam, spam])
    }

    fn decision_margin(&self, input: &SparseVector) -> Option<f64> {
        Some(decision(&self.coef, self.intercept, input))
    }

    fn term_weights(&self) -> Option<TermWeights<'_>> {
        Some(TermWeights::Linear(&self.coef))
    }

    fn capabilities(&self) -> CapabilityProfile {
        CapabilityProfile {
            confidence: ConfidenceSource::Probabilities,
            weights: WeightSource::Linear,
        }
    }
}

pub struct LinearSvm {
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearSvm {
    pub fn from_artifact(artifact: LinearArtifact, dim: usize) -> Result<Self> {
        artifact.check_dim("linear_svm", dim)?;
        Ok(Self {
            coef: artifact.coef,
            intercept: artifact.intercept,
        })
    }
}

impl Classifier for LinearSvm {
    fn predict(&self, input: &SparseVector) -> Result<Label> {
        ensure_dim(input, self.coef.len())?;
        let d = decision(&self.coef, self.intercept, input);
        Ok(if d > 0.0 { Label::Spam } else { Label::Ham })
    }

    fn probabilities(&self, _input: &SparseVector) -> Option<[f64; 2]> {
        None
    }

    fn decision_margin(&self, input: &SparseVector) -> Option<f64> {
        Some(decision(&self.coef, self.intercept, input))
    }

    fn term_weights(&self) -> Option<TermWeights<'_>> {
        Some(TermWeights::Linear(&self.coef))
    }

    fn capabilities(&self) -> CapabilityProfile {
        CapabilityProfile {
            confidence: ConfidenceSource::Margin,
            weights: WeightSource::Linear,
        }
    }
}
