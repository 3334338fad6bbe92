//! Multinomial naive Bayes inference

use serde::{Deserialize, Serialize};

use super::classifier::{
    ensure_dim, CapabilityProfile, Classifier, ConfidenceSource, Label, TermWeights, WeightSource,
};
use super::vectorizer::SparseVector;
use crate::error::{Result, SpamCheckError};

/// Serialized multinomial naive Bayes parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesArtifact {
    /// Log prior per class [ham, spam]
    pub class_log_prior: Vec<f64>,
    /// Per-class feature log probabilities, one row per class
    pub feature_log_prob: Vec<Vec<f64>>,
}

pub struct NaiveBayes {
    class_log_prior: [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
}

impl NaiveBayes {
    pub fn from_artifact(artifact: NaiveBayesArtifact, dim: usize) -> Result<Self> {
        if artifact.class_log_prior.len() != 2 || artifact.feature_log_prob.len() != 2 {
            return Err(SpamCheckError::Artifact(
                "naive_bayes artifact must describe exactly two classes".to_string(),
            ));
        }

        let mut rows = artifact.feature_log_prob.into_iter();
        let ham = rows.next().unwrap_or_default();
        let spam = rows.next().unwrap_or_default();
        for row in [&ham, &spam] {
            if row.len() != dim {
                return Err(SpamCheckError::Artifact(format!(
                    "naive_bayes feature_log_prob has {} entries, expected {}",
                    row.len(),
                    dim
                )));
            }
        }

        Ok(Self {
            class_log_prior: [artifact.class_log_prior[0], artifact.class_log_prior[1]],
            feature_log_prob: [ham, spam],
        })
    }

    fn dim(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn joint_log_likelihood(&self, input: &SparseVector) -> [f64; 2] {
        [
            self.class_log_prior[0] + input.dot(&self.feature_log_prob[0]),
            self.class_log_prior[1] + input.dot(&self.feature_log_prob[1]),
        ]
    }
}

impl Classifier for NaiveBayes {
    fn predict(&self, input: &SparseVector) -> Result<Label> {
        ensure_dim(input, self.dim())?;
        let jll = self.joint_log_likelihood(input);
        Ok(if jll[1] > jll[0] {
            Label::Spam
        } else {
            Label::Ham
        })
    }

    fn probabilities(&self, input: &SparseVector) -> Option<[f64; 2]> {
        let jll = self.joint_log_likelihood(input);
        let max = jll[0].max(jll[1]);
        let ham = (jll[0] - max).exp();
        let spam = (jll[1] - max).exp();
        let total = ham + spam;
        Some([ham / total, spam / total])
    }

    fn decision_margin(&self, _input: &SparseVector) -> Option<f64> {
        None
    }

    fn term_weights(&self) -> Option<TermWeights<'_>> {
        Some(TermWeights::LogProb {
            ham: &self.feature_log_prob[0],
            spam: &self.feature_log_prob[1],
        })
    }

    fn capabilities(&self) -> CapabilityProfile {
        CapabilityProfile {
            confidence: ConfidenceSource::Probabilities,
            weights: WeightSource::LogProb,
        }
    }
}
