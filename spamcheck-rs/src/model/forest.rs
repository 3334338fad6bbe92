//! Random forest inference
//!
//! Trees are stored as nested split/leaf nodes. A sample follows the left
//! branch when its feature value is <= the split threshold; the forest
//! probability is the mean of the per-tree leaf class distributions.

use serde::{Deserialize, Serialize};

use super::classifier::{
    ensure_dim, CapabilityProfile, Classifier, ConfidenceSource, Label, TermWeights, WeightSource,
};
use super::vectorizer::SparseVector;
use crate::error::{Result, SpamCheckError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        /// Class counts or proportions at the leaf [ham, spam]
        value: [f64; 2],
    },
}

/// Serialized random forest parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub n_features: usize,
    pub trees: Vec<TreeNode>,
}

pub struct DecisionForest {
    n_features: usize,
    trees: Vec<TreeNode>,
}

impl DecisionForest {
    pub fn from_artifact(artifact: ForestArtifact, dim: usize) -> Result<Self> {
        if artifact.n_features != dim {
            return Err(SpamCheckError::Artifact(format!(
                "random_forest expects {} features, vectorizer has {}",
                artifact.n_features, dim
            )));
        }
        if artifact.trees.is_empty() {
            return Err(SpamCheckError::Artifact(
                "random_forest artifact has no trees".to_string(),
            ));
        }
        for tree in &artifact.trees {
            validate_node(tree, dim)?;
        }

        Ok(Self {
            n_features: artifact.n_features,
            trees: artifact.trees,
        })
    }

    fn mean_probabilities(&self, input: &SparseVector) -> [f64; 2] {
        let mut total = [0.0, 0.0];
        for tree in &self.trees {
            let leaf = leaf_distribution(tree, input);
            total[0] += leaf[0];
            total[1] += leaf[1];
        }
        let count = self.trees.len() as f64;
        [total[0] / count, total[1] / count]
    }
}

fn leaf_distribution(tree: &TreeNode, input: &SparseVector) -> [f64; 2] {
    let mut node = tree;
    loop {
        match node {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                node = if input.value_at(*feature) <= *threshold {
                    left
                } else {
                    right
                };
            }
            TreeNode::Leaf { value } => {
                let total = value[0] + value[1];
                return [value[0] / total, value[1] / total];
            }
        }
    }
}

fn validate_node(node: &TreeNode, dim: usize) -> Result<()> {
    match node {
        TreeNode::Split {
            feature,
            left,
            right,
            ..
        } => {
            if *feature >= dim {
                return Err(SpamCheckError::Artifact(format!(
                    "random_forest split references feature {} but the vocabulary has {} terms",
                    feature, dim
                )));
            }
            validate_node(left, dim)?;
            validate_node(right, dim)
        }
        TreeNode::Leaf { value } => {
            if value[0] + value[1] <= 0.0 {
                return Err(SpamCheckError::Artifact(
                    "random_forest leaf has an empty class distribution".to_string(),
                ));
            }
            Ok(())
        }
    }
}

impl Classifier for DecisionForest {
    fn predict(&self, input: &SparseVector) -> Result<Label> {
        ensure_dim(input, self.n_features)?;
        let probs = self.mean_probabilities(input);
        Ok(if probs[1] > probs[0] {
            Label::Spam
        } else {
            Label::Ham
        })
    }

    fn probabilities(&self, input: &SparseVector) -> Option<[f64; 2]> {
        Some(self.mean_probabilities(input))
    }

    fn decision_margin(&self, _input: &SparseVector) -> Option<f64> {
        None
    }

    fn term_weights(&self) -> Option<TermWeights<'_>> {
        None
    }

    fn capabilities(&self) -> CapabilityProfile {
        CapabilityProfile {
            confidence: ConfidenceSource::Probabilities,
            weights: WeightSource::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, low: [f64; 2], high: [f64; 2]) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(TreeNode::Leaf { value: low }),
            right: Box::new(TreeNode::Leaf { value: high }),
        }
    }

    #[test]
    fn test_single_tree_prediction() {
        let forest = DecisionForest::from_artifact(
            ForestArtifact {
                n_features: 2,
                trees: vec![stump(0, 0.5, [9.0, 1.0], [1.0, 9.0])],
            },
            2,
        )
        .unwrap();

        let low = SparseVector::new(vec![(0, 0.2)]);
        let high = SparseVector::new(vec![(0, 0.9)]);
        assert_eq!(forest.predict(&low).unwrap(), Label::Ham);
        assert_eq!(forest.predict(&high).unwrap(), Label::Spam);

        let probs = forest.probabilities(&high).unwrap();
        assert!((probs[1] - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_averages_across_trees() {
        let forest = DecisionForest::from_artifact(
            ForestArtifact {
                n_features: 1,
                trees: vec![
                    stump(0, 0.5, [1.0, 0.0], [0.0, 1.0]),
                    stump(0, 0.5, [1.0, 1.0], [1.0, 1.0]),
                ],
            },
            1,
        )
        .unwrap();

        // Tree one votes spam with certainty, tree two is split 50/50.
        let input = SparseVector::new(vec![(0, 1.0)]);
        let probs = forest.probabilities(&input).unwrap();
        assert!((probs[1] - 0.75).abs() < 1e-9);
        assert_eq!(forest.predict(&input).unwrap(), Label::Spam);
    }

    #[test]
    fn test_missing_feature_goes_left() {
        let forest = DecisionForest::from_artifact(
            ForestArtifact {
                n_features: 3,
                trees: vec![stump(2, 0.1, [1.0, 0.0], [0.0, 1.0])],
            },
            3,
        )
        .unwrap();

        // feature 2 absent from the input reads as 0.0 <= 0.1
        let input = SparseVector::new(vec![(0, 1.0)]);
        assert_eq!(forest.predict(&input).unwrap(), Label::Ham);
    }

    #[test]
    fn test_artifact_validation() {
        assert!(DecisionForest::from_artifact(
            ForestArtifact {
                n_features: 2,
                trees: vec![],
            },
            2,
        )
        .is_err());

        assert!(DecisionForest::from_artifact(
            ForestArtifact {
                n_features: 2,
                trees: vec![stump(7, 0.5, [1.0, 0.0], [0.0, 1.0])],
            },
            2,
        )
        .is_err());

        assert!(DecisionForest::from_artifact(
            ForestArtifact {
                n_features: 1,
                trees: vec![TreeNode::Leaf { value: [0.0, 0.0] }],
            },
            1,
        )
        .is_err());
    }

    #[test]
    fn test_tree_node_json_round_trip() {
        let tree = stump(1, 0.25, [3.0, 1.0], [1.0, 3.0]);
        let json = serde_json::to_string(&tree).unwrap();
        let parsed: TreeNode = serde_json::from_str(&json).unwrap();
        assert!(matches!(parsed, TreeNode::Split { feature: 1, .. }));
    }
}
