//! Word importance ranking
//!
//! Explains which input terms pulled the primary model towards its verdict,
//! using whatever weight table that model exposes. Models without one simply
//! contribute no ranking, that is a degradation and never an error.

use serde::Serialize;

use crate::model::{Classifier, Label, SparseVector, TermWeights, TfidfVectorizer};

pub const MAX_WORDS: usize = 20;

/// One term's pull on the verdict, positive values lean spam
#[derive(Debug, Clone, Serialize)]
pub struct WordContribution {
    pub word: String,
    pub importance: f64,
    #[serde(rename = "type")]
    pub kind: Label,
}

/// Rank the terms present in the input by absolute importance.
///
/// Linear models contribute their signed coefficients directly; log-prob
/// models contribute the spam/ham log probability difference per term.
pub fn rank(
    input: &SparseVector,
    model: &dyn Classifier,
    vectorizer: &TfidfVectorizer,
) -> Vec<WordContribution> {
    let weights = match model.term_weights() {
        Some(weights) => weights,
        None => return Vec::new(),
    };

    let mut contributions: Vec<WordContribution> = input
        .iter()
        .filter_map(|(index, _)| {
            let importance = match weights {
                TermWeights::Linear(coef) => coef.get(index).copied()?,
                TermWeights::LogProb { ham, spam } => spam.get(index)? - ham.get(index)?,
            };
            let word = vectorizer.term(index)?.to_string();
            let kind = if importance > 0.0 { Label::Spam } else { Label::Ham };
            Some(WordContribution {
                word,
                importance,
                kind,
            })
        })
        .collect();

    contributions.sort_by(|a, b| b.importance.abs().total_cmp(&a.importance.abs()));
    contributions.truncate(MAX_WORDS);
    contributions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::forest::{DecisionForest, ForestArtifact, TreeNode};
    use crate::model::linear::{LinearArtifact, LogisticRegression};
    use crate::model::naive_bayes::{NaiveBayes, NaiveBayesArtifact};
    use crate::model::vectorizer::VectorizerArtifact;
    use std::collections::HashMap;

    fn vectorizer(terms: &[&str]) -> TfidfVectorizer {
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();
        TfidfVectorizer::from_artifact(VectorizerArtifact {
            idf: vec![1.0; terms.len()],
            vocabulary,
        })
        .unwrap()
    }

    #[test]
    fn test_linear_coefficients_rank_by_magnitude() {
        let vectorizer = vectorizer(&["free", "hello", "meeting"]);
        let model = LogisticRegression::from_artifact(
            LinearArtifact {
                coef: vec![2.0, -3.0, 0.5],
                intercept: 0.0,
            },
            3,
        )
        .unwrap();
        let input = SparseVector::new(vec![(0, 0.6), (1, 0.4)]);

        let ranked = rank(&input, &model, &vectorizer);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].word, "hello");
        assert_eq!(ranked[0].importance, -3.0);
        assert_eq!(ranked[0].kind, Label::Ham);
        assert_eq!(ranked[1].word, "free");
        assert_eq!(ranked[1].kind, Label::Spam);
    }

    #[test]
    fn test_log_prob_difference() {
        let vectorizer = vectorizer(&["free", "meeting"]);
        let model = NaiveBayes::from_artifact(
            NaiveBayesArtifact {
                class_log_prior: vec![-0.7, -0.7],
                feature_log_prob: vec![vec![-3.0, -0.5], vec![-0.5, -3.0]],
            },
            2,
        )
        .unwrap();
        let input = SparseVector::new(vec![(0, 1.0), (1, 1.0)]);

        let ranked = rank(&input, &model, &vectorizer);
        assert_eq!(ranked.len(), 2);
        // importance = spam log prob - ham log prob
        assert_eq!(ranked[0].importance, 2.5);
        assert_eq!(ranked[0].kind, Label::Spam);
        assert_eq!(ranked[1].importance, -2.5);
        assert_eq!(ranked[1].kind, Label::Ham);
    }

    #[test]
    fn test_no_weight_table_means_empty_ranking() {
        let vectorizer = vectorizer(&["free", "meeting"]);
        let model = DecisionForest::from_artifact(
            ForestArtifact {
                n_features: 2,
                trees: vec![TreeNode::Leaf { value: [3.0, 1.0] }],
            },
            2,
        )
        .unwrap();
        let input = SparseVector::new(vec![(0, 1.0)]);

        assert!(rank(&input, &model, &vectorizer).is_empty());
    }

    #[test]
    fn test_truncates_to_top_twenty() {
        let terms: Vec<String> = (0..25).map(|i| format!("w{:02}", i)).collect();
        let term_refs: Vec<&str> = terms.iter().map(|s| s.as_str()).collect();
        let vectorizer = vectorizer(&term_refs);
        let model = LogisticRegression::from_artifact(
            LinearArtifact {
                coef: (0..25).map(|i| i as f64 + 1.0).collect(),
                intercept: 0.0,
            },
            25,
        )
        .unwrap();
        let input = SparseVector::new((0..25).map(|i| (i, 0.1)).collect());

        let ranked = rank(&input, &model, &vectorizer);
        assert_eq!(ranked.len(), MAX_WORDS);
        assert_eq!(ranked[0].word, "w24");
        assert_eq!(ranked[0].importance, 25.0);
        assert_eq!(ranked[19].importance, 6.0);
    }

    #[test]
    fn test_type_field_name_in_json() {
        let contribution = WordContribution {
            word: "free".to_string(),
            importance: 1.5,
            kind: Label::Spam,
        };
        let json = serde_json::to_value(&contribution).unwrap();
        assert_eq!(json["type"], "spam");
    }
}
