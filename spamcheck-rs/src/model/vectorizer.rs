//! TF-IDF vectorization
//!
//! Maps normalized text onto the fixed vocabulary the classifiers were
//! trained against. Term counts are weighted by inverse document frequency
//! and l2-normalized, matching the training-side transform.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, SpamCheckError};

/// Serialized form of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Term to feature column index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature column
    pub idf: Vec<f64>,
}

/// Sparse feature vector, entries sorted by feature index
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(index, _)| *index);
        Self {
            indices: entries.iter().map(|(index, _)| *index).collect(),
            values: entries.iter().map(|(_, value)| *value).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate non-zero entries as (feature index, value)
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Highest feature index present, if any
    pub fn max_index(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Dot product against a dense weight vector
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter()
            .map(|(index, value)| value * dense.get(index).copied().unwrap_or(0.0))
            .sum()
    }

    /// Value at a feature index (0.0 when absent)
    pub fn value_at(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }
}

/// TF-IDF vectorizer over a fixed vocabulary
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
    token_re: Regex,
}

impl TfidfVectorizer {
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        let dim = artifact.idf.len();
        if artifact.vocabulary.len() != dim {
            return Err(SpamCheckError::Artifact(format!(
                "Vectorizer vocabulary has {} terms but idf has {} entries",
                artifact.vocabulary.len(),
                dim
            )));
        }

        let mut terms = vec![String::new(); dim];
        for (term, &index) in &artifact.vocabulary {
            if index >= dim {
                return Err(SpamCheckError::Artifact(format!(
                    "Vectorizer term '{}' maps to out-of-range index {}",
                    term, index
                )));
            }
            terms[index] = term.clone();
        }
        if terms.iter().any(|t| t.is_empty()) {
            return Err(SpamCheckError::Artifact(
                "Vectorizer vocabulary does not cover every feature index".to_string(),
            ));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            terms,
            idf: artifact.idf,
            token_re: Regex::new(r"\b\w\w+\b")?,
        })
    }

    /// Number of features in the vocabulary
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    /// Term at a feature index
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(|t| t.as_str())
    }

    /// Transform normalized text into an l2-normalized TF-IDF vector.
    /// Tokens shorter than two word characters and out-of-vocabulary tokens
    /// are dropped.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        let lowered = text.to_lowercase();
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in self.token_re.find_iter(&lowered) {
            if let Some(&index) = self.vocabulary.get(token.as_str()) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for entry in &mut entries {
                entry.1 /= norm;
            }
        }

        SparseVector::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vectorizer() -> TfidfVectorizer {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("free".to_string(), 0);
        vocabulary.insert("money".to_string(), 1);
        vocabulary.insert("meeting".to_string(), 2);
        TfidfVectorizer::from_artifact(VectorizerArtifact {
            vocabulary,
            idf: vec![1.2, 1.5, 1.0],
        })
        .unwrap()
    }

    #[test]
    fn test_vectorize_weights_and_normalizes() {
        let vectorizer = test_vectorizer();
        let vector = vectorizer.vectorize("free money free");

        // tf * idf: free = 2 * 1.2 = 2.4, money = 1 * 1.5 = 1.5
        let norm = (2.4f64 * 2.4 + 1.5 * 1.5).sqrt();
        assert_eq!(vector.len(), 2);
        assert!((vector.value_at(0) - 2.4 / norm).abs() < 1e-9);
        assert!((vector.value_at(1) - 1.5 / norm).abs() < 1e-9);
        assert_eq!(vector.value_at(2), 0.0);
    }

    #[test]
    fn test_vectorize_ignores_unknown_and_short_tokens() {
        let vectorizer = test_vectorizer();
        let vector = vectorizer.vectorize("a free lunch");
        assert_eq!(vector.len(), 1);
        assert!((vector.value_at(0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vectorize_empty_text() {
        let vectorizer = test_vectorizer();
        assert!(vectorizer.vectorize("").is_empty());
        assert!(vectorizer.vectorize("xyz unseen words").is_empty());
    }

    #[test]
    fn test_term_lookup() {
        let vectorizer = test_vectorizer();
        assert_eq!(vectorizer.term(1), Some("money"));
        assert_eq!(vectorizer.term(7), None);
    }

    #[test]
    fn test_rejects_idf_length_mismatch() {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("free".to_string(), 0);
        let result = TfidfVectorizer::from_artifact(VectorizerArtifact {
            vocabulary,
            idf: vec![1.0, 2.0],
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("free".to_string(), 5);
        let result = TfidfVectorizer::from_artifact(VectorizerArtifact {
            vocabulary,
            idf: vec![1.0],
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_sparse_dot_and_lookup() {
        let vector = SparseVector::new(vec![(2, 0.5), (0, 1.0)]);
        assert_eq!(vector.max_index(), Some(2));
        assert!((vector.dot(&[2.0, 10.0, 4.0]) - 4.0).abs() < 1e-9);
        // out-of-range weights contribute nothing
        assert!((vector.dot(&[2.0]) - 2.0).abs() < 1e-9);
    }
}
