//! Model registry
//!
//! Loads the vectorizer and every model artifact from a directory once at
//! startup. The registry is immutable afterwards; request handlers share it
//! behind an `Arc` and read it without synchronization. New artifacts are
//! picked up by restarting the service.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::classifier::{CapabilityProfile, Classifier};
use super::forest::{DecisionForest, ForestArtifact};
use super::linear::{LinearArtifact, LinearSvm, LogisticRegression};
use super::naive_bayes::{NaiveBayes, NaiveBayesArtifact};
use super::vectorizer::{TfidfVectorizer, VectorizerArtifact};
use crate::error::{Result, SpamCheckError};

pub const VECTORIZER_FILE: &str = "vectorizer.json";

/// Kind-specific parameters of a model artifact file
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelParams {
    NaiveBayes(NaiveBayesArtifact),
    LogisticRegression(LinearArtifact),
    LinearSvm(LinearArtifact),
    RandomForest(ForestArtifact),
}

/// One model artifact file: a display name plus kind-tagged parameters
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    #[serde(flatten)]
    pub params: ModelParams,
}

/// A loaded model with its registration-time capability profile
pub struct RegisteredModel {
    pub name: String,
    pub kind: &'static str,
    pub model: Arc<dyn Classifier>,
    pub profile: CapabilityProfile,
}

pub struct ModelRegistry {
    vectorizer: TfidfVectorizer,
    models: Vec<RegisteredModel>,
    primary: usize,
}

impl ModelRegistry {
    /// Load all artifacts from a directory. `primary` selects the model used
    /// for the main verdict, by kind or by display name.
    pub fn load(dir: &Path, primary: &str) -> Result<Self> {
        let vectorizer_path = dir.join(VECTORIZER_FILE);
        let content = fs::read_to_string(&vectorizer_path).map_err(|e| {
            SpamCheckError::Artifact(format!(
                "Failed to read {}: {}",
                vectorizer_path.display(),
                e
            ))
        })?;
        let artifact: VectorizerArtifact = serde_json::from_str(&content)
            .map_err(|e| SpamCheckError::Artifact(format!("Invalid vectorizer artifact: {}", e)))?;
        let vectorizer = TfidfVectorizer::from_artifact(artifact)?;
        let dim = vectorizer.dim();
        info!("Loaded vectorizer with {} vocabulary terms", dim);

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| {
                SpamCheckError::Artifact(format!(
                    "Failed to read model directory {}: {}",
                    dir.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension().map(|ext| ext == "json").unwrap_or(false)
                    && path
                        .file_name()
                        .map(|name| name != VECTORIZER_FILE)
                        .unwrap_or(false)
            })
            .collect();
        paths.sort();

        let mut models = Vec::new();
        for path in paths {
            let content = fs::read_to_string(&path).map_err(|e| {
                SpamCheckError::Artifact(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let artifact: ModelArtifact = serde_json::from_str(&content).map_err(|e| {
                SpamCheckError::Artifact(format!(
                    "Invalid model artifact {}: {}",
                    path.display(),
                    e
                ))
            })?;

            let (kind, model): (&'static str, Arc<dyn Classifier>) = match artifact.params {
                ModelParams::NaiveBayes(params) => (
                    "naive_bayes",
                    Arc::new(NaiveBayes::from_artifact(params, dim)?),
                ),
                ModelParams::LogisticRegression(params) => (
                    "logistic_regression",
                    Arc::new(LogisticRegression::from_artifact(params, dim)?),
                ),
                ModelParams::LinearSvm(params) => (
                    "linear_svm",
                    Arc::new(LinearSvm::from_artifact(params, dim)?),
                ),
                ModelParams::RandomForest(params) => (
                    "random_forest",
                    Arc::new(DecisionForest::from_artifact(params, dim)?),
                ),
            };

            let profile = model.capabilities();
            info!("Loaded model '{}' ({})", artifact.name, profile.describe());
            models.push(RegisteredModel {
                name: artifact.name,
                kind,
                model,
                profile,
            });
        }

        if models.is_empty() {
            return Err(SpamCheckError::Artifact(format!(
                "No model artifacts found in {}",
                dir.display()
            )));
        }

        let primary_index = models
            .iter()
            .position(|m| m.kind == primary || m.name.eq_ignore_ascii_case(primary))
            .ok_or_else(|| SpamCheckError::UnknownModel(primary.to_string()))?;

        Ok(Self {
            vectorizer,
            models,
            primary: primary_index,
        })
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// All loaded models in deterministic (file name) order
    pub fn models(&self) -> &[RegisteredModel] {
        &self.models
    }

    /// The model answering for the primary verdict
    pub fn primary(&self) -> &RegisteredModel {
        &self.models[self.primary]
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
