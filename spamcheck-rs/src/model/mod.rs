//! Model loading and inference
//!
//! Inference over JSON artifacts exported from offline training: a TF-IDF
//! vectorizer plus one or more classifiers, loaded once at startup into an
//! immutable registry.

pub mod classifier;
pub mod forest;
pub mod linear;
pub mod naive_bayes;
pub mod registry;
pub mod vectorizer;

pub use classifier::{
    CapabilityProfile, Classifier, ConfidenceSource, Label, TermWeights, WeightSource,
};
pub use registry::{ModelRegistry, RegisteredModel};
pub use vectorizer::{SparseVector, TfidfVectorizer};
