//! spamcheck-rs: Spam classification and explainability service
//!
//! A spam/ham text classifier with an explainable risk report, serving
//! pre-trained model artifacts over a REST API.
//!
//! # Features
//!
//! - **Classification**: Naive Bayes, logistic regression, linear SVM, and
//!   random forest inference over tf-idf vectors
//! - **Explainability**: Indicator extraction, per-word importance, risk
//!   tiers, and safety recommendations in every report
//! - **Ensemble**: All loaded models vote; agreement is reported alongside
//!   the primary verdict
//! - **History**: Scan log and aggregate statistics in sqlite
//!
//! # Example
//!
//! ```no_run
//! use spamcheck_rs::analysis::AnalysisEngine;
//! use spamcheck_rs::config::Config;
//! use spamcheck_rs::model::ModelRegistry;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let registry = ModelRegistry::load(
//!         Path::new(&config.models.dir),
//!         &config.models.primary,
//!     )?;
//!
//!     let engine = AnalysisEngine::new(Arc::new(registry), (&config.analysis).into())?;
//!     let report = engine.analyze("WINNER! Claim your free prize now!")?;
//!     println!("{}: {:.4}", report.prediction, report.confidence);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`model`]: Model artifacts, vectorizer, and classifier inference
//! - [`text`]: Text normalization pipeline
//! - [`analysis`]: Report assembly (indicators, risk, importance, ensemble)
//! - [`history`]: Scan log persistence
//! - [`api`]: REST API server

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod text;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamCheckError};
