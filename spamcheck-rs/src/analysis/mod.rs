//! Analysis pipeline
//!
//! Turns a raw input text and a classifier verdict into an explainable
//! report: detected warning signals, structured pattern hits, a four tier
//! risk level, safety guidance, per-word contribution scores, and a
//! cross-model agreement comparison.

pub mod ensemble;
pub mod importance;
pub mod indicators;
pub mod patterns;
pub mod recommend;
pub mod report;
pub mod risk;

pub use ensemble::{EnsembleReport, ModelVote};
pub use importance::WordContribution;
pub use indicators::{IndicatorSet, SignalExtractor};
pub use patterns::{PatternExtractor, PatternSet};
pub use report::{
    AnalysisEngine, AnalysisReport, BatchEntry, BatchItem, BatchReport, BatchSummary,
};
pub use risk::RiskLevel;

/// Round to a fixed number of decimal places for JSON output
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
