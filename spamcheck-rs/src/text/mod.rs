//! Text processing module
//!
//! Provides the normalization pipeline applied before vectorization.

pub mod normalize;

pub use normalize::{NormalizeOptions, Normalizer};
