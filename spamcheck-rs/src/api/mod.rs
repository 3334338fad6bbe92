//! REST API module for spamcheck-rs
//!
//! Provides HTTP API endpoints for classification and scan history

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::ApiServer;
