//! Classification API endpoints
//!
//! REST API for text analysis, batch scanning, and scan history.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::analysis::{AnalysisEngine, AnalysisReport, BatchItem, BatchReport};
use crate::error::SpamCheckError;
use crate::history::{ScanRecord, ScanStats, ScanStore};

/// Shared API state
pub struct AppState {
    /// None when no model artifacts could be loaded at startup
    pub engine: Option<Arc<AnalysisEngine>>,
    pub store: ScanStore,
    pub batch_limit: usize,
}

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

/// Predict request
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: String,
}

/// Batch predict request
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub items: Vec<BatchItem>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: bool,
    pub model_count: usize,
    pub version: String,
    pub message: String,
}

/// Loaded model response
#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub name: String,
    pub kind: String,
    pub capabilities: String,
    pub primary: bool,
}

/// History clear response
#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub deleted: u64,
}

// === API Handlers ===

/// Service health and model availability
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    let model_count = state
        .engine
        .as_ref()
        .map(|e| e.registry().len())
        .unwrap_or(0);

    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        models_loaded: state.engine.is_some(),
        model_count,
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Spam detection API is running".to_string(),
    }))
}

/// Analyze a single text
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> (StatusCode, Json<ApiResponse<AnalysisReport>>) {
    let Some(engine) = state.engine.as_ref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(
                "Models not loaded. Please train the model first.",
            )),
        );
    };

    match engine.analyze(&req.text) {
        Ok(report) => {
            if let Err(e) = state.store.record(&req.text, &report).await {
                warn!("Failed to record scan: {}", e);
            }
            (StatusCode::OK, Json(ApiResponse::success(report)))
        }
        Err(SpamCheckError::InvalidInput(msg)) => {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::error(&msg)))
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(&format!("Prediction failed: {}", e))),
        ),
    }
}

/// Analyze a batch of texts concurrently
pub async fn predict_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> (StatusCode, Json<ApiResponse<BatchReport>>) {
    let Some(engine) = state.engine.as_ref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(
                "Models not loaded. Please train the model first.",
            )),
        );
    };

    if req.items.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("No items provided for batch processing")),
        );
    }

    if req.items.len() > state.batch_limit {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(&format!(
                "Maximum {} items allowed per batch",
                state.batch_limit
            ))),
        );
    }

    let report = Arc::clone(engine).analyze_batch(req.items).await;
    (StatusCode::OK, Json(ApiResponse::success(report)))
}

/// List loaded models and their capabilities
pub async fn list_models(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<ModelInfoResponse>>> {
    let models = match state.engine.as_ref() {
        Some(engine) => {
            let registry = engine.registry();
            let primary_name = registry.primary().name.clone();
            registry
                .models()
                .iter()
                .map(|m| ModelInfoResponse {
                    name: m.name.clone(),
                    kind: m.kind.to_string(),
                    capabilities: m.profile.describe(),
                    primary: m.name == primary_name,
                })
                .collect()
        }
        None => Vec::new(),
    };

    Json(ApiResponse::success(models))
}

/// Recent scan history
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> (StatusCode, Json<ApiResponse<Vec<ScanRecord>>>) {
    let limit = params
        .get("limit")
        .and_then(|s| s.parse().ok())
        .unwrap_or(50);

    match state.store.recent(limit).await {
        Ok(records) => (StatusCode::OK, Json(ApiResponse::success(records))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(&format!("Failed to get history: {}", e))),
        ),
    }
}

/// Aggregate scan statistics
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<ScanStats>>) {
    match state.store.stats().await {
        Ok(stats) => (StatusCode::OK, Json(ApiResponse::success(stats))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(&format!("Failed to get stats: {}", e))),
        ),
    }
}

/// Clear the scan history
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<ClearHistoryResponse>>) {
    match state.store.clear().await {
        Ok(deleted) => (
            StatusCode::OK,
            Json(ApiResponse::success(ClearHistoryResponse { deleted })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(&format!(
                "Failed to clear history: {}",
                e
            ))),
        ),
    }
}
