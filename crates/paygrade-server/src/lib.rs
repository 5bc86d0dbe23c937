//! HTTP API for salary prediction.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Spec and model load status
//! - `POST /api/predict` - Predict an annual salary from job attributes
//! - `GET /api/model-info` - Metadata about the loaded model

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use paygrade_ai::{PredictError, PredictionResponse, Predictor};
use paygrade_core::{FeatureSpec, PredictionRequest};
use serde::Serialize;
use tracing::{error, info, warn};

/// Detail reported when no model is loaded; the cause is only logged.
const MODEL_NOT_LOADED: &str = "Please check server logs.";

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    spec: &'static FeatureSpec,
    predictor: Option<Arc<Predictor>>,
}

impl AppState {
    pub fn ready(predictor: Predictor) -> Self {
        Self {
            spec: predictor.spec(),
            predictor: Some(Arc::new(predictor)),
        }
    }

    /// State for a server whose model failed to load.
    pub fn unavailable(spec: &'static FeatureSpec) -> Self {
        Self {
            spec,
            predictor: None,
        }
    }

    /// Load the model at `path`; a failure yields an `unavailable` state.
    pub fn load(spec: &'static FeatureSpec, path: &Path) -> Self {
        match Predictor::load(spec, path) {
            Ok(predictor) => {
                info!(model = %path.display(), "model and feature layout loaded");
                Self::ready(predictor)
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), model = %path.display(), "error loading model");
                Self::unavailable(spec)
            }
        }
    }

    fn predictor(&self) -> Result<Arc<Predictor>, PredictError> {
        self.predictor
            .clone()
            .ok_or_else(|| PredictError::SpecUnavailable(MODEL_NOT_LOADED.to_string()))
    }
}

/// Build the router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/predict", post(predict))
        .route("/api/model-info", get(model_info))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}

// ── Responses ──

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub model: &'static str,
    pub preprocessor: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub model_type: String,
    pub model_id: String,
    pub model_params: serde_json::Value,
    /// Raw training-frame columns the encoder fills, before one-hot expansion.
    pub expected_features: Vec<&'static str>,
    pub n_features: usize,
    /// Width of the encoded vector the model consumes.
    pub encoded_width: usize,
    pub note: &'static str,
}

/// Error body: `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

// ── Handlers ──

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let loaded = |ok: bool| if ok { "loaded" } else { "not loaded" };
    Json(HealthResponse {
        status: "healthy",
        message: "API is running",
        model: loaded(state.predictor.is_some()),
        preprocessor: loaded(state.spec.validate().is_ok()),
    })
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = payload?;
    let predictor = state.predictor()?;

    // Inference may block on native compute.
    let response = tokio::task::spawn_blocking(move || predictor.predict(&request))
        .await
        .map_err(|e| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: format!("prediction task failed: {e}"),
        })??;

    Ok(Json(response))
}

async fn model_info(State(state): State<AppState>) -> Result<Json<ModelInfoResponse>, ApiError> {
    let predictor = state.predictor()?;
    let info = predictor.model_info();
    let expected_features = state.spec.input_features();

    Ok(Json(ModelInfoResponse {
        model_type: info.model_type,
        model_id: info.model_id,
        model_params: info.params,
        n_features: expected_features.len(),
        expected_features,
        encoded_width: info.n_features,
        note: "This model expects skill data which is not collected in the form. \
               Default values are used for skills.",
    }))
}
