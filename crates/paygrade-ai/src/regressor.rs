//! The model invocation contract and artifact loading.

use std::path::Path;

use paygrade_core::{FeatureSpec, FeatureVector};
use serde::Serialize;

use crate::error::ModelError;
use crate::linear::LinearRegressor;

/// A loaded regression model: one encoded row in, one prediction out.
///
/// Implementations are shared across request handlers and must not mutate
/// observable state during [`Regressor::infer`].
pub trait Regressor: Send + Sync {
    /// Run the model on exactly one row.
    fn infer(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Static metadata about the loaded artifact.
    fn describe(&self) -> ModelInfo;
}

/// Metadata reported by `/api/model-info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub model_id: String,
    /// Input width the artifact accepts.
    pub n_features: usize,
    pub params: serde_json::Value,
}

/// Load a model artifact, choosing the implementation by file extension.
///
/// `.json` loads a [`LinearRegressor`]; `.onnx` loads an ONNX Runtime
/// session (requires the `onnx` feature).
pub fn load_regressor(path: &Path, spec: &FeatureSpec) -> anyhow::Result<Box<dyn Regressor>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Box::new(LinearRegressor::from_file(path, spec)?)),
        #[cfg(feature = "onnx")]
        Some("onnx") => Ok(Box::new(crate::onnx::OnnxRegressor::load(
            path,
            spec.width(),
        )?)),
        #[cfg(not(feature = "onnx"))]
        Some("onnx") => anyhow::bail!(
            "{} is an ONNX model but this build lacks the `onnx` feature",
            path.display()
        ),
        _ => anyhow::bail!(
            "unrecognised model file {}: expected .json or .onnx",
            path.display()
        ),
    }
}
