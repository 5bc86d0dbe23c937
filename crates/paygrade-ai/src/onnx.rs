//! ONNX Runtime regressor.
//!
//! Runs a regressor exported to ONNX (e.g. via skl2onnx) on a single
//! `[1, width]` float32 row and expects exactly one output value.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use paygrade_core::FeatureVector;
use tracing::info;

use crate::error::ModelError;
use crate::regressor::{ModelInfo, Regressor};

/// Regression model executed by ONNX Runtime.
///
/// Running a session needs exclusive access, so it sits behind a mutex; the
/// regressor itself is shared read-only between handlers.
pub struct OnnxRegressor {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    width: usize,
    model_id: String,
}

impl OnnxRegressor {
    /// Load a model file and check its declared input width against `width`.
    pub fn load(model_path: &Path, width: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(model_path.exists(), "model not found: {model_path:?}");

        let session = Session::builder()?.commit_from_file(model_path)?;

        let input = session
            .inputs()
            .first()
            .ok_or_else(|| anyhow::anyhow!("model declares no inputs"))?;
        let input_name = input.name().to_string();
        // Dynamic dimensions are reported as -1 and skipped.
        if let Some(declared) = infer_width(input.dtype()) {
            anyhow::ensure!(
                declared == width,
                "model input '{input_name}' expects {declared} features, feature layout has {width}"
            );
        }

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| anyhow::anyhow!("model declares no outputs"))?;

        let model_id = model_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx".to_string());

        info!(width, input = %input_name, model = %model_path.display(), "loaded onnx model");
        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            width,
            model_id,
        })
    }
}

impl Regressor for OnnxRegressor {
    fn infer(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if features.len() != self.width {
            return Err(ModelError::ShapeMismatch {
                expected: self.width,
                got: features.len(),
            });
        }

        let shape = [1i64, self.width as i64];
        let tensor = Tensor::from_array((shape, features.as_slice().to_vec().into_boxed_slice()))
            .map_err(runtime)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Runtime("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(runtime)?;

        let (_, data) = outputs[0].try_extract_tensor::<f32>().map_err(runtime)?;
        match data {
            [value] => Ok(f64::from(*value)),
            other => Err(ModelError::OutputCount { count: other.len() }),
        }
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo {
            model_type: "OnnxRegressor".to_string(),
            model_id: self.model_id.clone(),
            n_features: self.width,
            params: serde_json::json!({
                "input": self.input_name,
                "output": self.output_name,
            }),
        }
    }
}

fn runtime(e: ort::Error) -> ModelError {
    ModelError::Runtime(e.to_string())
}

/// Last dimension of the model's input tensor, if it is fixed.
fn infer_width(input_type: &ort::value::ValueType) -> Option<usize> {
    match input_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}
