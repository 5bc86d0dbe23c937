//! Inference layer: feature encoding, model invocation, and response assembly.

pub mod batch;
pub mod encoder;
mod error;
mod linear;
#[cfg(feature = "onnx")]
mod onnx;
mod predictor;
mod regressor;
pub mod response;

pub use batch::{encode_batch, requests_from_batches};
pub use encoder::encode;
pub use error::ModelError;
pub use linear::LinearRegressor;
#[cfg(feature = "onnx")]
pub use onnx::OnnxRegressor;
pub use predictor::{PredictError, Predictor};
pub use regressor::{ModelInfo, Regressor, load_regressor};
pub use response::PredictionResponse;
