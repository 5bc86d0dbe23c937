use thiserror::Error;

/// Failure loading or running a regression model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model expects {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("model returned {count} values, expected exactly one")]
    OutputCount { count: usize },

    #[error("model returned non-finite prediction {0}")]
    NonFinitePrediction(f64),

    #[error("inference failed: {0}")]
    Runtime(String),

    #[error("failed to read model file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model JSON")]
    ParseJson(#[from] serde_json::Error),

    #[error("weight {index} is not finite: {value}")]
    NonFiniteWeight { index: usize, value: f64 },

    #[error("intercept is not finite: {0}")]
    NonFiniteIntercept(f64),

    #[error("feature {index} is '{model}' in the model but '{spec}' in the feature layout")]
    FeatureNameMismatch {
        index: usize,
        model: String,
        spec: String,
    },
}
