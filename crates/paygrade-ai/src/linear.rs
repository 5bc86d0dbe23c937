//! Linear regressor loaded from exported JSON coefficients.

use std::path::Path;

use paygrade_core::{FeatureSpec, FeatureVector};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ModelError;
use crate::regressor::{ModelInfo, Regressor};

/// `intercept + Σ weight·feature` over the encoded vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub model_id: String,
    #[serde(default = "default_model_type")]
    pub model_type: String,
    /// One weight per encoded feature, in vector order.
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Optional encoded column names, checked against the feature layout.
    #[serde(default)]
    pub feature_names: Vec<String>,
}

fn default_model_type() -> String {
    "LinearRegression".to_string()
}

impl LinearRegressor {
    /// Parse and validate against `spec`.
    pub fn from_json(json: &str, spec: &FeatureSpec) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate(spec)?;
        Ok(model)
    }

    pub fn from_file(path: &Path, spec: &FeatureSpec) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        let model = Self::from_json(&content, spec)?;
        info!(
            model_id = %model.model_id,
            width = model.weights.len(),
            path = %path.display(),
            "loaded linear model"
        );
        Ok(model)
    }

    /// Check the coefficients fit the feature layout.
    pub fn validate(&self, spec: &FeatureSpec) -> Result<(), ModelError> {
        if self.weights.len() != spec.width() {
            return Err(ModelError::ShapeMismatch {
                expected: spec.width(),
                got: self.weights.len(),
            });
        }
        for (index, &value) in self.weights.iter().enumerate() {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteWeight { index, value });
            }
        }
        if !self.intercept.is_finite() {
            return Err(ModelError::NonFiniteIntercept(self.intercept));
        }

        // Names are optional; when present they must match exactly.
        if !self.feature_names.is_empty() {
            let expected = spec.feature_names();
            if self.feature_names.len() != expected.len() {
                return Err(ModelError::ShapeMismatch {
                    expected: expected.len(),
                    got: self.feature_names.len(),
                });
            }
            if let Some((index, (model_name, spec_name))) = self
                .feature_names
                .iter()
                .zip(&expected)
                .enumerate()
                .find(|(_, (m, s))| m != s)
            {
                return Err(ModelError::FeatureNameMismatch {
                    index,
                    model: model_name.clone(),
                    spec: spec_name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Regressor for LinearRegressor {
    fn infer(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.weights.len(),
                got: features.len(),
            });
        }
        let dot: f64 = self
            .weights
            .iter()
            .zip(features.as_slice())
            .map(|(w, &x)| w * f64::from(x))
            .sum();
        Ok(self.intercept + dot)
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo {
            model_type: self.model_type.clone(),
            model_id: self.model_id.clone(),
            n_features: self.weights.len(),
            params: serde_json::json!({
                "intercept": self.intercept,
                "n_weights": self.weights.len(),
            }),
        }
    }
}
