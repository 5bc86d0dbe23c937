//! Encode → infer → assemble pipeline.

use std::path::Path;

use anyhow::Context;
use paygrade_core::{EncodeError, FeatureSpec, FeatureVector, PredictionRequest};
use thiserror::Error;
use tracing::{error, info};

use crate::encoder::encode;
use crate::error::ModelError;
use crate::regressor::{ModelInfo, Regressor, load_regressor};
use crate::response::{self, PredictionResponse};

/// Why a prediction could not be produced.
///
/// Each kind is reported separately so spec/artifact drift can be told apart
/// from runtime failures.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model not loaded: {0}")]
    SpecUnavailable(String),

    #[error("Preprocessing error: {0}")]
    Encoding(#[from] EncodeError),

    #[error("Prediction error: {0}")]
    Invocation(#[from] ModelError),
}

/// A validated feature layout paired with a loaded model.
///
/// Built once at start-up and shared read-only by every request.
pub struct Predictor {
    spec: &'static FeatureSpec,
    regressor: Box<dyn Regressor>,
}

impl Predictor {
    /// Pair `spec` with `regressor`, checking both agree on the input width.
    pub fn new(
        spec: &'static FeatureSpec,
        regressor: Box<dyn Regressor>,
    ) -> Result<Self, PredictError> {
        spec.validate()
            .map_err(|e| PredictError::SpecUnavailable(format!("feature layout: {e}")))?;

        let info = regressor.describe();
        if info.n_features != spec.width() {
            return Err(PredictError::SpecUnavailable(format!(
                "model '{}' accepts {} features, feature layout '{}' produces {}",
                info.model_id,
                info.n_features,
                spec.name,
                spec.width()
            )));
        }

        Ok(Self { spec, regressor })
    }

    /// Load the model artifact at `path` and pair it with `spec`.
    pub fn load(spec: &'static FeatureSpec, path: &Path) -> anyhow::Result<Self> {
        let regressor = load_regressor(path, spec)
            .with_context(|| format!("loading model {}", path.display()))?;
        Ok(Self::new(spec, regressor)?)
    }

    pub fn spec(&self) -> &'static FeatureSpec {
        self.spec
    }

    pub fn model_info(&self) -> ModelInfo {
        self.regressor.describe()
    }

    pub fn encode(&self, request: &PredictionRequest) -> Result<FeatureVector, PredictError> {
        Ok(encode(request, self.spec)?)
    }

    /// Run the full pipeline for one request.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictError> {
        let features = self.encode(request).inspect_err(|e| {
            error!(error = %e, spec = self.spec.name, "encoding failed");
        })?;

        let raw = self.regressor.infer(&features).inspect_err(|e| {
            error!(error = %e, "inference failed");
        })?;

        let model_type = self.regressor.describe().model_type;
        let response = response::assemble(raw, request.clone(), &model_type)?;
        info!(
            raw,
            predicted_salary = response.predicted_salary,
            job_title = %request.job_title,
            "prediction complete"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygrade_core::SALARY_SPEC;

    /// Returns a fixed value and records nothing.
    struct Constant {
        value: f64,
        width: usize,
    }

    impl Regressor for Constant {
        fn infer(&self, features: &FeatureVector) -> Result<f64, ModelError> {
            assert_eq!(features.len(), self.width);
            Ok(self.value)
        }

        fn describe(&self) -> ModelInfo {
            ModelInfo {
                model_type: "Constant".into(),
                model_id: "constant".into(),
                n_features: self.width,
                params: serde_json::Value::Null,
            }
        }
    }

    struct Failing;

    impl Regressor for Failing {
        fn infer(&self, _: &FeatureVector) -> Result<f64, ModelError> {
            Err(ModelError::Runtime("boom".into()))
        }

        fn describe(&self) -> ModelInfo {
            ModelInfo {
                model_type: "Failing".into(),
                model_id: "failing".into(),
                n_features: 90,
                params: serde_json::Value::Null,
            }
        }
    }

    fn request() -> PredictionRequest {
        PredictionRequest {
            job_title: "Data Scientist".into(),
            experience_level: "SE".into(),
            years_experience: "3-5".into(),
            employment_type: "FT".into(),
            remote_work: "50".into(),
            company_size: "M".into(),
            country: "United States".into(),
            industry: "Technology".into(),
            education: "Master".into(),
        }
    }

    #[test]
    fn predict_runs_full_pipeline() {
        let predictor = Predictor::new(
            &SALARY_SPEC,
            Box::new(Constant {
                value: 142_500.456,
                width: 90,
            }),
        )
        .unwrap();

        let response = predictor.predict(&request()).unwrap();
        assert!(response.success);
        assert_eq!(response.predicted_salary, 142_500.46);
        assert_eq!(response.input, request());
        assert_eq!(response.note, "Prediction based on trained Constant model");
    }

    #[test]
    fn negative_prediction_is_clamped() {
        let predictor = Predictor::new(
            &SALARY_SPEC,
            Box::new(Constant {
                value: -5_000.0,
                width: 90,
            }),
        )
        .unwrap();
        assert_eq!(predictor.predict(&request()).unwrap().predicted_salary, 0.0);
    }

    #[test]
    fn width_disagreement_is_spec_unavailable() {
        let err = Predictor::new(
            &SALARY_SPEC,
            Box::new(Constant {
                value: 0.0,
                width: 89,
            }),
        )
        .err()
        .unwrap();
        assert!(matches!(err, PredictError::SpecUnavailable(_)));
        assert!(err.to_string().starts_with("Model not loaded"), "{err}");
    }

    #[test]
    fn inference_failure_is_distinct() {
        let predictor = Predictor::new(&SALARY_SPEC, Box::new(Failing)).unwrap();
        let err = predictor.predict(&request()).unwrap_err();
        assert!(matches!(err, PredictError::Invocation(ModelError::Runtime(_))));
        assert_eq!(err.to_string(), "Prediction error: inference failed: boom");
    }

    #[test]
    fn encoding_failure_is_distinct() {
        let err = PredictError::from(EncodeError::LengthMismatch {
            expected: 90,
            got: 89,
        });
        assert!(matches!(
            err,
            PredictError::Encoding(EncodeError::LengthMismatch {
                expected: 90,
                got: 89
            })
        ));
        assert_eq!(
            err.to_string(),
            "Preprocessing error: encoded 89 features, expected 90"
        );
        assert!(!err.to_string().starts_with("Prediction error"));
    }

    #[test]
    fn non_finite_prediction_is_invocation_failure() {
        let predictor = Predictor::new(
            &SALARY_SPEC,
            Box::new(Constant {
                value: f64::NAN,
                width: 90,
            }),
        )
        .unwrap();
        let err = predictor.predict(&request()).unwrap_err();
        assert!(matches!(
            err,
            PredictError::Invocation(ModelError::NonFinitePrediction(_))
        ));
    }

    #[test]
    fn load_linear_model_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salary.json");
        let mut weights = vec![0.0; 90];
        weights[SALARY_SPEC.indicator_block("company_size").unwrap().start] = 10_000.0;
        std::fs::write(
            &path,
            serde_json::json!({
                "model_id": "salary-linear",
                "weights": weights,
                "intercept": 100_000.0,
                "feature_names": SALARY_SPEC.feature_names(),
            })
            .to_string(),
        )
        .unwrap();

        let predictor = Predictor::load(&SALARY_SPEC, &path).unwrap();
        assert_eq!(predictor.model_info().model_id, "salary-linear");
        // company_size "M" sets the first company_size indicator.
        assert_eq!(predictor.predict(&request()).unwrap().predicted_salary, 110_000.0);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Predictor::load(&SALARY_SPEC, Path::new("/nonexistent/salary.json"))
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("loading model"), "{err:#}");
    }
}
