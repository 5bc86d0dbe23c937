//! Prediction response payload.

use paygrade_core::PredictionRequest;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const CURRENCY: &str = "USD";
pub const PERIOD: &str = "annual";

/// Body returned by `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub success: bool,
    pub predicted_salary: f64,
    pub currency: String,
    pub period: String,
    /// Echo of the request as received.
    pub input: PredictionRequest,
    pub note: String,
}

/// Clamp a raw model output at zero, round to cents, and attach metadata.
///
/// A non-finite output is malformed model output, not a salary.
pub fn assemble(
    prediction: f64,
    input: PredictionRequest,
    model_type: &str,
) -> Result<PredictionResponse, ModelError> {
    if !prediction.is_finite() {
        return Err(ModelError::NonFinitePrediction(prediction));
    }
    let predicted_salary = round_cents(clamp_non_negative(prediction));
    if !predicted_salary.is_finite() {
        return Err(ModelError::NonFinitePrediction(prediction));
    }
    Ok(PredictionResponse {
        success: true,
        predicted_salary,
        currency: CURRENCY.to_string(),
        period: PERIOD.to_string(),
        input,
        note: format!("Prediction based on trained {model_type} model"),
    })
}

/// `max(0, prediction)`, normalising `-0.0` to `0.0`.
pub fn clamp_non_negative(prediction: f64) -> f64 {
    if prediction > 0.0 { prediction } else { 0.0 }
}

/// Round to cents, half away from zero. Values too large to scale by 100
/// already have no fractional cents and pass through unchanged.
fn round_cents(value: f64) -> f64 {
    let cents = value * 100.0;
    if cents.is_finite() {
        cents.round() / 100.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_output_clamps_to_zero() {
        for raw in [-0.01, -1.0, -125_000.0, f64::MIN, -0.0] {
            let response = assemble(raw, PredictionRequest::default(), "Test").unwrap();
            assert_eq!(response.predicted_salary, 0.0);
            assert!(response.predicted_salary.is_sign_positive(), "{raw}");
        }
    }

    #[test]
    fn positive_output_passes_through_rounded() {
        let response = assemble(123_456.789, PredictionRequest::default(), "Test").unwrap();
        assert_eq!(response.predicted_salary, 123_456.79);

        let response = assemble(98_000.0, PredictionRequest::default(), "Test").unwrap();
        assert_eq!(response.predicted_salary, 98_000.0);
    }

    #[test]
    fn non_finite_output_is_rejected() {
        for raw in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = assemble(raw, PredictionRequest::default(), "Test").unwrap_err();
            assert!(matches!(err, ModelError::NonFinitePrediction(_)));
        }
    }

    #[test]
    fn huge_output_stays_finite() {
        for raw in [1e307, f64::MAX] {
            let response = assemble(raw, PredictionRequest::default(), "Test").unwrap();
            assert_eq!(response.predicted_salary, raw);
            let json = serde_json::to_value(&response).unwrap();
            assert!(json["predictedSalary"].is_f64(), "{json}");
        }
    }

    #[test]
    fn serializes_wire_format() {
        let input = PredictionRequest {
            job_title: "Data Scientist".into(),
            company_size: "M".into(),
            ..Default::default()
        };
        let response = assemble(150_000.0, input, "GradientBoostingRegressor").unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["predictedSalary"], 150_000.0);
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["period"], "annual");
        assert_eq!(json["input"]["jobTitle"], "Data Scientist");
        assert_eq!(json["input"]["companySize"], "M");
        assert_eq!(
            json["note"],
            "Prediction based on trained GradientBoostingRegressor model"
        );
    }
}
