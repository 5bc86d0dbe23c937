//! Deterministic request → feature vector encoding.
//!
//! Numeric slots are filled from the request (or a fixed default) and
//! standardized with the spec's baked constants; categorical features are
//! one-hot encoded with the reference level dropped. Unknown categories and
//! unparseable numbers degrade to the reference level and documented
//! defaults instead of failing the request.

use paygrade_core::{
    DEFAULT_YEARS_EXPERIENCE, EncodeError, FeatureSpec, FeatureVector, NumericSource,
    PredictionRequest, years_for_bucket,
};
use tracing::debug;

/// Encode one request into the model's input vector.
///
/// Fails only if the assembled length differs from the spec's declared
/// width, which means the spec tables and the declared width disagree.
pub fn encode(
    request: &PredictionRequest,
    spec: &FeatureSpec,
) -> Result<FeatureVector, EncodeError> {
    let mut values = Vec::with_capacity(spec.width());

    for (feature, raw) in spec.numeric.iter().zip(raw_numeric(request, spec)) {
        values.push(feature.standardize(raw) as f32);
    }

    for feature in spec.categorical {
        let value = feature.field.value(request);
        let hit = feature.indicator_index(value);
        if hit.is_none() && feature.reference_level() != Some(value) {
            debug!(
                feature = feature.name,
                value, "unknown category, encoding as reference level"
            );
        }

        let start = values.len();
        values.resize(start + feature.indicator_count(), 0.0);
        if let Some(i) = hit {
            values[start + i] = 1.0;
        }
    }

    FeatureVector::new(values, spec.width())
}

/// Raw (pre-standardization) numeric values in spec order.
pub fn raw_numeric(request: &PredictionRequest, spec: &FeatureSpec) -> Vec<f64> {
    spec.numeric
        .iter()
        .map(|feature| match feature.source {
            NumericSource::RemoteWorkPercent => {
                remote_ratio(&request.remote_work).unwrap_or_else(|| {
                    debug!(
                        feature = feature.name,
                        value = %request.remote_work,
                        "unparseable remote percentage, using 0"
                    );
                    0.0
                })
            }
            NumericSource::YearsExperienceBucket => years_for_bucket(&request.years_experience)
                .unwrap_or_else(|| {
                    debug!(
                        feature = feature.name,
                        value = %request.years_experience,
                        "unknown experience bucket, using default"
                    );
                    DEFAULT_YEARS_EXPERIENCE
                }),
            NumericSource::Fixed(value) => value,
        })
        .collect()
}

/// Convert a remote-work percentage string to a ratio (`"50"` → `0.5`).
///
/// `None` if the string is not a finite number. Values outside 0–100 are
/// passed through unclamped.
pub fn remote_ratio(percent: &str) -> Option<f64> {
    let value: f64 = percent.trim().parse().ok()?;
    value.is_finite().then(|| value / 100.0)
}
