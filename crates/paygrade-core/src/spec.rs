//! Feature layout the served model was trained against.
//!
//! A [`FeatureSpec`] is a fixed, ordered description of every input slot:
//! numeric features with their standardization constants, followed by
//! categorical features whose first level is the dropped reference. Specs are
//! declared as `static` tables so ordering and width are visible in source
//! and checked at compile time.

use std::collections::HashSet;
use std::ops::Range;

use crate::error::SpecError;
use crate::request::RequestField;

/// Where the raw value of a numeric slot comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericSource {
    /// `remoteWork` percentage string, divided by 100.
    RemoteWorkPercent,
    /// `yearsExperience` bucket label, mapped through [`years_for_bucket`].
    YearsExperienceBucket,
    /// Not collected by the serving surface; always this raw value.
    Fixed(f64),
}

/// One numeric input dimension with its training-time standardization constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericFeature {
    pub name: &'static str,
    pub mean: f64,
    /// Never zero.
    pub scale: f64,
    pub source: NumericSource,
}

impl NumericFeature {
    /// A slot filled from a request field.
    pub const fn collected(
        name: &'static str,
        source: NumericSource,
        mean: f64,
        scale: f64,
    ) -> Self {
        Self {
            name,
            mean,
            scale,
            source,
        }
    }

    /// A slot the form never collects; its raw value is always 0.
    pub const fn defaulted(name: &'static str, mean: f64, scale: f64) -> Self {
        Self {
            name,
            mean,
            scale,
            source: NumericSource::Fixed(0.0),
        }
    }

    /// `(raw - mean) / scale`, using the baked constants.
    pub fn standardize(&self, raw: f64) -> f64 {
        (raw - self.mean) / self.scale
    }
}

/// A categorical attribute encoded one-hot with its first level dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoricalFeature {
    /// Training-frame column name.
    pub name: &'static str,
    /// Request field the value is read from.
    pub field: RequestField,
    /// Known levels in encoder order. Index 0 is the reference level.
    pub levels: &'static [&'static str],
}

impl CategoricalFeature {
    /// Number of indicator columns this feature contributes: `levels - 1`.
    pub const fn indicator_count(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Position of `value` inside this feature's indicator block.
    ///
    /// `None` for the reference level and for values that match no known
    /// level; both encode as an all-zero block.
    pub fn indicator_index(&self, value: &str) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| *level == value)
            .and_then(|i| i.checked_sub(1))
    }

    /// The implicit reference level, if the feature has any levels.
    pub fn reference_level(&self) -> Option<&'static str> {
        self.levels.first().copied()
    }
}

/// Immutable description of the model's input vector.
#[derive(Debug)]
pub struct FeatureSpec {
    /// Identifier used in logs and model metadata.
    pub name: &'static str,
    pub numeric: &'static [NumericFeature],
    pub categorical: &'static [CategoricalFeature],
    /// Declared total vector length. Must equal [`FeatureSpec::computed_width`].
    pub width: usize,
}

impl FeatureSpec {
    /// Declared total vector length.
    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn numeric_width(&self) -> usize {
        self.numeric.len()
    }

    /// Sum of all categorical indicator counts.
    pub const fn indicator_width(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.categorical.len() {
            total += self.categorical[i].indicator_count();
            i += 1;
        }
        total
    }

    /// Width implied by the tables, independent of the declared width.
    pub const fn computed_width(&self) -> usize {
        self.numeric_width() + self.indicator_width()
    }

    /// Index of a numeric slot by name.
    pub fn numeric_index(&self, name: &str) -> Option<usize> {
        self.numeric.iter().position(|f| f.name == name)
    }

    /// Vector range covered by a categorical feature's indicator block.
    pub fn indicator_block(&self, name: &str) -> Option<Range<usize>> {
        let mut offset = self.numeric_width();
        for feature in self.categorical {
            let end = offset + feature.indicator_count();
            if feature.name == name {
                return Some(offset..end);
            }
            offset = end;
        }
        None
    }

    /// Encoded column names in vector order.
    ///
    /// Numeric names first, then `<feature>_<level>` for every non-reference
    /// level, matching what a drop-first one-hot encoder emits.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.computed_width());
        names.extend(self.numeric.iter().map(|f| f.name.to_string()));
        for feature in self.categorical {
            for level in feature.levels.iter().skip(1) {
                names.push(format!("{}_{}", feature.name, level));
            }
        }
        names
    }

    /// Training-frame columns before encoding: numeric, then categorical.
    pub fn input_features(&self) -> Vec<&'static str> {
        self.numeric
            .iter()
            .map(|f| f.name)
            .chain(self.categorical.iter().map(|f| f.name))
            .collect()
    }

    /// Check the shape invariants the encoder relies on.
    pub fn validate(&self) -> Result<(), SpecError> {
        for feature in self.numeric {
            if !feature.mean.is_finite() {
                return Err(SpecError::NonFiniteMean {
                    feature: feature.name,
                    value: feature.mean,
                });
            }
            if feature.scale == 0.0 || !feature.scale.is_finite() {
                return Err(SpecError::InvalidScale {
                    feature: feature.name,
                    value: feature.scale,
                });
            }
        }

        for feature in self.categorical {
            if feature.levels.is_empty() {
                return Err(SpecError::NoLevels {
                    feature: feature.name,
                });
            }
            let mut seen = HashSet::with_capacity(feature.levels.len());
            for level in feature.levels {
                if !seen.insert(*level) {
                    return Err(SpecError::DuplicateLevel {
                        feature: feature.name,
                        level: *level,
                    });
                }
            }
        }

        let computed = self.computed_width();
        if computed != self.width {
            return Err(SpecError::WidthMismatch {
                declared: self.width,
                computed,
            });
        }
        Ok(())
    }
}

// ── Years of experience ──

/// Representative years for each experience bucket offered by the form.
pub const YEARS_EXPERIENCE_BUCKETS: [(&str, f64); 6] = [
    ("0-1", 0.5),
    ("1-3", 2.0),
    ("3-5", 4.0),
    ("5-7", 6.0),
    ("7-10", 8.5),
    ("10+", 12.0),
];

/// Years used when the bucket label is not recognised.
pub const DEFAULT_YEARS_EXPERIENCE: f64 = 2.0;

/// Map a bucket label to representative years, `None` if unknown.
pub fn years_for_bucket(label: &str) -> Option<f64> {
    YEARS_EXPERIENCE_BUCKETS
        .iter()
        .find(|(bucket, _)| *bucket == label)
        .map(|&(_, years)| years)
}
