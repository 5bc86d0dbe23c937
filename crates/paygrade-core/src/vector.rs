//! The fixed-length model input.

use crate::error::EncodeError;

/// One encoded row, exactly as wide as the `FeatureSpec` it was built against.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// Wrap `values`, failing if the length differs from `expected`.
    ///
    /// Values are never truncated or padded.
    pub fn new(values: Vec<f32>, expected: usize) -> Result<Self, EncodeError> {
        if values.len() != expected {
            return Err(EncodeError::LengthMismatch {
                expected,
                got: values.len(),
            });
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.values
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_length() {
        let v = FeatureVector::new(vec![0.0, 1.0, -0.5], 3).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.as_slice(), &[0.0, 1.0, -0.5]);
    }

    #[test]
    fn rejects_short_and_long_rows() {
        assert_eq!(
            FeatureVector::new(vec![0.0; 2], 3),
            Err(EncodeError::LengthMismatch {
                expected: 3,
                got: 2
            })
        );
        assert_eq!(
            FeatureVector::new(vec![0.0; 4], 3),
            Err(EncodeError::LengthMismatch {
                expected: 3,
                got: 4
            })
        );
    }
}
