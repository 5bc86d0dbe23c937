use thiserror::Error;

/// A feature layout that breaks the encoder's shape invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("feature '{feature}' has invalid scale {value}")]
    InvalidScale { feature: &'static str, value: f64 },

    #[error("feature '{feature}' has non-finite mean {value}")]
    NonFiniteMean { feature: &'static str, value: f64 },

    #[error("categorical feature '{feature}' has no levels")]
    NoLevels { feature: &'static str },

    #[error("categorical feature '{feature}' lists level '{level}' twice")]
    DuplicateLevel {
        feature: &'static str,
        level: &'static str,
    },

    #[error("declared width {declared} does not match computed width {computed}")]
    WidthMismatch { declared: usize, computed: usize },
}

/// The encoder produced a vector the model cannot accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("encoded {got} features, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },
}
