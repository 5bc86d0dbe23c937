pub mod error;
pub mod request;
pub mod salary;
pub mod schema;
pub mod spec;
pub mod vector;

pub use error::{EncodeError, SpecError};
pub use request::{PredictionRequest, RequestField};
pub use salary::{SALARY_FEATURE_WIDTH, SALARY_SPEC};
pub use schema::prediction;
pub use spec::{
    CategoricalFeature, DEFAULT_YEARS_EXPERIENCE, FeatureSpec, NumericFeature, NumericSource,
    YEARS_EXPERIENCE_BUCKETS, years_for_bucket,
};
pub use vector::FeatureVector;
