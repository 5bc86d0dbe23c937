/// Arrow schema definitions for prediction requests and encoded features.
pub mod prediction {
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    use crate::request::RequestField;

    /// Name of the encoded feature column.
    pub const FEATURES_COLUMN: &str = "features";

    /// Schema for raw requests: one Utf8 column per request field, camelCase.
    pub fn request_schema() -> Schema {
        Schema::new(
            RequestField::ALL
                .iter()
                .map(|f| Field::new(f.json_name(), DataType::Utf8, true))
                .collect::<Vec<_>>(),
        )
    }

    /// Schema for encoded rows: `features` as `FixedSizeList<Float32, width>`.
    pub fn features_schema(width: i32) -> Schema {
        Schema::new(vec![Field::new(
            FEATURES_COLUMN,
            DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), width),
            false,
        )])
    }
}
