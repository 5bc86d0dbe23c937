//! Arrow batch encoding.
//!
//! Reads raw requests from Arrow RecordBatches (camelCase Utf8/LargeUtf8
//! columns) and writes encoded rows as a `FixedSizeList<Float32, width>`
//! column.

use std::sync::Arc;

use anyhow::Context;
use arrow::array::{Array, FixedSizeListBuilder, Float32Builder, LargeStringArray, StringArray};
use arrow::record_batch::RecordBatch;
use paygrade_core::{FeatureSpec, PredictionRequest, RequestField, prediction};

use crate::encoder::encode;

/// Encode a slice of requests into a single-column RecordBatch.
pub fn encode_batch(
    requests: &[PredictionRequest],
    spec: &FeatureSpec,
) -> anyhow::Result<RecordBatch> {
    let width = i32::try_from(spec.width()).context("feature width exceeds i32")?;
    let mut builder = FixedSizeListBuilder::with_capacity(
        Float32Builder::with_capacity(requests.len() * spec.width()),
        width,
        requests.len(),
    );

    for (row, request) in requests.iter().enumerate() {
        let vector = encode(request, spec).with_context(|| format!("encoding row {row}"))?;
        builder.values().append_slice(vector.as_slice());
        builder.append(true);
    }

    let schema = prediction::features_schema(width);
    let batch = RecordBatch::try_new(Arc::new(schema), vec![Arc::new(builder.finish())])?;
    Ok(batch)
}

/// Read raw requests from Arrow batches.
///
/// Every request field must be present as a column. Null cells become empty
/// strings, which encode like any other unknown value.
pub fn requests_from_batches(batches: &[RecordBatch]) -> anyhow::Result<Vec<PredictionRequest>> {
    let mut requests = Vec::new();

    for batch in batches {
        let mut columns = Vec::with_capacity(RequestField::ALL.len());
        for field in RequestField::ALL {
            let col = batch
                .column_by_name(field.json_name())
                .ok_or_else(|| anyhow::anyhow!("missing '{}' column", field.json_name()))?;
            columns.push((field, col.as_ref()));
        }

        for row in 0..batch.num_rows() {
            let mut request = PredictionRequest::default();
            for (field, col) in &columns {
                *field.value_mut(&mut request) = get_string(*col, row).unwrap_or_default();
            }
            requests.push(request);
        }
    }

    Ok(requests)
}

fn get_string(col: &dyn Array, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(row).to_string())
        .or_else(|| {
            col.as_any()
                .downcast_ref::<LargeStringArray>()
                .map(|arr| arr.value(row).to_string())
        })
}
