//! Plain-text rendering of the feature layout and encoded rows.

use std::fmt::Write;

use paygrade_core::{FeatureSpec, FeatureVector, NumericSource};

const MAX_LEVELS: usize = 8;

/// Render the feature layout: numeric constants, then categorical levels.
pub fn render_spec(spec: &FeatureSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", spec.name);
    let _ = writeln!(
        out,
        "{} features ({} numeric + {} indicators)",
        spec.width(),
        spec.numeric_width(),
        spec.indicator_width()
    );
    out.push('\n');

    out.push_str("Numeric\n");
    for (i, feature) in spec.numeric.iter().enumerate() {
        let source = match feature.source {
            NumericSource::RemoteWorkPercent => "remoteWork / 100".to_string(),
            NumericSource::YearsExperienceBucket => "yearsExperience bucket".to_string(),
            NumericSource::Fixed(v) => format!("fixed {v}"),
        };
        let _ = writeln!(
            out,
            "  {:>3} {:<28} mean {:>10.6}  scale {:>10.6}  {}",
            i, feature.name, feature.mean, feature.scale, source
        );
    }
    out.push('\n');

    out.push_str("Categorical\n");
    for feature in spec.categorical {
        let Some(block) = spec.indicator_block(feature.name) else {
            continue;
        };
        let _ = writeln!(
            out,
            "  {:<22} <- {:<16} [{}..{}) reference {:?}",
            feature.name,
            feature.field.json_name(),
            block.start,
            block.end,
            feature.reference_level().unwrap_or("-")
        );

        let shown: Vec<&str> = feature.levels.iter().skip(1).take(MAX_LEVELS).copied().collect();
        let more = feature.indicator_count().saturating_sub(shown.len());
        if more > 0 {
            let _ = writeln!(out, "      {} ... (+{more} more)", shown.join(", "));
        } else {
            let _ = writeln!(out, "      {}", shown.join(", "));
        }
    }

    out
}

/// Render one encoded row as `name value` lines.
///
/// Indicator columns that are zero are omitted; numeric slots are always shown.
pub fn render_vector(spec: &FeatureSpec, vector: &FeatureVector) -> String {
    let mut out = String::new();
    let numeric = spec.numeric_width();
    for (i, (name, value)) in spec
        .feature_names()
        .iter()
        .zip(vector.as_slice())
        .enumerate()
    {
        if i >= numeric && *value == 0.0 {
            continue;
        }
        let _ = writeln!(out, "  {:>3} {:<40} {:>10.4}", i, name, value);
    }
    out
}
