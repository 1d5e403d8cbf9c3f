//! Precision / generalization-intensity model.
//!
//! Sweeney: "Achieving k-anonymity privacy protection using generalization
//! and suppression", Int J Uncertain Fuzz Knowl Sys 10(5), 2002.
//!
//! For each attribute, every cell contributes the hierarchy level of its
//! generalized label relative to the hierarchy height; the raw value is the
//! sum over rows, bounded by the row count.

use super::super::context::EvaluationContext;
use super::super::measures::{Bounded, ColumnMeasure};
use super::{ModelInput, ModelOutcome, ModelResult, attribute};

pub(crate) fn evaluate(input: &ModelInput<'_>, ctx: &EvaluationContext) -> ModelResult {
    let rows = input.grouped_output.total_rows() as f64;
    let mut entries = Vec::with_capacity(input.indices.len());

    for position in 0..input.indices.len() {
        ctx.checkpoint()?;

        let Some(hierarchy) = input.hierarchies.get(position) else {
            continue;
        };
        let steps = hierarchy.height().saturating_sub(1).max(1) as f64;

        let mut value = 0.0;
        let mut available = true;
        for (key, stats) in input.grouped_output.iter() {
            match key.get(position).and_then(|label| hierarchy.level_of(label)) {
                Some(level) => value += (level as f64 / steps) * stats.count as f64,
                None => {
                    // A label outside the hierarchy: skip rather than mis-measure
                    available = false;
                    break;
                }
            }
        }

        if available {
            entries.push((attribute(input, position)?, Bounded::new(0.0, value, rows)));
        }
    }

    Ok(ModelOutcome::Column(ColumnMeasure::from_parts(entries)))
}
