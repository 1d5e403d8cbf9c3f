//! Loss / granularity model.
//!
//! Iyengar: "Transforming data to satisfy privacy constraints", KDD 2002.
//!
//! For each attribute, the raw value is the total domain-share width of the
//! generalized cells: an untouched cell contributes the share of a single
//! original value, a suppressed cell contributes 1. Bounds run from the
//! share mass of the original data to full suppression, so the normalized
//! value is 0 without generalization and 1 when every cell is generalized to
//! the root.

use super::super::context::EvaluationContext;
use super::super::groupify::Grouping;
use super::super::measures::{Bounded, ColumnMeasure};
use super::{ModelInput, ModelOutcome, ModelResult, attribute};

pub(crate) fn evaluate(input: &ModelInput<'_>, ctx: &EvaluationContext) -> ModelResult {
    let rows = input.grouped_output.total_rows() as f64;
    let mut entries = Vec::with_capacity(input.indices.len());

    for position in 0..input.indices.len() {
        ctx.checkpoint()?;

        let Some(share) = input.shares.get(position).and_then(Option::as_ref) else {
            // Absent share: this attribute stays unavailable
            continue;
        };
        let Some(hierarchy) = input.hierarchies.get(position) else {
            continue;
        };

        let mass = |grouping: &Grouping| -> Option<f64> {
            let mut total = 0.0;
            for (key, stats) in grouping.iter() {
                let label = key.get(position)?;
                let level = hierarchy.level_of(label)?;
                total += share.share(label, level)? * stats.count as f64;
            }
            Some(total)
        };

        let (Some(value), Some(min)) = (mass(input.grouped_output), mass(input.grouped_input))
        else {
            // A label outside the hierarchy: skip rather than mis-measure
            continue;
        };
        ctx.checkpoint()?;

        entries.push((attribute(input, position)?, Bounded::new(min, value, rows)));
    }

    Ok(ModelOutcome::Column(ColumnMeasure::from_parts(entries)))
}
