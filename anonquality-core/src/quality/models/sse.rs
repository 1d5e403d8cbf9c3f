//! Sum of squared errors model.
//!
//! Soria-Comas, Domingo-Ferrer, Sanchez, Martinez: "t-closeness through
//! microaggregation: strict privacy with enhanced utility preservation",
//! IEEE TKDE 27(11), 2015.
//!
//! Aggregates, over all rows, the squared per-attribute distance between the
//! original value and its generalized replacement, where distance is the
//! generalization width expressed through domain shares: 0 for an untouched
//! cell, 1 for a cell generalized to the whole domain.

use super::super::context::EvaluationContext;
use super::super::measures::RowMeasure;
use super::{ModelInput, ModelOutcome, ModelResult, domain_size, extension};

pub(crate) fn evaluate(input: &ModelInput<'_>, ctx: &EvaluationContext) -> ModelResult {
    let rows = input.grouped_output.total_rows() as f64;

    let usable = (0..input.indices.len())
        .filter(|&position| domain_size(input, position) > 1.0)
        .count() as f64;

    let mut value = 0.0;
    for (key, stats) in input.grouped_output.iter() {
        ctx.checkpoint()?;
        let mut distance = 0.0;
        for (position, label) in key.iter().enumerate() {
            let domain = domain_size(input, position);
            if domain <= 1.0 {
                continue;
            }
            let width = (extension(input, position, label) - 1.0) / (domain - 1.0);
            distance += width * width;
        }
        value += distance * stats.count as f64;
    }

    Ok(ModelOutcome::Row(RowMeasure::new(0.0, value, rows * usable)))
}
