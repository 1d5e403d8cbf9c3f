//! Ambiguity model.
//!
//! Goldberger, Tassa: "Efficient anonymizations with enhanced utility",
//! Transactions on Data Privacy.
//!
//! Each anonymized record is consistent with the cross product of the
//! original values its generalized cells subsume. The raw value sums that
//! product over all rows; the bounds run from one candidate per record up to
//! the full cross product of all attribute domains.

use super::super::context::EvaluationContext;
use super::super::measures::RowMeasure;
use super::{ModelError, ModelInput, ModelOutcome, ModelResult, domain_size, extension};

pub(crate) fn evaluate(input: &ModelInput<'_>, ctx: &EvaluationContext) -> ModelResult {
    let rows = input.grouped_output.total_rows() as f64;
    if rows == 0.0 {
        return Err(ModelError::failed("empty dataset"));
    }

    let mut value = 0.0;
    for (key, stats) in input.grouped_output.iter() {
        ctx.checkpoint()?;
        let mut candidates = 1.0;
        for (position, label) in key.iter().enumerate() {
            candidates *= extension(input, position, label);
        }
        value += candidates * stats.count as f64;
    }

    let full_domain: f64 = (0..input.indices.len())
        .map(|position| domain_size(input, position))
        .product();

    Ok(ModelOutcome::Row(RowMeasure::new(
        rows,
        value,
        rows * full_domain,
    )))
}
