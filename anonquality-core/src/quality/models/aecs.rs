//! Average equivalence-class size model.
//!
//! LeFevre, DeWitt, Ramakrishnan: "Mondrian multidimensional k-anonymity",
//! ICDE 2006.
//!
//! The raw value is the mean class size of the anonymized grouping, bounded
//! below by the original grouping's mean class size and above by a single
//! class spanning the whole dataset.

use super::super::context::EvaluationContext;
use super::super::measures::RowMeasure;
use super::{ModelError, ModelInput, ModelOutcome, ModelResult};

pub(crate) fn evaluate(input: &ModelInput<'_>, ctx: &EvaluationContext) -> ModelResult {
    ctx.checkpoint()?;

    let rows = input.grouped_output.total_rows() as f64;
    if input.grouped_input.is_empty() || input.grouped_output.is_empty() {
        return Err(ModelError::failed("empty dataset"));
    }

    let min = rows / input.grouped_input.len() as f64;
    let value = rows / input.grouped_output.len() as f64;

    Ok(ModelOutcome::Row(RowMeasure::new(min, value, rows)))
}
