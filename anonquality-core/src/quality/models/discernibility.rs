//! Discernibility model.
//!
//! Bayardo, Agrawal: "Data privacy through optimal k-anonymization",
//! ICDE 2005.
//!
//! Sums the squared sizes of the equivalence classes; suppressed classes are
//! penalized against the full dataset size instead. The bounds run from the
//! original grouping's penalty up to a single class of all rows.

use super::super::context::EvaluationContext;
use super::super::groupify::Grouping;
use super::super::measures::RowMeasure;
use super::{ModelError, ModelInput, ModelOutcome, ModelResult};

pub(crate) fn evaluate(input: &ModelInput<'_>, ctx: &EvaluationContext) -> ModelResult {
    let rows = input.grouped_output.total_rows() as f64;
    if rows == 0.0 {
        return Err(ModelError::failed("empty dataset"));
    }

    let sentinel = input.config.suppression_sentinel.as_str();
    let min = penalty(input.grouped_input, rows, sentinel, ctx)?;
    let value = penalty(input.grouped_output, rows, sentinel, ctx)?;

    Ok(ModelOutcome::Row(RowMeasure::new(min, value, rows * rows)))
}

/// A class is suppressed when it holds outlier rows or when its whole tuple
/// collapsed to the suppression sentinel.
fn penalty(
    grouping: &Grouping,
    rows: f64,
    sentinel: &str,
    ctx: &EvaluationContext,
) -> Result<f64, ModelError> {
    let mut total = 0.0;
    for (key, stats) in grouping.iter() {
        ctx.checkpoint()?;
        let suppressed =
            stats.suppressed || (!key.is_empty() && key.iter().all(|label| label == sentinel));
        let size = stats.count as f64;
        total += if suppressed { size * rows } else { size * size };
    }
    Ok(total)
}
