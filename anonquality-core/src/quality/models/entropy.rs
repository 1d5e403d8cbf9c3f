//! Non-uniform entropy model.
//!
//! de Waal, Willenborg: "Information loss through global recoding and local
//! suppression", Netherlands Official Statistics 14, 1999.
//!
//! Measures, per attribute, the information lost by replacing a value with
//! its generalized group: each cell contributes `-log2` of the probability
//! of the original value within its group, estimated from the column's
//! frequency distributions. The upper bound is the loss under full
//! suppression, where every group spans the whole column.

use std::collections::HashMap;

use super::super::context::EvaluationContext;
use super::super::measures::{Bounded, ColumnMeasure};
use super::{ModelError, ModelInput, ModelOutcome, ModelResult, attribute};

pub(crate) fn evaluate(input: &ModelInput<'_>, ctx: &EvaluationContext) -> ModelResult {
    let num_rows = input.input.num_rows();
    let mut entries = Vec::with_capacity(input.indices.len());

    for (position, &column) in input.indices.iter().enumerate() {
        let mut input_counts: HashMap<&str, f64> = HashMap::new();
        let mut output_counts: HashMap<&str, f64> = HashMap::new();
        for row in 0..num_rows {
            ctx.checkpoint()?;
            *input_counts.entry(cell(input, Source::Input, row, column)?).or_insert(0.0) += 1.0;
            *output_counts.entry(cell(input, Source::Output, row, column)?).or_insert(0.0) += 1.0;
        }

        let mut value = 0.0;
        let mut max = 0.0;
        for row in 0..num_rows {
            ctx.checkpoint()?;
            let original = cell(input, Source::Input, row, column)?;
            let generalized = cell(input, Source::Output, row, column)?;
            let input_count = input_counts.get(original).copied().unwrap_or(1.0);
            let output_count = output_counts.get(generalized).copied().unwrap_or(1.0);

            // Local suppression can make a group smaller than the original
            // value's frequency; such cells lose nothing
            value += (output_count / input_count).log2().max(0.0);
            max += (num_rows as f64 / input_count).log2();
        }

        entries.push((attribute(input, position)?, Bounded::new(0.0, value, max)));
    }

    Ok(ModelOutcome::Column(ColumnMeasure::from_parts(entries)))
}

#[derive(Clone, Copy)]
enum Source {
    Input,
    Output,
}

fn cell<'a>(
    input: &ModelInput<'a>,
    source: Source,
    row: usize,
    column: usize,
) -> Result<&'a str, ModelError> {
    let view = match source {
        Source::Input => input.input,
        Source::Output => input.output,
    };
    view.value(row, column)
        .ok_or_else(|| ModelError::failed(format!("missing cell at row {row}, column {column}")))
}
