//! Kullback-Leibler divergence model.
//!
//! Machanavajjhala, Kifer, Gehrke, Venkitasubramaniam: "L-diversity: privacy
//! beyond k-anonymity", ACM TKDD 1(1), 2007.
//!
//! Divergence between the original joint frequency distribution over the
//! quasi-identifiers and the distribution induced by the anonymized data,
//! with each generalized class's mass spread uniformly over the original
//! tuples it subsumes. The upper bound is the divergence against full
//! suppression.

use super::super::context::EvaluationContext;
use super::super::measures::RowMeasure;
use super::{ModelError, ModelInput, ModelOutcome, ModelResult, domain_size, extension};

pub(crate) fn evaluate(input: &ModelInput<'_>, ctx: &EvaluationContext) -> ModelResult {
    let num_rows = input.input.num_rows();
    if num_rows == 0 {
        return Err(ModelError::failed("empty dataset"));
    }
    let rows = num_rows as f64;

    let full_domain: f64 = (0..input.indices.len())
        .map(|position| domain_size(input, position))
        .product();

    let mut value = 0.0;
    let mut max = 0.0;
    for row in 0..num_rows {
        ctx.checkpoint()?;

        let original = tuple(input, input.input, row)?;
        let generalized = tuple(input, input.output, row)?;

        let input_count = class_count(input.grouped_input, &original, row)?;
        let output_count = class_count(input.grouped_output, &generalized, row)?;

        let p = input_count / rows;

        // Mass of the generalized class, spread over the tuples it subsumes
        let mut subsumed = 1.0;
        for (position, label) in generalized.iter().enumerate() {
            subsumed *= extension(input, position, label);
        }
        let q = (output_count / rows) / subsumed;

        value += (p / q).log2() / rows;
        max += (p * full_domain).log2() / rows;
    }

    Ok(ModelOutcome::Row(RowMeasure::new(0.0, value, max)))
}

fn tuple(
    input: &ModelInput<'_>,
    view: &dyn crate::dataset::DatasetView,
    row: usize,
) -> Result<Vec<String>, ModelError> {
    input
        .indices
        .iter()
        .map(|&column| {
            view.value(row, column).map(ToString::to_string).ok_or_else(|| {
                ModelError::failed(format!("missing cell at row {row}, column {column}"))
            })
        })
        .collect()
}

fn class_count(
    grouping: &super::super::groupify::Grouping,
    key: &[String],
    row: usize,
) -> Result<f64, ModelError> {
    grouping
        .get(key)
        .map(|stats| stats.count as f64)
        .ok_or_else(|| ModelError::failed(format!("row {row} missing from grouping")))
}
