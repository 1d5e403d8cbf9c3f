//! Quality analyzer facade.
//!
//! Orchestrates one computation: quasi-identifier resolution, basic
//! measures, equivalence-class groupings, hierarchy and domain-share
//! construction, and the fixed-order evaluation of the model suite.

use std::collections::BTreeMap;

use crate::dataset::{DatasetView, Datatype};
use crate::error::{QualityError, Result};

use super::config::QualityConfig;
use super::context::EvaluationContext;
use super::groupify::Grouping;
use super::hierarchy::Hierarchy;
use super::measures::{Bounded, ColumnMeasure};
use super::models::{MODELS, ModelError, ModelInput, ModelKind, ModelOutcome};
use super::result::QualityResult;
use super::shares::DomainShare;

/// Progress checkpoint after the basic measures.
const PROGRESS_BASICS: u8 = 10;
/// Progress checkpoint after groupings, hierarchies and shares.
const PROGRESS_ARTIFACTS: u8 = 20;
/// Progress gained by each completed model.
const PROGRESS_PER_MODEL: u8 = 10;

/// Computes utility-quality statistics for an anonymized dataset.
///
/// # Example
///
/// ```rust,ignore
/// use anonquality_core::{EvaluationContext, QualityAnalyzer};
///
/// let analyzer = QualityAnalyzer::with_defaults();
/// let ctx = EvaluationContext::new();
/// let result = analyzer.assess(&original, &anonymized, &ctx)?;
/// println!("granularity: {:?}", result.granularity().arithmetic_mean());
/// ```
#[derive(Debug, Clone, Default)]
pub struct QualityAnalyzer {
    config: QualityConfig,
}

impl QualityAnalyzer {
    /// Creates a new analyzer with the given configuration.
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Creates a new analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(QualityConfig::default())
    }

    /// Returns a reference to the analyzer configuration.
    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Assesses how much utility the anonymized view preserves.
    ///
    /// The cancellation flag in `ctx` is observed at row-scan granularity
    /// during grouping and value scans and at least once per model elsewhere.
    /// A cancellation during the setup phase surfaces as
    /// [`QualityError::Interrupted`]; once models are running, cancellation
    /// leaves the in-flight and remaining models unavailable and the partial
    /// result is returned. Progress reaches 100 only on uncancelled
    /// completion.
    ///
    /// # Errors
    ///
    /// [`QualityError::Contract`] when the views disagree on shape or a
    /// quasi-identifier is not a column; [`QualityError::Interrupted`] on
    /// cancellation before any model has run.
    pub fn assess(
        &self,
        input: &dyn DatasetView,
        output: &dyn DatasetView,
        ctx: &EvaluationContext,
    ) -> Result<QualityResult> {
        if input.num_rows() != output.num_rows() {
            return Err(QualityError::contract(format!(
                "row count mismatch: input has {}, output has {}",
                input.num_rows(),
                output.num_rows()
            )));
        }
        if input.num_columns() != output.num_columns() {
            return Err(QualityError::contract(format!(
                "column count mismatch: input has {}, output has {}",
                input.num_columns(),
                output.num_columns()
            )));
        }

        let indices = quasi_identifier_indices(input)?;
        let attributes = attribute_names(output, &indices)?;
        let datatypes = attribute_datatypes(output, &attributes);
        let missings = self.missing_values(output, &indices, &attributes, ctx)?;
        ctx.report(PROGRESS_BASICS);

        let rows = output.num_rows() as u64;

        // Special case: assessing the original dataset against itself
        if std::ptr::addr_eq(input, output) {
            ctx.report(100);
            return Ok(QualityResult::identity(attributes, datatypes, rows, missings));
        }

        // Artifacts shared by all models, built once
        let grouped_input = Grouping::from_view(input, &indices, ctx)?;
        let grouped_output = Grouping::from_view(output, &indices, ctx)?;
        let mut hierarchies = Vec::with_capacity(indices.len());
        for &column in &indices {
            hierarchies.push(Hierarchy::resolve(input, column, &self.config, ctx)?);
        }
        let shares: Vec<Option<DomainShare>> = indices
            .iter()
            .zip(&hierarchies)
            .map(|(&column, hierarchy)| {
                let builder = input
                    .attribute_name(column)
                    .and_then(|attribute| input.definition().hierarchy_builder(attribute));
                DomainShare::for_attribute(hierarchy, builder, &self.config)
            })
            .collect();
        ctx.report(PROGRESS_ARTIFACTS);

        let bundle = ModelInput {
            input,
            output,
            grouped_input: &grouped_input,
            grouped_output: &grouped_output,
            hierarchies: &hierarchies,
            shares: &shares,
            indices: &indices,
            config: &self.config,
        };

        let mut result = QualityResult::new(attributes, datatypes, rows, missings);

        for (step, (kind, run)) in MODELS.iter().enumerate() {
            match run(&bundle, ctx) {
                Ok(outcome) => assign(&mut result, *kind, outcome),
                Err(ModelError::Cancelled) => {
                    // Remaining models stay unavailable and progress stops
                    tracing::debug!(model = kind.name(), "model evaluation cancelled");
                    break;
                }
                Err(ModelError::Failed(reason)) => {
                    tracing::warn!(
                        model = kind.name(),
                        reason = %reason,
                        "model evaluation failed; measure marked unavailable"
                    );
                }
            }
            ctx.report(PROGRESS_ARTIFACTS + PROGRESS_PER_MODEL * (step as u8 + 1));
        }

        Ok(result)
    }

    /// Per-attribute completeness of the anonymized view.
    ///
    /// Counts rows whose cell is the outlier flag, the wildcard label or the
    /// null label, and reports `1 - fraction`.
    fn missing_values(
        &self,
        output: &dyn DatasetView,
        indices: &[usize],
        attributes: &[String],
        ctx: &EvaluationContext,
    ) -> Result<ColumnMeasure> {
        let num_rows = output.num_rows();
        let mut entries = Vec::with_capacity(indices.len());

        for (&column, attribute) in indices.iter().zip(attributes) {
            let mut missing = 0.0;
            for row in 0..num_rows {
                ctx.checkpoint()?;
                let value = output.value(row, column).ok_or_else(|| {
                    QualityError::contract(format!("missing cell at row {row}, column {column}"))
                })?;
                if output.is_outlier(row)
                    || value == self.config.wildcard_value
                    || value == self.config.null_value
                {
                    missing += 1.0;
                }
            }
            let fraction = if num_rows == 0 {
                0.0
            } else {
                missing / num_rows as f64
            };
            entries.push((attribute.clone(), Bounded::new(0.0, 1.0 - fraction, 1.0)));
        }

        Ok(ColumnMeasure::from_parts(entries))
    }
}

/// Sorted column indices of the quasi-identifying attributes.
fn quasi_identifier_indices(view: &dyn DatasetView) -> Result<Vec<usize>> {
    let mut indices = Vec::new();
    for name in view.definition().quasi_identifiers() {
        let index = view.column_index_of(name).ok_or_else(|| {
            QualityError::contract(format!(
                "quasi-identifier '{name}' is not a column of the dataset"
            ))
        })?;
        indices.push(index);
    }
    indices.sort_unstable();
    Ok(indices)
}

fn attribute_names(view: &dyn DatasetView, indices: &[usize]) -> Result<Vec<String>> {
    indices
        .iter()
        .map(|&column| {
            view.attribute_name(column)
                .map(ToString::to_string)
                .ok_or_else(|| QualityError::contract(format!("no attribute at column {column}")))
        })
        .collect()
}

fn attribute_datatypes(
    view: &dyn DatasetView,
    attributes: &[String],
) -> BTreeMap<String, Datatype> {
    attributes
        .iter()
        .filter_map(|attribute| {
            view.data_type(attribute)
                .map(|datatype| (attribute.clone(), datatype))
        })
        .collect()
}

fn assign(result: &mut QualityResult, kind: ModelKind, outcome: ModelOutcome) {
    match (kind, outcome) {
        (ModelKind::Loss, ModelOutcome::Column(m)) => result.set_granularity(m),
        (ModelKind::NonUniformEntropy, ModelOutcome::Column(m)) => {
            result.set_non_uniform_entropy(m);
        }
        (ModelKind::Precision, ModelOutcome::Column(m)) => {
            result.set_generalization_intensity(m);
        }
        (ModelKind::AverageClassSize, ModelOutcome::Row(m)) => result.set_average_class_size(m),
        (ModelKind::Ambiguity, ModelOutcome::Row(m)) => result.set_ambiguity(m),
        (ModelKind::Discernibility, ModelOutcome::Row(m)) => result.set_discernibility(m),
        (ModelKind::KlDivergence, ModelOutcome::Row(m)) => result.set_kl_divergence(m),
        (ModelKind::SumOfSquaredErrors, ModelOutcome::Row(m)) => result.set_sse(m),
        (kind, _) => {
            // Registry orientation mismatch; the measure stays unavailable
            tracing::warn!(model = kind.name(), "model returned wrong orientation");
        }
    }
}
