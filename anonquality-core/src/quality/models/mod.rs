//! The quality-model suite.
//!
//! Eight models share one input contract and one uniform function signature,
//! registered in [`MODELS`] in the fixed evaluation order. Each model reads
//! the shared immutable artifacts (groupings, hierarchies, domain shares) and
//! returns one bounded measure; none mutates shared inputs. A model failure
//! is confined to that model, and a cancellation observed mid-model is
//! distinguished from failure so the orchestrator can stop the sequence.

mod aecs;
mod ambiguity;
mod discernibility;
mod entropy;
mod kl_divergence;
mod loss;
mod precision;
mod sse;

use crate::dataset::DatasetView;
use crate::error::QualityError;

use super::config::QualityConfig;
use super::context::EvaluationContext;
use super::groupify::Grouping;
use super::hierarchy::Hierarchy;
use super::measures::{ColumnMeasure, RowMeasure};
use super::shares::DomainShare;

/// Shared, immutable inputs for every model.
pub(crate) struct ModelInput<'a> {
    pub(crate) input: &'a dyn DatasetView,
    pub(crate) output: &'a dyn DatasetView,
    pub(crate) grouped_input: &'a Grouping,
    pub(crate) grouped_output: &'a Grouping,
    pub(crate) hierarchies: &'a [Hierarchy],
    pub(crate) shares: &'a [Option<DomainShare>],
    pub(crate) indices: &'a [usize],
    pub(crate) config: &'a QualityConfig,
}

/// A model's measure, tagged with its orientation.
pub(crate) enum ModelOutcome {
    Column(ColumnMeasure),
    Row(RowMeasure),
}

/// Why a model produced no measure.
#[derive(Debug)]
pub(crate) enum ModelError {
    /// The shared cancellation flag was observed set
    Cancelled,
    /// The model could not be computed from the given inputs
    Failed(String),
}

impl ModelError {
    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

impl From<QualityError> for ModelError {
    fn from(error: QualityError) -> Self {
        match error {
            QualityError::Interrupted => Self::Cancelled,
            other => Self::Failed(other.to_string()),
        }
    }
}

pub(crate) type ModelResult = Result<ModelOutcome, ModelError>;

/// Uniform model signature.
pub(crate) type ModelFn = fn(&ModelInput<'_>, &EvaluationContext) -> ModelResult;

/// Identifies one model of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModelKind {
    Loss,
    NonUniformEntropy,
    Precision,
    AverageClassSize,
    Ambiguity,
    Discernibility,
    KlDivergence,
    SumOfSquaredErrors,
}

impl ModelKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Loss => "loss",
            Self::NonUniformEntropy => "non-uniform-entropy",
            Self::Precision => "precision",
            Self::AverageClassSize => "aecs",
            Self::Ambiguity => "ambiguity",
            Self::Discernibility => "discernibility",
            Self::KlDivergence => "kl-divergence",
            Self::SumOfSquaredErrors => "sse",
        }
    }
}

/// The suite in its fixed evaluation order.
pub(crate) const MODELS: [(ModelKind, ModelFn); 8] = [
    (ModelKind::Loss, loss::evaluate),
    (ModelKind::NonUniformEntropy, entropy::evaluate),
    (ModelKind::Precision, precision::evaluate),
    (ModelKind::AverageClassSize, aecs::evaluate),
    (ModelKind::Ambiguity, ambiguity::evaluate),
    (ModelKind::Discernibility, discernibility::evaluate),
    (ModelKind::KlDivergence, kl_divergence::evaluate),
    (ModelKind::SumOfSquaredErrors, sse::evaluate),
];

/// Attribute name for the i-th quasi-identifier.
fn attribute(input: &ModelInput<'_>, position: usize) -> Result<String, ModelError> {
    input
        .indices
        .get(position)
        .and_then(|&column| input.output.attribute_name(column))
        .map(ToString::to_string)
        .ok_or_else(|| ModelError::failed(format!("no attribute at position {position}")))
}

/// Size of the i-th quasi-identifier's value domain.
///
/// Prefers the share table's notion of the domain (which, for redaction
/// shares, may exceed the materialized hierarchy) and falls back to the
/// hierarchy's distinct leaf count.
fn domain_size(input: &ModelInput<'_>, position: usize) -> f64 {
    let from_share = input
        .shares
        .get(position)
        .and_then(Option::as_ref)
        .map(DomainShare::domain_size);
    let size = from_share.unwrap_or_else(|| {
        input
            .hierarchies
            .get(position)
            .map_or(0.0, |h| h.domain_size() as f64)
    });
    size.max(1.0)
}

/// Number of original values a generalized cell subsumes, at least 1.
///
/// An absent share table or an unknown label counts as full generalization.
fn extension(input: &ModelInput<'_>, position: usize, label: &str) -> f64 {
    let size = domain_size(input, position);
    let share = input.shares.get(position).and_then(Option::as_ref);
    let hierarchy = input.hierarchies.get(position);
    match (share, hierarchy) {
        (Some(share), Some(hierarchy)) => hierarchy
            .level_of(label)
            .and_then(|level| share.share(label, level))
            .map_or(size, |s| (s * share.domain_size()).clamp(1.0, size)),
        _ => size,
    }
}
