//! The complete result of one quality computation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::Datatype;

use super::measures::{ColumnMeasure, RowMeasure};

/// Utility-quality statistics comparing an anonymized dataset against its
/// original.
///
/// Always complete: a model that could not be computed reports an
/// unavailable measure, distinguishable from any legitimate boundary value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityResult {
    attributes: Vec<String>,
    datatypes: BTreeMap<String, Datatype>,
    analyzed_rows: u64,
    analyzed_at: DateTime<Utc>,
    missings: ColumnMeasure,
    granularity: ColumnMeasure,
    non_uniform_entropy: ColumnMeasure,
    generalization_intensity: ColumnMeasure,
    average_class_size: RowMeasure,
    ambiguity: RowMeasure,
    discernibility: RowMeasure,
    kl_divergence: RowMeasure,
    sse: RowMeasure,
}

impl QualityResult {
    /// Creates a result with all model measures unavailable.
    pub(crate) fn new(
        attributes: Vec<String>,
        datatypes: BTreeMap<String, Datatype>,
        analyzed_rows: u64,
        missings: ColumnMeasure,
    ) -> Self {
        Self {
            attributes,
            datatypes,
            analyzed_rows,
            analyzed_at: Utc::now(),
            missings,
            granularity: ColumnMeasure::unavailable(),
            non_uniform_entropy: ColumnMeasure::unavailable(),
            generalization_intensity: ColumnMeasure::unavailable(),
            average_class_size: RowMeasure::unavailable(),
            ambiguity: RowMeasure::unavailable(),
            discernibility: RowMeasure::unavailable(),
            kl_divergence: RowMeasure::unavailable(),
            sse: RowMeasure::unavailable(),
        }
    }

    /// Creates the result for the identity case, where the anonymized view is
    /// the original view itself.
    pub(crate) fn identity(
        attributes: Vec<String>,
        datatypes: BTreeMap<String, Datatype>,
        analyzed_rows: u64,
        missings: ColumnMeasure,
    ) -> Self {
        let perfect = ColumnMeasure::perfect(&attributes);
        let mut result = Self::new(attributes, datatypes, analyzed_rows, missings);
        result.granularity = perfect.clone();
        result.non_uniform_entropy = perfect.clone();
        result.generalization_intensity = perfect;
        result.average_class_size = RowMeasure::neutral();
        result.ambiguity = RowMeasure::neutral();
        result.discernibility = RowMeasure::neutral();
        result.kl_divergence = RowMeasure::neutral();
        result.sse = RowMeasure::neutral();
        result
    }

    pub(crate) fn set_granularity(&mut self, measure: ColumnMeasure) {
        self.granularity = measure;
    }

    pub(crate) fn set_non_uniform_entropy(&mut self, measure: ColumnMeasure) {
        self.non_uniform_entropy = measure;
    }

    pub(crate) fn set_generalization_intensity(&mut self, measure: ColumnMeasure) {
        self.generalization_intensity = measure;
    }

    pub(crate) fn set_average_class_size(&mut self, measure: RowMeasure) {
        self.average_class_size = measure;
    }

    pub(crate) fn set_ambiguity(&mut self, measure: RowMeasure) {
        self.ambiguity = measure;
    }

    pub(crate) fn set_discernibility(&mut self, measure: RowMeasure) {
        self.discernibility = measure;
    }

    pub(crate) fn set_kl_divergence(&mut self, measure: RowMeasure) {
        self.kl_divergence = measure;
    }

    pub(crate) fn set_sse(&mut self, measure: RowMeasure) {
        self.sse = measure;
    }

    /// The quasi-identifying attributes covered, in column order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Data type of an attribute.
    pub fn data_type(&self, attribute: &str) -> Option<Datatype> {
        self.datatypes.get(attribute).copied()
    }

    /// Number of rows analyzed.
    pub fn analyzed_rows(&self) -> u64 {
        self.analyzed_rows
    }

    /// Timestamp of the computation.
    pub fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }

    /// Per-attribute completeness: `1 - fraction of missing values`.
    pub fn missings(&self) -> &ColumnMeasure {
        &self.missings
    }

    /// Quality according to the "Loss" model (Iyengar 2002).
    pub fn granularity(&self) -> &ColumnMeasure {
        &self.granularity
    }

    /// Quality according to the "Non-Uniform Entropy" model
    /// (de Waal & Willenborg 1999).
    pub fn non_uniform_entropy(&self) -> &ColumnMeasure {
        &self.non_uniform_entropy
    }

    /// Quality according to the "Precision" model (Sweeney 2002).
    pub fn generalization_intensity(&self) -> &ColumnMeasure {
        &self.generalization_intensity
    }

    /// Quality according to the "AECS" model (LeFevre et al. 2006).
    pub fn average_class_size(&self) -> &RowMeasure {
        &self.average_class_size
    }

    /// Quality according to the "Ambiguity" model (Goldberger & Tassa).
    pub fn ambiguity(&self) -> &RowMeasure {
        &self.ambiguity
    }

    /// Quality according to the "Discernibility" model
    /// (Bayardo & Agrawal 2005).
    pub fn discernibility(&self) -> &RowMeasure {
        &self.discernibility
    }

    /// Quality according to the "KL-Divergence" model
    /// (Machanavajjhala et al. 2007).
    pub fn kullback_leibler_divergence(&self) -> &RowMeasure {
        &self.kl_divergence
    }

    /// Quality according to the "SSE" model (Soria-Comas et al. 2015).
    pub fn sum_of_squared_errors(&self) -> &RowMeasure {
        &self.sse
    }
}
