//! Dataset access abstraction.
//!
//! The quality engine never owns table storage. Rows and schema metadata are
//! read through the [`DatasetView`] trait, which host tools implement over
//! whatever storage they use. [`MemoryView`] is a small owned implementation
//! for tests and embedders without their own table representation.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Attribute data types understood by the quality engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    /// Free-form string values
    Text,
    /// Whole numbers
    Integer,
    /// Fractional numbers
    Decimal,
    /// Calendar dates
    Date,
    /// True/false values
    Boolean,
}

/// Metadata about the mechanism that generated an attribute's hierarchy.
///
/// Only redaction-based builders expose parameters usable for the closed-form
/// domain-share computation; the other variants exist so callers can state
/// how a hierarchy was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HierarchyBuilderInfo {
    /// Redaction-based builder, replacing trailing characters level by level.
    Redaction {
        /// Size of the attribute's value domain
        domain_size: Option<f64>,
        /// Number of characters in the redaction alphabet
        alphabet_size: Option<f64>,
        /// Length of the longest value in the domain
        max_value_length: Option<f64>,
    },
    /// Interval-based builder over a numeric range.
    Interval,
    /// Order-based builder over a fixed value ordering.
    Order,
}

impl HierarchyBuilderInfo {
    /// Whether closed-form domain-share parameters are available.
    pub fn domain_properties_available(&self) -> bool {
        matches!(
            self,
            Self::Redaction {
                domain_size: Some(_),
                alphabet_size: Some(_),
                max_value_length: Some(_),
            }
        )
    }
}

/// Schema-level description of a dataset.
///
/// Carries the quasi-identifier set and, per attribute, an optional
/// materialized generalization hierarchy (row-major: one row per original
/// value, labels ordered from most specific to most general) and optional
/// hierarchy-builder metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataDefinition {
    quasi_identifiers: BTreeSet<String>,
    hierarchies: HashMap<String, Vec<Vec<String>>>,
    hierarchy_builders: HashMap<String, HierarchyBuilderInfo>,
}

impl DataDefinition {
    /// Creates an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to mark an attribute as quasi-identifying.
    pub fn with_quasi_identifier(mut self, attribute: impl Into<String>) -> Self {
        self.quasi_identifiers.insert(attribute.into());
        self
    }

    /// Builder method to attach a materialized hierarchy to an attribute.
    pub fn with_hierarchy(
        mut self,
        attribute: impl Into<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        self.hierarchies.insert(attribute.into(), rows);
        self
    }

    /// Builder method to attach hierarchy-builder metadata to an attribute.
    pub fn with_hierarchy_builder(
        mut self,
        attribute: impl Into<String>,
        builder: HierarchyBuilderInfo,
    ) -> Self {
        self.hierarchy_builders.insert(attribute.into(), builder);
        self
    }

    /// Returns the names of quasi-identifying attributes, sorted.
    pub fn quasi_identifiers(&self) -> &BTreeSet<String> {
        &self.quasi_identifiers
    }

    /// Returns the materialized hierarchy for an attribute, if defined.
    pub fn hierarchy(&self, attribute: &str) -> Option<&[Vec<String>]> {
        self.hierarchies.get(attribute).map(Vec::as_slice)
    }

    /// Returns the hierarchy-builder metadata for an attribute, if any.
    pub fn hierarchy_builder(&self, attribute: &str) -> Option<&HierarchyBuilderInfo> {
        self.hierarchy_builders.get(attribute)
    }
}

/// Read-only accessor for a table.
///
/// All cell values are strings; generalized and suppressed cells carry the
/// labels produced by the anonymization step. Implementations must be cheap
/// to call per cell, since the engine scans every row of both views.
pub trait DatasetView {
    /// Number of rows in the table.
    fn num_rows(&self) -> usize;

    /// Number of columns in the table.
    fn num_columns(&self) -> usize;

    /// Name of the attribute at `column`, or `None` if out of range.
    fn attribute_name(&self, column: usize) -> Option<&str>;

    /// Data type of the named attribute.
    fn data_type(&self, attribute: &str) -> Option<Datatype>;

    /// Cell value at `(row, column)`, or `None` if out of range.
    fn value(&self, row: usize, column: usize) -> Option<&str>;

    /// Whether the row was suppressed as an outlier by the anonymization.
    fn is_outlier(&self, row: usize) -> bool;

    /// Distinct values of a column, in order of first occurrence.
    fn distinct_values(&self, column: usize) -> Vec<String>;

    /// Schema-level metadata for this table.
    fn definition(&self) -> &DataDefinition;

    /// Resolves an attribute name to its column index.
    fn column_index_of(&self, attribute: &str) -> Option<usize> {
        (0..self.num_columns()).find(|&column| self.attribute_name(column) == Some(attribute))
    }
}

/// Owned, in-memory [`DatasetView`] implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    attributes: Vec<(String, Datatype)>,
    rows: Vec<Vec<String>>,
    outliers: Vec<bool>,
    definition: DataDefinition,
}

impl MemoryView {
    /// Creates a view over the given attributes and row-major cell values.
    pub fn new(attributes: Vec<(String, Datatype)>, rows: Vec<Vec<String>>) -> Self {
        let outliers = vec![false; rows.len()];
        Self {
            attributes,
            rows,
            outliers,
            definition: DataDefinition::default(),
        }
    }

    /// Builder method to attach a schema definition.
    pub fn with_definition(mut self, definition: DataDefinition) -> Self {
        self.definition = definition;
        self
    }

    /// Builder method to flag rows as suppressed outliers.
    pub fn with_outliers(mut self, outlier_rows: &[usize]) -> Self {
        for &row in outlier_rows {
            if let Some(flag) = self.outliers.get_mut(row) {
                *flag = true;
            }
        }
        self
    }
}

impl DatasetView for MemoryView {
    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn num_columns(&self) -> usize {
        self.attributes.len()
    }

    fn attribute_name(&self, column: usize) -> Option<&str> {
        self.attributes.get(column).map(|(name, _)| name.as_str())
    }

    fn data_type(&self, attribute: &str) -> Option<Datatype> {
        self.attributes
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|&(_, datatype)| datatype)
    }

    fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    fn is_outlier(&self, row: usize) -> bool {
        self.outliers.get(row).copied().unwrap_or(false)
    }

    fn distinct_values(&self, column: usize) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut values = Vec::new();
        for row in &self.rows {
            if let Some(value) = row.get(column) {
                if seen.insert(value.as_str()) {
                    values.push(value.clone());
                }
            }
        }
        values
    }

    fn definition(&self) -> &DataDefinition {
        &self.definition
    }
}
