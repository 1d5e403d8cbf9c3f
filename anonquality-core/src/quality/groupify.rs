//! Frequency-grouping of rows into equivalence classes.

use std::collections::HashMap;

use crate::dataset::DatasetView;
use crate::error::{QualityError, Result};

use super::context::EvaluationContext;

/// Frequency statistics for one equivalence class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassStats {
    /// Number of rows in the class
    pub count: usize,
    /// Whether the class contains suppressed (outlier) rows
    pub suppressed: bool,
}

/// Equivalence classes of a dataset view over its quasi-identifiers.
///
/// Keys are the tuples of quasi-identifier values in index order; the sum of
/// all class counts equals the view's row count.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    classes: HashMap<Vec<String>, ClassStats>,
    total_rows: usize,
}

impl Grouping {
    /// Groups every row of the view by its quasi-identifier value tuple.
    ///
    /// The cancellation flag is observed once per row scanned. The initial
    /// capacity is sized at a tenth of the row count (floored at 10) as a
    /// performance hint only.
    pub fn from_view(
        view: &dyn DatasetView,
        indices: &[usize],
        ctx: &EvaluationContext,
    ) -> Result<Self> {
        let num_rows = view.num_rows();
        let capacity = (num_rows / 10).max(10);
        let mut classes: HashMap<Vec<String>, ClassStats> = HashMap::with_capacity(capacity);

        for row in 0..num_rows {
            ctx.checkpoint()?;

            let mut key = Vec::with_capacity(indices.len());
            for &column in indices {
                let value = view.value(row, column).ok_or_else(|| {
                    QualityError::contract(format!("missing cell at row {row}, column {column}"))
                })?;
                key.push(value.to_string());
            }

            let stats = classes.entry(key).or_insert(ClassStats {
                count: 0,
                suppressed: false,
            });
            stats.count += 1;
            stats.suppressed |= view.is_outlier(row);
        }

        Ok(Self {
            classes,
            total_rows: num_rows,
        })
    }

    /// Number of equivalence classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the grouping contains no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of rows that were grouped.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Statistics for the class keyed by the given value tuple.
    pub fn get(&self, key: &[String]) -> Option<&ClassStats> {
        self.classes.get(key)
    }

    /// Iterates over all classes.
    pub fn iter(&self) -> impl Iterator<Item = (&[String], &ClassStats)> {
        self.classes
            .iter()
            .map(|(key, stats)| (key.as_slice(), stats))
    }
}
