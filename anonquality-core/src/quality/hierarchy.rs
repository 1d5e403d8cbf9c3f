//! Generalization-hierarchy resolution.
//!
//! Hierarchies are owned, cloned-on-read data: resolution never aliases the
//! rows stored in the caller's [`DataDefinition`](crate::dataset::DataDefinition).

use std::collections::{HashMap, HashSet};

use crate::dataset::DatasetView;
use crate::error::Result;

use super::config::QualityConfig;
use super::context::EvaluationContext;

/// A resolved generalization hierarchy for one attribute.
///
/// Row-major: one row per original value, labels ordered from most specific
/// (level 0) to most general. Invariant: after resolution the last label of
/// every row equals the configured suppression sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    rows: Vec<Vec<String>>,
    height: usize,
    levels: HashMap<String, usize>,
    domain_size: usize,
}

impl Hierarchy {
    /// Resolves the hierarchy for the attribute at `column`.
    ///
    /// Reads the defined hierarchy from the view's schema; when absent or
    /// empty, fabricates the trivial two-level hierarchy over the column's
    /// distinct values. When the set of top labels is not exactly the
    /// suppression sentinel, one synthetic top level is appended to every
    /// row. Fabrication and repair are total; malformed input never errors.
    pub fn resolve(
        view: &dyn DatasetView,
        column: usize,
        config: &QualityConfig,
        ctx: &EvaluationContext,
    ) -> Result<Self> {
        ctx.checkpoint()?;

        let defined: Option<Vec<Vec<String>>> = view
            .attribute_name(column)
            .and_then(|attribute| view.definition().hierarchy(attribute))
            .map(|rows| {
                rows.iter()
                    .filter(|row| !row.is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .filter(|rows| !rows.is_empty());

        let rows = match defined {
            Some(rows) => rows,
            None => view
                .distinct_values(column)
                .into_iter()
                .map(|value| vec![value, config.suppression_sentinel.clone()])
                .collect(),
        };

        Ok(Self::from_rows(rows, &config.suppression_sentinel))
    }

    /// Builds a hierarchy from owned rows, repairing the top level if needed.
    pub(crate) fn from_rows(mut rows: Vec<Vec<String>>, sentinel: &str) -> Self {
        let top_is_sentinel = rows
            .iter()
            .all(|row| row.last().map(String::as_str) == Some(sentinel));

        if !top_is_sentinel {
            for row in &mut rows {
                row.push(sentinel.to_string());
            }
        }

        let height = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut levels: HashMap<String, usize> = HashMap::new();
        let mut leaves: HashSet<&str> = HashSet::new();
        for row in &rows {
            if let Some(leaf) = row.first() {
                leaves.insert(leaf.as_str());
            }
            for (level, label) in row.iter().enumerate() {
                levels
                    .entry(label.clone())
                    .and_modify(|existing| *existing = (*existing).min(level))
                    .or_insert(level);
            }
        }
        let domain_size = leaves.len();

        Self {
            rows,
            height,
            levels,
            domain_size,
        }
    }

    /// Hierarchy rows, one per original value.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of levels, including the suppression level.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of distinct original (level 0) values.
    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    /// Lowest level at which the label appears, `None` for unknown labels.
    pub fn level_of(&self, label: &str) -> Option<usize> {
        self.levels.get(label).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataDefinition, Datatype, MemoryView};

    fn config() -> QualityConfig {
        QualityConfig::default()
    }

    fn rows(levels: &[&[&str]]) -> Vec<Vec<String>> {
        levels.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn test_resolve_keeps_well_formed_hierarchy() {
        let view = MemoryView::new(
            vec![("zip".to_string(), Datatype::Text)],
            vec![vec!["13053".to_string()], vec!["13068".to_string()]],
        )
        .with_definition(DataDefinition::new().with_hierarchy(
            "zip",
            rows(&[&["13053", "1305*", "*"], &["13068", "1306*", "*"]]),
        ));

        let hierarchy =
            Hierarchy::resolve(&view, 0, &config(), &EvaluationContext::new()).unwrap();

        assert_eq!(hierarchy.height(), 3);
        assert_eq!(hierarchy.domain_size(), 2);
        for row in hierarchy.rows() {
            assert_eq!(row.last().map(String::as_str), Some("*"));
        }
    }

    #[test]
    fn test_resolve_repairs_missing_root() {
        let view = MemoryView::new(
            vec![("sex".to_string(), Datatype::Text)],
            vec![vec!["male".to_string()], vec!["female".to_string()]],
        )
        .with_definition(DataDefinition::new().with_hierarchy(
            "sex",
            rows(&[&["male", "person"], &["female", "person"]]),
        ));

        let hierarchy =
            Hierarchy::resolve(&view, 0, &config(), &EvaluationContext::new()).unwrap();

        // One synthetic level appended so the top is uniformly the sentinel
        assert_eq!(hierarchy.height(), 3);
        for row in hierarchy.rows() {
            assert_eq!(row.last().map(String::as_str), Some("*"));
        }
        assert_eq!(hierarchy.level_of("*"), Some(2));
    }

    #[test]
    fn test_resolve_repairs_mixed_roots() {
        let hierarchy = Hierarchy::from_rows(
            rows(&[&["a", "*"], &["b", "other"]]),
            "*",
        );

        assert_eq!(hierarchy.height(), 3);
        for row in hierarchy.rows() {
            assert_eq!(row.last().map(String::as_str), Some("*"));
        }
    }

    #[test]
    fn test_resolve_fabricates_trivial_hierarchy() {
        let view = MemoryView::new(
            vec![("age".to_string(), Datatype::Integer)],
            vec![
                vec!["34".to_string()],
                vec!["45".to_string()],
                vec!["34".to_string()],
            ],
        );

        let hierarchy =
            Hierarchy::resolve(&view, 0, &config(), &EvaluationContext::new()).unwrap();

        assert_eq!(hierarchy.height(), 2);
        assert_eq!(hierarchy.domain_size(), 2);
        assert_eq!(hierarchy.level_of("34"), Some(0));
        assert_eq!(hierarchy.level_of("*"), Some(1));
    }

    #[test]
    fn test_level_of_prefers_lowest_level() {
        // "adult" appears on levels 1 and 2
        let hierarchy = Hierarchy::from_rows(
            rows(&[&["34", "adult", "adult", "*"], &["45", "adult", "adult", "*"]]),
            "*",
        );

        assert_eq!(hierarchy.level_of("adult"), Some(1));
        assert_eq!(hierarchy.level_of("99"), None);
    }

    #[test]
    fn test_resolve_observes_cancellation() {
        let view = MemoryView::new(vec![("age".to_string(), Datatype::Integer)], vec![]);
        let ctx = EvaluationContext::new();
        ctx.cancel();

        assert!(Hierarchy::resolve(&view, 0, &config(), &ctx).is_err());
    }
}
