//! Bounded quality measures.
//!
//! Every model reports its raw value together with the bounds it was computed
//! against; consumers read the normalized position within those bounds. An
//! unavailable measure is the absence of an entry, never a value coerced to a
//! boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A raw value with the bounds it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounded {
    /// Best achievable raw value
    pub min: f64,
    /// Computed raw value
    pub value: f64,
    /// Worst achievable raw value
    pub max: f64,
}

impl Bounded {
    /// Creates a new bounded value.
    pub fn new(min: f64, value: f64, max: f64) -> Self {
        Self { min, value, max }
    }

    /// Position of the value within `[min, max]`, clamped to `[0, 1]`.
    ///
    /// A degenerate range (`max <= min`) normalizes to 0: no information can
    /// be lost over an empty domain.
    pub fn normalized(&self) -> f64 {
        if self.max > self.min {
            ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Column-oriented measure: one bounded value per attribute.
///
/// Attributes without an entry are unavailable; [`ColumnMeasure::value`]
/// returns `None` for them and they are excluded from the arithmetic mean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeasure {
    values: BTreeMap<String, Bounded>,
}

impl ColumnMeasure {
    /// Creates a measure with no available attributes.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Creates a measure where every attribute scored perfectly (no loss).
    pub fn perfect(attributes: &[String]) -> Self {
        Self {
            values: attributes
                .iter()
                .map(|attribute| (attribute.clone(), Bounded::new(0.0, 0.0, 1.0)))
                .collect(),
        }
    }

    /// Creates a measure from per-attribute bounded values.
    pub fn from_parts(entries: impl IntoIterator<Item = (String, Bounded)>) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }

    /// Whether a value was computed for the attribute.
    pub fn is_available(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    /// Normalized value for the attribute, `None` when unavailable.
    pub fn value(&self, attribute: &str) -> Option<f64> {
        self.values.get(attribute).map(Bounded::normalized)
    }

    /// Raw value and bounds for the attribute, `None` when unavailable.
    pub fn bounds(&self, attribute: &str) -> Option<&Bounded> {
        self.values.get(attribute)
    }

    /// Attributes with an available value, sorted.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Arithmetic mean of the normalized values across available attributes.
    pub fn arithmetic_mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.values().map(Bounded::normalized).sum();
        Some(sum / self.values.len() as f64)
    }
}

/// Row-oriented measure: one bounded scalar for the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowMeasure {
    bounds: Option<Bounded>,
}

impl RowMeasure {
    /// Creates an unavailable measure.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Creates a measure from a raw value and its bounds.
    pub fn new(min: f64, value: f64, max: f64) -> Self {
        Self {
            bounds: Some(Bounded::new(min, value, max)),
        }
    }

    /// The neutral measure used when original and anonymized views coincide.
    pub fn neutral() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Whether the measure was computed.
    pub fn is_available(&self) -> bool {
        self.bounds.is_some()
    }

    /// Normalized value, `None` when unavailable.
    pub fn value(&self) -> Option<f64> {
        self.bounds.as_ref().map(Bounded::normalized)
    }

    /// Raw value and bounds, `None` when unavailable.
    pub fn bounds(&self) -> Option<&Bounded> {
        self.bounds.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_normalization() {
        assert!((Bounded::new(0.0, 5.0, 10.0).normalized() - 0.5).abs() < 1e-9);
        assert_eq!(Bounded::new(2.0, 2.0, 8.0).normalized(), 0.0);
        assert_eq!(Bounded::new(2.0, 8.0, 8.0).normalized(), 1.0);
    }

    #[test]
    fn test_bounded_normalization_clamps() {
        assert_eq!(Bounded::new(0.0, -1.0, 10.0).normalized(), 0.0);
        assert_eq!(Bounded::new(0.0, 11.0, 10.0).normalized(), 1.0);
    }

    #[test]
    fn test_bounded_degenerate_range() {
        assert_eq!(Bounded::new(3.0, 3.0, 3.0).normalized(), 0.0);
        assert_eq!(Bounded::new(5.0, 4.0, 1.0).normalized(), 0.0);
    }

    #[test]
    fn test_column_measure_unavailable_is_not_a_boundary() {
        let measure = ColumnMeasure::from_parts([
            ("age".to_string(), Bounded::new(0.0, 0.0, 10.0)),
        ]);

        assert_eq!(measure.value("age"), Some(0.0));
        assert!(measure.is_available("age"));
        assert_eq!(measure.value("zip"), None);
        assert!(!measure.is_available("zip"));
    }

    #[test]
    fn test_column_measure_mean_over_available_only() {
        let measure = ColumnMeasure::from_parts([
            ("a".to_string(), Bounded::new(0.0, 2.0, 10.0)),
            ("b".to_string(), Bounded::new(0.0, 6.0, 10.0)),
        ]);
        let mean = measure.arithmetic_mean().unwrap();
        assert!((mean - 0.4).abs() < 1e-9);

        assert_eq!(ColumnMeasure::unavailable().arithmetic_mean(), None);
    }

    #[test]
    fn test_column_measure_perfect() {
        let attributes = vec!["age".to_string(), "zip".to_string()];
        let measure = ColumnMeasure::perfect(&attributes);

        assert_eq!(measure.value("age"), Some(0.0));
        assert_eq!(measure.value("zip"), Some(0.0));
        assert_eq!(measure.arithmetic_mean(), Some(0.0));
    }

    #[test]
    fn test_row_measure() {
        let measure = RowMeasure::new(1.0, 5.5, 10.0);
        assert!(measure.is_available());
        assert!((measure.value().unwrap() - 0.5).abs() < 1e-9);

        assert_eq!(RowMeasure::unavailable().value(), None);

        let neutral = RowMeasure::neutral();
        assert_eq!(neutral.value(), Some(0.0));
        assert_eq!(neutral.bounds().unwrap().max, 1.0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let measure = ColumnMeasure::from_parts([
            ("age".to_string(), Bounded::new(0.0, 3.0, 9.0)),
        ]);
        let json = serde_json::to_string(&measure).unwrap();
        let deserialized: ColumnMeasure = serde_json::from_str(&json).unwrap();
        assert_eq!(measure, deserialized);
    }
}
