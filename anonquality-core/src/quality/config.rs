//! Quality assessment configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for one quality computation.
///
/// The three sentinels identify fully generalized, wildcard and null cells in
/// the anonymized view. Additional parameters derived from a host tool's
/// anonymization configuration may be added here in the future; none are
/// consumed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Label denoting a fully generalized/suppressed value
    pub suppression_sentinel: String,
    /// Label matching any value ("any" wildcard)
    pub wildcard_value: String,
    /// Label denoting a missing value
    pub null_value: String,
}

/// Validation errors for quality configuration.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    /// The suppression sentinel is empty
    #[error("suppression sentinel must not be empty")]
    EmptySuppressionSentinel,
    /// The wildcard label is empty
    #[error("wildcard value must not be empty")]
    EmptyWildcard,
    /// The null label is empty
    #[error("null value must not be empty")]
    EmptyNull,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            suppression_sentinel: "*".to_string(),
            wildcard_value: "*".to_string(),
            null_value: "NULL".to_string(),
        }
    }
}

impl QualityConfig {
    /// Creates a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the suppression sentinel.
    pub fn with_suppression_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.suppression_sentinel = sentinel.into();
        self
    }

    /// Builder method to set the wildcard label.
    pub fn with_wildcard_value(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard_value = wildcard.into();
        self
    }

    /// Builder method to set the null label.
    pub fn with_null_value(mut self, null: impl Into<String>) -> Self {
        self.null_value = null.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.suppression_sentinel.is_empty() {
            return Err(ConfigValidationError::EmptySuppressionSentinel);
        }
        if self.wildcard_value.is_empty() {
            return Err(ConfigValidationError::EmptyWildcard);
        }
        if self.null_value.is_empty() {
            return Err(ConfigValidationError::EmptyNull);
        }
        Ok(())
    }
}
