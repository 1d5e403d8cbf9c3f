//! Error types for quality computations.
//!
//! The engine recovers locally from malformed hierarchies, absent domain
//! shares and individual model failures. Only two situations surface to the
//! caller as errors: a violated dataset contract and a cancellation observed
//! before any model has produced a measure.

use thiserror::Error;

/// Main error type for quality computations.
#[derive(Debug, Error)]
pub enum QualityError {
    /// The shared cancellation flag was observed set during the setup phase
    /// (basic measures, grouping, hierarchy or share construction).
    #[error("quality computation interrupted")]
    Interrupted,

    /// The caller violated the dataset contract, e.g. mismatched row counts
    /// between the original and anonymized views.
    #[error("dataset contract violation: {message}")]
    Contract {
        /// Description of the violated expectation
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the invalid setting
        message: String,
    },
}

/// Convenience type alias for Results with [`QualityError`]
pub type Result<T> = std::result::Result<T, QualityError>;

impl QualityError {
    /// Creates a contract-violation error.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
