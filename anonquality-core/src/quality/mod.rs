//! Utility-quality measurement engine.
//!
//! Compares an original dataset view against its anonymized counterpart
//! across eight quality models plus a missing-value measure:
//! - **Loss / Granularity** (column-oriented, Iyengar 2002)
//! - **Non-Uniform Entropy** (column-oriented, de Waal & Willenborg 1999)
//! - **Precision** (column-oriented, Sweeney 2002)
//! - **Average Equivalence Class Size** (row-oriented, LeFevre et al. 2006)
//! - **Ambiguity** (row-oriented, Goldberger & Tassa)
//! - **Discernibility** (row-oriented, Bayardo & Agrawal 2005)
//! - **KL-Divergence** (row-oriented, Machanavajjhala et al. 2007)
//! - **Sum of Squared Errors** (row-oriented, Soria-Comas et al. 2015)
//!
//! The engine is single-threaded and cooperative: the caller provides an
//! [`EvaluationContext`] carrying a cancellation flag and a progress counter,
//! and runs [`QualityAnalyzer::assess`] off any interactive thread if
//! responsiveness is required. Individual model failures degrade only that
//! model's measure; the caller always receives a complete [`QualityResult`].
//!
//! # Example
//! ```rust,ignore
//! use anonquality_core::{EvaluationContext, QualityAnalyzer};
//!
//! let analyzer = QualityAnalyzer::with_defaults();
//! let result = analyzer.assess(&original, &anonymized, &EvaluationContext::new())?;
//! for attribute in result.attributes() {
//!     println!("{attribute}: {:?}", result.granularity().value(attribute));
//! }
//! ```

mod analyzer;
mod config;
mod context;
mod groupify;
mod hierarchy;
mod measures;
mod models;
mod result;
mod shares;

// Re-export public API
pub use analyzer::QualityAnalyzer;
pub use config::{ConfigValidationError, QualityConfig};
pub use context::EvaluationContext;
pub use groupify::{ClassStats, Grouping};
pub use hierarchy::Hierarchy;
pub use measures::{Bounded, ColumnMeasure, RowMeasure};
pub use result::QualityResult;
pub use shares::{DomainShare, RawDomainShare, RedactionDomainShare};
