//! Core utility-quality statistics engine for anonymized datasets.
//!
//! This crate quantifies how much utility a generalization/suppression
//! transformation preserves, by comparing an original dataset against its
//! anonymized counterpart across eight published quality models plus a
//! missing-value measure. It is consumed as a library by privacy-preserving
//! data-publishing tools that need a numeric utility score.
//!
//! # Architecture
//! - [`dataset`] — the storage seam: hosts implement [`DatasetView`] over
//!   their own table representation
//! - [`quality`] — the measurement engine: hierarchy resolution, domain
//!   shares, equivalence-class grouping and the eight-model suite behind
//!   [`QualityAnalyzer`]
//!
//! The engine performs no I/O and no internal parallelism; cancellation is
//! cooperative through the caller-owned [`EvaluationContext`].

pub mod dataset;
pub mod error;
pub mod logging;
pub mod quality;

// Re-export commonly used types
pub use dataset::{DataDefinition, DatasetView, Datatype, HierarchyBuilderInfo, MemoryView};
pub use error::{QualityError, Result};
pub use quality::{
    Bounded, ColumnMeasure, EvaluationContext, QualityAnalyzer, QualityConfig, QualityResult,
    RowMeasure,
};
