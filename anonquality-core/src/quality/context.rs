//! Shared cancellation and progress state for one computation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::error::{QualityError, Result};

/// Cancellation flag and progress counter shared between the caller and the
/// engine.
///
/// The engine only ever reads the flag and writes the counter; the caller
/// owns both. Cloning the context shares the underlying cells, so a caller
/// can hand one clone to a worker thread and keep another to cancel or poll.
/// Progress is monotonically non-decreasing and reaches 100 only when a
/// computation completes without cancellation.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    cancelled: Arc<AtomicBool>,
    progress: Arc<AtomicU8>,
}

impl EvaluationContext {
    /// Creates a context with fresh cancellation and progress cells.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context over caller-owned cells.
    pub fn with_cells(cancelled: Arc<AtomicBool>, progress: Arc<AtomicU8>) -> Self {
        Self {
            cancelled,
            progress,
        }
    }

    /// Requests cooperative cancellation of the running computation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Last reported progress percentage.
    pub fn progress(&self) -> u8 {
        self.progress.load(Ordering::Relaxed)
    }

    /// Advances the progress counter; lower values than already reported are
    /// ignored so the sequence stays non-decreasing.
    pub(crate) fn report(&self, percent: u8) {
        self.progress.fetch_max(percent.min(100), Ordering::Relaxed);
    }

    /// Returns [`QualityError::Interrupted`] when cancellation was requested.
    pub(crate) fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(QualityError::Interrupted);
        }
        Ok(())
    }
}
