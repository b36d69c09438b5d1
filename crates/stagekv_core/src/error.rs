//! Error types for overlay operations.

use thiserror::Error;

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Errors that can occur when reading from an overlay.
///
/// Only lookups can fail. Staging, committing and resetting are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// The key has no visible value: it was never set, or it is hidden
    /// by a pending delete.
    #[error("key not found")]
    NotFound,
}

impl OverlayError {
    /// Returns `true` if this is a [`OverlayError::NotFound`] error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
