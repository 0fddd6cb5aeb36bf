//! Costing error types.

use bundlecost_shared::AppError;
use thiserror::Error;

/// Costing-related errors.
///
/// Figures never produce errors; only a snapshot that is not a document at
/// all is rejected.
#[derive(Debug, Error)]
pub enum CostingError {
    /// Snapshot is not valid JSON or its tables have the wrong shape.
    #[error("Invalid costing snapshot: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),
}

impl From<CostingError> for AppError {
    fn from(err: CostingError) -> Self {
        Self::Validation(err.to_string())
    }
}
