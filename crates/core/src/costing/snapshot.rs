//! Decoding host snapshots.

use serde_json::Value;

use super::error::CostingError;
use super::types::CostingSnapshot;

impl CostingSnapshot {
    /// Decodes a snapshot from the host's JSON document.
    ///
    /// # Errors
    ///
    /// Returns `CostingError::InvalidSnapshot` when the text is not JSON or
    /// a table is not an array of objects.
    pub fn from_json(json: &str) -> Result<Self, CostingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a snapshot from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `CostingError::InvalidSnapshot` when a table is not an array
    /// of objects.
    pub fn from_value(value: Value) -> Result<Self, CostingError> {
        Ok(serde_json::from_value(value)?)
    }
}
