//! Error types for org chart operations.
//!
//! This module provides the main error type [`ChartError`]. Identity problems
//! in the data (nodes without an id, duplicate ids) are not errors: those
//! nodes are left out of reconciliation and a warning is logged instead.

use std::io;

use thiserror::Error;

use orgchart_core::identifier::NodeId;

/// The main error type for org chart operations.
///
/// # Diagnostic Variants
///
/// The `Data` variant keeps the JSON source next to the parse error, so a
/// caller can point at the offending line and column.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A toggle, selection or lookup named an id absent from the visible tree.
    #[error("Node `{0}` not found")]
    NotFound(NodeId),

    #[error("{err}")]
    Data {
        err: serde_json::Error,
        src: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<crate::export::Error> for ChartError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ChartError {
    /// Create a new `Data` error with the associated source text.
    pub fn new_data_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Data {
            err,
            src: src.into(),
        }
    }
}
