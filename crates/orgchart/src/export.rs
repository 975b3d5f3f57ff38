//! Export functionality for org charts.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a chart [`Snapshot`] into an output format. Exporters only ever see
//! finished snapshots, never transitions in flight.
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::SvgExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`ChartError::Export`] at the crate
//! boundary.
//!
//! [`ChartError::Export`]: crate::ChartError::Export

/// SVG export backend.
pub mod svg;

use crate::chart::Snapshot;

/// Abstraction for chart export backends.
pub trait Exporter {
    /// Exports a snapshot to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the snapshot cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Error>;
}

/// Errors that can occur during chart export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
