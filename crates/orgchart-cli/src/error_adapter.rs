//! Error adapter for converting ChartError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Malformed hierarchy data keeps its JSON source, so it is reported with the
//! offending line underlined. Every other error is reported as a plain message
//! with a code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};
use serde_json::error::Category;

use orgchart::ChartError;

/// Adapter for a JSON data error pointing into its source.
pub struct DataDiagnostic<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> DataDiagnostic<'a> {
    /// Create a new data diagnostic.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the error location in the source.
    fn span(&self) -> SourceSpan {
        let offset = offset_of(self.src, self.err.line(), self.err.column());
        let len = usize::from(offset < self.src.len());
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for DataDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataDiagnostic")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DataDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid org chart data")
    }
}

impl std::error::Error for DataDiagnostic<'_> {}

impl MietteDiagnostic for DataDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("orgchart::data"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.err.classify() {
            Category::Data => Some(Box::new(
                "every node is an object with an optional `id` (number or string) and `children` array",
            )),
            Category::Eof => Some(Box::new("the input ends before the root object is closed")),
            Category::Syntax | Category::Io => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let message = strip_location(&self.err.to_string());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(message),
            self.span(),
        ))))
    }
}

/// Adapter for [`ChartError`] variants without a source location.
pub struct ErrorAdapter<'a>(pub &'a ChartError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ChartError::NotFound(_) => "orgchart::not_found",
            ChartError::Data { .. } => "orgchart::data",
            ChartError::Io(_) => "orgchart::io",
            ChartError::Export(_) => "orgchart::export",
            ChartError::Config(_) => "orgchart::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ChartError::NotFound(_) => Some(Box::new(
                "only visible nodes can be toggled; expand their ancestors first",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A data error with source location information.
    Data(DataDiagnostic<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Data(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Data(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Data(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Data(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Data(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Data(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Byte offset of a 1-based `line` and `column` in `src`.
///
/// Line 0 (no location known) and positions past the end map to the end of
/// the source.
fn offset_of(src: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return src.len();
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}

/// Drops serde_json's trailing ` at line L column C`; the label shows it.
fn strip_location(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message.to_string(),
    }
}

/// Convert a [`ChartError`] into a reportable error.
pub fn to_reportable(err: &ChartError) -> Reportable<'_> {
    match err {
        ChartError::Data { err, src } => Reportable::Data(DataDiagnostic::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
