//! Orgchart CLI library
//!
//! This module contains the core CLI logic for the orgchart tool: load a JSON
//! hierarchy, apply the requested expand/collapse and selection changes as
//! passes, and export the final snapshot to SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use orgchart::{
    ChartError, OrgChart,
    export::{Exporter, svg::SvgBuilder},
    hierarchy::Hierarchy,
    identifier::NodeId,
};

/// Run the orgchart CLI application
///
/// This function processes the input file through the chart pipeline
/// and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `ChartError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed hierarchy data
/// - Toggling or selecting a node that is not visible
/// - Export errors
pub fn run(args: &Args) -> Result<(), ChartError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing org chart"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let hierarchy = Hierarchy::from_json(&source)?;

    let mut chart = OrgChart::new(app_config.clone(), ());
    chart.load(hierarchy);

    if args.collapse_all {
        chart.collapse_all();
    }
    if args.expand_all {
        chart.expand_all();
    }
    for key in &args.expand {
        let toggle = chart.toggle_expand(NodeId::new(key))?;
        debug!(id = key.as_str(), toggle:?; "Toggled from command line");
    }
    if let Some(key) = &args.current {
        chart.set_current(NodeId::new(key))?;
    }

    let mut exporter = SvgBuilder::new(&args.output)
        .with_config(&app_config)
        .build()?;
    exporter.export_snapshot(&chart.snapshot())?;

    Ok(())
}
