//! Orgchart - Incremental layout and render-diff engine for organization charts.
//!
//! An [`OrgChart`] owns a [`hierarchy::Hierarchy`] of people. Every change
//! (loading data, expanding or collapsing a node, selecting the current
//! person, resizing) runs one *pass*: the visible tree is laid out, the layout
//! is reconciled against the previous pass into entering, updating and exiting
//! nodes, the chart bounds are recomputed, and the reconciliation is handed to
//! a [`render::RenderAdapter`] that animates it.
//!
//! Finished passes are also available as static [`Snapshot`]s, which the
//! [`export`] module turns into SVG.
//!
//! # Examples
//!
//! ```rust
//! use orgchart::{OrgChart, config::AppConfig, hierarchy::Hierarchy, render::Scene};
//! use orgchart::identifier::NodeId;
//!
//! let hierarchy = Hierarchy::from_json(r#"{
//!     "id": 1, "name": "Kate Baker",
//!     "children": [{ "id": 2, "name": "Sam John" }]
//! }"#).expect("Failed to parse");
//!
//! let mut chart = OrgChart::new(AppConfig::default(), Scene::new());
//! chart.load(hierarchy);
//! assert_eq!(chart.adapter().len(), 2);
//!
//! chart.toggle_expand(NodeId::from(1_u64)).expect("Node exists");
//! assert!(chart.adapter().is_exiting(NodeId::from(2_u64)));
//! ```

pub mod bounds;
pub mod chart;
pub mod config;
pub mod export;
pub mod hierarchy;
pub mod input;
pub mod layout;
pub mod reconcile;
pub mod render;

mod error;

pub use orgchart_core::{color, draw, geometry, identifier, person};

pub use chart::{ChildLoader, OrgChart, Snapshot};
pub use error::ChartError;

use log::info;

use config::AppConfig;
use export::svg::SvgBuilder;
use hierarchy::Hierarchy;

/// Render a hierarchy straight to an SVG string, without animation.
///
/// Runs a single pass over `hierarchy` as it is and renders the resulting
/// snapshot.
///
/// # Errors
///
/// Returns [`ChartError::Config`] if a configured color is invalid.
///
/// # Examples
///
/// ```rust
/// use orgchart::{config::AppConfig, hierarchy::Hierarchy};
///
/// let hierarchy = Hierarchy::from_json(r#"{ "id": 1, "name": "Kate" }"#).unwrap();
/// let svg = orgchart::render_svg(hierarchy, &AppConfig::default()).unwrap();
/// assert!(svg.contains("Kate"));
/// ```
pub fn render_svg(hierarchy: Hierarchy, config: &AppConfig) -> Result<String, ChartError> {
    info!(nodes = hierarchy.visible_len(); "Rendering hierarchy");

    let mut chart = OrgChart::new(config.clone(), ());
    chart.load(hierarchy);

    let exporter = SvgBuilder::new("").with_config(config).build()?;
    Ok(exporter.render_string(&chart.snapshot()))
}
