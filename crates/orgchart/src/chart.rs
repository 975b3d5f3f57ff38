//! The chart orchestrator.
//!
//! [`OrgChart`] owns the hierarchy and runs one pass after every change:
//!
//! ```text
//! layout → reconcile against the previous pass → bounds
//!        → render adapter → keep as previous → snapshot listeners
//! ```
//!
//! Passes are synchronous and strictly sequential; the chart never waits for
//! the adapter to finish animating.

use std::fmt;

use log::{debug, info};

use orgchart_core::{geometry::Point, identifier::NodeId, person::Person};

use crate::{
    bounds::{ChartBounds, Viewport},
    config::AppConfig,
    error::ChartError,
    hierarchy::{Hierarchy, Node, Toggle},
    layout::{self, LaidOutNode, LayoutResult, Link},
    reconcile::reconcile,
    render::RenderAdapter,
};

/// A finished, static picture of the chart after a pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    nodes: Vec<LaidOutNode>,
    links: Vec<Link>,
    bounds: ChartBounds,
}

impl Snapshot {
    fn new(result: &LayoutResult, bounds: ChartBounds) -> Self {
        Self {
            nodes: result.nodes().to_vec(),
            links: result.links().to_vec(),
            bounds,
        }
    }

    pub fn nodes(&self) -> &[LaidOutNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn bounds(&self) -> ChartBounds {
        self.bounds
    }

    pub fn root(&self) -> Option<&LaidOutNode> {
        self.nodes.first()
    }
}

/// Supplies the children of a node the first time it is expanded.
pub trait ChildLoader {
    /// # Errors
    ///
    /// Any error aborts the expansion and is returned from
    /// [`OrgChart::toggle_expand`]; the hierarchy is left unchanged.
    fn load_children(&mut self, parent: NodeId, person: &Person) -> Result<Vec<Node>, ChartError>;
}

impl<F> ChildLoader for F
where
    F: FnMut(NodeId, &Person) -> Result<Vec<Node>, ChartError>,
{
    fn load_children(&mut self, parent: NodeId, person: &Person) -> Result<Vec<Node>, ChartError> {
        self(parent, person)
    }
}

type Listener = Box<dyn FnMut(&Snapshot)>;

/// An interactive org chart drawing through a [`RenderAdapter`].
///
/// # Examples
///
/// ```
/// use orgchart::{OrgChart, config::AppConfig, hierarchy::{Hierarchy, Node}, render::Scene};
/// use orgchart_core::{identifier::NodeId, person::Person};
///
/// let mut chart = OrgChart::new(AppConfig::default(), Scene::new());
/// chart.load(Hierarchy::new(
///     Node::new("ceo", Person::named("Kate")).with_children(vec![
///         Node::new("cto", Person::named("Sam")),
///     ]),
/// ));
///
/// chart.toggle_expand(NodeId::new("ceo")).unwrap();
/// assert_eq!(chart.snapshot().nodes().len(), 1);
/// ```
pub struct OrgChart<A: RenderAdapter> {
    hierarchy: Hierarchy,
    config: AppConfig,
    previous: Option<LayoutResult>,
    bounds: ChartBounds,
    viewport: Option<Viewport>,
    adapter: A,
    listeners: Vec<Listener>,
    loader: Option<Box<dyn ChildLoader>>,
}

impl<A: RenderAdapter + fmt::Debug> fmt::Debug for OrgChart<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrgChart")
            .field("hierarchy", &self.hierarchy)
            .field("config", &self.config)
            .field("bounds", &self.bounds)
            .field("viewport", &self.viewport)
            .field("adapter", &self.adapter)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<A: RenderAdapter> OrgChart<A> {
    /// Creates an empty chart. Nothing is drawn until [`Self::load`].
    pub fn new(config: AppConfig, adapter: A) -> Self {
        let bounds = ChartBounds::compute(Vec::<Point>::new(), config.layout());
        Self {
            hierarchy: Hierarchy::empty(),
            config,
            previous: None,
            bounds,
            viewport: None,
            adapter,
            listeners: Vec::new(),
            loader: None,
        }
    }

    /// Sets the loader asked for children of nodes expanded for the first time.
    pub fn with_loader(mut self, loader: impl ChildLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Registers a listener called with a snapshot after every pass.
    pub fn on_snapshot(&mut self, listener: impl FnMut(&Snapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces the hierarchy and runs a pass.
    pub fn load(&mut self, hierarchy: Hierarchy) {
        info!(nodes = hierarchy.len(); "Loading hierarchy");
        self.hierarchy = hierarchy;
        self.pass();
    }

    /// Expands or collapses `id`, then runs a pass if anything changed.
    ///
    /// A node that claims children but has none cached is filled from the
    /// [`ChildLoader`], if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::NotFound`] if no visible node has `id`, or the
    /// loader's error. No pass runs on error.
    pub fn toggle_expand(&mut self, id: NodeId) -> Result<Toggle, ChartError> {
        let node = self.hierarchy.find(id).ok_or(ChartError::NotFound(id))?;

        if let Some(loader) = self.loader.as_mut().filter(|_| node.needs_children()) {
            let children = loader.load_children(id, node.person())?;
            debug!(id:% = id, count = children.len(); "Children loaded");
            // An empty answer turns the node into a leaf; nothing to lay out.
            let toggle = if children.is_empty() {
                Toggle::Unchanged
            } else {
                Toggle::Expanded
            };
            self.hierarchy.attach_children(id, children)?;
            if toggle == Toggle::Expanded {
                self.pass();
            }
            return Ok(toggle);
        }

        let toggle = self.hierarchy.toggle_expand(id)?;
        if toggle != Toggle::Unchanged {
            self.pass();
        }
        Ok(toggle)
    }

    /// Marks `id` as the current person and runs a pass.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::NotFound`] if no visible node has `id`.
    pub fn set_current(&mut self, id: NodeId) -> Result<(), ChartError> {
        self.hierarchy.set_current(id)?;
        self.pass();
        Ok(())
    }

    /// Expands every cached subtree and runs a pass.
    pub fn expand_all(&mut self) {
        self.hierarchy.expand_all();
        self.pass();
    }

    /// Collapses everything below the root's direct reports and runs a pass.
    pub fn collapse_all(&mut self) {
        self.hierarchy.collapse_all();
        self.pass();
    }

    /// Replaces the configuration and runs a pass.
    pub fn set_config(&mut self, config: AppConfig) {
        self.config = config;
        self.pass();
    }

    /// Records the host's drawing surface size.
    ///
    /// Bounds are recomputed; a full pass runs only when the layout
    /// configuration asks for it.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        if self.config.layout().should_resize() {
            self.pass();
        } else {
            self.bounds = self.compute_bounds();
        }
    }

    fn compute_bounds(&self) -> ChartBounds {
        let positions = self
            .previous
            .iter()
            .flat_map(|result| result.positions());
        ChartBounds::compute(positions, self.config.layout())
    }

    fn pass(&mut self) {
        let layout_config = self.config.layout();
        let current = layout::layout(&self.hierarchy, layout_config);

        {
            let reconciliation = reconcile(
                self.previous.as_ref(),
                &current,
                layout_config.animation_duration(),
            );
            self.bounds = ChartBounds::compute(current.positions(), layout_config);
            self.adapter.apply(&reconciliation);
        }

        // The stash: the next pass reconciles against this one.
        self.previous = Some(current);

        if !self.listeners.is_empty() {
            let snapshot = self.snapshot();
            for listener in &mut self.listeners {
                listener(&snapshot);
            }
        }
    }

    /// A static picture of the last pass.
    pub fn snapshot(&self) -> Snapshot {
        match &self.previous {
            Some(result) => Snapshot::new(result, self.bounds),
            None => Snapshot {
                bounds: self.bounds,
                ..Snapshot::default()
            },
        }
    }

    pub fn bounds(&self) -> ChartBounds {
        self.bounds
    }

    /// Layout of the last pass, the one the next pass reconciles against.
    pub fn previous(&self) -> Option<&LayoutResult> {
        self.previous.as_ref()
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Translation centering the chart in the viewport, once one is known.
    pub fn viewport_origin(&self) -> Option<Point> {
        self.viewport
            .map(|viewport| viewport.origin(&self.bounds, self.config.layout()))
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }
}
