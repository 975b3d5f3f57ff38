//! Layout of the visible tree.
//!
//! A layout pass walks [`Hierarchy::pre_order`], asks an [`Engine`] for the
//! horizontal offset of every visit and places each node at
//! `y = depth * line_depth_y`. The result of a pass is a [`LayoutResult`]:
//! one [`LaidOutNode`] per visit plus one [`Link`] per parent/child pair.
//! Positions are the top-center anchor of a card, with the root at `x = 0`.

mod engines;

pub use engines::{Engine, EngineBuilder, LayoutTree};

use log::{debug, trace};

use orgchart_core::{geometry::Point, identifier::NodeId, person::Person};

use crate::{config::LayoutConfig, hierarchy::Hierarchy};

/// A node placed by a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutNode {
    id: Option<NodeId>,
    parent: Option<NodeId>,
    parent_index: Option<usize>,
    depth: usize,
    position: Point,
    person: Person,
    has_child: bool,
    expanded: bool,
}

impl LaidOutNode {
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Index of the parent within [`LayoutResult::nodes`].
    pub fn parent_index(&self) -> Option<usize> {
        self.parent_index
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Display data as it was when the pass ran.
    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn has_child(&self) -> bool {
        self.has_child
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }
}

/// A directed edge from a parent to a child, identified by the child.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    source: Option<NodeId>,
    target: Option<NodeId>,
    target_index: usize,
    source_position: Point,
    target_position: Point,
}

impl Link {
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Index of the target within [`LayoutResult::nodes`].
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn source_position(&self) -> Point {
        self.source_position
    }

    pub fn target_position(&self) -> Point {
        self.target_position
    }
}

/// Output of one layout pass.
///
/// Nodes are stored in pre-order, so the root (if any) comes first and a
/// parent always precedes its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    nodes: Vec<LaidOutNode>,
    links: Vec<Link>,
}

impl LayoutResult {
    pub fn nodes(&self) -> &[LaidOutNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn root(&self) -> Option<&LaidOutNode> {
        self.nodes.first()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node in pre-order carrying `id`.
    pub fn get(&self, id: NodeId) -> Option<&LaidOutNode> {
        self.nodes.iter().find(|node| node.id == Some(id))
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(LaidOutNode::position)
    }
}

/// Lays out the visible part of `hierarchy` with the engine `config` selects.
pub fn layout(hierarchy: &Hierarchy, config: &LayoutConfig) -> LayoutResult {
    let mut builder = EngineBuilder::new()
        .with_node_width(config.node_width())
        .with_node_spacing(config.node_spacing());
    let engine = builder.engine(config.engine());

    let visits: Vec<_> = hierarchy.pre_order().collect();
    let tree = LayoutTree::from_parents(visits.iter().map(|visit| visit.parent_index));
    let offsets = engine.calculate(&tree);

    let nodes: Vec<LaidOutNode> = visits
        .iter()
        .zip(offsets)
        .map(|(visit, x)| LaidOutNode {
            id: visit.node.id(),
            parent: visit.parent,
            parent_index: visit.parent_index,
            depth: visit.depth,
            position: Point::new(x, visit.depth as f32 * config.line_depth_y()),
            person: visit.node.person().clone(),
            has_child: visit.node.has_child(),
            expanded: visit.node.is_expanded(),
        })
        .collect();

    let links = nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let parent = &nodes[node.parent_index?];
            Some(Link {
                source: parent.id,
                target: node.id,
                target_index: index,
                source_position: parent.position,
                target_position: node.position,
            })
        })
        .collect();

    let result = LayoutResult { nodes, links };
    debug!(
        engine:% = config.engine(),
        nodes = result.nodes.len(),
        links = result.links.len();
        "Layout calculated"
    );
    trace!(result:?; "Layout result");
    result
}
