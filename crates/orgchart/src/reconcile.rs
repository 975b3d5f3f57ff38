//! Reconciliation of two consecutive layout passes.
//!
//! [`reconcile`] matches the previous pass's [`LayoutResult`] against the
//! current one by node id and classifies every node into exactly one of
//! three sets:
//!
//! - **enter**: only in the current pass. Starts where its parent was drawn
//!   in the previous pass, so new cards grow out of their parent.
//! - **update**: in both passes. Moves from its previous position to its
//!   current one.
//! - **exit**: only in the previous pass. Moves onto the current position of
//!   its nearest surviving ancestor and is removed when it gets there.
//!
//! Links get the same treatment, keyed by their target id.
//!
//! Nodes without an id, and every occurrence of an id after its first in
//! pre-order, are left out of all sets.

use std::{collections::HashMap, time::Duration};

use log::{debug, warn};

use orgchart_core::{geometry::Point, identifier::NodeId};

use crate::layout::{LaidOutNode, LayoutResult, Link};

/// A node moving from `start` to `end` during one pass.
#[derive(Debug, Clone, Copy)]
pub struct NodeTransition<'a> {
    id: NodeId,
    node: &'a LaidOutNode,
    start: Point,
    end: Point,
    remove_on_complete: bool,
}

impl<'a> NodeTransition<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node as laid out in the pass it belongs to: the current pass for
    /// enters and updates, the previous one for exits.
    pub fn node(&self) -> &'a LaidOutNode {
        self.node
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn remove_on_complete(&self) -> bool {
        self.remove_on_complete
    }
}

/// Both endpoints of a link line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub source: Point,
    pub target: Point,
}

impl Segment {
    pub fn new(source: Point, target: Point) -> Self {
        Self { source, target }
    }

    /// A zero-length segment at `point`.
    pub fn collapsed(point: Point) -> Self {
        Self::new(point, point)
    }

    /// Linear interpolation of both endpoints.
    pub fn lerp(self, other: Segment, t: f32) -> Self {
        Self::new(
            self.source.lerp(other.source, t),
            self.target.lerp(other.target, t),
        )
    }

    fn of(link: &Link) -> Self {
        Self::new(link.source_position(), link.target_position())
    }
}

/// A link moving from one segment to another during one pass.
#[derive(Debug, Clone, Copy)]
pub struct LinkTransition<'a> {
    id: NodeId,
    link: &'a Link,
    start: Segment,
    end: Segment,
    remove_on_complete: bool,
}

impl<'a> LinkTransition<'a> {
    /// Id of the link's target node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn link(&self) -> &'a Link {
        self.link
    }

    pub fn start(&self) -> Segment {
        self.start
    }

    pub fn end(&self) -> Segment {
        self.end
    }

    pub fn remove_on_complete(&self) -> bool {
        self.remove_on_complete
    }
}

/// The enter, update and exit sets of one pass.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation<'a> {
    enter: Vec<NodeTransition<'a>>,
    update: Vec<NodeTransition<'a>>,
    exit: Vec<NodeTransition<'a>>,
    link_enter: Vec<LinkTransition<'a>>,
    link_update: Vec<LinkTransition<'a>>,
    link_exit: Vec<LinkTransition<'a>>,
    duration: Duration,
}

impl<'a> Reconciliation<'a> {
    pub fn enter(&self) -> &[NodeTransition<'a>] {
        &self.enter
    }

    pub fn update(&self) -> &[NodeTransition<'a>] {
        &self.update
    }

    pub fn exit(&self) -> &[NodeTransition<'a>] {
        &self.exit
    }

    pub fn link_enter(&self) -> &[LinkTransition<'a>] {
        &self.link_enter
    }

    pub fn link_update(&self) -> &[LinkTransition<'a>] {
        &self.link_update
    }

    pub fn link_exit(&self) -> &[LinkTransition<'a>] {
        &self.link_exit
    }

    /// How long every transition of this pass takes.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// True when nothing enters, nothing exits and nothing moves.
    pub fn is_noop(&self) -> bool {
        self.enter.is_empty()
            && self.exit.is_empty()
            && self.update.iter().all(|t| t.start == t.end)
            && self.link_enter.is_empty()
            && self.link_exit.is_empty()
            && self.link_update.iter().all(|t| t.start == t.end)
    }
}

/// Index of the first occurrence of each id in `result`.
fn index_by_id(result: &LayoutResult, report: bool) -> HashMap<NodeId, usize> {
    let mut map = HashMap::with_capacity(result.len());
    for (index, node) in result.nodes().iter().enumerate() {
        let Some(id) = node.id() else {
            if report {
                warn!(name = node.person().name.as_str(); "Node without id left out of reconciliation");
            }
            continue;
        };
        if map.contains_key(&id) {
            if report {
                warn!(id:% = id; "Duplicate node id left out of reconciliation");
            }
            continue;
        }
        map.insert(id, index);
    }
    map
}

/// The target id of `link`, if its target is the node `ids` keeps for it.
fn owned_target(link: &Link, ids: &HashMap<NodeId, usize>) -> Option<NodeId> {
    link.target()
        .filter(|id| ids.get(id) == Some(&link.target_index()))
}

/// Position of the nearest ancestor of `result.nodes()[index]` that is still
/// laid out in `current`.
fn surviving_ancestor(
    result: &LayoutResult,
    index: usize,
    current: &LayoutResult,
    current_ids: &HashMap<NodeId, usize>,
) -> Option<Point> {
    let nodes = result.nodes();
    let mut cursor = nodes[index].parent_index();
    while let Some(ancestor) = cursor {
        if let Some(&found) = nodes[ancestor].id().and_then(|id| current_ids.get(&id)) {
            return Some(current.nodes()[found].position());
        }
        cursor = nodes[ancestor].parent_index();
    }
    None
}

/// Classifies `current` against `previous` into enter, update and exit sets.
///
/// Pure: neither result is modified, and calling it twice with the same
/// inputs gives the same sets.
pub fn reconcile<'a>(
    previous: Option<&'a LayoutResult>,
    current: &'a LayoutResult,
    duration: Duration,
) -> Reconciliation<'a> {
    let current_ids = index_by_id(current, true);
    let previous_ids = previous
        .map(|previous| index_by_id(previous, false))
        .unwrap_or_default();

    let previous_root = previous.and_then(LayoutResult::root).map(LaidOutNode::position);
    let current_root = current.root().map(LaidOutNode::position);
    let previous_position = |id: NodeId| {
        previous
            .zip(previous_ids.get(&id))
            .map(|(previous, &index)| previous.nodes()[index].position())
    };

    let mut pass = Reconciliation {
        duration,
        ..Reconciliation::default()
    };

    // Current pre-order keeps enter and update sets deterministic.
    let mut start_of = HashMap::with_capacity(current_ids.len());
    for (index, node) in current.nodes().iter().enumerate() {
        let Some(id) = node.id() else { continue };
        if current_ids.get(&id) != Some(&index) {
            continue;
        }

        let end = node.position();
        match previous_position(id) {
            Some(start) => {
                start_of.insert(id, start);
                pass.update.push(NodeTransition {
                    id,
                    node,
                    start,
                    end,
                    remove_on_complete: false,
                });
            }
            None => {
                let start = node
                    .parent()
                    .and_then(previous_position)
                    .or(previous_root)
                    .or(current_root)
                    .unwrap_or(end);
                start_of.insert(id, start);
                pass.enter.push(NodeTransition {
                    id,
                    node,
                    start,
                    end,
                    remove_on_complete: false,
                });
            }
        }
    }

    let mut end_of = HashMap::new();
    if let Some(previous) = previous {
        for (index, node) in previous.nodes().iter().enumerate() {
            let Some(id) = node.id() else { continue };
            if previous_ids.get(&id) != Some(&index) || current_ids.contains_key(&id) {
                continue;
            }

            let start = node.position();
            let end = surviving_ancestor(previous, index, current, &current_ids)
                .or(current_root)
                .unwrap_or(start);
            end_of.insert(id, end);
            pass.exit.push(NodeTransition {
                id,
                node,
                start,
                end,
                remove_on_complete: true,
            });
        }
    }

    // A link belongs to the diff only when its target is the node that
    // holds the id.
    let previous_links: HashMap<NodeId, &Link> = previous
        .map(LayoutResult::links)
        .unwrap_or_default()
        .iter()
        .filter_map(|link| owned_target(link, &previous_ids).map(|id| (id, link)))
        .collect();

    for link in current.links() {
        let Some(id) = owned_target(link, &current_ids) else {
            continue;
        };

        let end = Segment::of(link);
        match previous_links.get(&id) {
            Some(previous_link) => pass.link_update.push(LinkTransition {
                id,
                link,
                start: Segment::of(previous_link),
                end,
                remove_on_complete: false,
            }),
            None => {
                let origin = start_of.get(&id).copied().unwrap_or(end.target);
                pass.link_enter.push(LinkTransition {
                    id,
                    link,
                    start: Segment::collapsed(origin),
                    end,
                    remove_on_complete: false,
                });
            }
        }
    }

    for link in previous.map(LayoutResult::links).unwrap_or_default() {
        let Some(id) = owned_target(link, &previous_ids) else {
            continue;
        };
        if current_ids.contains_key(&id) {
            continue;
        }

        let target = end_of.get(&id).copied().unwrap_or(link.target_position());
        pass.link_exit.push(LinkTransition {
            id,
            link,
            start: Segment::of(link),
            end: Segment::collapsed(target),
            remove_on_complete: true,
        });
    }

    debug!(
        enter = pass.enter.len(),
        update = pass.update.len(),
        exit = pass.exit.len();
        "Reconciled layout passes"
    );
    pass
}

#[cfg(test)]
mod tests {
    use orgchart_core::person::Person;

    use super::*;
    use crate::{
        config::LayoutConfig,
        hierarchy::{Hierarchy, Node},
        layout::layout,
    };

    const DURATION: Duration = Duration::from_millis(350);

    fn leaf(id: &str) -> Node {
        Node::new(id, Person::named(id))
    }

    /// ceo
    /// ├── cto
    /// │   ├── dev1
    /// │   └── dev2
    /// └── cfo
    fn sample() -> Hierarchy {
        Hierarchy::new(Node::new("ceo", Person::named("ceo")).with_children(vec![
            Node::new("cto", Person::named("cto")).with_children(vec![leaf("dev1"), leaf("dev2")]),
            leaf("cfo"),
        ]))
    }

    fn ids(transitions: &[NodeTransition<'_>]) -> Vec<String> {
        transitions.iter().map(|t| t.id().to_string()).collect()
    }

    #[test]
    fn test_first_pass_enters_from_root() {
        let config = LayoutConfig::default();
        let current = layout(&sample(), &config);
        let pass = reconcile(None, &current, DURATION);

        assert_eq!(ids(pass.enter()), ["ceo", "cto", "dev1", "dev2", "cfo"]);
        assert!(pass.update().is_empty());
        assert!(pass.exit().is_empty());
        let root = current.root().unwrap().position();
        assert!(pass.enter().iter().all(|t| t.start() == root));
        assert_eq!(pass.link_enter().len(), 4);
        assert_eq!(pass.duration(), DURATION);
    }

    #[test]
    fn test_identical_passes_are_noop() {
        let config = LayoutConfig::default();
        let hierarchy = sample();
        let previous = layout(&hierarchy, &config);
        let current = layout(&hierarchy, &config);

        let first = reconcile(Some(&previous), &current, DURATION);
        let second = reconcile(Some(&previous), &current, DURATION);
        for pass in [first, second] {
            assert!(pass.is_noop());
            assert_eq!(pass.update().len(), 5);
            assert_eq!(pass.link_update().len(), 4);
        }
    }

    #[test]
    fn test_expand_enters_from_parent_previous_position() {
        let config = LayoutConfig::default();
        let mut hierarchy = sample();
        let cto = NodeId::new("cto");
        hierarchy.toggle_expand(cto).unwrap();
        let previous = layout(&hierarchy, &config);

        hierarchy.toggle_expand(cto).unwrap();
        let current = layout(&hierarchy, &config);
        let pass = reconcile(Some(&previous), &current, DURATION);

        let stashed = previous.get(cto).unwrap().position();
        assert_eq!(ids(pass.enter()), ["dev1", "dev2"]);
        for transition in pass.enter() {
            assert_eq!(transition.start(), stashed);
            assert_eq!(transition.end(), current.get(transition.id()).unwrap().position());
        }
        for transition in pass.link_enter() {
            assert_eq!(transition.start(), Segment::collapsed(stashed));
        }
    }

    #[test]
    fn test_collapse_exits_toward_collapsed_node() {
        let config = LayoutConfig::default();
        let mut hierarchy = sample();
        let previous = layout(&hierarchy, &config);

        let cto = NodeId::new("cto");
        hierarchy.toggle_expand(cto).unwrap();
        let current = layout(&hierarchy, &config);
        let pass = reconcile(Some(&previous), &current, DURATION);

        let target = current.get(cto).unwrap().position();
        assert_eq!(ids(pass.exit()), ["dev1", "dev2"]);
        for transition in pass.exit() {
            assert!(transition.remove_on_complete());
            assert_eq!(transition.end(), target);
            assert_eq!(transition.start(), previous.get(transition.id()).unwrap().position());
        }
        assert_eq!(pass.link_exit().len(), 2);
        assert!(pass.link_exit().iter().all(|t| t.end() == Segment::collapsed(target)));
        assert!(pass.enter().is_empty());
        assert_eq!(pass.update().len(), 3);
    }

    #[test]
    fn test_exit_without_surviving_ancestor_goes_to_root() {
        let config = LayoutConfig::default();
        let previous = layout(&sample(), &config);
        let current = layout(&Hierarchy::new(leaf("solo")), &config);
        let pass = reconcile(Some(&previous), &current, DURATION);

        assert_eq!(pass.exit().len(), 5);
        assert!(pass.exit().iter().all(|t| t.end() == Point::new(0.0, 0.0)));
        assert_eq!(ids(pass.enter()), ["solo"]);
    }

    #[test]
    fn test_missing_and_duplicate_ids_are_excluded() {
        let config = LayoutConfig::default();
        let hierarchy = Hierarchy::new(Node::new("root", Person::named("root")).with_children(vec![
            leaf("twin"),
            leaf("twin"),
            Node::anonymous(Person::named("nobody")),
        ]));
        let current = layout(&hierarchy, &config);
        let pass = reconcile(None, &current, DURATION);

        assert_eq!(current.len(), 4);
        assert_eq!(ids(pass.enter()), ["root", "twin"]);
        assert_eq!(pass.link_enter().len(), 1);
        assert_eq!(
            pass.enter()[1].end(),
            current.nodes()[1].position(),
            "first occurrence wins"
        );
    }

    #[test]
    fn test_duplicate_of_root_has_no_link() {
        // x -> (a, x): the second `x` reuses the root's id.
        let config = LayoutConfig::default();
        let hierarchy = Hierarchy::new(
            Node::new("x", Person::named("x")).with_children(vec![leaf("a"), leaf("x")]),
        );
        let current = layout(&hierarchy, &config);
        let pass = reconcile(None, &current, DURATION);

        assert_eq!(ids(pass.enter()), ["x", "a"]);
        assert_eq!(pass.link_enter().len(), 1);
        assert_eq!(pass.link_enter()[0].id(), NodeId::new("a"));
        assert_eq!(
            pass.link_enter()[0].end().target,
            current.get(NodeId::new("a")).unwrap().position()
        );
    }

    #[test]
    fn test_duplicate_links_never_update_or_exit() {
        let config = LayoutConfig::default();
        let with_twin = Hierarchy::new(
            Node::new("x", Person::named("x")).with_children(vec![leaf("a"), leaf("x")]),
        );
        let previous = layout(&with_twin, &config);

        let same = layout(&with_twin, &config);
        let pass = reconcile(Some(&previous), &same, DURATION);
        assert_eq!(pass.link_update().len(), 1);
        assert!(pass.link_exit().is_empty());

        let alone = layout(&Hierarchy::new(leaf("b")), &config);
        let pass = reconcile(Some(&previous), &alone, DURATION);
        assert_eq!(ids(pass.exit()), ["x", "a"]);
        assert_eq!(pass.link_exit().len(), 1);
        assert_eq!(pass.link_exit()[0].id(), NodeId::new("a"));
    }

    #[test]
    fn test_segment_lerp() {
        let start = Segment::collapsed(Point::new(0.0, 0.0));
        let end = Segment::new(Point::new(0.0, 10.0), Point::new(20.0, 30.0));
        let half = start.lerp(end, 0.5);
        assert_eq!(half.source, Point::new(0.0, 5.0));
        assert_eq!(half.target, Point::new(10.0, 15.0));
    }
}
