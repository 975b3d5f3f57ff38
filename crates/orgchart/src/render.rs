//! The drawing side of a pass.
//!
//! The engine hands every [`Reconciliation`] to a [`RenderAdapter`] and does
//! not wait for it: animation, and removal of exiting nodes once their
//! transition ends, belong to the adapter.
//!
//! [`Scene`] is a retained adapter that keeps every transition in flight and
//! interpolates it linearly as the host advances time.

use std::{collections::HashMap, time::Duration};

use log::trace;

use orgchart_core::{geometry::Point, identifier::NodeId};

use crate::reconcile::{Reconciliation, Segment};

/// Receives the result of every layout pass.
pub trait RenderAdapter {
    fn apply(&mut self, pass: &Reconciliation<'_>);
}

/// Discards every pass, for hosts that only read snapshots.
impl RenderAdapter for () {
    fn apply(&mut self, _pass: &Reconciliation<'_>) {}
}

/// Progress of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Track<T> {
    start: T,
    end: T,
    elapsed: Duration,
    duration: Duration,
    remove_on_complete: bool,
}

impl<T: Copy> Track<T> {
    fn new(start: T, end: T, duration: Duration, remove_on_complete: bool) -> Self {
        Self {
            start,
            end,
            elapsed: Duration::ZERO,
            duration,
            remove_on_complete,
        }
    }

    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn expired(&self) -> bool {
        self.remove_on_complete && self.is_done()
    }
}

/// Retained set of in-flight node and link transitions.
///
/// Nodes are keyed by id, links by target id. A pass replaces the tracks of
/// the nodes it names and leaves every other track running, so nodes still
/// exiting from one pass coexist with nodes entering in the next.
///
/// ```
/// # use std::time::Duration;
/// # use orgchart::{config::LayoutConfig, hierarchy::{Hierarchy, Node}, layout, reconcile, render::{RenderAdapter, Scene}};
/// # use orgchart_core::person::Person;
/// let hierarchy = Hierarchy::new(Node::new("ceo", Person::named("Kate")));
/// let result = layout::layout(&hierarchy, &LayoutConfig::default());
///
/// let mut scene = Scene::new();
/// scene.apply(&reconcile::reconcile(None, &result, Duration::from_millis(350)));
/// scene.advance(Duration::from_millis(350));
/// assert!(scene.is_settled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: HashMap<NodeId, Track<Point>>,
    links: HashMap<NodeId, Track<Segment>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves every transition forward by `dt` and drops exits that finished.
    pub fn advance(&mut self, dt: Duration) {
        for track in self.nodes.values_mut() {
            track.elapsed = (track.elapsed + dt).min(track.duration);
        }
        for track in self.links.values_mut() {
            track.elapsed = (track.elapsed + dt).min(track.duration);
        }
        self.prune();
    }

    fn prune(&mut self) {
        self.nodes.retain(|_, track| !track.expired());
        self.links.retain(|_, track| !track.expired());
    }

    /// Current interpolated position of a node still in the scene.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.nodes
            .get(&id)
            .map(|track| track.start.lerp(track.end, track.progress()))
    }

    /// Current interpolated positions of every node in the scene.
    pub fn positions(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.nodes
            .iter()
            .map(|(&id, track)| (id, track.start.lerp(track.end, track.progress())))
    }

    /// Current interpolated segment of the link ending at `target`.
    pub fn link(&self, target: NodeId) -> Option<Segment> {
        self.links
            .get(&target)
            .map(|track| track.start.lerp(track.end, track.progress()))
    }

    /// True when the node is on its way out.
    pub fn is_exiting(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|track| track.remove_on_complete)
    }

    /// True when no transition is running.
    pub fn is_settled(&self) -> bool {
        self.nodes.values().all(Track::is_done) && self.links.values().all(Track::is_done)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl RenderAdapter for Scene {
    fn apply(&mut self, pass: &Reconciliation<'_>) {
        let duration = pass.duration();

        for transition in pass.enter().iter().chain(pass.update()).chain(pass.exit()) {
            self.nodes.insert(
                transition.id(),
                Track::new(
                    transition.start(),
                    transition.end(),
                    duration,
                    transition.remove_on_complete(),
                ),
            );
        }

        for transition in pass
            .link_enter()
            .iter()
            .chain(pass.link_update())
            .chain(pass.link_exit())
        {
            self.links.insert(
                transition.id(),
                Track::new(
                    transition.start(),
                    transition.end(),
                    duration,
                    transition.remove_on_complete(),
                ),
            );
        }

        self.prune();
        trace!(nodes = self.nodes.len(), links = self.links.len(); "Scene updated");
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use orgchart_core::person::Person;

    use super::*;
    use crate::{
        config::LayoutConfig,
        hierarchy::{Hierarchy, Node},
        layout::layout,
        reconcile::reconcile,
    };

    const DURATION: Duration = Duration::from_millis(100);

    fn sample() -> Hierarchy {
        Hierarchy::new(Node::new("a", Person::named("a")).with_children(vec![
            Node::new("b", Person::named("b"))
                .with_children(vec![Node::new("c", Person::named("c"))]),
            Node::new("d", Person::named("d")),
        ]))
    }

    #[test]
    fn test_linear_interpolation() {
        let config = LayoutConfig::default();
        let current = layout(&sample(), &config);
        let mut scene = Scene::new();
        scene.apply(&reconcile(None, &current, DURATION));

        let d = NodeId::new("d");
        let end = current.get(d).unwrap().position();
        assert_eq!(scene.position(d), Some(Point::new(0.0, 0.0)));

        scene.advance(Duration::from_millis(50));
        let halfway = scene.position(d).unwrap();
        assert_approx_eq!(f32, halfway.x(), end.x() / 2.0, epsilon = 1e-3);
        assert_approx_eq!(f32, halfway.y(), end.y() / 2.0, epsilon = 1e-3);
        assert!(!scene.is_settled());

        scene.advance(Duration::from_millis(80));
        assert_eq!(scene.position(d), Some(end));
        assert!(scene.is_settled());
        assert_eq!(scene.link(d).unwrap().target, end);
    }

    #[test]
    fn test_exits_removed_after_transition() {
        let config = LayoutConfig::default();
        let mut hierarchy = sample();
        let first = layout(&hierarchy, &config);
        let mut scene = Scene::new();
        scene.apply(&reconcile(None, &first, DURATION));
        scene.advance(DURATION);

        hierarchy.toggle_expand(NodeId::new("b")).unwrap();
        let second = layout(&hierarchy, &config);
        scene.apply(&reconcile(Some(&first), &second, DURATION));

        let c = NodeId::new("c");
        assert!(scene.is_exiting(c));
        assert_eq!(scene.len(), 4);

        scene.advance(DURATION);
        assert_eq!(scene.position(c), None);
        assert!(scene.link(c).is_none());
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_exits_coexist_with_next_pass() {
        let config = LayoutConfig::default();
        let mut hierarchy = sample();
        let first = layout(&hierarchy, &config);
        let mut scene = Scene::new();
        scene.apply(&reconcile(None, &first, DURATION));
        scene.advance(DURATION);

        hierarchy.toggle_expand(NodeId::new("b")).unwrap();
        let second = layout(&hierarchy, &config);
        scene.apply(&reconcile(Some(&first), &second, DURATION));
        scene.advance(Duration::from_millis(30));

        hierarchy.set_current(NodeId::new("d")).unwrap();
        let third = layout(&hierarchy, &config);
        scene.apply(&reconcile(Some(&second), &third, DURATION));

        let c = NodeId::new("c");
        assert!(scene.is_exiting(c));
        assert!(scene.position(c).is_some());
        scene.advance(Duration::from_millis(70));
        assert_eq!(scene.position(c), None);
    }

    #[test]
    fn test_zero_duration_settles_immediately() {
        let config = LayoutConfig::default();
        let mut hierarchy = sample();
        let first = layout(&hierarchy, &config);
        hierarchy.toggle_expand(NodeId::new("b")).unwrap();
        let second = layout(&hierarchy, &config);

        let mut scene = Scene::new();
        scene.apply(&reconcile(None, &first, Duration::ZERO));
        scene.apply(&reconcile(Some(&first), &second, Duration::ZERO));

        assert!(scene.is_settled());
        assert_eq!(scene.len(), 3);
    }
}
