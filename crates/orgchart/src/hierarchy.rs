//! The mutable tree of people a chart is drawn from.
//!
//! A [`Hierarchy`] owns a single root [`Node`]. Each node either shows its
//! children ([`Children::Expanded`]) or keeps them cached out of sight
//! ([`Children::Collapsed`]); only expanded children are *materialized* and
//! take part in layout. [`Hierarchy::pre_order`] walks the materialized tree.
//!
//! # JSON data
//!
//! [`Hierarchy::from_json`] reads one root object. Person fields sit next to
//! the structural ones:
//!
//! ```
//! # use orgchart::hierarchy::Hierarchy;
//! let hierarchy = Hierarchy::from_json(r#"{
//!     "id": 100,
//!     "name": "Kate Baker",
//!     "membership": { "type": "member", "label": "Adhérent" },
//!     "children": [
//!         { "id": 101, "name": "Sam John" },
//!         { "id": 102, "name": "Ellen Cott", "hasChild": true }
//!     ]
//! }"#).unwrap();
//!
//! let names: Vec<_> = hierarchy.pre_order().map(|v| v.node.person().name.as_str()).collect();
//! assert_eq!(names, ["Kate Baker", "Sam John", "Ellen Cott"]);
//! ```

use log::debug;
use serde::Deserialize;

use orgchart_core::{identifier::NodeId, person::Person};

use crate::error::ChartError;

/// Child state of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    /// Children are visible and laid out.
    Expanded(Vec<Node>),
    /// Children are cached and hidden. May be empty for a node whose
    /// children have not been loaded yet.
    Collapsed(Vec<Node>),
}

impl Default for Children {
    fn default() -> Self {
        Self::Expanded(Vec::new())
    }
}

/// One person in the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Option<NodeId>,
    person: Person,
    has_child: bool,
    children: Children,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, person: Person) -> Self {
        Self {
            id: Some(id.into()),
            person,
            has_child: false,
            children: Children::default(),
        }
    }

    /// A node without identity. It is laid out but never reconciled.
    pub fn anonymous(person: Person) -> Self {
        Self {
            id: None,
            person,
            has_child: false,
            children: Children::default(),
        }
    }

    /// Replaces the children with visible ones.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.has_child = !children.is_empty();
        self.children = Children::Expanded(children);
        self
    }

    /// Replaces the children with cached, hidden ones.
    pub fn with_collapsed_children(mut self, children: Vec<Node>) -> Self {
        self.has_child = !children.is_empty();
        self.children = Children::Collapsed(children);
        self
    }

    /// Marks the node as having children that are not loaded yet.
    pub fn with_unloaded_children(mut self) -> Self {
        self.has_child = true;
        self.children = Children::Collapsed(Vec::new());
        self
    }

    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn has_child(&self) -> bool {
        self.has_child
    }

    pub fn children_state(&self) -> &Children {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.children, Children::Expanded(_))
    }

    /// Materialized children; empty while collapsed.
    pub fn children(&self) -> &[Node] {
        match &self.children {
            Children::Expanded(children) => children,
            Children::Collapsed(_) => &[],
        }
    }

    /// True when the node claims children but none are cached or shown.
    pub fn needs_children(&self) -> bool {
        self.has_child && matches!(&self.children, Children::Collapsed(cached) if cached.is_empty())
    }

    fn all_children(&self) -> &[Node] {
        match &self.children {
            Children::Expanded(children) | Children::Collapsed(children) => children,
        }
    }

    fn all_children_mut(&mut self) -> &mut Vec<Node> {
        match &mut self.children {
            Children::Expanded(children) | Children::Collapsed(children) => children,
        }
    }

    fn visible_children_mut(&mut self) -> &mut [Node] {
        match &mut self.children {
            Children::Expanded(children) => children,
            Children::Collapsed(_) => &mut [],
        }
    }

    fn set_expanded(&mut self, expanded: bool) {
        let children = std::mem::take(self.all_children_mut());
        self.children = if expanded {
            Children::Expanded(children)
        } else {
            Children::Collapsed(children)
        };
    }
}

/// Result of [`Hierarchy::toggle_expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Expanded,
    Collapsed,
    /// The node has no children; nothing changed.
    Unchanged,
}

/// One step of a pre-order walk.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a Node,
    /// Root is depth 0.
    pub depth: usize,
    pub parent: Option<NodeId>,
    /// Position of this visit in the walk.
    pub index: usize,
    /// Walk position of the parent visit.
    pub parent_index: Option<usize>,
}

/// Depth-first pre-order walk over materialized nodes.
///
/// Cloning the iterator restarts nothing: the clone continues from the same
/// point. Ask [`Hierarchy::pre_order`] for a fresh walk.
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    stack: Vec<(&'a Node, usize, Option<NodeId>, Option<usize>)>,
    next_index: usize,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth, parent, parent_index) = self.stack.pop()?;
        let index = self.next_index;
        self.next_index += 1;

        self.stack.extend(
            node.children()
                .iter()
                .rev()
                .map(|child| (child, depth + 1, node.id, Some(index))),
        );

        Some(Visit {
            node,
            depth,
            parent,
            index,
            parent_index,
        })
    }
}

/// A tree of people with a single root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    root: Option<Node>,
}

impl Hierarchy {
    pub fn new(root: Node) -> Self {
        Self { root: Some(root) }
    }

    /// A hierarchy with no nodes; laying it out yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Parses a JSON root object.
    ///
    /// Ids may be numbers or strings. A node with `hasChild: true` and no
    /// `children` starts collapsed with nothing cached; `expanded: false`
    /// starts a node collapsed with its children cached.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Data`] carrying the source when the JSON is
    /// malformed or not shaped like a node.
    pub fn from_json(src: &str) -> Result<Self, ChartError> {
        let raw: RawNode =
            serde_json::from_str(src).map_err(|err| ChartError::new_data_error(err, src))?;
        let root = raw.into_node();
        debug!(root:? = root.id.map(|id| id.to_string()); "Hierarchy loaded");
        Ok(Self::new(root))
    }

    /// Walks materialized nodes depth-first, root first.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self
                .root
                .iter()
                .map(|root| (root, 0, None, None))
                .collect(),
            next_index: 0,
        }
    }

    /// Finds a materialized node; cached subtrees are not searched.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.pre_order()
            .find(|visit| visit.node.id == Some(id))
            .map(|visit| visit.node)
    }

    fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let mut stack: Vec<&mut Node> = self.root.iter_mut().collect();
        while let Some(node) = stack.pop() {
            if node.id == Some(id) {
                return Some(node);
            }
            stack.extend(node.visible_children_mut().iter_mut().rev());
        }
        None
    }

    /// Visits every node, cached ones included.
    fn for_each_mut(&mut self, mut visit: impl FnMut(&mut Node)) {
        let mut stack: Vec<&mut Node> = self.root.iter_mut().collect();
        while let Some(node) = stack.pop() {
            visit(node);
            stack.extend(node.all_children_mut().iter_mut());
        }
    }

    /// Collapses a node showing its children, or shows a collapsed node's
    /// cached children.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::NotFound`] if no materialized node has `id`;
    /// the tree is left untouched.
    pub fn toggle_expand(&mut self, id: NodeId) -> Result<Toggle, ChartError> {
        let node = self.find_mut(id).ok_or(ChartError::NotFound(id))?;
        if !node.has_child {
            return Ok(Toggle::Unchanged);
        }

        let toggle = if node.is_expanded() {
            node.set_expanded(false);
            Toggle::Collapsed
        } else {
            node.set_expanded(true);
            Toggle::Expanded
        };
        debug!(id:% = id, toggle:? = toggle; "Node toggled");
        Ok(toggle)
    }

    /// Makes `id` the only current node in the whole tree.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::NotFound`] if no materialized node has `id`;
    /// the previous current node stays current.
    pub fn set_current(&mut self, id: NodeId) -> Result<(), ChartError> {
        if self.find(id).is_none() {
            return Err(ChartError::NotFound(id));
        }

        self.for_each_mut(|node| node.person.is_current = false);
        if let Some(node) = self.find_mut(id) {
            node.person.is_current = true;
        }
        Ok(())
    }

    /// Installs lazily loaded children under `id` and shows them.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::NotFound`] if no materialized node has `id`.
    pub fn attach_children(&mut self, id: NodeId, children: Vec<Node>) -> Result<(), ChartError> {
        let node = self.find_mut(id).ok_or(ChartError::NotFound(id))?;
        debug!(id:% = id, count = children.len(); "Children attached");
        node.has_child = !children.is_empty();
        node.children = Children::Expanded(children);
        Ok(())
    }

    /// Shows every cached subtree.
    pub fn expand_all(&mut self) {
        self.for_each_mut(|node| {
            if node.has_child {
                node.set_expanded(true);
            }
        });
    }

    /// Hides everything below the root's direct reports.
    pub fn collapse_all(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        root.set_expanded(true);

        let mut stack: Vec<&mut Node> = root.all_children_mut().iter_mut().collect();
        while let Some(node) = stack.pop() {
            if node.has_child {
                node.set_expanded(false);
            }
            stack.extend(node.all_children_mut().iter_mut());
        }
    }

    /// Number of materialized nodes.
    pub fn visible_len(&self) -> usize {
        self.pre_order().count()
    }

    /// Number of nodes, cached ones included.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node> = self.root.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.all_children());
        }
        count
    }
}

/// Wire form of a node: structure fields plus the flattened person.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(default)]
    id: Option<NodeId>,
    #[serde(default)]
    has_child: bool,
    #[serde(default)]
    expanded: Option<bool>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
    #[serde(flatten)]
    person: Person,
}

impl RawNode {
    fn into_node(self) -> Node {
        let children: Vec<Node> = self
            .children
            .unwrap_or_default()
            .into_iter()
            .map(RawNode::into_node)
            .collect();

        let node = match self.id {
            Some(id) => Node::new(id, self.person),
            None => Node::anonymous(self.person),
        };

        if children.is_empty() {
            if self.has_child {
                node.with_unloaded_children()
            } else {
                node
            }
        } else if self.expanded.unwrap_or(true) {
            node.with_children(children)
        } else {
            node.with_collapsed_children(children)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str) -> Person {
        Person::named(name)
    }

    /// a
    /// ├── b
    /// │   ├── d
    /// │   └── e
    /// └── c
    fn sample() -> Hierarchy {
        Hierarchy::new(Node::new("a", person("A")).with_children(vec![
            Node::new("b", person("B")).with_children(vec![
                Node::new("d", person("D")),
                Node::new("e", person("E")),
            ]),
            Node::new("c", person("C")),
        ]))
    }

    fn ids(hierarchy: &Hierarchy) -> Vec<String> {
        hierarchy
            .pre_order()
            .map(|visit| visit.node.id().map(|id| id.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_pre_order_visits() {
        let hierarchy = sample();
        let visits: Vec<_> = hierarchy.pre_order().collect();

        assert_eq!(ids(&hierarchy), ["a", "b", "d", "e", "c"]);
        assert_eq!(visits[0].depth, 0);
        assert_eq!(visits[0].parent, None);
        assert_eq!(visits[2].depth, 2);
        assert_eq!(visits[2].parent, Some(NodeId::new("b")));
        assert_eq!(visits[2].parent_index, Some(1));
        assert_eq!(visits[4].parent_index, Some(0));
        assert_eq!(visits[4].index, 4);
    }

    #[test]
    fn test_pre_order_is_restartable() {
        let hierarchy = sample();
        let mut walk = hierarchy.pre_order();
        walk.next();
        assert_eq!(walk.clone().count(), 4);
        assert_eq!(hierarchy.pre_order().count(), 5);
    }

    #[test]
    fn test_empty_hierarchy() {
        let hierarchy = Hierarchy::empty();
        assert!(hierarchy.is_empty());
        assert_eq!(hierarchy.pre_order().count(), 0);
    }

    #[test]
    fn test_toggle_collapses_and_restores() {
        let mut hierarchy = sample();
        let b = NodeId::new("b");

        assert_eq!(hierarchy.toggle_expand(b).unwrap(), Toggle::Collapsed);
        assert_eq!(ids(&hierarchy), ["a", "b", "c"]);
        assert_eq!(hierarchy.len(), 5);
        assert!(hierarchy.find(b).unwrap().has_child());

        assert_eq!(hierarchy.toggle_expand(b).unwrap(), Toggle::Expanded);
        assert_eq!(ids(&hierarchy), ["a", "b", "d", "e", "c"]);
    }

    #[test]
    fn test_toggle_leaf_is_noop() {
        let mut hierarchy = sample();
        let before = hierarchy.clone();
        assert_eq!(
            hierarchy.toggle_expand(NodeId::new("c")).unwrap(),
            Toggle::Unchanged
        );
        assert_eq!(hierarchy, before);
    }

    #[test]
    fn test_toggle_unknown_or_hidden_id() {
        let mut hierarchy = sample();
        hierarchy.toggle_expand(NodeId::new("b")).unwrap();
        let before = hierarchy.clone();

        let err = hierarchy.toggle_expand(NodeId::new("d")).unwrap_err();
        assert!(matches!(err, ChartError::NotFound(id) if id == "d"));
        assert!(hierarchy.toggle_expand(NodeId::new("zz")).is_err());
        assert_eq!(hierarchy, before);
    }

    #[test]
    fn test_set_current_moves_marker() {
        let mut hierarchy = sample();
        hierarchy.set_current(NodeId::new("d")).unwrap();
        hierarchy.set_current(NodeId::new("c")).unwrap();

        let current: Vec<_> = hierarchy
            .pre_order()
            .filter(|visit| visit.node.person().is_current)
            .map(|visit| visit.node.id().unwrap().to_string())
            .collect();
        assert_eq!(current, ["c"]);
    }

    #[test]
    fn test_set_current_clears_cached_subtrees() {
        let mut hierarchy = sample();
        hierarchy.set_current(NodeId::new("d")).unwrap();
        hierarchy.toggle_expand(NodeId::new("b")).unwrap();
        hierarchy.set_current(NodeId::new("c")).unwrap();
        hierarchy.toggle_expand(NodeId::new("b")).unwrap();

        assert!(!hierarchy.find(NodeId::new("d")).unwrap().person().is_current);
    }

    #[test]
    fn test_set_current_unknown_keeps_state() {
        let mut hierarchy = sample();
        hierarchy.set_current(NodeId::new("e")).unwrap();
        assert!(hierarchy.set_current(NodeId::new("nobody")).is_err());
        assert!(hierarchy.find(NodeId::new("e")).unwrap().person().is_current);
    }

    #[test]
    fn test_attach_children_expands() {
        let mut hierarchy =
            Hierarchy::new(Node::new("a", person("A")).with_unloaded_children());
        let a = NodeId::new("a");
        assert!(hierarchy.find(a).unwrap().needs_children());

        hierarchy
            .attach_children(a, vec![Node::new("x", person("X"))])
            .unwrap();
        assert_eq!(ids(&hierarchy), ["a", "x"]);
        assert!(!hierarchy.find(a).unwrap().needs_children());
        assert_eq!(hierarchy.root().unwrap().person().name, "A");
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut hierarchy = sample();
        hierarchy.collapse_all();
        assert_eq!(ids(&hierarchy), ["a", "b", "c"]);

        hierarchy.expand_all();
        assert_eq!(hierarchy.visible_len(), 5);
    }

    #[test]
    fn test_from_json_shapes() {
        let hierarchy = Hierarchy::from_json(
            r#"{
                "id": 100,
                "name": "Hendy",
                "hasParent": true,
                "isCurrent": true,
                "nbContracts": 4,
                "membership": "hot_lead",
                "children": [
                    { "id": "lazy", "name": "Lazy", "hasChild": true, "children": [] },
                    { "id": 7, "name": "Folded", "expanded": false,
                      "children": [{ "id": 8, "name": "Hidden" }] },
                    { "name": "No id" }
                ]
            }"#,
        )
        .unwrap();

        let root = hierarchy.root().unwrap();
        assert_eq!(root.id(), Some(NodeId::from(100_u64)));
        assert!(root.person().has_parent);
        assert_eq!(root.person().contracts, 4);
        assert_eq!(root.person().membership_label(), Some("Hot lead"));

        assert!(hierarchy.find(NodeId::new("lazy")).unwrap().needs_children());
        let folded = hierarchy.find(NodeId::from(7_u64)).unwrap();
        assert!(!folded.is_expanded());
        assert!(hierarchy.find(NodeId::from(8_u64)).is_none());
        assert_eq!(hierarchy.visible_len(), 4);
        assert_eq!(hierarchy.len(), 5);
    }

    #[test]
    fn test_from_json_error_keeps_source() {
        let src = r#"{ "id": 1, "name": "#;
        match Hierarchy::from_json(src) {
            Err(ChartError::Data { src: kept, .. }) => assert_eq!(kept, src),
            other => panic!("expected data error, got {other:?}"),
        }
    }
}
