//! Layout engine factory module
//!
//! Engines only decide horizontal offsets. They see the visible tree as a
//! [`LayoutTree`] of pre-order indices and return one `x` per index, with the
//! root at 0. The [`EngineBuilder`] selects and configures an engine from a
//! [`LayoutEngine`] kind and caches it for reuse.

mod slots;
mod tidy;

use std::collections::HashMap;

use crate::config::LayoutEngine;

/// The visible tree reduced to pre-order indices.
///
/// Index 0 is the root. Every child has a larger index than its parent and
/// siblings are listed in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutTree {
    children: Vec<Vec<usize>>,
}

impl LayoutTree {
    /// Builds the tree from the parent index of each pre-order visit.
    pub fn from_parents(parents: impl IntoIterator<Item = Option<usize>>) -> Self {
        let mut children: Vec<Vec<usize>> = Vec::new();
        for (index, parent) in parents.into_iter().enumerate() {
            children.push(Vec::new());
            if let Some(parent) = parent {
                children[parent].push(index);
            }
        }
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }
}

/// Trait defining the interface for horizontal placement algorithms.
pub trait Engine {
    /// Calculate the `x` of every node of `tree`, indexed like the tree.
    ///
    /// Nodes at the same depth must be at least one node width apart, and
    /// the root must sit at 0.
    fn calculate(&self, tree: &LayoutTree) -> Vec<f32>;
}

/// Builder for creating and configuring layout engines.
#[derive(Default)]
pub struct EngineBuilder {
    // Cache for reusing engines with the same configuration
    engines: HashMap<LayoutEngine, Box<dyn Engine>>,

    node_width: f32,
    node_spacing: f32,
}

impl EngineBuilder {
    /// Create a new engine builder with an empty engine cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width of a card
    pub fn with_node_width(mut self, width: f32) -> Self {
        self.node_width = width;
        self
    }

    /// Set the horizontal gap between two neighboring cards
    pub fn with_node_spacing(mut self, spacing: f32) -> Self {
        self.node_spacing = spacing;
        self
    }

    /// Get an engine of the specified type with configured options
    pub fn engine(&mut self, engine_type: LayoutEngine) -> &dyn Engine {
        let slot_width = self.node_width + self.node_spacing;
        let engine = self.engines.entry(engine_type).or_insert_with(|| {
            let engine: Box<dyn Engine> = match engine_type {
                LayoutEngine::Slots => Box::new(slots::Slots::new(slot_width)),
                LayoutEngine::Tidy => Box::new(tidy::Tidy::new(slot_width)),
            };
            engine
        });
        &**engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_from_parents() {
        let tree = LayoutTree::from_parents([None, Some(0), Some(1), Some(0)]);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.children(0), &[1, 3]);
        assert_eq!(tree.children(1), &[2]);
        assert!(tree.children(3).is_empty());
    }

    #[test]
    fn test_builder_caches_engines() {
        let mut builder = EngineBuilder::new()
            .with_node_width(100.0)
            .with_node_spacing(10.0);
        let tree = LayoutTree::from_parents([None, Some(0), Some(0)]);

        let first = builder.engine(LayoutEngine::Tidy).calculate(&tree);
        let second = builder.engine(LayoutEngine::Tidy).calculate(&tree);
        assert_eq!(first, second);
        assert_eq!(builder.engines.len(), 1);
    }
}
