//! Leaf-slot placement.
//!
//! Leaves take consecutive slots in pre-order; every parent sits halfway
//! between its first and last child. A subtree is as wide as its leaf count
//! and sibling subtrees never share a slot.

use super::{Engine, LayoutTree};

pub struct Slots {
    slot_width: f32,
}

impl Slots {
    pub fn new(slot_width: f32) -> Self {
        Self { slot_width }
    }
}

impl Engine for Slots {
    fn calculate(&self, tree: &LayoutTree) -> Vec<f32> {
        let mut xs = vec![0.0; tree.len()];
        if xs.is_empty() {
            return xs;
        }

        let mut next_slot = 0.0;
        for (index, x) in xs.iter_mut().enumerate() {
            if tree.children(index).is_empty() {
                *x = next_slot * self.slot_width;
                next_slot += 1.0;
            }
        }

        // Children come after their parent in pre-order.
        for index in (0..tree.len()).rev() {
            if let (Some(&first), Some(&last)) =
                (tree.children(index).first(), tree.children(index).last())
            {
                xs[index] = (xs[first] + xs[last]) / 2.0;
            }
        }

        let root = xs[0];
        xs.iter_mut().for_each(|x| *x -= root);
        xs
    }
}
