//! Contour-based tidy tree placement.
//!
//! Subtrees are built bottom-up. Each finished subtree keeps its contour:
//! the leftmost and rightmost `x` at every depth below its root. Siblings are
//! placed left to right, each pushed just far enough right that no depth they
//! share with the subtrees already placed comes closer than the required
//! separation: one slot between siblings, two between cousins. The parent is
//! then centered over its first and last child.

use super::{Engine, LayoutTree};

/// Leftmost and rightmost `x` per relative depth, relative to the subtree root.
type Contour = Vec<(f32, f32)>;

pub struct Tidy {
    slot_width: f32,
}

impl Tidy {
    pub fn new(slot_width: f32) -> Self {
        Self { slot_width }
    }

    fn separation(&self, relative_depth: usize) -> f32 {
        if relative_depth == 0 {
            self.slot_width
        } else {
            self.slot_width * 2.0
        }
    }
}

impl Engine for Tidy {
    fn calculate(&self, tree: &LayoutTree) -> Vec<f32> {
        let len = tree.len();
        let mut offsets = vec![0.0_f32; len];
        let mut contours: Vec<Contour> = vec![Vec::new(); len];

        for index in (0..len).rev() {
            let children = tree.children(index);
            if children.is_empty() {
                contours[index] = vec![(0.0, 0.0)];
                continue;
            }

            let mut merged: Contour = Vec::new();
            let mut placed = Vec::with_capacity(children.len());
            for &child in children {
                let contour = std::mem::take(&mut contours[child]);
                let shift = merged
                    .iter()
                    .zip(&contour)
                    .enumerate()
                    .map(|(depth, (&(_, right), &(left, _)))| {
                        right - left + self.separation(depth)
                    })
                    .fold(f32::NEG_INFINITY, f32::max);
                let shift = if shift.is_finite() { shift } else { 0.0 };

                for (depth, &(left, right)) in contour.iter().enumerate() {
                    let (left, right) = (left + shift, right + shift);
                    match merged.get_mut(depth) {
                        Some(extent) => *extent = (extent.0.min(left), extent.1.max(right)),
                        None => merged.push((left, right)),
                    }
                }
                placed.push(shift);
            }

            let center = (placed[0] + placed[placed.len() - 1]) / 2.0;
            for (&child, shift) in children.iter().zip(&placed) {
                offsets[child] = shift - center;
            }

            let mut contour = Vec::with_capacity(merged.len() + 1);
            contour.push((0.0, 0.0));
            contour.extend(merged.into_iter().map(|(l, r)| (l - center, r - center)));
            contours[index] = contour;
        }

        // Offsets are relative to the parent; resolve them top-down.
        let mut xs = vec![0.0_f32; len];
        for index in 0..len {
            for &child in tree.children(index) {
                xs[child] = xs[index] + offsets[child];
            }
        }
        xs
    }
}
