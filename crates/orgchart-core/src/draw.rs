//! Drawable components for chart rendering.
//!
//! Every drawable implements [`Drawable`]: it renders itself into a
//! [`LayeredOutput`] at a given position and reports its size. Link lines are
//! drawn between two points and use [`LinkLine`] directly.

mod card;
mod layer;
mod line;
mod stroke;
mod text;

pub use card::{CardStyle, PersonCard, SupervisorMarker};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use line::{LineType, LinkLine};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// A visual element that can render itself at a position.
pub trait Drawable: std::fmt::Debug {
    /// Render to SVG nodes grouped by [`RenderLayer`].
    ///
    /// `position` is the element's top-center anchor in chart space.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// The size of the element's outer box.
    fn size(&self) -> Size;
}
