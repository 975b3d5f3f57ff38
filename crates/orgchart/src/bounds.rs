//! Chart extents.
//!
//! [`ChartBounds`] tracks how far node anchors reach left, right and down,
//! never less than the configured floors. A host uses it with a [`Viewport`]
//! to center the chart; the exporter uses it to size the canvas.

use orgchart_core::{
    draw::SupervisorMarker,
    geometry::{Point, Size},
};

use crate::config::LayoutConfig;

/// Extents of node anchors in chart space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    left_x: f32,
    right_x: f32,
    bottom_y: f32,
}

impl Default for ChartBounds {
    /// The floors of the default [`LayoutConfig`].
    fn default() -> Self {
        Self::floors(&LayoutConfig::default())
    }
}

impl ChartBounds {
    fn floors(config: &LayoutConfig) -> Self {
        Self {
            left_x: -config.min_half_width(),
            right_x: config.min_half_width(),
            bottom_y: config.min_bottom(),
        }
    }

    /// Scans `positions` once.
    ///
    /// Only the floors apply when `positions` is empty.
    ///
    /// ```
    /// # use orgchart::{bounds::ChartBounds, config::LayoutConfig};
    /// # use orgchart_core::geometry::Point;
    /// let config = LayoutConfig::default();
    /// let bounds = ChartBounds::compute([Point::new(-300.0, 240.0)], &config);
    /// assert_eq!(bounds.left_x(), -300.0);
    /// assert_eq!(bounds.right_x(), 70.0);
    /// assert_eq!(bounds.bottom_y(), 240.0);
    /// ```
    pub fn compute(positions: impl IntoIterator<Item = Point>, config: &LayoutConfig) -> Self {
        positions
            .into_iter()
            .fold(Self::floors(config), |bounds, position| Self {
                left_x: bounds.left_x.min(position.x()),
                right_x: bounds.right_x.max(position.x()),
                bottom_y: bounds.bottom_y.max(position.y()),
            })
    }

    pub fn left_x(&self) -> f32 {
        self.left_x
    }

    pub fn right_x(&self) -> f32 {
        self.right_x
    }

    pub fn bottom_y(&self) -> f32 {
        self.bottom_y
    }

    /// Size of a canvas holding every card plus margins.
    pub fn content_size(&self, config: &LayoutConfig) -> Size {
        let margins = config.margins();
        Size::new(
            self.right_x - self.left_x + config.node_width() + margins.horizontal_sum(),
            self.bottom_y + config.node_height() + top_overhang(config) + margins.vertical_sum(),
        )
    }

    /// Where chart space `(0, 0)` lands on a canvas of [`Self::content_size`].
    pub fn content_origin(&self, config: &LayoutConfig) -> Point {
        let margins = config.margins();
        Point::new(
            margins.left() + config.node_width() / 2.0 - self.left_x,
            margins.top() + top_overhang(config),
        )
    }
}

/// Space the supervisor marker needs above the root.
fn top_overhang(config: &LayoutConfig) -> f32 {
    (SupervisorMarker::RADIUS - config.supervisor_offset().y()).max(0.0)
}

/// Anchor of the supervisor marker for a root drawn at `root`.
pub fn supervisor_anchor(root: Point, config: &LayoutConfig) -> Point {
    root.add_point(config.supervisor_offset())
}

/// Size of the host's drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Translation that centers `bounds` horizontally and leaves the top
    /// margin above the root.
    pub fn origin(&self, bounds: &ChartBounds, config: &LayoutConfig) -> Point {
        let center = (bounds.left_x + bounds.right_x) / 2.0;
        Point::new(
            self.width / 2.0 - center,
            config.margins().top() + top_overhang(config),
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_floors_apply_to_empty_and_single_node() {
        let config = LayoutConfig::default();
        let empty = ChartBounds::compute(Vec::<Point>::new(), &config);
        let single = ChartBounds::compute([Point::new(0.0, 0.0)], &config);

        for bounds in [empty, single] {
            assert_approx_eq!(f32, bounds.left_x(), -70.0);
            assert_approx_eq!(f32, bounds.right_x(), 70.0);
            assert_approx_eq!(f32, bounds.bottom_y(), 200.0);
        }
        assert_eq!(empty, ChartBounds::default());
    }

    #[test]
    fn test_configured_floors() {
        let config = LayoutConfig::default().with_floors(10.0, 20.0);
        let bounds = ChartBounds::compute([Point::new(5.0, 0.0)], &config);
        assert_approx_eq!(f32, bounds.left_x(), -10.0);
        assert_approx_eq!(f32, bounds.bottom_y(), 20.0);
    }

    #[test]
    fn test_content_size_and_origin() {
        let config = LayoutConfig::default();
        let bounds = ChartBounds::compute([Point::new(-247.0, 120.0), Point::new(247.0, 240.0)], &config);

        let size = bounds.content_size(&config);
        assert_approx_eq!(f32, size.width(), 494.0 + 235.0 + 40.0);
        assert_approx_eq!(f32, size.height(), 240.0 + 187.0 + 36.0 + 40.0);

        let origin = bounds.content_origin(&config);
        assert_approx_eq!(f32, origin.x(), 20.0 + 117.5 + 247.0);
        assert_approx_eq!(f32, origin.y(), 56.0);
    }

    #[test]
    fn test_viewport_centers_chart() {
        let config = LayoutConfig::default();
        let bounds = ChartBounds::compute([Point::new(-100.0, 0.0), Point::new(300.0, 0.0)], &config);
        let origin = Viewport::new(1000.0, 800.0).origin(&bounds, &config);
        assert_approx_eq!(f32, origin.x(), 400.0);
    }

    #[test]
    fn test_supervisor_anchor() {
        let config = LayoutConfig::default();
        assert_eq!(
            supervisor_anchor(Point::new(0.0, 0.0), &config),
            Point::new(70.0, -24.0)
        );
    }

    proptest! {
        #[test]
        fn prop_compute_is_idempotent(
            points in prop::collection::vec((-5000.0f32..5000.0, 0.0f32..5000.0), 0..50)
        ) {
            let config = LayoutConfig::default();
            let positions: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();

            let first = ChartBounds::compute(positions.iter().copied(), &config);
            let second = ChartBounds::compute(positions.iter().copied(), &config);
            prop_assert_eq!(first, second);
            prop_assert!(first.left_x() <= -70.0 && first.right_x() >= 70.0);
            prop_assert!(first.bottom_y() >= 200.0);
        }
    }
}
