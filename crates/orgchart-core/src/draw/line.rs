//! Lines connecting a parent card to a child card.

use serde::Deserialize;
use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Point,
};

/// Shape of the path drawn between two cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// Down to the midpoint, across, then down into the child
    #[default]
    Angle,
    /// Cubic curve with vertical tangents at both ends
    Curve,
    /// A single straight segment
    Straight,
}

/// A link line from the bottom of a parent card to the top of a child card.
#[derive(Debug, Clone)]
pub struct LinkLine<'a> {
    source: Point,
    target: Point,
    line_type: LineType,
    stroke: &'a StrokeDefinition,
}

impl<'a> LinkLine<'a> {
    /// `source` is the parent card's bottom-center, `target` the child card's
    /// top-center.
    pub fn new(
        source: Point,
        target: Point,
        line_type: LineType,
        stroke: &'a StrokeDefinition,
    ) -> Self {
        Self {
            source,
            target,
            line_type,
            stroke,
        }
    }

    /// SVG path data for this line.
    ///
    /// ```
    /// # use orgchart_core::draw::{LineType, LinkLine, StrokeDefinition};
    /// # use orgchart_core::geometry::Point;
    /// let stroke = StrokeDefinition::default();
    /// let (parent, child) = (Point::new(0.0, 100.0), Point::new(50.0, 120.0));
    /// let line = LinkLine::new(parent, child, LineType::Angle, &stroke);
    /// assert_eq!(line.path_data(), "M 0 100 L 0 110 L 50 110 L 50 120");
    /// ```
    pub fn path_data(&self) -> String {
        let (start, end) = (self.source, self.target);
        match self.line_type {
            LineType::Straight => {
                format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
            }
            LineType::Angle => {
                let mid_y = start.y() + (end.y() - start.y()) * 0.5;
                format!(
                    "M {} {} L {} {} L {} {} L {} {}",
                    start.x(),
                    start.y(),
                    start.x(),
                    mid_y,
                    end.x(),
                    mid_y,
                    end.x(),
                    end.y()
                )
            }
            LineType::Curve => {
                let mid_y = (start.y() + end.y()) / 2.0;
                format!(
                    "M {} {} C {} {}, {} {}, {} {}",
                    start.x(),
                    start.y(),
                    start.x(),
                    mid_y,
                    end.x(),
                    mid_y,
                    end.x(),
                    end.y()
                )
            }
        }
    }

    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let path = svg_element::Path::new()
            .set("class", "link")
            .set("d", self.path_data())
            .set("fill", "none");
        output.add_to_layer(RenderLayer::Line, Box::new(apply_stroke!(path, self.stroke)));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_path() {
        let stroke = StrokeDefinition::default();
        let line = LinkLine::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
            LineType::Straight,
            &stroke,
        );
        assert_eq!(line.path_data(), "M 0 0 L 10 20");
    }

    #[test]
    fn test_curve_path_has_vertical_tangents() {
        let stroke = StrokeDefinition::default();
        let line = LinkLine::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 40.0),
            LineType::Curve,
            &stroke,
        );
        assert_eq!(line.path_data(), "M 0 0 C 0 20, 100 20, 100 40");
    }

    #[test]
    fn test_render_on_line_layer() {
        let stroke = StrokeDefinition::default();
        let line = LinkLine::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            LineType::Angle,
            &stroke,
        );
        let groups = line.render_to_layers().render();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].to_string().contains("data-layer=\"line\""));
    }
}
