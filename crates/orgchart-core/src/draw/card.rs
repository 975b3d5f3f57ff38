//! Person cards and the supervisor marker.
//!
//! A [`PersonCard`] renders one [`Person`] with a shared [`CardStyle`]. Card
//! geometry is relative to the card's top-left corner; the card is placed by
//! its top-center anchor, which is the position the layout assigns to a node.
//!
//! ```text
//!  ┌───────────[ membership ]──────────┐
//!  ├───────────────────────────────────┤  separator
//!  │ Name (wrapped, up to two lines)   │
//!  │ N sponsor(s)                      │
//!  │ N contract(s)                     │
//!  └────────────────(+N)───────────────┘  reports bubble
//! ```

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextAnchor, TextDefinition},
    geometry::{Point, Size},
    person::Person,
};

/// Height of the node cell below the card box, where the reports bubble hangs.
const BUBBLE_ALLOWANCE: f32 = 40.0;
const BADGE_WIDTH: f32 = 185.0;
const BADGE_HEIGHT: f32 = 26.0;
const BUBBLE_SIZE: f32 = 40.0;
const RING_INSET: f32 = 6.0;
const MAX_NAME_LINES: usize = 2;

/// Visual parameters shared by every card of a chart.
#[derive(Debug, Clone)]
pub struct CardStyle {
    node_size: Size,
    padding_x: f32,
    padding_y: f32,
    avatar_width: f32,
    border_radius: f32,
    background: Color,
    border: StrokeDefinition,
    current_ring: StrokeDefinition,
    separator: StrokeDefinition,
    name_text: TextDefinition,
    detail_text: TextDefinition,
    reports_text: TextDefinition,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self::new(Size::new(235.0, 187.0))
    }
}

impl CardStyle {
    /// Creates a style for nodes of the given cell size, with neutral colors.
    pub fn new(node_size: Size) -> Self {
        let gray = Color::new("#c9c9c9").unwrap_or_default();
        Self {
            node_size,
            padding_x: 16.0,
            padding_y: 16.0,
            avatar_width: 48.0,
            border_radius: 4.0,
            background: Color::new("white").unwrap_or_default(),
            border: StrokeDefinition::solid(gray, 1.0),
            current_ring: StrokeDefinition::solid(Color::new("#50BD89").unwrap_or_default(), 4.0),
            separator: StrokeDefinition::solid(Color::new("#EEEEEE").unwrap_or_default(), 1.0),
            name_text: TextDefinition::new().with(14, None, TextAnchor::Start),
            detail_text: TextDefinition::new().with(12, None, TextAnchor::Start),
            reports_text: TextDefinition::new().with(14, None, TextAnchor::Middle),
        }
    }

    pub fn set_padding(&mut self, padding_x: f32, padding_y: f32) {
        self.padding_x = padding_x;
        self.padding_y = padding_y;
    }

    pub fn set_avatar_width(&mut self, width: f32) {
        self.avatar_width = width;
    }

    pub fn set_border_radius(&mut self, radius: f32) {
        self.border_radius = radius;
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn set_border(&mut self, stroke: StrokeDefinition) {
        self.border = stroke;
    }

    pub fn set_current_ring(&mut self, stroke: StrokeDefinition) {
        self.current_ring = stroke;
    }

    pub fn set_separator(&mut self, stroke: StrokeDefinition) {
        self.separator = stroke;
    }

    pub fn set_name_color(&mut self, color: Color) {
        self.name_text.set_color(Some(color));
    }

    pub fn set_detail_color(&mut self, color: Color) {
        self.detail_text.set_color(Some(color));
    }

    pub fn set_reports_color(&mut self, color: Color) {
        self.reports_text.set_color(Some(color));
        self.reports_text.set_bold(true);
    }

    /// The full node cell, including the space the reports bubble needs.
    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// The drawn card box.
    pub fn box_size(&self) -> Size {
        Size::new(
            self.node_size.width(),
            (self.node_size.height() - BUBBLE_ALLOWANCE).max(0.0),
        )
    }

    fn name_origin(&self) -> Point {
        Point::new(
            self.padding_x,
            self.padding_y * 1.8 + self.avatar_width,
        )
    }
}

/// A card for one person.
#[derive(Debug, Clone)]
pub struct PersonCard<'a> {
    person: &'a Person,
    style: &'a CardStyle,
    key: Option<String>,
}

impl<'a> PersonCard<'a> {
    pub fn new(person: &'a Person, style: &'a CardStyle) -> Self {
        Self {
            person,
            style,
            key: None,
        }
    }

    /// Tags the card box with a `data-id` attribute.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The name split into at most two lines fitting the card's inner width.
    pub fn name_lines(&self) -> Vec<String> {
        let inner_width = self.style.node_size.width() - self.style.padding_x * 2.0;
        let mut lines = Text::new(&self.style.name_text, &self.person.name).wrap_lines(inner_width);
        if lines.len() > MAX_NAME_LINES {
            lines.truncate(MAX_NAME_LINES);
            if let Some(last) = lines.last_mut() {
                last.push('…');
            }
        }
        lines
    }

    fn render_box(&self, origin: Point, output: &mut LayeredOutput) {
        let style = self.style;
        let box_size = style.box_size();

        let class = if self.person.is_highlight {
            "box org-chart-person-highlight"
        } else {
            "box"
        };

        let mut card = svg_element::Rectangle::new()
            .set("class", class)
            .set("x", origin.x())
            .set("y", origin.y())
            .set("width", box_size.width())
            .set("height", box_size.height())
            .set("rx", style.border_radius)
            .set("ry", style.border_radius)
            .set("fill", style.background.to_string());
        if let Some(key) = &self.key {
            card = card.set("data-id", key.as_str());
        }
        // Job titles show on hover only.
        if let Some(title) = &self.person.title {
            card = card.add(svg_element::Title::new(title.as_str()));
        }
        output.add_to_layer(RenderLayer::Card, Box::new(apply_stroke!(card, &style.border)));

        if self.person.is_current {
            let ring = svg_element::Rectangle::new()
                .set("x", origin.x() - RING_INSET)
                .set("y", origin.y() - RING_INSET)
                .set("width", box_size.width() + RING_INSET * 2.0)
                .set("height", box_size.height() + RING_INSET * 2.0)
                .set("rx", 24)
                .set("ry", 24)
                .set("fill", "transparent");
            output.add_to_layer(
                RenderLayer::Card,
                Box::new(apply_stroke!(ring, &style.current_ring)),
            );
        }

        let separator_y = origin.y() + style.padding_y + 32.0;
        let separator = svg_element::Line::new()
            .set("x1", origin.x())
            .set("y1", separator_y)
            .set("x2", origin.x() + box_size.width())
            .set("y2", separator_y);
        output.add_to_layer(
            RenderLayer::Card,
            Box::new(apply_stroke!(separator, &style.separator)),
        );
    }

    fn render_badge(&self, origin: Point, output: &mut LayeredOutput) {
        let Some(label) = self.person.membership_label() else {
            return;
        };
        let style = self.style;
        let palette = self.person.membership_kind().palette();
        let center_x = origin.x() + style.node_size.width() / 2.0;
        let text_color = Color::new(palette.text).unwrap_or_default();
        let background = Color::new(palette.background).unwrap_or_default();

        let badge = svg_element::Rectangle::new()
            .set("x", center_x - BADGE_WIDTH / 2.0)
            .set("y", origin.y() + style.padding_y - 5.0)
            .set("width", BADGE_WIDTH)
            .set("height", BADGE_HEIGHT)
            .set("rx", BADGE_HEIGHT / 2.0)
            .set("ry", BADGE_HEIGHT / 2.0)
            .set("fill", background.to_string())
            .set("fill-opacity", background.alpha());
        output.add_to_layer(RenderLayer::Decoration, Box::new(badge));

        let badge_text = TextDefinition::new().with(12, Some(text_color), TextAnchor::Middle);
        let baseline = origin.y() + style.padding_y + f32::from(badge_text.font_size()) * 0.9;
        output.merge(Text::new(&badge_text, label).render_to_layers(Point::new(center_x, baseline)));
    }

    fn render_details(&self, origin: Point, output: &mut LayeredOutput) {
        let style = self.style;
        let name_origin = origin.add_point(style.name_origin());
        let name = self.name_lines().join("\n");
        output.merge(Text::new(&style.name_text, &name).render_to_layers(name_origin));

        let extra_lines = self.name_lines().len().saturating_sub(1) as f32;
        let details_origin =
            name_origin.with_y(name_origin.y() + extra_lines * f32::from(style.name_text.font_size()) * 1.5);

        let sponsors = self.person.sponsors_label();
        let contracts = self.person.contracts_label();
        output.merge(
            Text::new(&style.detail_text, &sponsors)
                .render_to_layers(details_origin.with_y(details_origin.y() + style.padding_y)),
        );
        output.merge(
            Text::new(&style.detail_text, &contracts)
                .render_to_layers(details_origin.with_y(details_origin.y() + style.padding_y * 2.0)),
        );
    }

    fn render_reports(&self, origin: Point, output: &mut LayeredOutput) {
        let Some(reports) = self.person.reports_label() else {
            return;
        };
        let style = self.style;
        let center_x = origin.x() + style.node_size.width() / 2.0;
        let top = origin.y() + style.name_origin().y() + style.padding_y * 2.0 + 60.0;

        let bubble = svg_element::Rectangle::new()
            .set("x", center_x - BUBBLE_SIZE / 2.0)
            .set("y", top + 7.0 - BUBBLE_SIZE / 2.0)
            .set("width", BUBBLE_SIZE)
            .set("height", BUBBLE_SIZE)
            .set("rx", 16)
            .set("ry", 16)
            .set("fill", "#fff");
        output.add_to_layer(RenderLayer::Decoration, Box::new(bubble));

        let baseline = top + f32::from(style.reports_text.font_size()) * 0.9;
        output.merge(
            Text::new(&style.reports_text, &reports).render_to_layers(Point::new(center_x, baseline)),
        );
    }

    fn render_link_icon(&self, origin: Point, output: &mut LayeredOutput) {
        let Some(link) = &self.person.link else {
            return;
        };
        let x = origin.x() + self.style.node_size.width() - 20.0;
        let y = origin.y() + 8.0;

        let icon = svg_element::Path::new()
            .set(
                "d",
                format!("M {x} {} L {} {y} M {} {y} L {} {y} L {} {}", y + 8.0, x + 8.0, x + 3.0, x + 8.0, x + 8.0, y + 5.0),
            )
            .set("fill", "none")
            .set("stroke", "#8D8D8D")
            .set("stroke-width", 1.5);
        let anchor = svg_element::Anchor::new()
            .set("class", "org-chart-person-link")
            .set("href", link.as_str())
            .add(icon);
        output.add_to_layer(RenderLayer::Decoration, Box::new(anchor));
    }
}

impl Drawable for PersonCard<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let origin = position.with_x(position.x() - self.style.node_size.width() / 2.0);
        let mut output = LayeredOutput::new();

        self.render_box(origin, &mut output);
        self.render_badge(origin, &mut output);
        self.render_details(origin, &mut output);
        self.render_reports(origin, &mut output);
        self.render_link_icon(origin, &mut output);

        output
    }

    fn size(&self) -> Size {
        self.style.node_size
    }
}

/// Marker drawn above the root when the root itself reports to someone who
/// is not part of the loaded tree.
#[derive(Debug, Clone)]
pub struct SupervisorMarker<'a> {
    stroke: &'a StrokeDefinition,
}

impl<'a> SupervisorMarker<'a> {
    pub const RADIUS: f32 = 12.0;

    pub fn new(stroke: &'a StrokeDefinition) -> Self {
        Self { stroke }
    }
}

impl Drawable for SupervisorMarker<'_> {
    /// `position` is the center of the marker.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let (x, y) = (position.x(), position.y());

        let circle = svg_element::Circle::new()
            .set("id", "supervisorIcon")
            .set("cx", x)
            .set("cy", y)
            .set("r", Self::RADIUS)
            .set("fill", "white");
        output.add_to_layer(RenderLayer::Decoration, Box::new(apply_stroke!(circle, self.stroke)));

        let chevron = svg_element::Path::new()
            .set(
                "d",
                format!("M {} {} L {x} {} L {} {}", x - 5.0, y + 3.0, y - 3.0, x + 5.0, y + 3.0),
            )
            .set("fill", "none");
        output.add_to_layer(RenderLayer::Decoration, Box::new(apply_stroke!(chevron, self.stroke)));

        output
    }

    fn size(&self) -> Size {
        Size::new(Self::RADIUS * 2.0, Self::RADIUS * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::person::{Membership, MembershipKind};

    fn render(card: &PersonCard<'_>, position: Point) -> String {
        card.render_to_layers(position)
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect()
    }

    #[test]
    fn test_box_size_leaves_room_for_bubble() {
        let style = CardStyle::default();
        assert_approx_eq!(f32, style.box_size().width(), 235.0);
        assert_approx_eq!(f32, style.box_size().height(), 147.0);
    }

    #[test]
    fn test_card_is_anchored_top_center() {
        let style = CardStyle::default();
        let person = Person::named("Kate Baker");
        let card = PersonCard::new(&person, &style).with_key("455");

        let rendered = render(&card, Point::new(0.0, 120.0));
        assert!(rendered.contains("x=\"-117.5\""));
        assert!(rendered.contains("data-id=\"455\""));
    }

    #[test]
    fn test_current_card_has_ring() {
        let style = CardStyle::default();
        let mut person = Person::named("Hendy");
        let plain = render(&PersonCard::new(&person, &style), Point::default());

        person.is_current = true;
        let current = render(&PersonCard::new(&person, &style), Point::default());

        assert!(!plain.contains("stroke-width=\"4\""));
        assert!(current.contains("stroke-width=\"4\""));
    }

    #[test]
    fn test_badge_uses_membership_palette() {
        let style = CardStyle::default();
        let mut person = Person::named("Tomasz");
        person.membership = Some(Membership::new(MembershipKind::Member).with_label("Adhérent"));

        let rendered = render(&PersonCard::new(&person, &style), Point::default());
        assert!(rendered.contains("Adhérent"));
    }

    #[test]
    fn test_title_is_a_tooltip_on_the_box() {
        let style = CardStyle::default();
        let mut person = Person::named("Kate Baker");
        person.title = Some(String::from("Managing Director"));

        let rendered = render(&PersonCard::new(&person, &style), Point::default());
        assert!(rendered.contains("<title>Managing Director</title>"));
        assert_eq!(rendered.matches("Managing Director").count(), 1);
    }

    #[test]
    fn test_optional_parts_are_omitted() {
        let style = CardStyle::default();
        let person = Person::named("Ellen Cott");
        let rendered = render(&PersonCard::new(&person, &style), Point::default());

        assert!(!rendered.contains("org-chart-person-link"));
        assert!(!rendered.contains("<title>"));
        assert!(!rendered.contains("+ "));
        assert!(rendered.contains("No contract"));
    }

    #[test]
    fn test_long_name_is_capped_at_two_lines() {
        let style = CardStyle::default();
        let person = Person::named(
            "Hendy kinger super long lonpojf aef af af adf and then some more words to overflow",
        );
        let card = PersonCard::new(&person, &style);
        assert!(card.name_lines().len() <= 2);
    }

    #[test]
    fn test_supervisor_marker_size() {
        let stroke = StrokeDefinition::default();
        let marker = SupervisorMarker::new(&stroke);
        assert_approx_eq!(f32, marker.size().width(), 24.0);
        assert!(!marker.render_to_layers(Point::new(70.0, -24.0)).is_empty());
    }
}
