//! Text labels on person cards.
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable label combining content with a [`TextDefinition`]
//!
//! Text is measured with cosmic-text so long names can be wrapped to the
//! width of a card before rendering.
//!
//! ```
//! # use orgchart_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(14);
//!
//! let text = Text::new(&style, "Kerry Peter");
//! assert!(text.calculate_size().width() > 0.0);
//! assert_eq!(text.wrap_lines(1000.0), vec!["Kerry Peter".to_string()]);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Horizontal alignment of a label relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Defines the visual style for labels.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Bold | `false` |
/// | Color | `None` (SVG default) |
/// | Anchor | [`TextAnchor::Start`] |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    bold: bool,
    color: Option<Color>,
    anchor: TextAnchor,
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 12,
            bold: false,
            color: None,
            anchor: TextAnchor::Start,
        }
    }
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    /// Builder-style variant of the setters, used when building card styles.
    pub fn with(mut self, size: u16, color: Option<Color>, anchor: TextAnchor) -> Self {
        self.font_size = size;
        self.color = color;
        self.anchor = anchor;
        self
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    fn font_family(&self) -> &str {
        &self.font_family
    }

    fn line_height(&self) -> f32 {
        f32::from(self.font_size) * 1.33 * 1.15
    }
}

/// A single- or multi-line label.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Measured size of the content.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }

    /// Greedy word wrap of the content into lines no wider than `max_width`.
    ///
    /// A single word wider than `max_width` is kept on its own line.
    pub fn wrap_lines(&self, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in self.content.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            let fits = Text::new(self.definition, &candidate)
                .calculate_size()
                .width()
                <= max_width;

            if fits || current.is_empty() {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

impl Drawable for Text<'_> {
    /// `position` is the baseline anchor of the first line.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let line_height = self.definition.line_height();

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.definition.anchor.to_svg_value())
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if self.definition.bold {
            rendered_text = rendered_text.set("font-weight", 700);
        }

        if let Some(color) = self.definition.color.as_ref() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for (idx, line) in self.content.lines().enumerate() {
            let dy = if idx == 0 { 0.0 } else { line_height };
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", dy)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Shared font system used for measuring text.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measure `text` with real font metrics, falling back to an
    /// average-advance estimate when no glyphs could be shaped.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size_px = f32::from(text_def.font_size()) * 1.33;
        let metrics = Metrics::new(font_size_px, text_def.line_height());

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width <= 0.0 {
            let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
            max_width = longest as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height * text.lines().count().max(1) as f32;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_size(), 12);
        assert_eq!(def.font_family(), "sans-serif");
        assert!(!def.bold);
    }

    #[test]
    fn test_text_calculate_size_empty() {
        let def = TextDefinition::new();
        let size = Text::new(&def, "").calculate_size();
        assert_approx_eq!(f32, size.width(), 0.0);
        assert_approx_eq!(f32, size.height(), 0.0);
    }

    #[test]
    fn test_text_calculate_size_larger_font() {
        let mut small_def = TextDefinition::new();
        small_def.set_font_size(12);
        let mut large_def = TextDefinition::new();
        large_def.set_font_size(24);

        let small_size = Text::new(&small_def, "Test").calculate_size();
        let large_size = Text::new(&large_def, "Test").calculate_size();

        assert!(large_size.height() > small_size.height());
        assert!(large_size.width() > small_size.width());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let def = TextDefinition::new();
        let lines = Text::new(&def, "Kin Baker").wrap_lines(500.0);
        assert_eq!(lines, vec!["Kin Baker".to_string()]);
    }

    #[test]
    fn test_wrap_long_text_keeps_all_words() {
        let def = TextDefinition::new();
        let content = "Hendy kinger super long lonpojf aef af af adf";
        let lines = Text::new(&def, content).wrap_lines(80.0);

        assert!(lines.len() > 1, "expected wrapping, got {lines:?}");
        assert_eq!(lines.join(" "), content);
    }

    #[test]
    fn test_text_render_sets_anchor() {
        let mut def = TextDefinition::new();
        def.set_anchor(TextAnchor::Middle);
        def.set_bold(true);

        let output = Text::new(&def, "+ 3").render_to_layers(Point::new(10.0, 10.0));
        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();

        assert!(rendered.contains("text-anchor=\"middle\""));
        assert!(rendered.contains("font-weight=\"700\""));
    }
}
