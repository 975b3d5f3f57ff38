//! Configuration types for org chart layout and rendering.
//!
//! This module provides configuration structures that control how charts
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! loading from external sources; every missing field falls back to its
//! default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Card geometry, spacing, the [`LayoutEngine`] and bounds floors.
//! - [`StyleConfig`] - Card and line colors.
//!
//! # Example
//!
//! ```
//! # use orgchart::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_width(), 235.0);
//! assert!(config.style().card_style(config.layout()).is_ok());
//! ```

use std::{fmt, str::FromStr, time::Duration};

use serde::Deserialize;

use orgchart_core::{
    color::Color,
    draw::{CardStyle, LineType, StrokeDefinition},
    geometry::{Insets, Point, Size},
};

use crate::error::ChartError;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Horizontal placement algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    /// One slot per leaf, parents centered over their children (default)
    #[default]
    Slots,
    /// Contour-based tidy tree, subtrees packed as close as they fit
    Tidy,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slots" => Ok(Self::Slots),
            "tidy" => Ok(Self::Tidy),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slots => write!(f, "slots"),
            Self::Tidy => write!(f, "tidy"),
        }
    }
}

/// Card geometry, spacing and bounds floors.
///
/// All lengths are in chart units (pixels of the exported SVG).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    node_spacing: f32,
    padding_x: f32,
    padding_y: f32,
    avatar_width: f32,
    border_radius: f32,
    /// Vertical distance between two depths.
    line_depth_y: f32,
    animation_duration_ms: u64,
    /// Whether a viewport resize triggers a re-layout pass.
    should_resize: bool,
    engine: LayoutEngine,
    line_type: LineType,
    margins: Insets,
    min_half_width: f32,
    min_bottom: f32,
    supervisor_offset_x: f32,
    supervisor_offset_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 235.0,
            node_height: 187.0,
            node_spacing: 12.0,
            padding_x: 16.0,
            padding_y: 16.0,
            avatar_width: 48.0,
            border_radius: 4.0,
            line_depth_y: 120.0,
            animation_duration_ms: 350,
            should_resize: true,
            engine: LayoutEngine::default(),
            line_type: LineType::default(),
            margins: Insets::uniform(20.0),
            min_half_width: 70.0,
            min_bottom: 200.0,
            supervisor_offset_x: 70.0,
            supervisor_offset_y: -24.0,
        }
    }
}

impl LayoutConfig {
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    pub fn line_depth_y(&self) -> f32 {
        self.line_depth_y
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn should_resize(&self) -> bool {
        self.should_resize
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    pub fn margins(&self) -> Insets {
        self.margins
    }

    /// Smallest distance the bounds extend left and right of the root.
    pub fn min_half_width(&self) -> f32 {
        self.min_half_width
    }

    /// Smallest bottom extent of the bounds.
    pub fn min_bottom(&self) -> f32 {
        self.min_bottom
    }

    /// Offset of the supervisor marker from the root's anchor.
    pub fn supervisor_offset(&self) -> Point {
        Point::new(self.supervisor_offset_x, self.supervisor_offset_y)
    }

    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }

    pub fn with_node_size(mut self, width: f32, height: f32) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    pub fn with_node_spacing(mut self, spacing: f32) -> Self {
        self.node_spacing = spacing;
        self
    }

    pub fn with_line_depth_y(mut self, line_depth_y: f32) -> Self {
        self.line_depth_y = line_depth_y;
        self
    }

    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_should_resize(mut self, should_resize: bool) -> Self {
        self.should_resize = should_resize;
        self
    }

    pub fn with_floors(mut self, min_half_width: f32, min_bottom: f32) -> Self {
        self.min_half_width = min_half_width;
        self.min_bottom = min_bottom;
        self
    }
}

/// Card and line colors, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: String,
    border_color: String,
    name_color: String,
    title_color: String,
    reports_color: String,
    current_color: String,
    line_color: String,
    separator_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: String::from("#fff"),
            border_color: String::from("#c9c9c9"),
            name_color: String::from("#3367CD"),
            title_color: String::from("#8D8D8D"),
            reports_color: String::from("#3367CD"),
            current_color: String::from("#50BD89"),
            line_color: String::from("#c9c9c9"),
            separator_color: String::from("#EEEEEE"),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed card background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Config`] if the configured string is not a color.
    pub fn background_color(&self) -> Result<Color, ChartError> {
        parse_color("background_color", &self.background_color)
    }

    /// Stroke of the lines connecting cards.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Config`] if the configured string is not a color.
    pub fn line_stroke(&self) -> Result<StrokeDefinition, ChartError> {
        Ok(StrokeDefinition::solid(
            parse_color("line_color", &self.line_color)?,
            1.0,
        ))
    }

    /// Builds the shared card style from these colors and the card geometry
    /// of `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Config`] naming the first invalid color.
    pub fn card_style(&self, layout: &LayoutConfig) -> Result<CardStyle, ChartError> {
        let mut style = CardStyle::new(layout.node_size());
        style.set_padding(layout.padding_x, layout.padding_y);
        style.set_avatar_width(layout.avatar_width);
        style.set_border_radius(layout.border_radius);

        style.set_background(self.background_color()?);
        style.set_border(StrokeDefinition::solid(
            parse_color("border_color", &self.border_color)?,
            1.0,
        ));
        style.set_current_ring(StrokeDefinition::solid(
            parse_color("current_color", &self.current_color)?,
            4.0,
        ));
        style.set_separator(StrokeDefinition::solid(
            parse_color("separator_color", &self.separator_color)?,
            1.0,
        ));
        style.set_name_color(parse_color("name_color", &self.name_color)?);
        style.set_detail_color(parse_color("title_color", &self.title_color)?);
        style.set_reports_color(parse_color("reports_color", &self.reports_color)?);

        Ok(style)
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, ChartError> {
    Color::new(value).map_err(|err| ChartError::Config(format!("{field}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.node_width(), 235.0);
        assert_eq!(config.node_height(), 187.0);
        assert_eq!(config.line_depth_y(), 120.0);
        assert_eq!(config.animation_duration(), Duration::from_millis(350));
        assert_eq!(config.engine(), LayoutEngine::Slots);
        assert_eq!(config.line_type(), LineType::Angle);
        assert_eq!(config.supervisor_offset(), Point::new(70.0, -24.0));
        assert!(config.should_resize());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
            [layout]
            engine = "tidy"
            line_type = "curve"
            line_depth_y = 150.0

            [style]
            line_color = "#ff0000"
            "##,
        )
        .unwrap();

        assert_eq!(config.layout().engine(), LayoutEngine::Tidy);
        assert_eq!(config.layout().line_type(), LineType::Curve);
        assert_eq!(config.layout().line_depth_y(), 150.0);
        assert_eq!(config.layout().node_width(), 235.0);
        assert_eq!(
            config.style().line_stroke().unwrap().color(),
            Color::new("#ff0000").unwrap()
        );
        assert!(config.style().background_color().is_ok());
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let config: StyleConfig = toml::from_str(r#"name_color = "not-a-color""#).unwrap();
        let err = config.card_style(&LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::Config(msg) if msg.starts_with("name_color")));
    }

    #[test]
    fn test_layout_engine_from_str() {
        assert_eq!("tidy".parse::<LayoutEngine>(), Ok(LayoutEngine::Tidy));
        assert!("force".parse::<LayoutEngine>().is_err());
        assert_eq!(LayoutEngine::Slots.to_string(), "slots");
    }
}
