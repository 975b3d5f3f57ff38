//! Color handling for org chart rendering
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, with the conveniences the card and line drawing need.

use std::str::FromStr;

use color::DynamicColor;
use thiserror::Error;

/// Error returned when a CSS color string cannot be parsed.
#[derive(Debug, Clone, Error)]
#[error("invalid color `{value}`: {reason}")]
pub struct ColorError {
    value: String,
    reason: String,
}

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgba(0, 194, 255, 0.08)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgchart_core::color::Color;
    ///
    /// let green = Color::new("#50BD89").unwrap();
    /// let faint = Color::new("rgba(80, 189, 137, 0.1)").unwrap();
    /// assert!(faint.alpha() < green.alpha());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| ColorError {
                value: color_str.to_string(),
                reason: err.to_string(),
            })
    }

    /// Returns the alpha (transparency) component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
