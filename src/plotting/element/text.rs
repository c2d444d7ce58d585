//! Text elements: titles, axis labels and free annotations.

use crate::plotting::style::{Color, TextStyle};

/// Coordinate system an annotation position is given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextCoords {
    /// Fractions of the axes box, (0, 0) bottom-left and (1, 1) top-right
    #[default]
    Axes,
    /// Data coordinates
    Data,
}

/// Where an axis label sits along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelLoc {
    #[default]
    Center,
    /// Right end of the x axis, top end of the y axis
    End,
}

/// A piece of styled text whose position is decided at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub style: TextStyle,
}

impl Text {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Text {
            content: content.into(),
            style,
        }
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.style.font_size = size;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.style.color = color.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
