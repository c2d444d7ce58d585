//! Text styling options.

use super::color::Color;

/// Text anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Anchor at the start (left for LTR text)
    #[default]
    Start,
    Middle,
    /// Anchor at the end (right for LTR text)
    End,
}

impl TextAnchor {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Vertical alignment for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Baseline {
    #[default]
    Alphabetic,
    Middle,
    /// Align to the top (hanging)
    Hanging,
}

impl Baseline {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            Baseline::Alphabetic => "alphabetic",
            Baseline::Middle => "middle",
            Baseline::Hanging => "hanging",
        }
    }
}

/// Style configuration for text elements.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family (e.g., "serif", "Times New Roman")
    pub font_family: String,
    /// Font size in points
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
    /// Rotation angle in degrees
    pub rotation: f64,
}

impl TextStyle {
    /// Create a new text style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Set the rotation angle in degrees.
    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Generate SVG presentation attributes (excluding position and rotation).
    pub fn to_svg_attrs(&self) -> String {
        let mut attrs = vec![
            format!("font-family=\"{}\"", self.font_family),
            format!("font-size=\"{}\"", self.font_size),
            format!("fill=\"{}\"", self.color.to_svg_string()),
            format!("text-anchor=\"{}\"", self.anchor.to_svg_string()),
            format!("dominant-baseline=\"{}\"", self.baseline.to_svg_string()),
        ];
        if self.bold {
            attrs.push("font-weight=\"bold\"".to_string());
        }
        if self.italic {
            attrs.push("font-style=\"italic\"".to_string());
        }
        if self.color.a < 1.0 {
            attrs.push(format!("fill-opacity=\"{}\"", self.color.a));
        }
        attrs.join(" ")
    }

    /// Rough rendered width of `text` in points; good enough for legend
    /// boxes and label offsets without font metrics.
    pub fn approx_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size * 0.55
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
            bold: false,
            italic: false,
            color: Color::BLACK,
            anchor: TextAnchor::Start,
            baseline: Baseline::Alphabetic,
            rotation: 0.0,
        }
    }
}
