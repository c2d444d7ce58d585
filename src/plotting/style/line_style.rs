//! Line styling options.

use super::color::Color;

/// Dash pattern for lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashPattern {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line (default dash length)
    Dashed,
    /// Dotted line
    Dotted,
    /// Alternating dash-dot pattern
    DashDot,
    /// Custom dash array [dash_length, gap_length, ...]
    Custom(Vec<f64>),
}

impl DashPattern {
    /// Convert to SVG stroke-dasharray value, scaled by the line width so
    /// thick lines keep proportional dashes.
    pub fn to_svg_dasharray(&self, width: f64) -> Option<String> {
        let unit = width.max(0.5);
        let pattern: Vec<f64> = match self {
            DashPattern::Solid => return None,
            DashPattern::Dashed => vec![3.7, 1.6],
            DashPattern::Dotted => vec![1.0, 1.65],
            DashPattern::DashDot => vec![6.4, 1.6, 1.0, 1.6],
            DashPattern::Custom(arr) if arr.is_empty() => return None,
            DashPattern::Custom(arr) => return Some(join_dashes(arr)),
        };
        let scaled: Vec<f64> = pattern.iter().map(|v| v * unit).collect();
        Some(join_dashes(&scaled))
    }

    /// Parse from matplotlib-style format string (prefix match).
    pub fn from_format_str(s: &str) -> Option<Self> {
        // Check longest patterns first
        if s.starts_with("--") {
            Some(DashPattern::Dashed)
        } else if s.starts_with("-.") {
            Some(DashPattern::DashDot)
        } else if s.starts_with(':') {
            Some(DashPattern::Dotted)
        } else if s.starts_with('-') {
            Some(DashPattern::Solid)
        } else {
            None
        }
    }

    /// Parse a linestyle name or its short form ("dashed", "--", "dash-dot", ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "-" | "solid" => Some(DashPattern::Solid),
            "--" | "dashed" => Some(DashPattern::Dashed),
            ":" | "dotted" => Some(DashPattern::Dotted),
            "-." | "dashdot" | "dash-dot" => Some(DashPattern::DashDot),
            _ => None,
        }
    }

    /// Length in characters of the format-string token this pattern was parsed from.
    pub(crate) fn format_token_len(s: &str) -> usize {
        if s.starts_with("--") || s.starts_with("-.") {
            2
        } else if s.starts_with('-') || s.starts_with(':') {
            1
        } else {
            0
        }
    }
}

fn join_dashes(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.2}", v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Style configuration for lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Line width in points
    pub width: f64,
    /// Dash pattern
    pub dash: DashPattern,
}

impl LineStyle {
    /// Create a new line style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the line width.
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the dash pattern.
    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    /// Generate SVG style attributes.
    pub fn to_svg_style(&self) -> String {
        let mut attrs = vec![
            format!("stroke=\"{}\"", self.color.to_svg_string()),
            format!("stroke-width=\"{}\"", self.width),
            "stroke-linecap=\"butt\"".to_string(),
            "stroke-linejoin=\"round\"".to_string(),
            "fill=\"none\"".to_string(),
        ];

        if self.color.a < 1.0 {
            attrs.push(format!("stroke-opacity=\"{}\"", self.color.a));
        }

        if let Some(dasharray) = self.dash.to_svg_dasharray(self.width) {
            attrs.push(format!("stroke-dasharray=\"{}\"", dasharray));
        }

        attrs.join(" ")
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: Color::default(),
            width: 1.5,
            dash: DashPattern::Solid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_names() {
        assert_eq!(DashPattern::from_name("dash-dot"), Some(DashPattern::DashDot));
        assert_eq!(DashPattern::from_name("dash_dot"), Some(DashPattern::DashDot));
        assert_eq!(DashPattern::from_name("--"), Some(DashPattern::Dashed));
        assert_eq!(DashPattern::from_name("wavy"), None);
    }

    #[test]
    fn test_solid_has_no_dasharray() {
        let style = LineStyle::new().width(2.0);
        assert!(!style.to_svg_style().contains("stroke-dasharray"));
        let dashed = style.dash(DashPattern::Dashed);
        assert!(dashed.to_svg_style().contains("stroke-dasharray=\"7.40,3.20\""));
    }
}
