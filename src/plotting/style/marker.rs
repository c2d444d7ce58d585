//! Marker styles for point series and histogram point rendering.

use std::f64::consts::{FRAC_PI_2, PI};

use super::color::Color;

/// Marker shapes for data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    /// Upward-pointing triangle
    Triangle,
    /// Downward-pointing triangle
    TriangleDown,
    Diamond,
    Plus,
    Cross,
    Star,
}

impl Marker {
    /// Parse from matplotlib-style format character.
    pub fn from_format_char(c: char) -> Option<Self> {
        match c {
            'o' | '.' => Some(Marker::Circle),
            's' => Some(Marker::Square),
            '^' => Some(Marker::Triangle),
            'v' => Some(Marker::TriangleDown),
            'D' | 'd' => Some(Marker::Diamond),
            '+' => Some(Marker::Plus),
            'x' | 'X' => Some(Marker::Cross),
            '*' => Some(Marker::Star),
            _ => None,
        }
    }

    /// SVG path data for the marker centered at the origin, `r` being half the marker size.
    /// Circles are emitted as `<circle>` elements and return `None`.
    pub fn to_svg_path(&self, r: f64) -> Option<String> {
        match self {
            Marker::Circle => None,
            Marker::Square => Some(format!(
                "M{:.2},{:.2} H{:.2} V{:.2} H{:.2} Z",
                -r, -r, r, r, -r
            )),
            Marker::Triangle => Some(format!(
                "M0,{:.2} L{:.2},{:.2} L{:.2},{:.2} Z",
                -r, r, r * 0.8, -r, r * 0.8
            )),
            Marker::TriangleDown => Some(format!(
                "M0,{:.2} L{:.2},{:.2} L{:.2},{:.2} Z",
                r, -r, -r * 0.8, r, -r * 0.8
            )),
            Marker::Diamond => {
                let s = r * 1.2;
                Some(format!("M0,{:.2} L{:.2},0 L0,{:.2} L{:.2},0 Z", -s, s, s, -s))
            }
            Marker::Plus => Some(format!(
                "M{:.2},0 H{:.2} M0,{:.2} V{:.2}",
                -r, r, -r, r
            )),
            Marker::Cross => {
                let s = r * std::f64::consts::FRAC_1_SQRT_2;
                Some(format!(
                    "M{:.2},{:.2} L{:.2},{:.2} M{:.2},{:.2} L{:.2},{:.2}",
                    -s, -s, s, s, -s, s, s, -s
                ))
            }
            Marker::Star => {
                let inner = r * 0.4;
                let mut path = String::new();
                for i in 0..10 {
                    let radius = if i % 2 == 0 { r } else { inner };
                    let angle = PI * (i as f64) / 5.0 - FRAC_PI_2;
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    path.push_str(&format!(
                        "{}{:.2},{:.2} ",
                        cmd,
                        radius * angle.cos(),
                        radius * angle.sin()
                    ));
                }
                path.push('Z');
                Some(path)
            }
        }
    }

    /// Line-only markers carry no fill.
    pub fn is_stroke_only(&self) -> bool {
        matches!(self, Marker::Plus | Marker::Cross)
    }
}

/// Style configuration for markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// The marker shape
    pub marker: Marker,
    /// Marker size (diameter in points)
    pub size: f64,
    pub fill: Color,
    pub edge_color: Color,
    pub edge_width: f64,
}

impl MarkerStyle {
    /// Create a new marker style with a single color for fill and edge.
    pub fn new(marker: Marker, color: Color) -> Self {
        MarkerStyle {
            marker,
            fill: color,
            edge_color: color,
            ..Default::default()
        }
    }

    /// Set the marker size.
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the opacity of both fill and edge.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.fill = self.fill.with_alpha(alpha);
        self.edge_color = self.edge_color.with_alpha(alpha);
        self
    }

    /// Generate SVG style attributes.
    pub fn to_svg_style(&self) -> String {
        let mut attrs = Vec::with_capacity(5);
        if self.marker.is_stroke_only() {
            attrs.push("fill=\"none\"".to_string());
        } else {
            attrs.push(format!("fill=\"{}\"", self.fill.to_svg_string()));
            if self.fill.a < 1.0 {
                attrs.push(format!("fill-opacity=\"{}\"", self.fill.a));
            }
        }
        attrs.push(format!("stroke=\"{}\"", self.edge_color.to_svg_string()));
        attrs.push(format!("stroke-width=\"{}\"", self.edge_width));
        if self.edge_color.a < 1.0 {
            attrs.push(format!("stroke-opacity=\"{}\"", self.edge_color.a));
        }
        attrs.join(" ")
    }

    /// Render the marker at a specific position, returning the SVG element.
    pub fn render_at(&self, x: f64, y: f64) -> String {
        let style = self.to_svg_style();
        let radius = self.size / 2.0;

        match self.marker.to_svg_path(radius) {
            None => format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {}/>",
                x, y, radius, style
            ),
            Some(path) => format!(
                "<path d=\"{}\" transform=\"translate({:.2},{:.2})\" {}/>",
                path, x, y, style
            ),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            marker: Marker::Circle,
            size: 6.0,
            fill: Color::default(),
            edge_color: Color::default(),
            edge_width: 1.0,
        }
    }
}
