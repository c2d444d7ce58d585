//! Fill styling options for shapes.

use super::color::Color;

/// Direction of hatch strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HatchDirection {
    /// `/` strokes
    Forward,
    /// `\` strokes
    Backward,
    /// `|` strokes
    Vertical,
    /// `-` strokes
    Horizontal,
    /// `x` strokes (both diagonals)
    Cross,
}

impl HatchDirection {
    fn rotation(&self) -> f64 {
        match self {
            HatchDirection::Forward | HatchDirection::Cross => 45.0,
            HatchDirection::Backward => -45.0,
            HatchDirection::Vertical => 0.0,
            HatchDirection::Horizontal => 90.0,
        }
    }
}

/// A hatch pattern drawn inside a filled shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Hatch {
    pub direction: HatchDirection,
    /// Repetitions of the pattern character; more means denser strokes.
    pub density: usize,
    pub color: Color,
    pub line_width: f64,
}

impl Hatch {
    /// Parse a matplotlib-style hatch spec such as `"///"`, `"\\\\"` or `"xx"`.
    pub fn from_spec(spec: &str) -> Option<Self> {
        let first = spec.chars().next()?;
        if !spec.chars().all(|c| c == first) {
            return None;
        }
        let direction = match first {
            '/' => HatchDirection::Forward,
            '\\' => HatchDirection::Backward,
            '|' => HatchDirection::Vertical,
            '-' => HatchDirection::Horizontal,
            'x' | 'X' => HatchDirection::Cross,
            _ => return None,
        };
        Some(Hatch {
            direction,
            density: spec.chars().count(),
            color: Color::BLACK,
            line_width: 0.8,
        })
    }

    /// Set the stroke colour.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Stroke spacing in points.
    pub fn spacing(&self) -> f64 {
        (12.0 / self.density.max(1) as f64).max(2.0)
    }

    /// SVG `<pattern>` definition for this hatch under the given id.
    pub fn to_svg_pattern(&self, id: &str) -> String {
        let sp = self.spacing();
        let stroke = format!(
            "stroke=\"{}\" stroke-width=\"{}\"{}",
            self.color.to_svg_string(),
            self.line_width,
            if self.color.a < 1.0 {
                format!(" stroke-opacity=\"{}\"", self.color.a)
            } else {
                String::new()
            }
        );
        let mut lines = format!(
            "<line x1=\"0\" y1=\"0\" x2=\"0\" y2=\"{sp:.2}\" {stroke}/>"
        );
        if self.direction == HatchDirection::Cross {
            lines.push_str(&format!(
                "<line x1=\"0\" y1=\"0\" x2=\"{sp:.2}\" y2=\"0\" {stroke}/>"
            ));
        }
        format!(
            "<pattern id=\"{id}\" patternUnits=\"userSpaceOnUse\" width=\"{sp:.2}\" height=\"{sp:.2}\" patternTransform=\"rotate({})\">{lines}</pattern>",
            self.direction.rotation()
        )
    }
}

/// Style configuration for filled shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    /// Fill colour; `None` leaves the interior unfilled
    pub color: Option<Color>,
    /// Fill opacity (0.0 - 1.0)
    pub opacity: f64,
    /// Stroke/border color (None for no stroke)
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub hatch: Option<Hatch>,
}

impl FillStyle {
    /// Create a new fill style with the given color.
    pub fn new(color: impl Into<Color>) -> Self {
        FillStyle {
            color: Some(color.into()),
            ..Default::default()
        }
    }

    /// Create a fill style with no fill (outline or hatch only).
    pub fn none() -> Self {
        FillStyle {
            color: None,
            ..Default::default()
        }
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the fill opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn stroke(mut self, color: impl Into<Color>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn hatch(mut self, hatch: Hatch) -> Self {
        self.hatch = Some(hatch);
        self
    }

    /// Generate SVG style attributes. `pattern_id` must name the `<pattern>`
    /// registered for `self.hatch` when a hatch is present.
    pub fn to_svg_style(&self, pattern_id: Option<&str>) -> String {
        let mut attrs = Vec::with_capacity(4);
        match (pattern_id, &self.color) {
            (Some(id), _) if self.hatch.is_some() => {
                attrs.push(format!("fill=\"url(#{})\"", id));
            }
            (_, Some(color)) => {
                attrs.push(format!("fill=\"{}\"", color.to_svg_string()));
                let opacity = self.opacity * color.a;
                if opacity < 1.0 {
                    attrs.push(format!("fill-opacity=\"{}\"", opacity));
                }
            }
            (_, None) => attrs.push("fill=\"none\"".to_string()),
        }

        if let Some(ref stroke) = self.stroke {
            attrs.push(format!("stroke=\"{}\"", stroke.to_svg_string()));
            attrs.push(format!("stroke-width=\"{}\"", self.stroke_width));
            if stroke.a < 1.0 {
                attrs.push(format!("stroke-opacity=\"{}\"", stroke.a));
            }
        } else {
            attrs.push("stroke=\"none\"".to_string());
        }

        attrs.join(" ")
    }
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle {
            color: Some(Color::default()),
            opacity: 1.0,
            stroke: None,
            stroke_width: 1.0,
            hatch: None,
        }
    }
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle::new(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hatch_spec() {
        let h = Hatch::from_spec("////").unwrap();
        assert_eq!(h.direction, HatchDirection::Forward);
        assert_eq!(h.density, 4);
        assert!(Hatch::from_spec("/x").is_none());
        assert!(Hatch::from_spec("").is_none());
    }

    #[test]
    fn test_hatched_fill_uses_pattern() {
        let style = FillStyle::none().hatch(Hatch::from_spec("xx").unwrap());
        let attrs = style.to_svg_style(Some("hatch-0"));
        assert!(attrs.contains("url(#hatch-0)"));
        assert!(FillStyle::none().to_svg_style(None).contains("fill=\"none\""));
    }
}
