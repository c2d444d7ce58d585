//! SVG rendering backend.

use crate::plotting::element::text::escape_xml;
use crate::plotting::element::Bounds;
use crate::plotting::style::{Color, FillStyle, LineStyle, TextStyle};

/// SVG rendering backend. Coordinates are in points (1/72 inch).
#[derive(Debug)]
pub struct SvgBackend {
    pub width: f64,
    pub height: f64,
    /// SVG content accumulated during rendering
    content: Vec<String>,
    /// SVG defs section (clip paths, hatch patterns)
    defs: Vec<String>,
    next_id: usize,
    /// Translation applied to all content when the canvas grows left or up
    offset: (f64, f64),
    /// Painted over the final canvas size at render time
    background: Option<Color>,
    /// Whether to include XML declaration
    include_declaration: bool,
}

impl SvgBackend {
    pub fn new(width: f64, height: f64) -> Self {
        SvgBackend {
            width,
            height,
            content: Vec::new(),
            defs: Vec::new(),
            next_id: 0,
            offset: (0.0, 0.0),
            background: None,
            include_declaration: true,
        }
    }

    pub fn include_declaration(mut self, include: bool) -> Self {
        self.include_declaration = include;
        self
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    /// Add raw SVG content.
    pub fn add_content(&mut self, content: String) {
        self.content.push(content);
    }

    /// Add content to the defs section.
    pub fn add_def(&mut self, def: String) {
        self.defs.push(def);
    }

    /// A document-unique id with the given prefix.
    pub fn fresh_id(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let opacity = if color.a < 1.0 {
            format!(" fill-opacity=\"{}\"", color.a)
        } else {
            String::new()
        };
        self.content.push(format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"{}/>",
            x,
            y,
            width,
            height,
            color.to_svg_string(),
            opacity
        ));
    }

    /// Draw a line between two points.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.content.push(format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>",
            x1,
            y1,
            x2,
            y2,
            style.to_svg_style()
        ));
    }

    /// Draw a polyline.
    pub fn draw_polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        if points.len() < 2 {
            return;
        }
        self.content.push(format!(
            "<polyline points=\"{}\" {}/>",
            points_attr(points),
            style.to_svg_style()
        ));
    }

    /// Draw a closed polygon, registering a hatch pattern when the fill has one.
    pub fn draw_polygon(&mut self, points: &[(f64, f64)], fill: &FillStyle) {
        if points.len() < 3 {
            return;
        }
        let pattern_id = fill.hatch.as_ref().map(|hatch| {
            let id = self.fresh_id("hatch");
            self.defs.push(hatch.to_svg_pattern(&id));
            id
        });
        self.content.push(format!(
            "<polygon points=\"{}\" {}/>",
            points_attr(points),
            fill.to_svg_style(pattern_id.as_deref())
        ));
    }

    /// Draw an axis-aligned rectangle with a fill style.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &FillStyle) {
        let corners = [
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ];
        self.draw_polygon(&corners, fill);
    }

    /// Draw text.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        let transform = if style.rotation != 0.0 {
            format!(" transform=\"rotate({},{:.2},{:.2})\"", style.rotation, x, y)
        } else {
            String::new()
        };

        self.content.push(format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" {}{}>{}</text>",
            x,
            y,
            style.to_svg_attrs(),
            transform,
            escape_xml(text)
        ));
    }

    /// Start a clipped group; pair with [`SvgBackend::end_clip`].
    pub fn start_clip(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let id = self.fresh_id("clip");
        self.defs.push(format!(
            "<clipPath id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>",
            id, x, y, width, height
        ));
        self.content.push(format!("<g clip-path=\"url(#{})\">", id));
    }

    pub fn end_clip(&mut self) {
        self.content.push("</g>".to_string());
    }

    /// Grow the canvas so that `extent` (in current coordinates) plus `pad`
    /// fits, shifting content right/down when it overflows the left/top edge.
    pub fn grow_to_fit(&mut self, extent: Bounds, pad: f64) {
        let dx = (pad - extent.x_min).max(0.0);
        let dy = (pad - extent.y_min).max(0.0);
        self.offset = (dx, dy);
        self.width = (self.width + dx).max(extent.x_max + dx + pad);
        self.height = (self.height + dy).max(extent.y_max + dy + pad);
    }

    /// Render the final SVG string.
    pub fn render(self) -> String {
        let declaration = if self.include_declaration {
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"
        } else {
            ""
        };

        let defs_section = if self.defs.is_empty() {
            String::new()
        } else {
            format!("  <defs>\n    {}\n  </defs>\n", self.defs.join("\n    "))
        };

        let background = match self.background {
            Some(color) if !color.is_transparent() => format!(
                "  <rect width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
                self.width,
                self.height,
                color.to_svg_string()
            ),
            _ => String::new(),
        };

        let (dx, dy) = self.offset;
        let (open, close) = if dx > 0.0 || dy > 0.0 {
            (format!("<g transform=\"translate({:.2},{:.2})\">\n  ", dx, dy), "\n  </g>")
        } else {
            (String::new(), "")
        };

        format!(
            r#"{}<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}">
{}{}  {}{}{}
</svg>"#,
            declaration,
            defs_section,
            background,
            open,
            self.content.join("\n  "),
            close,
            w = self.width,
            h = self.height,
        )
    }
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::style::Hatch;

    #[test]
    fn test_hatched_polygon_registers_pattern() {
        let mut backend = SvgBackend::new(100.0, 100.0);
        let fill = FillStyle::none().hatch(Hatch::from_spec("///").unwrap());
        backend.draw_polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], &fill);
        let svg = backend.render();
        assert!(svg.contains("<pattern id=\"hatch-0\""));
        assert!(svg.contains("fill=\"url(#hatch-0)\""));
    }

    #[test]
    fn test_grow_to_fit_shifts_overflow() {
        let mut backend = SvgBackend::new(100.0, 100.0);
        backend.grow_to_fit(Bounds::new(-10.0, 150.0, 0.0, 100.0), 5.0);
        assert_eq!((backend.width, backend.height), (170.0, 110.0));
        assert!(backend.render().contains("translate(15.00,5.00)"));
    }

    #[test]
    fn test_size_in_points() {
        let svg = SvgBackend::new(432.0, 288.0).render();
        assert!(svg.contains("width=\"432.00\""));
        assert!(svg.contains("viewBox=\"0 0 432.00 288.00\""));
    }
}
