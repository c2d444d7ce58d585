//! Legend configuration, placement and rendering.

use super::Bounds;
use crate::plotting::backend::SvgBackend;
use crate::plotting::style::{Color, FillStyle, LineStyle, MarkerStyle, TextStyle};

/// Location of the legend box, following matplotlib's `loc` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLoc {
    /// Corner covering the fewest data points
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    Right,
    CenterLeft,
    CenterRight,
    LowerCenter,
    UpperCenter,
    Center,
}

impl LegendLoc {
    /// Candidate order tried by [`LegendLoc::Best`]; earlier wins ties.
    const CANDIDATES: [LegendLoc; 10] = [
        LegendLoc::UpperRight,
        LegendLoc::UpperLeft,
        LegendLoc::LowerLeft,
        LegendLoc::LowerRight,
        LegendLoc::Right,
        LegendLoc::CenterLeft,
        LegendLoc::CenterRight,
        LegendLoc::LowerCenter,
        LegendLoc::UpperCenter,
        LegendLoc::Center,
    ];

    /// matplotlib numeric location code (0 = best ... 10 = center).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LegendLoc::Best),
            1..=10 => Some(Self::CANDIDATES[code as usize - 1]),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace(['_', '-'], " ");
        let loc = match normalized.as_str() {
            "best" => LegendLoc::Best,
            "upper right" => LegendLoc::UpperRight,
            "upper left" => LegendLoc::UpperLeft,
            "lower left" => LegendLoc::LowerLeft,
            "lower right" => LegendLoc::LowerRight,
            "right" => LegendLoc::Right,
            "center left" => LegendLoc::CenterLeft,
            "center right" => LegendLoc::CenterRight,
            "lower center" => LegendLoc::LowerCenter,
            "upper center" => LegendLoc::UpperCenter,
            "center" => LegendLoc::Center,
            _ => return None,
        };
        Some(loc)
    }

    /// Fractional position of the anchored corner within the legend box;
    /// `(0, 1)` is the top-left corner.
    fn box_fractions(&self) -> (f64, f64) {
        match self {
            LegendLoc::Best | LegendLoc::UpperRight => (1.0, 1.0),
            LegendLoc::UpperLeft => (0.0, 1.0),
            LegendLoc::LowerLeft => (0.0, 0.0),
            LegendLoc::LowerRight => (1.0, 0.0),
            LegendLoc::Right | LegendLoc::CenterRight => (1.0, 0.5),
            LegendLoc::CenterLeft => (0.0, 0.5),
            LegendLoc::LowerCenter => (0.5, 0.0),
            LegendLoc::UpperCenter => (0.5, 1.0),
            LegendLoc::Center => (0.5, 0.5),
        }
    }
}

/// The graphical sample drawn next to a legend label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendHandle {
    pub line: Option<LineStyle>,
    pub marker: Option<MarkerStyle>,
    pub fill: Option<FillStyle>,
    /// Draw a vertical error-bar stroke through the sample
    pub error_bar: Option<LineStyle>,
}

impl LegendHandle {
    pub fn line(style: LineStyle) -> Self {
        LegendHandle {
            line: Some(style),
            ..Default::default()
        }
    }

    pub fn fill(style: FillStyle) -> Self {
        LegendHandle {
            fill: Some(style),
            ..Default::default()
        }
    }

    pub fn with_marker(mut self, marker: Option<MarkerStyle>) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_error_bar(mut self, style: LineStyle) -> Self {
        self.error_bar = Some(style);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_none() && self.marker.is_none() && self.fill.is_none()
    }
}

/// A single entry in the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub handle: LegendHandle,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, handle: LegendHandle) -> Self {
        LegendEntry {
            label: label.into(),
            handle,
        }
    }
}

/// Legend configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub loc: LegendLoc,
    /// Point in axes fractions that `loc`'s corner is pinned to; may lie
    /// outside `[0, 1]` to place the legend outside the plot area
    pub anchor: Option<(f64, f64)>,
    pub frame: bool,
    pub rounded: bool,
    pub shadow: bool,
    pub background: Color,
    pub edge_color: Color,
    /// Opacity of the frame background
    pub frame_alpha: f64,
    pub text_style: TextStyle,
    /// Padding inside the legend box
    pub padding: f64,
    /// Gap between the legend box and the axes edge
    pub border_pad: f64,
    /// Spacing between entries
    pub entry_spacing: f64,
    /// Length of the line sample in the legend
    pub handle_length: f64,
    /// Gap between line/marker and label
    pub label_gap: f64,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loc(mut self, loc: LegendLoc) -> Self {
        self.loc = loc;
        self
    }

    pub fn anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Some((x, y));
        self
    }

    pub fn frame(mut self, frame: bool) -> Self {
        self.frame = frame;
        self
    }

    /// Rounded, shadowed frame.
    pub fn fancy(mut self) -> Self {
        self.frame = true;
        self.rounded = true;
        self.shadow = true;
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.text_style.font_size = size;
        self
    }

    pub fn text_style(mut self, style: TextStyle) -> Self {
        self.text_style = style;
        self
    }

    fn line_height(&self) -> f64 {
        self.text_style.font_size * 1.2 + self.entry_spacing
    }

    /// Width and height of the legend box for the given entries.
    pub fn measure(&self, entries: &[LegendEntry]) -> (f64, f64) {
        let label_width = entries
            .iter()
            .map(|e| self.text_style.approx_width(&e.label))
            .fold(0.0, f64::max);
        let width = self.padding * 2.0 + self.handle_length + self.label_gap + label_width;
        let height = self.padding * 2.0 + entries.len() as f64 * self.line_height()
            - self.entry_spacing;
        (width, height)
    }

    /// Top-left corner of the legend box in pixel coordinates.
    ///
    /// `occupied` holds pixel positions of drawn data, used by [`LegendLoc::Best`].
    pub fn place(&self, size: (f64, f64), axes: &Bounds, occupied: &[(f64, f64)]) -> (f64, f64) {
        let (w, h) = size;
        if let Some((ax, ay)) = self.anchor {
            let px = axes.x_min + ax * axes.width();
            let py = axes.y_max - ay * axes.height();
            let (fx, fy) = self.loc.box_fractions();
            return (px - fx * w, py - (1.0 - fy) * h);
        }

        let corner = |loc: LegendLoc| {
            let (fx, fy) = loc.box_fractions();
            let free_w = (axes.width() - w - 2.0 * self.border_pad).max(0.0);
            let free_h = (axes.height() - h - 2.0 * self.border_pad).max(0.0);
            (
                axes.x_min + self.border_pad + fx * free_w,
                axes.y_min + self.border_pad + (1.0 - fy) * free_h,
            )
        };

        match self.loc {
            LegendLoc::Best => {
                let mut best = corner(LegendLoc::UpperRight);
                let mut best_count = usize::MAX;
                for loc in LegendLoc::CANDIDATES {
                    let (x, y) = corner(loc);
                    let count = occupied
                        .iter()
                        .filter(|(px, py)| *px >= x && *px <= x + w && *py >= y && *py <= y + h)
                        .count();
                    if count < best_count {
                        best_count = count;
                        best = (x, y);
                    }
                    if count == 0 {
                        break;
                    }
                }
                best
            }
            loc => corner(loc),
        }
    }

    /// Draw the legend and return its box in pixel coordinates.
    pub fn render(
        &self,
        entries: &[LegendEntry],
        axes: &Bounds,
        occupied: &[(f64, f64)],
        backend: &mut SvgBackend,
    ) -> Bounds {
        let (w, h) = self.measure(entries);
        let (lx, ly) = self.place((w, h), axes, occupied);

        if self.frame {
            let rx = if self.rounded { 3.0 } else { 0.0 };
            if self.shadow {
                backend.add_content(format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{}\" fill=\"#000000\" fill-opacity=\"0.3\"/>",
                    lx + 2.0, ly + 2.0, w, h, rx
                ));
            }
            backend.add_content(format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"0.8\"/>",
                lx,
                ly,
                w,
                h,
                rx,
                self.background.to_svg_string(),
                self.frame_alpha,
                self.edge_color.to_svg_string()
            ));
        }

        let line_height = self.line_height();
        for (i, entry) in entries.iter().enumerate() {
            let ey = ly + self.padding + i as f64 * line_height + self.text_style.font_size * 0.6;
            let x1 = lx + self.padding;
            let x2 = x1 + self.handle_length;
            let mid = (x1 + x2) / 2.0;
            self.render_handle(&entry.handle, x1, x2, mid, ey, backend);

            let mut style = self.text_style.clone();
            style.baseline = crate::plotting::style::Baseline::Middle;
            backend.draw_text(x2 + self.label_gap, ey, &entry.label, &style);
        }

        Bounds::new(lx, lx + w, ly, ly + h)
    }

    fn render_handle(
        &self,
        handle: &LegendHandle,
        x1: f64,
        x2: f64,
        mid: f64,
        ey: f64,
        backend: &mut SvgBackend,
    ) {
        let half = self.text_style.font_size * 0.35;
        if let Some(ref fill) = handle.fill {
            backend.draw_rect(x1, ey - half, x2 - x1, 2.0 * half, fill);
        }
        if let Some(ref line) = handle.line {
            backend.draw_line(x1, ey, x2, ey, line);
        }
        if let Some(ref err) = handle.error_bar {
            backend.draw_line(mid, ey - half, mid, ey + half, err);
        }
        if let Some(ref marker) = handle.marker {
            backend.add_content(marker.render_at(mid, ey));
        }
    }
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            loc: LegendLoc::Best,
            anchor: None,
            frame: true,
            rounded: false,
            shadow: false,
            background: Color::WHITE,
            edge_color: Color::rgb(0xcc, 0xcc, 0xcc),
            frame_alpha: 0.8,
            text_style: TextStyle::new().font_size(10.0),
            padding: 4.0,
            border_pad: 5.0,
            entry_spacing: 3.0,
            handle_length: 20.0,
            label_gap: 6.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes_box() -> Bounds {
        Bounds::new(0.0, 100.0, 0.0, 100.0)
    }

    #[test]
    fn test_loc_codes_and_names() {
        assert_eq!(LegendLoc::from_code(0), Some(LegendLoc::Best));
        assert_eq!(LegendLoc::from_code(2), Some(LegendLoc::UpperLeft));
        assert_eq!(LegendLoc::from_code(11), None);
        assert_eq!(LegendLoc::from_name("Upper_Left"), Some(LegendLoc::UpperLeft));
    }

    #[test]
    fn test_best_avoids_data() {
        let legend = Legend::new();
        // Data crowding the upper-right corner pushes the legend upper-left.
        let occupied: Vec<(f64, f64)> = (0..20).map(|i| (90.0 + i as f64 * 0.1, 10.0)).collect();
        let (x, y) = legend.place((20.0, 10.0), &axes_box(), &occupied);
        assert_eq!((x, y), (5.0, 5.0));
    }

    #[test]
    fn test_anchor_outside() {
        let legend = Legend::new().loc(LegendLoc::UpperLeft).anchor(1.0, 1.0);
        let (x, y) = legend.place((20.0, 10.0), &axes_box(), &[]);
        assert_eq!((x, y), (100.0, 0.0));
    }
}
