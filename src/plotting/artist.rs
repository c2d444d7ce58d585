//! Primitive artists kept by an [`Axes`](crate::plotting::axes::Axes) until render time.

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{Bounds, TextCoords, Transform};
use crate::plotting::style::{FillStyle, LineStyle, MarkerStyle, TextStyle};

/// A drawable primitive in data (or axes) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    /// Polyline through the points and/or markers at each point
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        style: Option<LineStyle>,
        marker: Option<MarkerStyle>,
    },
    /// Closed polygon
    Polygon {
        vertices: Vec<(f64, f64)>,
        fill: FillStyle,
    },
    /// Symmetric error bars with caps, optionally with markers at the centres
    ErrorBars {
        x: Vec<f64>,
        y: Vec<f64>,
        xerr: Option<Vec<f64>>,
        yerr: Option<Vec<f64>>,
        style: LineStyle,
        /// Cap width in points; zero disables caps
        cap: f64,
        marker: Option<MarkerStyle>,
    },
    /// Vertical line spanning the axes at data x
    VLine { x: f64, style: LineStyle },
    /// Horizontal line spanning the axes at data y
    HLine { y: f64, style: LineStyle },
    Text {
        content: String,
        x: f64,
        y: f64,
        coords: TextCoords,
        style: TextStyle,
    },
}

impl Artist {
    /// Data-space extent of the artist, ignoring non-finite values.
    pub fn data_bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut include = |x: f64, y: f64| {
            if !x.is_finite() || !y.is_finite() {
                return;
            }
            let b = Bounds::new(x, x, y, y);
            match bounds {
                Some(ref mut acc) => acc.include_bounds(&b),
                None => bounds = Some(b),
            }
        };
        match self {
            Artist::Line { x, y, .. } => x.iter().zip(y).for_each(|(a, b)| include(*a, *b)),
            Artist::Polygon { vertices, .. } => vertices.iter().for_each(|(a, b)| include(*a, *b)),
            Artist::ErrorBars {
                x, y, xerr, yerr, ..
            } => {
                for i in 0..x.len().min(y.len()) {
                    let ex = xerr.as_ref().and_then(|e| e.get(i)).copied().unwrap_or(0.0);
                    let ey = yerr.as_ref().and_then(|e| e.get(i)).copied().unwrap_or(0.0);
                    include(x[i] - ex, y[i] - ey);
                    include(x[i] + ex, y[i] + ey);
                }
            }
            Artist::VLine { .. } | Artist::HLine { .. } | Artist::Text { .. } => {}
        }
        bounds
    }

    /// Pixel positions of the artist's data points, used to place a "best" legend.
    pub fn pixel_points(&self, tr: &Transform<'_>) -> Vec<(f64, f64)> {
        match self {
            Artist::Line { x, y, .. } | Artist::ErrorBars { x, y, .. } => x
                .iter()
                .zip(y)
                .filter_map(|(a, b)| tr.data(*a, *b))
                .collect(),
            Artist::Polygon { vertices, .. } => vertices
                .iter()
                .filter_map(|(a, b)| tr.data(*a, *b))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn render(&self, tr: &Transform<'_>, backend: &mut SvgBackend) {
        match self {
            Artist::Line {
                x,
                y,
                style,
                marker,
            } => {
                if let Some(style) = style {
                    // Unrepresentable points (e.g. <= 0 on a log axis) break the line
                    let mut segment = Vec::with_capacity(x.len());
                    for (a, b) in x.iter().zip(y) {
                        match tr.data(*a, *b) {
                            Some(p) => segment.push(p),
                            None => {
                                backend.draw_polyline(&segment, style);
                                segment.clear();
                            }
                        }
                    }
                    backend.draw_polyline(&segment, style);
                }
                if let Some(marker) = marker {
                    for (px, py) in x.iter().zip(y).filter_map(|(a, b)| tr.data(*a, *b)) {
                        backend.add_content(marker.render_at(px, py));
                    }
                }
            }
            Artist::Polygon { vertices, fill } => {
                let points: Vec<(f64, f64)> = vertices
                    .iter()
                    .map(|(a, b)| clamp_to_view(tr, *a, *b))
                    .collect();
                backend.draw_polygon(&points, fill);
            }
            Artist::ErrorBars {
                x,
                y,
                xerr,
                yerr,
                style,
                cap,
                marker,
            } => {
                let half_cap = cap / 2.0;
                for i in 0..x.len().min(y.len()) {
                    if let Some(e) = yerr.as_ref().and_then(|e| e.get(i)) {
                        let lo = clamp_to_view(tr, x[i], y[i] - e);
                        let hi = clamp_to_view(tr, x[i], y[i] + e);
                        backend.draw_line(lo.0, lo.1, hi.0, hi.1, style);
                        if half_cap > 0.0 {
                            for (px, py) in [lo, hi] {
                                backend.draw_line(px - half_cap, py, px + half_cap, py, style);
                            }
                        }
                    }
                    if let Some(e) = xerr.as_ref().and_then(|e| e.get(i)) {
                        let lo = clamp_to_view(tr, x[i] - e, y[i]);
                        let hi = clamp_to_view(tr, x[i] + e, y[i]);
                        backend.draw_line(lo.0, lo.1, hi.0, hi.1, style);
                        if half_cap > 0.0 {
                            for (px, py) in [lo, hi] {
                                backend.draw_line(px, py - half_cap, px, py + half_cap, style);
                            }
                        }
                    }
                    if let (Some(marker), Some((px, py))) = (marker, tr.data(x[i], y[i])) {
                        backend.add_content(marker.render_at(px, py));
                    }
                }
            }
            Artist::VLine { x, style } => {
                if let Some(px) = tr.data_x(*x) {
                    backend.draw_line(px, tr.pixel.y_min, px, tr.pixel.y_max, style);
                }
            }
            Artist::HLine { y, style } => {
                if let Some(py) = tr.data_y(*y) {
                    backend.draw_line(tr.pixel.x_min, py, tr.pixel.x_max, py, style);
                }
            }
            Artist::Text {
                content,
                x,
                y,
                coords,
                style,
            } => {
                let pos = match coords {
                    TextCoords::Axes => Some(tr.axes(*x, *y)),
                    TextCoords::Data => tr.data(*x, *y),
                };
                if let Some((px, py)) = pos {
                    backend.draw_text(px, py, content, style);
                }
            }
        }
    }
}

/// Transform a data point, pinning values the scale cannot represent
/// (non-positive on a log axis) to the bottom/left edge of the plot area.
fn clamp_to_view(tr: &Transform<'_>, x: f64, y: f64) -> (f64, f64) {
    let px = tr.data_x(x).unwrap_or(tr.pixel.x_min);
    let py = tr.data_y(y).unwrap_or(tr.pixel.y_max);
    (px, py)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::LinearScale;

    #[test]
    fn test_error_bar_bounds_include_errors() {
        let artist = Artist::ErrorBars {
            x: vec![1.0, 2.0],
            y: vec![5.0, 6.0],
            xerr: None,
            yerr: Some(vec![1.0, 2.0]),
            style: LineStyle::default(),
            cap: 3.0,
            marker: None,
        };
        let b = artist.data_bounds().unwrap();
        assert_eq!((b.x_min, b.x_max, b.y_min, b.y_max), (1.0, 2.0, 4.0, 8.0));
    }

    #[test]
    fn test_line_skips_nan_segments() {
        let artist = Artist::Line {
            x: vec![0.0, 1.0, 2.0, 3.0],
            y: vec![0.0, 1.0, f64::NAN, 3.0],
            style: Some(LineStyle::default()),
            marker: None,
        };
        let xs = LinearScale::new(0.0, 3.0).unwrap();
        let ys = LinearScale::new(0.0, 3.0).unwrap();
        let tr = Transform {
            x_scale: &xs,
            y_scale: &ys,
            pixel: Bounds::new(0.0, 30.0, 0.0, 30.0),
        };
        let mut backend = SvgBackend::new(30.0, 30.0);
        artist.render(&tr, &mut backend);
        let svg = backend.render();
        // One two-point segment; the trailing single point is not a polyline.
        assert_eq!(svg.matches("<polyline").count(), 1);
    }
}
