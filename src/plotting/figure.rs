//! Figure (canvas) implementation.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{PlotError, PlotResult};
use crate::plotting::axes::Axes;
use crate::plotting::backend::SvgBackend;
use crate::plotting::element::Bounds;
use crate::plotting::rc::RcParams;
use crate::plotting::style::Color;

/// Padding around the content when the canvas has to grow, in points.
const OVERFLOW_PAD: f64 = 7.2;

/// Options for writing a figure to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOptions {
    /// Raster resolution (PNG only)
    pub dpi: u32,
    /// Canvas colour behind everything; `None` uses the figure's face colour
    pub facecolor: Option<Color>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            dpi: 100,
            facecolor: None,
        }
    }
}

/// A figure containing one or more axes (subplots).
pub struct Figure {
    /// Figure width in points
    pub width: f64,
    /// Figure height in points
    pub height: f64,
    pub background: Color,
    axes: Vec<Axes>,
    rc: RcParams,
    pub title: Option<String>,
}

impl Figure {
    /// Create a figure sized and styled by the given rc params.
    pub fn new(rc: &RcParams) -> Self {
        let (width, height) = rc.figure_points();
        Figure {
            width,
            height,
            background: rc.figure_facecolor,
            axes: Vec::new(),
            rc: rc.clone(),
            title: None,
        }
    }

    /// Set the figure size in inches.
    pub fn size_inches(mut self, width: f64, height: f64) -> Self {
        self.width = width * crate::plotting::rc::POINTS_PER_INCH;
        self.height = height * crate::plotting::rc::POINTS_PER_INCH;
        self
    }

    pub fn suptitle(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn rc(&self) -> &RcParams {
        &self.rc
    }

    /// Add a subplot at the given position.
    /// Uses matplotlib-style indexing: (rows, cols, index) where index is 1-based.
    pub fn add_subplot(&mut self, rows: usize, cols: usize, index: usize) -> &mut Axes {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let index = index.saturating_sub(1).min(rows * cols - 1);
        let row = index / cols;
        let col = index % cols;

        // Subplot grid inside matplotlib's default figure margins
        let (left, right, bottom, top) = (0.125, 0.9, 0.11, 0.88);
        let (wspace, hspace) = (0.2, 0.2);
        let cell_w = (right - left) / (cols as f64 + wspace * (cols as f64 - 1.0));
        let cell_h = (top - bottom) / (rows as f64 + hspace * (rows as f64 - 1.0));

        let x0 = left + col as f64 * cell_w * (1.0 + wspace);
        let y1 = top - row as f64 * cell_h * (1.0 + hspace);
        self.add_axes(Bounds::new(x0, x0 + cell_w, y1 - cell_h, y1))
    }

    /// Add an axes at an explicit position (figure fractions: left, right, bottom, top).
    pub fn add_axes(&mut self, position: Bounds) -> &mut Axes {
        let mut axes = Axes::with_rc(&self.rc);
        axes.position = position;
        self.axes.push(axes);
        let last = self.axes.len() - 1;
        &mut self.axes[last]
    }

    /// Get the current axes, creating a single subplot if necessary.
    pub fn gca(&mut self) -> &mut Axes {
        if self.axes.is_empty() {
            return self.add_subplot(1, 1, 1);
        }
        let last = self.axes.len() - 1;
        &mut self.axes[last]
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    /// Render the figure to an SVG string, painting `background` behind it.
    pub fn render_with_background(&mut self, background: Color) -> String {
        let mut backend = SvgBackend::new(self.width, self.height);
        backend.set_background(background);
        let mut extent = Bounds::new(0.0, self.width, 0.0, self.height);

        if let Some(ref title) = self.title {
            let style = crate::plotting::style::TextStyle::new()
                .font_family(self.rc.font_family.clone())
                .font_size(self.rc.title_size * 1.2)
                .color(self.rc.text_color)
                .anchor(crate::plotting::style::TextAnchor::Middle);
            backend.draw_text(self.width / 2.0, style.font_size * 1.5, title, &style);
        }

        for axes in &mut self.axes {
            let axes_extent = axes.render(&mut backend, self.width, self.height);
            extent.include_bounds(&axes_extent);
        }

        if extent.x_min < 0.0
            || extent.y_min < 0.0
            || extent.x_max > self.width
            || extent.y_max > self.height
        {
            backend.grow_to_fit(extent, OVERFLOW_PAD);
        }

        backend.render()
    }

    /// Render the figure to an SVG string.
    pub fn render(&mut self) -> String {
        self.render_with_background(self.background)
    }

    /// Save the figure; the format follows the file extension (`svg` or `png`).
    pub fn savefig(&mut self, path: impl AsRef<Path>, options: &SaveOptions) -> PlotResult<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let background = options.facecolor.unwrap_or(self.background);

        match extension.as_str() {
            "svg" => {
                let svg = self.render_with_background(background);
                fs::write(path, svg)?;
            }
            #[cfg(feature = "png")]
            "png" => {
                let svg = self.render_with_background(background);
                let png = crate::plotting::backend::svg_to_png(&svg, options.dpi, background)?;
                fs::write(path, png)?;
            }
            other => {
                return Err(PlotError::UnsupportedFormat(if other.is_empty() {
                    path.display().to_string()
                } else {
                    other.to_string()
                }))
            }
        }
        info!("Saved figure to {}", path.display());
        Ok(())
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(&RcParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subplot_grid_positions() {
        let mut fig = Figure::default();
        let top = fig.add_subplot(2, 1, 1).position;
        let bottom = fig.add_subplot(2, 1, 2).position;
        assert!(top.y_min > bottom.y_max);
        assert!((top.y_max - 0.88).abs() < 1e-12);
        assert!((bottom.y_min - 0.11).abs() < 1e-12);
    }

    #[test]
    fn test_unsupported_extension() {
        let mut fig = Figure::default();
        let dir = tempfile::tempdir().unwrap();
        let err = fig
            .savefig(dir.path().join("plot.bmp"), &SaveOptions::default())
            .unwrap_err();
        assert!(matches!(err, PlotError::UnsupportedFormat(ref ext) if ext == "bmp"));
    }

    #[test]
    fn test_figure_size_in_points() {
        let fig = Figure::default().size_inches(6.0, 4.0);
        assert_eq!((fig.width, fig.height), (432.0, 288.0));
    }
}
