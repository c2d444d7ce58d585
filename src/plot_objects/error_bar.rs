//! Markers with symmetric error bars.

use crate::error::{PlotError, PlotResult};
use crate::plot_objects::Draw;
use crate::plotting::{Artist, Axes, Color, IntoPlotData, LegendHandle, LineStyle, Marker, MarkerStyle};
use crate::utils::{validate_xy, DataLimits};

/// Default cap width in points.
const CAP_SIZE: f64 = 3.0;

/// Data points with vertical and optional horizontal uncertainties.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBar {
    x: Vec<f64>,
    y: Vec<f64>,
    yerr: Vec<f64>,
    xerr: Option<Vec<f64>>,
    label: Option<String>,
    color: Option<Color>,
    marker: Marker,
    marker_size: Option<f64>,
    cap_size: f64,
    line_width: Option<f64>,
}

impl ErrorBar {
    pub fn new(x: impl IntoPlotData, y: impl IntoPlotData, yerr: impl IntoPlotData) -> PlotResult<Self> {
        let x = x.into_plot_data();
        let y = y.into_plot_data();
        let yerr = yerr.into_plot_data();
        validate_xy(&x, &y)?;
        check_err_len("yerr", &yerr, x.len())?;
        Ok(ErrorBar {
            x,
            y,
            yerr,
            xerr: None,
            label: None,
            color: None,
            marker: Marker::Circle,
            marker_size: None,
            cap_size: CAP_SIZE,
            line_width: None,
        })
    }

    /// Add horizontal error bars.
    pub fn xerr(mut self, xerr: impl IntoPlotData) -> PlotResult<Self> {
        let xerr = xerr.into_plot_data();
        check_err_len("xerr", &xerr, self.x.len())?;
        self.xerr = Some(xerr);
        Ok(self)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn marker_size(mut self, size: f64) -> Self {
        self.marker_size = Some(size);
        self
    }

    /// Cap width in points; zero draws no caps.
    pub fn cap_size(mut self, size: f64) -> Self {
        self.cap_size = size.max(0.0);
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }
}

fn check_err_len(name: &str, err: &[f64], expected: usize) -> PlotResult<()> {
    if err.len() != expected {
        return Err(PlotError::InvalidData(format!(
            "{} has {} values for {} points",
            name,
            err.len(),
            expected
        )));
    }
    Ok(())
}

impl Draw for ErrorBar {
    fn draw(&self, ax: &mut Axes) -> LegendHandle {
        let color = self.color.unwrap_or_else(|| ax.next_color());
        let rc = ax.rc();
        let style = LineStyle::new()
            .color(color)
            .width(self.line_width.unwrap_or(rc.line_width));
        let marker = MarkerStyle::new(self.marker, color)
            .size(self.marker_size.unwrap_or(rc.marker_size));

        ax.add_artist(Artist::ErrorBars {
            x: self.x.clone(),
            y: self.y.clone(),
            xerr: self.xerr.clone(),
            yerr: Some(self.yerr.clone()),
            style: style.clone(),
            cap: self.cap_size,
            marker: Some(marker.clone()),
        });
        LegendHandle {
            marker: Some(marker),
            error_bar: Some(style),
            ..Default::default()
        }
    }

    fn data_limits(&self) -> Option<DataLimits> {
        let points = self.x.iter().zip(&self.y).enumerate().flat_map(|(i, (&x, &y))| {
            let ex = self.xerr.as_ref().map_or(0.0, |e| e[i].abs());
            let ey = self.yerr[i].abs();
            [(x - ex, y - ey), (x + ex, y + ey)]
        });
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.unzip();
        DataLimits::from_xy(&xs, &ys)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
