//! Points and/or lines through `(x, y)` data.

use crate::error::{PlotError, PlotResult};
use crate::plot_objects::Draw;
use crate::plotting::{
    Axes, Color, DashPattern, IntoPlotData, LegendHandle, LineStyle, Marker, MarkerStyle,
};
use crate::utils::{validate_xy, DataLimits};

/// A series drawn as a polyline, as markers, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsLines {
    x: Vec<f64>,
    y: Vec<f64>,
    label: Option<String>,
    /// `None` takes the next colour of the axes' cycle
    color: Option<Color>,
    /// `None` draws no connecting line
    dash: Option<DashPattern>,
    /// `None` uses `lines.linewidth`
    line_width: Option<f64>,
    marker: Option<Marker>,
    /// `None` uses `lines.markersize`
    marker_size: Option<f64>,
    alpha: f64,
}

impl PointsLines {
    /// A solid line through the points.
    pub fn new(x: impl IntoPlotData, y: impl IntoPlotData) -> PlotResult<Self> {
        let x = x.into_plot_data();
        let y = y.into_plot_data();
        validate_xy(&x, &y)?;
        Ok(PointsLines {
            x,
            y,
            label: None,
            color: None,
            dash: Some(DashPattern::Solid),
            line_width: None,
            marker: None,
            marker_size: None,
            alpha: 1.0,
        })
    }

    /// Circle markers without a connecting line.
    pub fn points(x: impl IntoPlotData, y: impl IntoPlotData) -> PlotResult<Self> {
        Ok(Self::new(x, y)?.no_line().marker(Marker::Circle))
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn linestyle(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn no_line(mut self) -> Self {
        self.dash = None;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn marker_size(mut self, size: f64) -> Self {
        self.marker_size = Some(size);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Apply a matplotlib-style format string: `[color][linestyle][marker]`,
    /// e.g. `"r--o"`, `"k:"`, `"bs"`. A marker without a linestyle draws
    /// markers only.
    pub fn format(mut self, fmt: &str) -> PlotResult<Self> {
        let mut rest = fmt.trim();

        if let Some(c) = rest.chars().next().filter(|c| "bgrcmykw".contains(*c)) {
            if let Some(color) = Color::parse(&c.to_string()) {
                self.color = Some(color);
            }
            rest = &rest[c.len_utf8()..];
        }

        let dash = DashPattern::from_format_str(rest);
        rest = &rest[DashPattern::format_token_len(rest)..];

        let mut chars = rest.chars();
        let marker = match chars.next() {
            Some(c) => Some(Marker::from_format_char(c).ok_or_else(|| {
                PlotError::InvalidConfig(format!("unrecognised marker '{}' in format '{}'", c, fmt))
            })?),
            None => None,
        };
        if let Some(extra) = chars.next() {
            return Err(PlotError::InvalidConfig(format!(
                "unexpected '{}' in format '{}'",
                extra, fmt
            )));
        }

        self.dash = match (dash, marker) {
            (Some(dash), _) => Some(dash),
            (None, Some(_)) => None,
            (None, None) => self.dash,
        };
        if marker.is_some() {
            self.marker = marker;
        }
        Ok(self)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

impl Draw for PointsLines {
    fn draw(&self, ax: &mut Axes) -> LegendHandle {
        let color = self.color.unwrap_or_else(|| ax.next_color());
        let rc = ax.rc();
        let line = self.dash.clone().map(|dash| {
            LineStyle::new()
                .color(color.with_alpha(color.a * self.alpha))
                .width(self.line_width.unwrap_or(rc.line_width))
                .dash(dash)
        });
        let marker = self.marker.map(|m| {
            MarkerStyle::new(m, color)
                .size(self.marker_size.unwrap_or(rc.marker_size))
                .alpha(color.a * self.alpha)
        });

        ax.add_line(self.x.clone(), self.y.clone(), line.clone(), marker.clone());
        LegendHandle {
            line,
            marker,
            ..Default::default()
        }
    }

    fn data_limits(&self) -> Option<DataLimits> {
        DataLimits::from_xy(&self.x, &self.y)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::Artist;

    #[test]
    fn test_mismatched_lengths() {
        let err = PointsLines::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
    }

    #[test]
    fn test_format_string() {
        let series = PointsLines::new([0.0, 1.0], [1.0, 2.0])
            .unwrap()
            .format("r--o")
            .unwrap();
        assert_eq!(series.color, Some(Color::RED));
        assert_eq!(series.dash, Some(DashPattern::Dashed));
        assert_eq!(series.marker, Some(Marker::Circle));

        let markers_only = PointsLines::new([0.0], [1.0]).unwrap().format("ks").unwrap();
        assert_eq!(markers_only.dash, None);
        assert_eq!(markers_only.marker, Some(Marker::Square));

        assert!(PointsLines::new([0.0], [1.0]).unwrap().format("r-q").is_err());
    }

    #[test]
    fn test_draw_uses_color_cycle() {
        let mut ax = Axes::new();
        let first = PointsLines::new([0.0, 1.0], [0.0, 1.0]).unwrap().draw(&mut ax);
        let second = PointsLines::points([0.0, 1.0], [1.0, 0.0]).unwrap().draw(&mut ax);
        assert_ne!(first.line.unwrap().color, second.marker.clone().unwrap().fill);
        assert!(second.line.is_none());
        assert_eq!(ax.artists().len(), 2);
        assert!(matches!(ax.artists()[1], Artist::Line { style: None, .. }));
    }

    #[test]
    fn test_data_limits() {
        let series = PointsLines::new([1.0, -2.0, 3.0], [0.5, 4.0, f64::NAN]).unwrap();
        let limits = series.data_limits().unwrap();
        assert_eq!((limits.x_min, limits.x_max), (-2.0, 1.0));
        assert_eq!((limits.y_min, limits.y_max), (0.5, 4.0));
    }
}
