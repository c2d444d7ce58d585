//! A translucent band between two curves.

use crate::error::PlotResult;
use crate::plot_objects::Draw;
use crate::plotting::{Axes, Color, FillStyle, IntoPlotData, LegendHandle, LineStyle};
use crate::utils::{validate_xy, DataLimits};

/// Band between `y_low` and `y_high`, with an optional central line.
#[derive(Debug, Clone, PartialEq)]
pub struct FillBetween {
    x: Vec<f64>,
    y_low: Vec<f64>,
    y_high: Vec<f64>,
    y_mid: Option<Vec<f64>>,
    label: Option<String>,
    color: Option<Color>,
    alpha: f64,
}

impl FillBetween {
    pub fn new(
        x: impl IntoPlotData,
        y_low: impl IntoPlotData,
        y_high: impl IntoPlotData,
    ) -> PlotResult<Self> {
        let x = x.into_plot_data();
        let y_low = y_low.into_plot_data();
        let y_high = y_high.into_plot_data();
        validate_xy(&x, &y_low)?;
        validate_xy(&x, &y_high)?;
        Ok(FillBetween {
            x,
            y_low,
            y_high,
            y_mid: None,
            label: None,
            color: None,
            alpha: 0.3,
        })
    }

    /// Draw a line through the centre of the band.
    pub fn mid(mut self, y_mid: impl IntoPlotData) -> PlotResult<Self> {
        let y_mid = y_mid.into_plot_data();
        validate_xy(&self.x, &y_mid)?;
        self.y_mid = Some(y_mid);
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

    /// Opacity of the band; the central line stays opaque.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Outline of the band: along `y_high` forwards, back along `y_low`.
    fn vertices(&self) -> Vec<(f64, f64)> {
        let upper = self.x.iter().zip(&self.y_high).map(|(&x, &y)| (x, y));
        let lower = self.x.iter().zip(&self.y_low).rev().map(|(&x, &y)| (x, y));
        upper
            .chain(lower)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }
}

impl Draw for FillBetween {
    fn draw(&self, ax: &mut Axes) -> LegendHandle {
        let color = self.color.unwrap_or_else(|| ax.next_color());
        let fill = FillStyle::new(color).opacity(self.alpha);
        ax.add_polygon(self.vertices(), fill.clone());

        let mut handle = LegendHandle::fill(fill);
        if let Some(ref y_mid) = self.y_mid {
            let style = LineStyle::new().color(color).width(ax.rc().line_width);
            ax.add_line(self.x.clone(), y_mid.clone(), Some(style.clone()), None);
            handle.line = Some(style);
        }
        handle
    }

    fn data_limits(&self) -> Option<DataLimits> {
        DataLimits::merge_all([
            DataLimits::from_xy(&self.x, &self.y_low),
            DataLimits::from_xy(&self.x, &self.y_high),
        ])
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
    fn test_band_outline() {
        let band = FillBetween::new([0.0, 1.0, 2.0], [0.0, 0.5, 1.0], [2.0, 2.5, 3.0]).unwrap();
        assert_eq!(
            band.vertices(),
            vec![(0.0, 2.0), (1.0, 2.5), (2.0, 3.0), (2.0, 1.0), (1.0, 0.5), (0.0, 0.0)]
        );
        let limits = band.data_limits().unwrap();
        assert_eq!((limits.y_min, limits.y_max), (0.0, 3.0));
    }

    #[test]
    fn test_mid_line_drawn() {
        let band = FillBetween::new([0.0, 1.0], [0.0, 0.0], [1.0, 1.0])
            .unwrap()
            .mid([0.5, 0.5])
            .unwrap();
        let mut ax = Axes::new();
        let handle = band.draw(&mut ax);
        assert!(handle.fill.is_some() && handle.line.is_some());
        assert!(matches!(ax.artists()[0], Artist::Polygon { .. }));
        assert!(matches!(ax.artists()[1], Artist::Line { .. }));
        assert!(FillBetween::new([0.0], [0.0], [1.0]).unwrap().mid([1.0, 2.0]).is_err());
    }
}
