//! Stair-step lines.

use std::str::FromStr;

use crate::error::{PlotError, PlotResult};
use crate::plot_objects::Draw;
use crate::plotting::{Axes, Color, DashPattern, IntoPlotData, LegendHandle, LineStyle};
use crate::utils::{validate_xy, DataLimits};

/// Where the vertical riser sits relative to each x value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepWhere {
    /// `y[i]` holds on `(x[i-1], x[i]]`
    #[default]
    Pre,
    /// `y[i]` holds on `[x[i], x[i+1])`
    Post,
    /// Risers halfway between neighbouring x values
    Mid,
}

impl FromStr for StepWhere {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pre" => Ok(StepWhere::Pre),
            "post" => Ok(StepWhere::Post),
            "mid" => Ok(StepWhere::Mid),
            other => Err(PlotError::InvalidConfig(format!(
                "unknown step placement '{}' (expected pre, post or mid)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    x: Vec<f64>,
    y: Vec<f64>,
    placement: StepWhere,
    label: Option<String>,
    color: Option<Color>,
    line_width: Option<f64>,
    dash: DashPattern,
}

impl Step {
    pub fn new(x: impl IntoPlotData, y: impl IntoPlotData) -> PlotResult<Self> {
        let x = x.into_plot_data();
        let y = y.into_plot_data();
        validate_xy(&x, &y)?;
        Ok(Step {
            x,
            y,
            placement: StepWhere::default(),
            label: None,
            color: None,
            line_width: None,
            dash: DashPattern::Solid,
        })
    }

    pub fn placement(mut self, placement: StepWhere) -> Self {
        self.placement = placement;
        self
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
        self.dash = dash;
        self
    }

    /// Corner points of the staircase.
    pub fn vertices(&self) -> (Vec<f64>, Vec<f64>) {
        let n = self.x.len();
        if n == 0 {
            return (Vec::new(), Vec::new());
        }
        let mut xs = Vec::with_capacity(2 * n);
        let mut ys = Vec::with_capacity(2 * n);
        xs.push(self.x[0]);
        ys.push(self.y[0]);
        for i in 1..n {
            let corners = match self.placement {
                StepWhere::Pre => [(self.x[i - 1], self.y[i]), (self.x[i], self.y[i])],
                StepWhere::Post => [(self.x[i], self.y[i - 1]), (self.x[i], self.y[i])],
                StepWhere::Mid => {
                    let riser = (self.x[i - 1] + self.x[i]) / 2.0;
                    [(riser, self.y[i - 1]), (riser, self.y[i])]
                }
            };
            for (x, y) in corners {
                xs.push(x);
                ys.push(y);
            }
        }
        if self.placement == StepWhere::Mid && n > 1 {
            xs.push(self.x[n - 1]);
            ys.push(self.y[n - 1]);
        }
        (xs, ys)
    }
}

impl Draw for Step {
    fn draw(&self, ax: &mut Axes) -> LegendHandle {
        let color = self.color.unwrap_or_else(|| ax.next_color());
        let style = LineStyle::new()
            .color(color)
            .width(self.line_width.unwrap_or(ax.rc().line_width))
            .dash(self.dash.clone());
        let (xs, ys) = self.vertices();
        ax.add_line(xs, ys, Some(style.clone()), None);
        LegendHandle::line(style)
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

    #[test]
    fn test_step_vertices() {
        let step = Step::new([0.0, 1.0, 2.0], [1.0, 2.0, 3.0]).unwrap();
        let pre = step.clone().placement(StepWhere::Pre).vertices();
        assert_eq!(pre.0, vec![0.0, 0.0, 1.0, 1.0, 2.0]);
        assert_eq!(pre.1, vec![1.0, 2.0, 2.0, 3.0, 3.0]);

        let post = step.clone().placement(StepWhere::Post).vertices();
        assert_eq!(post.0, vec![0.0, 1.0, 1.0, 2.0, 2.0]);
        assert_eq!(post.1, vec![1.0, 1.0, 2.0, 2.0, 3.0]);

        let mid = step.placement(StepWhere::Mid).vertices();
        assert_eq!(mid.0, vec![0.0, 0.5, 0.5, 1.5, 1.5, 2.0]);
        assert_eq!(mid.1, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_placement_names() {
        assert_eq!("MID".parse::<StepWhere>().unwrap(), StepWhere::Mid);
        assert!("side".parse::<StepWhere>().is_err());
    }
}
