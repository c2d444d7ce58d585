//! Plot classes: a figure, a list of plot objects and their decoration.

pub mod base;
pub mod basic;
pub mod hist;

pub use base::{AxesSettings, PlotBase, PlotOptions, TextInfo};
pub use basic::BasicPlot;
pub use hist::HistPlot;

use log::{debug, warn};

use crate::error::PlotResult;
use crate::plot_objects::{Draw, PlotObject, PointsLines, Step};
use crate::plotting::{Axes, LegendEntry, LegendHandle, Marker};
use crate::utils::{compute_auto_limits, decorate_legend, grid_adjuster, tick_adjuster, DataLimits};

/// Build a plot object from a kind name: `points`, `line`, `pointslines`
/// or `step`. Unknown kinds log a warning and give `Ok(None)`.
pub(crate) fn object_from_kind(
    x: Vec<f64>,
    y: Vec<f64>,
    label: &str,
    kind: &str,
) -> PlotResult<Option<PlotObject>> {
    let object: PlotObject = match kind.trim().to_lowercase().as_str() {
        "points" => with_label(PointsLines::points(x, y)?, label).into(),
        "line" => with_label(PointsLines::new(x, y)?, label).into(),
        "pointslines" => with_label(PointsLines::new(x, y)?.marker(Marker::Circle), label).into(),
        "step" => {
            let step = Step::new(x, y)?;
            let step = if label.is_empty() { step } else { step.label(label) };
            step.into()
        }
        other => {
            warn!(
                "'{}' is not a data kind (expected points, line, pointslines or step); skipping",
                other
            );
            return Ok(None);
        }
    };
    Ok(Some(object))
}

fn with_label(series: PointsLines, label: &str) -> PointsLines {
    if label.is_empty() {
        series
    } else {
        series.label(label)
    }
}

/// Collects legend entries for labelled objects, in drawing order.
#[derive(Debug, Default)]
pub(crate) struct LegendCollector {
    entries: Vec<LegendEntry>,
}

impl LegendCollector {
    pub(crate) fn push(&mut self, object: &PlotObject, handle: LegendHandle) {
        if let Some(label) = object.label().filter(|l| !l.is_empty()) {
            self.entries.push(LegendEntry::new(label, handle));
        }
    }

    pub(crate) fn into_entries(self) -> Vec<LegendEntry> {
        self.entries
    }
}

/// Draw every object in order; returns the legend entries and merged limits.
pub(crate) fn draw_all(
    ax: &mut Axes,
    objects: &[PlotObject],
) -> (Vec<LegendEntry>, Option<DataLimits>) {
    let mut legend = LegendCollector::default();
    for object in objects {
        let handle = object.draw(ax);
        legend.push(object, handle);
    }
    let limits = DataLimits::merge_all(objects.iter().map(Draw::data_limits));
    (legend.into_entries(), limits)
}

/// Limits for both axes: explicit settings win, else derived from `limits`.
pub(crate) fn resolve_limits(
    settings: &AxesSettings,
    limits: Option<&DataLimits>,
) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
    let xlim = settings.xlim.or_else(|| {
        limits.and_then(|l| compute_auto_limits(l.x_min, l.x_max, l.x_min_positive, settings.xlog))
    });
    let ylim = settings.ylim.or_else(|| {
        limits.and_then(|l| compute_auto_limits(l.y_min, l.y_max, l.y_min_positive, settings.ylog))
    });
    debug!("axis limits: x {:?}, y {:?}", xlim, ylim);
    (xlim, ylim)
}

/// The shared decoration pass: labels, scales and limits, ticks, legend,
/// text annotations, then grid. Returns the limits applied.
pub(crate) fn decorate(
    base: &mut PlotBase,
    index: usize,
    settings: &AxesSettings,
    entries: Vec<LegendEntry>,
    limits: Option<&DataLimits>,
) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
    let (xlim, ylim) = resolve_limits(settings, limits);
    base.apply_axes_settings(index, settings, xlim, ylim);
    base.add_text(index, &settings.text_info);

    let legend_size = base.rc().legend_size;
    if let Some(ax) = base.figure_mut().axes_mut().get_mut(index) {
        tick_adjuster(ax, settings.xticks.as_deref(), settings.yticks.as_deref());
        if let Some(ref legend) = settings.legend {
            decorate_legend(ax, entries, legend, legend_size);
        }
        if let Some(ref grid) = settings.grid {
            grid_adjuster(ax, grid);
        }
    }
    (xlim, ylim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_from_kind() {
        let points = object_from_kind(vec![0.0], vec![1.0], "a", "Points").unwrap().unwrap();
        assert_eq!(points.label(), Some("a"));
        let step = object_from_kind(vec![0.0], vec![1.0], "", "step").unwrap().unwrap();
        assert_eq!(step.label(), None);
        assert!(object_from_kind(vec![0.0], vec![1.0], "a", "violin").unwrap().is_none());
        assert!(object_from_kind(vec![0.0], vec![], "a", "line").is_err());
    }

    #[test]
    fn test_unlabelled_objects_skip_legend() {
        let objects: Vec<PlotObject> = vec![
            PointsLines::new([0.0, 1.0], [0.0, 1.0]).unwrap().label("first").into(),
            PointsLines::new([0.0, 1.0], [1.0, 0.0]).unwrap().into(),
            Step::new([0.0, 1.0], [2.0, 3.0]).unwrap().label("third").into(),
        ];
        let mut ax = Axes::new();
        let (entries, limits) = draw_all(&mut ax, &objects);
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["first", "third"]);
        assert_eq!(limits.unwrap().y_max, 3.0);
    }
}
