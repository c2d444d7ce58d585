//! General-purpose plot of points, lines, steps, bands and histograms.

use std::path::Path;

use log::{debug, info, warn};

use crate::error::PlotResult;
use crate::plot_classes::base::{AxesSettings, PlotBase, PlotOptions};
use crate::plot_classes::{decorate, draw_all, object_from_kind};
use crate::plot_objects::{Draw, ErrorBar, FillBetween, Hist, PlotObject, PointsLines, Step};
use crate::plotting::{IntoPlotData, LegendEntry};

/// A single-axes plot built from any mix of [`PlotObject`]s.
pub struct BasicPlot {
    base: PlotBase,
    settings: AxesSettings,
    objects: Vec<PlotObject>,
}

impl BasicPlot {
    pub fn new(options: PlotOptions, settings: AxesSettings) -> PlotResult<Self> {
        Ok(BasicPlot {
            base: PlotBase::new(options)?,
            settings,
            objects: Vec::new(),
        })
    }

    pub fn base(&self) -> &PlotBase {
        &self.base
    }

    pub fn settings(&self) -> &AxesSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut AxesSettings {
        &mut self.settings
    }

    pub fn objects(&self) -> &[PlotObject] {
        &self.objects
    }

    pub fn add(&mut self, object: impl Into<PlotObject>) -> &mut Self {
        self.objects.push(object.into());
        self
    }

    pub fn add_points_lines(&mut self, series: PointsLines) -> &mut Self {
        self.add(series)
    }

    pub fn add_error_bar(&mut self, series: ErrorBar) -> &mut Self {
        self.add(series)
    }

    pub fn add_fill_between(&mut self, band: FillBetween) -> &mut Self {
        self.add(band)
    }

    pub fn add_step(&mut self, step: Step) -> &mut Self {
        self.add(step)
    }

    pub fn add_hist(&mut self, hist: Hist) -> &mut Self {
        self.add(hist)
    }

    /// Add an `(x, y)` series drawn as `kind`: `points`, `line`,
    /// `pointslines` or `step`. An empty label keeps it out of the legend.
    /// Unknown kinds are skipped with a warning.
    pub fn add_data(
        &mut self,
        x: impl IntoPlotData,
        y: impl IntoPlotData,
        label: &str,
        kind: &str,
    ) -> PlotResult<&mut Self> {
        if let Some(object) = object_from_kind(x.into_plot_data(), y.into_plot_data(), label, kind)? {
            self.objects.push(object);
        }
        Ok(self)
    }

    /// Drop every object labelled `label`; returns how many were removed.
    pub fn remove_data(&mut self, label: &str) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.label() != Some(label));
        let removed = before - self.objects.len();
        if removed == 0 {
            warn!("no data labelled '{}' to remove", label);
        }
        removed
    }

    /// Rebuild the figure from the current objects and settings. Returns the
    /// legend entries of the labelled objects in insertion order.
    pub fn plot(&mut self) -> Vec<LegendEntry> {
        debug!("drawing {} objects", self.objects.len());
        let ax = self.base.setup_fig();
        let (entries, limits) = draw_all(ax, &self.objects);
        decorate(&mut self.base, 0, &self.settings, entries.clone(), limits.as_ref());
        entries
    }

    pub fn render_svg(&mut self) -> String {
        self.plot();
        self.base.render_svg()
    }

    /// Plot and write the figure; `.svg` or `.png`.
    pub fn export(&mut self, path: impl AsRef<Path>) -> PlotResult<()> {
        self.plot();
        self.base.export(path.as_ref())?;
        info!("wrote {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::ScaleKind;
    use crate::utils::{GridSettings, LegendSettings};

    fn plot() -> BasicPlot {
        BasicPlot::new(PlotOptions::default(), AxesSettings::default()).unwrap()
    }

    #[test]
    fn test_legend_follows_insertion_order() {
        let mut p = plot();
        p.add_data([0.0, 1.0], [1.0, 2.0], "b", "line").unwrap();
        p.add_data([0.0, 1.0], [2.0, 3.0], "", "points").unwrap();
        p.add_step(Step::new([0.0, 1.0], [0.0, 1.0]).unwrap().label("a"));
        let labels: Vec<String> = p.plot().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, ["b", "a"]);
        let ax = &p.base().figure().axes()[0];
        assert_eq!(ax.legend_entries().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_unknown_kind_skipped() {
        let mut p = plot();
        p.add_data([0.0], [0.0], "x", "bars").unwrap();
        assert!(p.objects().is_empty());
    }

    #[test]
    fn test_remove_data() {
        let mut p = plot();
        p.add_data([0.0], [0.0], "keep", "points").unwrap();
        p.add_data([0.0], [1.0], "drop", "points").unwrap();
        p.add_data([0.0], [2.0], "drop", "line").unwrap();
        assert_eq!(p.remove_data("drop"), 2);
        assert_eq!(p.remove_data("missing"), 0);
        assert_eq!(p.objects().len(), 1);
    }

    #[test]
    fn test_plot_is_idempotent() {
        let mut p = plot();
        p.add_data([0.0, 1.0], [0.0, 1.0], "a", "line").unwrap();
        p.plot();
        let artists = p.base().figure().axes()[0].artists().len();
        p.plot();
        assert_eq!(p.base().figure().axes().len(), 1);
        assert_eq!(p.base().figure().axes()[0].artists().len(), artists);
    }

    #[test]
    fn test_auto_limits_pad_four_percent() {
        let mut p = plot();
        p.add_data([0.0, 10.0], [0.0, 100.0], "a", "line").unwrap();
        p.plot();
        let ax = &p.base().figure().axes()[0];
        let (lo, hi) = ax.xlim().unwrap();
        assert!((lo + 0.4).abs() < 1e-12 && (hi - 10.4).abs() < 1e-12);
        let (lo, hi) = ax.ylim().unwrap();
        assert!((lo + 4.0).abs() < 1e-12 && (hi - 104.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_axis_rounds_to_decades() {
        let settings = AxesSettings::new().ylog(true);
        let mut p = BasicPlot::new(PlotOptions::default(), settings).unwrap();
        p.add_data([1.0, 2.0, 3.0], [0.0, 3.0, 450.0], "a", "points").unwrap();
        p.plot();
        let ax = &p.base().figure().axes()[0];
        assert_eq!(ax.yscale(), ScaleKind::Log);
        let (lo, hi) = ax.ylim().unwrap();
        assert!((lo - 1.0).abs() < 1e-9 && (hi - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_limits_win() {
        let settings = AxesSettings::new().xlim(-1.0, 1.0);
        let mut p = BasicPlot::new(PlotOptions::default(), settings).unwrap();
        p.add_data([0.0, 10.0], [0.0, 1.0], "a", "line").unwrap();
        p.plot();
        assert_eq!(p.base().figure().axes()[0].xlim(), Some((-1.0, 1.0)));
    }

    #[test]
    fn test_unknown_presets_leave_decoration_absent() {
        let settings = AxesSettings::new()
            .legend(Some(LegendSettings::from("sideways")))
            .grid(Some(GridSettings::from("plaid")));
        let mut p = BasicPlot::new(PlotOptions::default(), settings).unwrap();
        p.add_data([0.0, 1.0], [0.0, 1.0], "a", "line").unwrap();
        p.plot();
        let ax = &p.base().figure().axes()[0];
        assert!(ax.legend_entries().is_none());
        assert!(ax.grid_config().is_none());
    }

    #[test]
    fn test_grid_preset_applied() {
        let settings = AxesSettings::new().grid(Some(GridSettings::from("dashed")));
        let mut p = BasicPlot::new(PlotOptions::default(), settings).unwrap();
        p.add_data([0.0, 1.0], [0.0, 1.0], "a", "line").unwrap();
        p.plot();
        assert!(p.base().figure().axes()[0].grid_config().is_some());
    }

    #[test]
    fn test_render_svg_contains_labels() {
        let settings = AxesSettings::new().xlabel("time").ylabel("rate");
        let mut p = BasicPlot::new(PlotOptions::default(), settings).unwrap();
        p.add_data([0.0, 1.0], [0.0, 1.0], "signal", "pointslines").unwrap();
        let svg = p.render_svg();
        assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));
        assert!(svg.contains(">time</text>"));
        assert!(svg.contains(">signal</text>"));
    }
}
