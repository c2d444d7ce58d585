//! Histogram plot with optional stacking and a ratio panel.

use std::path::Path;

use log::{debug, info, warn};

use crate::error::{PlotError, PlotResult};
use crate::plot_classes::base::{AxesSettings, PlotBase, PlotOptions};
use crate::plot_classes::{decorate, object_from_kind, LegendCollector};
use crate::plot_objects::{Bins, Draw, ErrorBar, Hist, HistBuilder, HistType, PlotObject};
use crate::plotting::{
    Bounds, Color, DashPattern, IntoPlotData, LegendEntry, LegendHandle, LineStyle, Marker,
};
use crate::utils::DataLimits;

/// Main panel position when a ratio panel is drawn below it.
const MAIN_PANEL: Bounds = Bounds {
    x_min: 0.125,
    x_max: 0.9,
    y_min: 0.35,
    y_max: 0.88,
};

const RATIO_PANEL: Bounds = Bounds {
    x_min: 0.125,
    x_max: 0.9,
    y_min: 0.11,
    y_max: 0.33,
};

/// A plot of histograms, optionally mixed with other plot objects.
///
/// Histograms added through [`HistPlot::add_hist`] pick up the plot-level
/// type, normalisation and alpha. With `stack` every histogram is drawn on
/// top of the previous ones; with `ratio` a lower panel shows each
/// histogram divided by the first.
pub struct HistPlot {
    base: PlotBase,
    settings: AxesSettings,
    objects: Vec<PlotObject>,
    hist_type: HistType,
    normalize: bool,
    alpha: f64,
    stack: bool,
    ratio: bool,
}

impl HistPlot {
    pub fn new(options: PlotOptions, settings: AxesSettings) -> PlotResult<Self> {
        Ok(HistPlot {
            base: PlotBase::new(options)?,
            settings,
            objects: Vec::new(),
            hist_type: HistType::default(),
            normalize: false,
            alpha: 1.0,
            stack: false,
            ratio: false,
        })
    }

    pub fn hist_type(mut self, hist_type: HistType) -> Self {
        self.hist_type = hist_type;
        self
    }

    pub fn normalize(mut self, on: bool) -> Self {
        self.normalize = on;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn stack(mut self, on: bool) -> Self {
        self.stack = on;
        self
    }

    pub fn ratio(mut self, on: bool) -> Self {
        self.ratio = on;
        self
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

    /// A histogram builder seeded with the plot-level defaults.
    pub fn hist_builder(&self, data: impl IntoPlotData, bins: impl Into<Bins>) -> HistBuilder {
        Hist::builder(data, bins)
            .hist_type(self.hist_type)
            .normalize(self.normalize)
            .alpha(self.alpha)
    }

    /// Histogram `data` with the plot-level defaults.
    pub fn add_hist(
        &mut self,
        data: impl IntoPlotData,
        bins: impl Into<Bins>,
        label: &str,
    ) -> PlotResult<&mut Self> {
        let mut builder = self.hist_builder(data, bins);
        if !label.is_empty() {
            builder = builder.label(label);
        }
        let hist = builder.build()?;
        self.objects.push(hist.into());
        Ok(self)
    }

    /// Add a prebuilt object as is.
    pub fn add(&mut self, object: impl Into<PlotObject>) -> &mut Self {
        self.objects.push(object.into());
        self
    }

    /// Add an `(x, y)` series; see [`BasicPlot::add_data`](crate::BasicPlot::add_data).
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

    pub fn remove_data(&mut self, label: &str) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.label() != Some(label));
        let removed = before - self.objects.len();
        if removed == 0 {
            warn!("no data labelled '{}' to remove", label);
        }
        removed
    }

    fn hists(&self) -> impl Iterator<Item = &Hist> {
        self.objects.iter().filter_map(PlotObject::as_hist)
    }

    fn check_stackable(&self) -> PlotResult<()> {
        let mut hists = self.hists();
        if let Some(first) = hists.next() {
            if hists.any(|h| !first.same_binning(h)) {
                return Err(PlotError::InvalidData(
                    "stacked histograms must share bin edges".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Rebuild the figure. Returns the legend entries of the main panel.
    pub fn plot(&mut self) -> PlotResult<Vec<LegendEntry>> {
        if self.stack {
            self.check_stackable()?;
        }
        debug!(
            "drawing {} objects (stack: {}, ratio: {})",
            self.objects.len(),
            self.stack,
            self.ratio
        );

        let ax = self.base.setup_fig();
        if self.ratio {
            ax.position = MAIN_PANEL;
        }

        let mut legend = LegendCollector::default();
        let mut limits: Vec<Option<DataLimits>> = Vec::with_capacity(self.objects.len());
        let mut hist_colors: Vec<Color> = Vec::new();
        let mut baseline: Option<Vec<f64>> = None;
        for object in &self.objects {
            let handle = match object.as_hist() {
                Some(hist) if self.stack => {
                    let handle = hist.draw_stacked(ax, baseline.as_deref());
                    limits.push(hist.limits_stacked(baseline.as_deref()));
                    baseline = Some(hist.stacked_tops(baseline.as_deref()));
                    handle
                }
                _ => {
                    limits.push(object.data_limits());
                    object.draw(ax)
                }
            };
            if object.as_hist().is_some() {
                hist_colors.push(handle_color(&handle));
            }
            legend.push(object, handle);
        }
        let entries = legend.into_entries();
        let limits = DataLimits::merge_all(limits);

        let main_settings = if self.ratio {
            AxesSettings {
                xlabel: String::new(),
                ..self.settings.clone()
            }
        } else {
            self.settings.clone()
        };
        let (xlim, _) = decorate(&mut self.base, 0, &main_settings, entries.clone(), limits.as_ref());

        if self.ratio {
            self.draw_ratio_panel(xlim, &hist_colors)?;
        }
        Ok(entries)
    }

    fn draw_ratio_panel(&mut self, xlim: Option<(f64, f64)>, colors: &[Color]) -> PlotResult<()> {
        let hists: Vec<&Hist> = self.hists().collect();
        let mut ratios = Vec::new();
        match hists.split_first() {
            Some((first, rest)) if !rest.is_empty() => {
                for (hist, color) in rest.iter().zip(colors.iter().skip(1)) {
                    ratios.push((hist.divide(first)?, *color));
                }
            }
            _ => warn!("ratio panel needs at least two histograms; drawing an empty panel"),
        }

        let mut objects: Vec<PlotObject> = Vec::with_capacity(ratios.len());
        for (ratio, color) in ratios {
            let err = ratio.err().map(<[f64]>::to_vec);
            let mut xs = Vec::new();
            let mut ys = Vec::new();
            let mut es = Vec::new();
            for (i, (x, y)) in ratio.centres().into_iter().zip(ratio.counts()).enumerate() {
                if y.is_finite() {
                    xs.push(x);
                    ys.push(*y);
                    es.push(err.as_ref().map_or(0.0, |e| e[i]));
                }
            }
            if xs.is_empty() {
                continue;
            }
            objects.push(ErrorBar::new(xs, ys, es)?.color(color).marker(Marker::Circle).into());
        }

        let rc_text = self.base.rc().text_color;
        let line_width = self.base.rc().line_width;
        let ax = self.base.figure_mut().add_axes(RATIO_PANEL);
        let mut limits: Vec<Option<DataLimits>> = Vec::with_capacity(objects.len() + 1);
        for object in &objects {
            object.draw(ax);
            limits.push(object.data_limits());
        }
        ax.axhline(
            1.0,
            LineStyle::new()
                .color(rc_text)
                .width(line_width * 0.75)
                .dash(DashPattern::Dashed),
        );
        limits.push(xlim.map(|(lo, _)| DataLimits::point(lo, 1.0)));

        let index = self.base.figure().axes().len() - 1;
        let settings = AxesSettings {
            xlabel: self.settings.xlabel.clone(),
            ylabel: "Ratio".to_string(),
            xlim,
            ylim: None,
            xticks: self.settings.xticks.clone(),
            yticks: None,
            xlog: self.settings.xlog,
            ylog: false,
            text_info: Vec::new(),
            legend: None,
            grid: self.settings.grid.clone(),
        };
        decorate(
            &mut self.base,
            index,
            &settings,
            Vec::new(),
            DataLimits::merge_all(limits).as_ref(),
        );
        Ok(())
    }

    pub fn render_svg(&mut self) -> PlotResult<String> {
        self.plot()?;
        Ok(self.base.render_svg())
    }

    /// Plot and write the figure; `.svg` or `.png`.
    pub fn export(&mut self, path: impl AsRef<Path>) -> PlotResult<()> {
        self.plot()?;
        self.base.export(path.as_ref())?;
        info!("wrote {}", path.as_ref().display());
        Ok(())
    }
}

/// Opaque colour of a legend sample.
fn handle_color(handle: &LegendHandle) -> Color {
    handle
        .fill
        .as_ref()
        .and_then(|f| f.color)
        .or_else(|| handle.line.as_ref().map(|l| l.color))
        .or_else(|| handle.marker.as_ref().map(|m| m.fill))
        .unwrap_or(Color::BLACK)
        .with_alpha(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot_objects::PointsLines;
    use crate::plotting::Artist;

    fn hist_plot() -> HistPlot {
        HistPlot::new(PlotOptions::default(), AxesSettings::default()).unwrap()
    }

    #[test]
    fn test_plot_defaults_applied() {
        let mut p = hist_plot().hist_type(HistType::Step).normalize(true).alpha(0.5);
        p.add_hist([0.1, 0.2, 0.8], 2usize, "a").unwrap();
        let hist = p.objects()[0].as_hist().unwrap();
        assert_eq!(hist.hist_type(), HistType::Step);
        assert!((hist.counts().iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stack_requires_same_binning() {
        let mut p = hist_plot().stack(true);
        p.add_hist([0.1, 0.9], [0.0, 0.5, 1.0], "a").unwrap();
        p.add_hist([0.1, 0.9], [0.0, 0.25, 1.0], "b").unwrap();
        assert!(matches!(p.plot(), Err(PlotError::InvalidData(_))));
    }

    #[test]
    fn test_stacked_limits_include_sum() {
        let mut p = hist_plot().stack(true);
        p.add_hist([0.1, 0.2, 0.9], [0.0, 0.5, 1.0], "a").unwrap();
        p.add_hist([0.1, 0.3, 0.4], [0.0, 0.5, 1.0], "b").unwrap();
        let entries = p.plot().unwrap();
        assert_eq!(entries.len(), 2);
        let (_, hi) = p.base().figure().axes()[0].ylim().unwrap();
        // tallest stacked bin is 2 + 3 = 5, padded by 4% of the span
        assert!((hi - 5.2).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_panel() {
        let mut p = hist_plot().ratio(true);
        p.add_hist([0.1, 0.2, 0.7], [0.0, 0.5, 1.0], "ref").unwrap();
        p.add_hist([0.1, 0.6, 0.7, 0.8], [0.0, 0.5, 1.0], "alt").unwrap();
        p.plot().unwrap();
        let axes = p.base().figure().axes();
        assert_eq!(axes.len(), 2);
        assert_eq!(axes[0].position, MAIN_PANEL);
        assert_eq!(axes[0].xlim(), axes[1].xlim());

        let bars: Vec<&Artist> = axes[1]
            .artists()
            .iter()
            .filter(|a| matches!(a, Artist::ErrorBars { .. }))
            .collect();
        assert_eq!(bars.len(), 1);
        if let Artist::ErrorBars { y, .. } = bars[0] {
            assert_eq!(y, &vec![0.5, 3.0]);
        }
        assert!(axes[1].legend_entries().is_none());
    }

    #[test]
    fn test_ratio_skips_empty_reference_bins() {
        let mut p = hist_plot().ratio(true);
        p.add_hist([0.1], [0.0, 0.5, 1.0], "ref").unwrap();
        p.add_hist([0.1, 0.9], [0.0, 0.5, 1.0], "alt").unwrap();
        p.plot().unwrap();
        let axes = p.base().figure().axes();
        let ys: Vec<f64> = axes[1]
            .artists()
            .iter()
            .filter_map(|a| match a {
                Artist::ErrorBars { y, .. } => Some(y.clone()),
                _ => None,
            })
            .flatten()
            .collect();
        assert_eq!(ys, vec![1.0]);
    }

    #[test]
    fn test_mixed_objects_and_render() {
        let mut p = hist_plot();
        p.add_hist([1.0, 2.0, 2.5], 3usize, "data").unwrap();
        p.add(PointsLines::new([1.0, 3.0], [1.0, 1.0]).unwrap().label("model"));
        let svg = p.render_svg().unwrap();
        assert!(svg.contains(">data</text>"));
        assert!(svg.contains(">model</text>"));
    }
}
