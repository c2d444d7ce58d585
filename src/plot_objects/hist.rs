//! One-dimensional histograms with uncertainty bands.
//!
//! A [`Hist`] is binned once, when its [`HistBuilder`] is built: counts,
//! edges and the optional per-bin uncertainty are final after that, and
//! drawing never changes them.
//!
//! Two input modes are supported:
//!
//! * **raw**: `data` holds individual samples, optionally weighted; the
//!   histogram is filled from them. Computed uncertainties are
//!   `sqrt(sum of squared weights)` per bin.
//! * **pre-counted**: `data` already holds one value per bin, and explicit
//!   edges are mandatory. `weights`, if given, are the per-bin sums of
//!   squared weights.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::error::{PlotError, PlotResult};
use crate::plot_objects::Draw;
use crate::plotting::{
    Artist, Axes, Color, DashPattern, FillStyle, Hatch, IntoPlotData, LegendHandle, LineStyle,
    Marker, MarkerStyle,
};
use crate::utils::DataLimits;

/// Hatch used for the ATLAS uncertainty band.
const ATLAS_HATCH: &str = "///////////";
const ATLAS_HATCH_WIDTH: f64 = 0.5;
/// Opacity of the `fillbetween` uncertainty band relative to the histogram.
const BAND_ALPHA: f64 = 0.3;
const ERRORBAR_CAP: f64 = 3.0;

// ============================================================================
// Options
// ============================================================================

/// Binning request: a number of equal-width bins or explicit edges.
#[derive(Debug, Clone, PartialEq)]
pub enum Bins {
    Count(usize),
    Edges(Vec<f64>),
}

impl From<usize> for Bins {
    fn from(n: usize) -> Self {
        Bins::Count(n)
    }
}

impl From<Vec<f64>> for Bins {
    fn from(edges: Vec<f64>) -> Self {
        Bins::Edges(edges)
    }
}

impl From<&[f64]> for Bins {
    fn from(edges: &[f64]) -> Self {
        Bins::Edges(edges.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Bins {
    fn from(edges: [f64; N]) -> Self {
        Bins::Edges(edges.to_vec())
    }
}

/// How the bin contents are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistType {
    /// Filled rectangle per bin
    Bar,
    /// Outline only
    Step,
    /// Filled outline
    #[default]
    StepFilled,
    /// Markers at the bin centres
    Point,
}

impl FromStr for HistType {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(HistType::Bar),
            "step" => Ok(HistType::Step),
            "stepfilled" => Ok(HistType::StepFilled),
            "point" | "points" => Ok(HistType::Point),
            other => Err(PlotError::InvalidConfig(format!(
                "unknown histogram type '{}' (expected bar, step, stepfilled or point)",
                other
            ))),
        }
    }
}

impl fmt::Display for HistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HistType::Bar => "bar",
            HistType::Step => "step",
            HistType::StepFilled => "stepfilled",
            HistType::Point => "point",
        };
        f.write_str(name)
    }
}

/// How the per-bin uncertainty is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrStyle {
    /// Hatched, unfilled band tracing `count ± err`
    #[default]
    Atlas,
    /// Translucent band in the histogram's colour
    FillBetween,
    /// Error bars at the bin centres
    ErrorBar,
}

impl ErrStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "atlas" => Some(ErrStyle::Atlas),
            "fillbetween" | "fill_between" => Some(ErrStyle::FillBetween),
            "errorbar" | "errorbars" => Some(ErrStyle::ErrorBar),
            _ => None,
        }
    }
}

/// Source of the per-bin uncertainty.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ErrorSpec {
    #[default]
    None,
    /// Derived from the counts and weights
    Computed,
    /// Supplied per bin by the caller
    Explicit(Vec<f64>),
}

// ============================================================================
// Builder
// ============================================================================

/// Collects histogram inputs and appearance; [`HistBuilder::build`] bins.
#[derive(Debug, Clone, PartialEq)]
pub struct HistBuilder {
    data: Vec<f64>,
    bins: Bins,
    range: Option<(f64, f64)>,
    weights: Option<Vec<f64>>,
    precounted: bool,
    errors: ErrorSpec,
    normalize: bool,
    hist_type: HistType,
    err_style: Option<ErrStyle>,
    color: Option<Color>,
    alpha: f64,
    label: Option<String>,
}

impl HistBuilder {
    /// Value range for equal-width bins; ignored with explicit edges.
    pub fn range(mut self, lo: f64, hi: f64) -> Self {
        self.range = Some((lo, hi));
        self
    }

    pub fn weights(mut self, weights: impl IntoPlotData) -> Self {
        self.weights = Some(weights.into_plot_data());
        self
    }

    /// Treat `data` as per-bin contents rather than samples.
    pub fn precounted(mut self) -> Self {
        self.precounted = true;
        self
    }

    /// Compute per-bin uncertainties from the data.
    pub fn errors(mut self, on: bool) -> Self {
        self.errors = if on { ErrorSpec::Computed } else { ErrorSpec::None };
        self
    }

    /// Use caller-supplied per-bin uncertainties.
    pub fn err(mut self, err: impl IntoPlotData) -> Self {
        self.errors = ErrorSpec::Explicit(err.into_plot_data());
        self
    }

    /// Scale contents so they sum to one.
    pub fn normalize(mut self, on: bool) -> Self {
        self.normalize = on;
        self
    }

    pub fn hist_type(mut self, hist_type: HistType) -> Self {
        self.hist_type = hist_type;
        self
    }

    pub fn err_style(mut self, style: ErrStyle) -> Self {
        self.err_style = Some(style);
        self
    }

    /// Select the uncertainty style by name. Unknown names disable
    /// uncertainty rendering with a warning.
    pub fn err_style_name(mut self, name: &str) -> Self {
        self.err_style = ErrStyle::from_name(name);
        if self.err_style.is_none() {
            warn!(
                "unknown error style '{}' (expected ATLAS, fillbetween or errorbar); errors will not be drawn",
                name
            );
        }
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Bin the data and finalise uncertainties and normalisation.
    pub fn build(self) -> PlotResult<Hist> {
        if !self.precounted {
            if let Some(ref w) = self.weights {
                if w.len() != self.data.len() {
                    return Err(PlotError::InvalidData(format!(
                        "{} weights for {} samples",
                        w.len(),
                        self.data.len()
                    )));
                }
            }
        }

        let edges = match self.bins {
            Bins::Count(_) if self.precounted => {
                return Err(PlotError::InvalidConfig(
                    "pre-counted data needs explicit bin edges, not a bin count".to_string(),
                ))
            }
            Bins::Count(0) => {
                return Err(PlotError::InvalidConfig(
                    "bin count must be at least 1".to_string(),
                ))
            }
            Bins::Count(n) => {
                let (lo, hi) = match self.range {
                    Some(range) => validate_range(range)?,
                    None => sample_range(&self.data),
                };
                equal_width_edges(n, lo, hi)
            }
            Bins::Edges(ref edges) => {
                validate_edges(edges)?;
                edges.clone()
            }
        };
        let nbins = edges.len() - 1;

        let (mut counts, sumw2, total) = if self.precounted {
            if self.data.len() != nbins {
                return Err(PlotError::InvalidData(format!(
                    "pre-counted data has {} values for {} bins",
                    self.data.len(),
                    nbins
                )));
            }
            if let Some(ref w) = self.weights {
                if w.len() != nbins {
                    return Err(PlotError::InvalidData(format!(
                        "pre-counted weights have {} values for {} bins",
                        w.len(),
                        nbins
                    )));
                }
            }
            let total: f64 = self.data.iter().sum();
            (self.data.clone(), self.weights.clone(), total)
        } else {
            let (counts, sumw2, total) = fill_bins(&self.data, self.weights.as_deref(), &edges);
            (counts, Some(sumw2), total)
        };

        let mut err = match self.errors {
            ErrorSpec::None => None,
            ErrorSpec::Computed => Some(match sumw2 {
                Some(sumw2) => sumw2.iter().map(|w| w.sqrt()).collect(),
                // Pre-counted without weights: squared counts.
                None => counts.iter().map(|c| c * c).collect(),
            }),
            ErrorSpec::Explicit(ref err) => {
                if err.len() != nbins {
                    return Err(PlotError::InvalidData(format!(
                        "{} uncertainties for {} bins",
                        err.len(),
                        nbins
                    )));
                }
                Some(err.clone())
            }
        };

        if self.normalize {
            if total != 0.0 && total.is_finite() {
                counts.iter_mut().for_each(|c| *c /= total);
                if let Some(ref mut err) = err {
                    err.iter_mut().for_each(|e| *e /= total);
                }
            } else {
                warn!("histogram total is {}; leaving it unnormalised", total);
            }
        }

        debug!(
            "binned histogram {:?}: {} bins over [{}, {}]",
            self.label.as_deref().unwrap_or(""),
            nbins,
            edges[0],
            edges[nbins]
        );

        Ok(Hist {
            counts,
            edges,
            err,
            hist_type: self.hist_type,
            err_style: self.err_style,
            color: self.color,
            alpha: self.alpha,
            label: self.label,
        })
    }
}

fn validate_range((lo, hi): (f64, f64)) -> PlotResult<(f64, f64)> {
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(PlotError::InvalidConfig(format!(
            "invalid histogram range ({}, {})",
            lo, hi
        )));
    }
    Ok((lo, hi))
}

fn validate_edges(edges: &[f64]) -> PlotResult<()> {
    if edges.len() < 2 {
        return Err(PlotError::InvalidConfig(format!(
            "need at least two bin edges, got {}",
            edges.len()
        )));
    }
    if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[1] <= w[0]) {
        return Err(PlotError::InvalidConfig(
            "bin edges must be finite and strictly increasing".to_string(),
        ));
    }
    Ok(())
}

/// Min and max of the finite samples, widened when degenerate.
fn sample_range(data: &[f64]) -> (f64, f64) {
    let finite = data.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn equal_width_edges(n: usize, lo: f64, hi: f64) -> Vec<f64> {
    let width = (hi - lo) / n as f64;
    let mut edges: Vec<f64> = (0..=n).map(|i| lo + width * i as f64).collect();
    edges[n] = hi;
    edges
}

/// Per-bin sums of weights and of squared weights, plus the total weight
/// of every finite sample (out-of-range ones included). Bins are half-open
/// except the last, which includes its right edge.
fn fill_bins(
    data: &[f64],
    weights: Option<&[f64]>,
    edges: &[f64],
) -> (Vec<f64>, Vec<f64>, f64) {
    let nbins = edges.len() - 1;
    let (first, last) = (edges[0], edges[nbins]);
    let mut counts = vec![0.0; nbins];
    let mut sumw2 = vec![0.0; nbins];
    let mut total = 0.0;
    for (i, &v) in data.iter().enumerate() {
        let w = weights.map_or(1.0, |w| w[i]);
        if !v.is_finite() || !w.is_finite() {
            continue;
        }
        total += w;
        if v < first || v > last {
            continue;
        }
        let bin = if v == last {
            nbins - 1
        } else {
            edges.partition_point(|e| *e <= v) - 1
        };
        counts[bin] += w;
        sumw2[bin] += w * w;
    }
    (counts, sumw2, total)
}

// ============================================================================
// Histogram
// ============================================================================

/// A binned histogram ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Hist {
    counts: Vec<f64>,
    edges: Vec<f64>,
    err: Option<Vec<f64>>,
    hist_type: HistType,
    err_style: Option<ErrStyle>,
    color: Option<Color>,
    alpha: f64,
    label: Option<String>,
}

impl Hist {
    /// Start a histogram of `data` with default appearance.
    pub fn builder(data: impl IntoPlotData, bins: impl Into<Bins>) -> HistBuilder {
        HistBuilder {
            data: data.into_plot_data(),
            bins: bins.into(),
            range: None,
            weights: None,
            precounted: false,
            errors: ErrorSpec::None,
            normalize: false,
            hist_type: HistType::default(),
            err_style: Some(ErrStyle::default()),
            color: None,
            alpha: 1.0,
            label: None,
        }
    }

    /// Histogram of raw samples with default options.
    pub fn new(data: impl IntoPlotData, bins: impl Into<Bins>) -> PlotResult<Self> {
        Self::builder(data, bins).build()
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Per-bin uncertainty.
    ///
    /// For pre-counted data without weights the computed uncertainty is the
    /// *square* of each count, not its square root.
    pub fn err(&self) -> Option<&[f64]> {
        self.err.as_deref()
    }

    pub fn nbins(&self) -> usize {
        self.counts.len()
    }

    pub fn hist_type(&self) -> HistType {
        self.hist_type
    }

    pub fn err_style(&self) -> Option<ErrStyle> {
        self.err_style
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn centres(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Whether `other` has the same bin edges.
    pub fn same_binning(&self, other: &Hist) -> bool {
        self.edges.len() == other.edges.len()
            && self
                .edges
                .iter()
                .zip(&other.edges)
                .all(|(a, b)| (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0))
    }

    /// Content-weighted mean of the bin centres.
    pub fn mean(&self) -> Option<f64> {
        let total: f64 = self.counts.iter().sum();
        if total == 0.0 || !total.is_finite() {
            return None;
        }
        let sum: f64 = self.centres().iter().zip(&self.counts).map(|(x, c)| x * c).sum();
        Some(sum / total)
    }

    /// Content-weighted standard deviation of the bin centres.
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let total: f64 = self.counts.iter().sum();
        let var: f64 = self
            .centres()
            .iter()
            .zip(&self.counts)
            .map(|(x, c)| c * (x - mean).powi(2))
            .sum::<f64>()
            / total;
        Some(var.max(0.0).sqrt())
    }

    /// Bin-by-bin ratio `self / denominator`, with relative uncertainties
    /// added in quadrature. Empty denominator bins give `NaN`.
    pub fn divide(&self, denominator: &Hist) -> PlotResult<Hist> {
        if !self.same_binning(denominator) {
            return Err(PlotError::InvalidData(
                "histograms must share bin edges to be divided".to_string(),
            ));
        }
        let ratio: Vec<f64> = self
            .counts
            .iter()
            .zip(&denominator.counts)
            .map(|(a, b)| if *b == 0.0 { f64::NAN } else { a / b })
            .collect();

        let err = match (&self.err, &denominator.err) {
            (None, None) => None,
            (num_err, den_err) => Some(
                (0..self.nbins())
                    .map(|i| {
                        let rel = |err: &Option<Vec<f64>>, counts: &[f64]| match err {
                            Some(e) if counts[i] != 0.0 => e[i] / counts[i],
                            _ => 0.0,
                        };
                        let rel_num = rel(num_err, &self.counts);
                        let rel_den = rel(den_err, &denominator.counts);
                        (ratio[i] * (rel_num.powi(2) + rel_den.powi(2)).sqrt()).abs()
                    })
                    .collect(),
            ),
        };

        Ok(Hist {
            counts: ratio,
            edges: self.edges.clone(),
            err,
            ..self.clone()
        })
    }

    /// Mark the mean and `mean ± sigma·std` with vertical lines.
    pub fn display_stats(&self, ax: &mut Axes, sigma: f64) {
        let (Some(mean), Some(std)) = (self.mean(), self.std_dev()) else {
            warn!("histogram is empty; no statistics to display");
            return;
        };
        let color = self.color.unwrap_or(Color::BLACK);
        let width = ax.rc().line_width;
        ax.axvline(mean, LineStyle::new().color(color).width(width));
        let spread = LineStyle::new()
            .color(color)
            .width(width * 0.75)
            .dash(DashPattern::Dashed);
        ax.axvline(mean - sigma * std, spread.clone());
        ax.axvline(mean + sigma * std, spread);
    }

    /// Vertices of the ATLAS uncertainty band, `4 · nbins` of them: along
    /// the top `(left, y+e), (right, y+e)` per bin left to right, then along
    /// the bottom `(right, y-e), (left, y-e)` per bin right to left.
    pub fn atlas_band_vertices(&self) -> Option<Vec<(f64, f64)>> {
        let err = self.err.as_ref()?;
        Some(band_vertices(&self.edges, &self.counts, err))
    }

    /// Bin contents stacked on `baseline`.
    pub fn stacked_tops(&self, baseline: Option<&[f64]>) -> Vec<f64> {
        match baseline {
            Some(base) => self.counts.iter().zip(base).map(|(c, b)| c + b).collect(),
            None => self.counts.clone(),
        }
    }

    /// Draw on top of `baseline` (for stacking; `None` draws from zero).
    pub fn draw_stacked(&self, ax: &mut Axes, baseline: Option<&[f64]>) -> LegendHandle {
        let color = self.color.unwrap_or_else(|| ax.next_color());
        let rc = ax.rc();
        let line_width = rc.line_width;
        let marker_size = rc.marker_size;
        let zeros = vec![0.0; self.nbins()];
        let base = baseline.unwrap_or(&zeros);
        let tops = self.stacked_tops(Some(base));
        let fill = FillStyle::new(color).opacity(self.alpha);
        let outline = LineStyle::new()
            .color(color.with_alpha(color.a * self.alpha))
            .width(line_width);

        let mut handle = match self.hist_type {
            HistType::Bar => {
                for i in 0..self.nbins() {
                    let (l, r) = (self.edges[i], self.edges[i + 1]);
                    ax.add_polygon(
                        vec![(l, base[i]), (r, base[i]), (r, tops[i]), (l, tops[i])],
                        fill.clone(),
                    );
                }
                LegendHandle::fill(fill)
            }
            HistType::StepFilled => {
                let mut vertices = step_outline(&self.edges, &tops);
                for i in (0..self.nbins()).rev() {
                    vertices.push((self.edges[i + 1], base[i]));
                    vertices.push((self.edges[i], base[i]));
                }
                ax.add_polygon(vertices, fill.clone());
                LegendHandle::fill(fill)
            }
            HistType::Step => {
                let mut vertices = vec![(self.edges[0], base[0])];
                vertices.extend(step_outline(&self.edges, &tops));
                vertices.push((self.edges[self.nbins()], base[self.nbins() - 1]));
                let (xs, ys) = vertices.into_iter().unzip();
                ax.add_line(xs, ys, Some(outline.clone()), None);
                LegendHandle::line(outline)
            }
            HistType::Point => {
                let marker = MarkerStyle::new(Marker::Circle, color)
                    .size(marker_size)
                    .alpha(color.a * self.alpha);
                ax.add_line(self.centres(), tops.clone(), None, Some(marker.clone()));
                LegendHandle::default().with_marker(Some(marker))
            }
        };

        if let (Some(err), Some(style)) = (&self.err, self.err_style) {
            match style {
                ErrStyle::Atlas => {
                    let mut hatch = Hatch::from_spec(ATLAS_HATCH)
                        .map(|h| h.color(Color::BLACK));
                    if let Some(ref mut h) = hatch {
                        h.line_width = ATLAS_HATCH_WIDTH;
                    }
                    let mut band = FillStyle::none();
                    band.hatch = hatch;
                    ax.add_polygon(band_vertices(&self.edges, &tops, err), band);
                }
                ErrStyle::FillBetween => {
                    let band = FillStyle::new(color).opacity(self.alpha * BAND_ALPHA);
                    ax.add_polygon(band_vertices(&self.edges, &tops, err), band);
                }
                ErrStyle::ErrorBar => {
                    let style = LineStyle::new().color(color).width(line_width);
                    ax.add_artist(Artist::ErrorBars {
                        x: self.centres(),
                        y: tops,
                        xerr: None,
                        yerr: Some(err.clone()),
                        style: style.clone(),
                        cap: ERRORBAR_CAP,
                        marker: None,
                    });
                    handle = handle.with_error_bar(style);
                }
            }
        }
        handle
    }

    /// Data limits when stacked on `baseline`, including the uncertainty
    /// and the zero line the bins rise from.
    pub fn limits_stacked(&self, baseline: Option<&[f64]>) -> Option<DataLimits> {
        if self.nbins() == 0 {
            return None;
        }
        let tops = self.stacked_tops(baseline);
        let mut xs = Vec::with_capacity(3 * self.nbins());
        let mut ys = Vec::with_capacity(3 * self.nbins());
        for (i, top) in tops.iter().enumerate() {
            let e = self.err.as_ref().map_or(0.0, |e| e[i].abs());
            xs.extend([self.edges[i], self.edges[i + 1], self.edges[i]]);
            ys.extend([top + e, top - e, baseline.map_or(0.0, |b| b[i])]);
        }
        DataLimits::from_xy(&xs, &ys)
    }
}

/// `(left, y), (right, y)` per bin, left to right.
fn step_outline(edges: &[f64], tops: &[f64]) -> Vec<(f64, f64)> {
    tops.iter()
        .enumerate()
        .flat_map(|(i, &y)| [(edges[i], y), (edges[i + 1], y)])
        .collect()
}

fn band_vertices(edges: &[f64], tops: &[f64], err: &[f64]) -> Vec<(f64, f64)> {
    let upper: Vec<f64> = tops.iter().zip(err).map(|(y, e)| y + e).collect();
    let mut vertices = step_outline(edges, &upper);
    for i in (0..tops.len()).rev() {
        let lower = tops[i] - err[i];
        vertices.push((edges[i + 1], lower));
        vertices.push((edges[i], lower));
    }
    vertices
}

impl Draw for Hist {
    fn draw(&self, ax: &mut Axes) -> LegendHandle {
        self.draw_stacked(ax, None)
    }

    fn data_limits(&self) -> Option<DataLimits> {
        self.limits_stacked(None)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bin_count_and_totals() {
        let data = vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 10.0];
        let h = Hist::new(data.clone(), 5usize).unwrap();
        assert_eq!(h.edges().len(), 6);
        assert_eq!(h.counts().iter().sum::<f64>(), data.len() as f64);

        let weights = vec![2.0; data.len()];
        let w = Hist::builder(data, 5usize).weights(weights).build().unwrap();
        assert_eq!(w.counts().iter().sum::<f64>(), 20.0);
    }

    #[test]
    fn test_last_bin_is_closed() {
        let h = Hist::new([0.0, 1.0, 2.0], [0.0, 1.0, 2.0]).unwrap();
        assert_eq!(h.counts(), &[1.0, 2.0]);
    }

    #[test]
    fn test_outside_and_non_finite_samples_skipped() {
        let h = Hist::builder([-1.0, 0.5, f64::NAN, 5.0], 2usize)
            .range(0.0, 2.0)
            .build()
            .unwrap();
        assert_eq!(h.counts(), &[1.0, 0.0]);
    }

    #[test]
    fn test_degenerate_and_empty_ranges() {
        let h = Hist::new([3.0, 3.0], 2usize).unwrap();
        assert_eq!(h.edges(), &[2.5, 3.0, 3.5]);
        let empty = Hist::new(Vec::<f64>::new(), 4usize).unwrap();
        assert_eq!(empty.edges()[0], 0.0);
        assert_eq!(empty.edges()[4], 1.0);
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let h = Hist::builder([0.1, 0.2, 0.7, 0.9, 0.95], 4usize)
            .normalize(true)
            .build()
            .unwrap();
        assert!(approx(h.counts().iter().sum(), 1.0));
    }

    #[test]
    fn test_normalized_ignores_non_finite_samples_and_weights() {
        let h = Hist::builder([0.25, 0.75, f64::NAN], 2usize)
            .normalize(true)
            .build()
            .unwrap();
        assert!(approx(h.counts().iter().sum(), 1.0));

        let w = Hist::builder([0.25, 0.75, 0.5], 2usize)
            .weights([1.0, 1.0, f64::NAN])
            .normalize(true)
            .build()
            .unwrap();
        assert_eq!(w.counts(), &[0.5, 0.5]);
    }

    #[test]
    fn test_normalized_total_keeps_out_of_range_samples() {
        let h = Hist::builder([0.25, 0.75, 5.0], 2usize)
            .range(0.0, 1.0)
            .normalize(true)
            .build()
            .unwrap();
        assert!(approx(h.counts().iter().sum(), 2.0 / 3.0));
    }

    #[test]
    fn test_poisson_errors_from_weights() {
        let h = Hist::builder([0.5, 0.5, 1.5], [0.0, 1.0, 2.0])
            .weights([3.0, 4.0, 1.0])
            .errors(true)
            .build()
            .unwrap();
        assert_eq!(h.counts(), &[7.0, 1.0]);
        assert_eq!(h.err().unwrap(), &[5.0, 1.0]);
    }

    #[test]
    fn test_precounted_requires_edges() {
        let err = Hist::builder([1.0, 2.0], 2usize).precounted().build().unwrap_err();
        assert!(matches!(err, PlotError::InvalidConfig(_)));

        let err = Hist::builder([1.0, 2.0, 3.0], [0.0, 1.0, 2.0])
            .precounted()
            .build()
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
    }

    #[test]
    fn test_precounted_error_fallback_squares_counts() {
        let h = Hist::builder([2.0, 3.0], [0.0, 1.0, 2.0])
            .precounted()
            .errors(true)
            .build()
            .unwrap();
        assert_eq!(h.err().unwrap(), &[4.0, 9.0]);

        let w = Hist::builder([2.0, 3.0], [0.0, 1.0, 2.0])
            .precounted()
            .weights([4.0, 9.0])
            .errors(true)
            .build()
            .unwrap();
        assert_eq!(w.err().unwrap(), &[2.0, 3.0]);
    }

    #[test]
    fn test_invalid_binning() {
        assert!(Hist::new([1.0], 0usize).is_err());
        assert!(Hist::new([1.0], [0.0]).is_err());
        assert!(Hist::new([1.0], [0.0, 2.0, 1.0]).is_err());
        assert!(Hist::builder([1.0], 3usize).range(2.0, 2.0).build().is_err());
        assert!(Hist::builder([1.0, 2.0], 2usize).weights([1.0]).build().is_err());
        assert!(Hist::builder([1.0, 2.0], 2usize).err([0.1]).build().is_err());
    }

    #[test]
    fn test_hist_type_names() {
        assert_eq!("StepFilled".parse::<HistType>().unwrap(), HistType::StepFilled);
        assert!(matches!(
            "barstacked".parse::<HistType>(),
            Err(PlotError::InvalidConfig(_))
        ));
        assert_eq!(ErrStyle::from_name("ATLAS"), Some(ErrStyle::Atlas));
    }

    #[test]
    fn test_unknown_err_style_disables_errors() {
        let h = Hist::builder([0.5, 1.5], [0.0, 1.0, 2.0])
            .errors(true)
            .err_style_name("whiskers")
            .build()
            .unwrap();
        assert_eq!(h.err_style(), None);
        let mut ax = Axes::new();
        h.draw(&mut ax);
        assert_eq!(ax.artists().len(), 1);
    }

    #[test]
    fn test_atlas_band_vertex_order() {
        let h = Hist::builder([1.0, 2.0, 4.0], [0.0, 1.0, 2.0, 3.0])
            .precounted()
            .err([0.5, 1.0, 0.5])
            .build()
            .unwrap();
        let v = h.atlas_band_vertices().unwrap();
        assert_eq!(v.len(), 4 * h.nbins());
        assert_eq!(&v[..2], &[(0.0, 1.5), (1.0, 1.5)]);
        assert_eq!(&v[4..6], &[(2.0, 4.5), (3.0, 4.5)]);
        assert_eq!(&v[6..8], &[(3.0, 3.5), (2.0, 3.5)]);
        assert_eq!(v[11], (0.0, 0.5));
    }

    #[test]
    fn test_atlas_band_is_hatched() {
        let h = Hist::builder([1.0, 2.0], [0.0, 1.0, 2.0])
            .precounted()
            .errors(true)
            .build()
            .unwrap();
        let mut ax = Axes::new();
        h.draw(&mut ax);
        match &ax.artists()[1] {
            Artist::Polygon { fill, .. } => {
                assert!(fill.color.is_none());
                assert_eq!(fill.hatch.as_ref().unwrap().line_width, ATLAS_HATCH_WIDTH);
            }
            other => panic!("expected the band polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_statistics() {
        let h = Hist::builder([1.0, 1.0], [0.0, 2.0, 4.0])
            .precounted()
            .build()
            .unwrap();
        assert!(approx(h.mean().unwrap(), 2.0));
        assert!(approx(h.std_dev().unwrap(), 1.0));

        let mut ax = Axes::new();
        h.display_stats(&mut ax, 2.0);
        assert!(matches!(ax.artists()[2], Artist::VLine { x, .. } if approx(x, 4.0)));
    }

    #[test]
    fn test_divide() {
        let num = Hist::builder([2.0, 3.0], [0.0, 1.0, 2.0]).precounted().build().unwrap();
        let den = Hist::builder([4.0, 0.0], [0.0, 1.0, 2.0]).precounted().build().unwrap();
        let ratio = num.divide(&den).unwrap();
        assert_eq!(ratio.counts()[0], 0.5);
        assert!(ratio.counts()[1].is_nan());

        let other = Hist::builder([1.0], [0.0, 2.0]).precounted().build().unwrap();
        assert!(num.divide(&other).is_err());
    }

    #[test]
    fn test_stacked_limits() {
        let h = Hist::builder([1.0, 2.0], [0.0, 1.0, 2.0]).precounted().build().unwrap();
        let l = h.limits_stacked(Some(&[3.0, 3.0])).unwrap();
        assert_eq!((l.y_min, l.y_max), (3.0, 5.0));
        assert_eq!((l.x_min, l.x_max), (0.0, 2.0));
    }
}
