//! Numeric helpers and decoration presets shared by the plot classes.

use log::warn;

use crate::error::{PlotError, PlotResult};
use crate::plotting::{
    Axes, DashPattern, GridConfig, GridWhich, Legend, LegendEntry, LegendLoc, TickDirection,
};

// ============================================================================
// Validation & rounding
// ============================================================================

/// Check that two parallel coordinate arrays have the same length.
pub fn validate_xy(x: &[f64], y: &[f64]) -> PlotResult<()> {
    if x.len() != y.len() {
        return Err(PlotError::InvalidData(format!(
            "x and y must have the same length, got {} and {}",
            x.len(),
            y.len()
        )));
    }
    Ok(())
}

/// Direction for [`magnitude_round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Ceil,
    Floor,
}

/// Round a positive value to a power of ten, up or down.
///
/// Returns `None` for non-positive or non-finite input.
pub fn magnitude_round(x: f64, rounding: Rounding) -> Option<f64> {
    if !x.is_finite() || x <= 0.0 {
        return None;
    }
    let exponent = match rounding {
        Rounding::Ceil => x.log10().ceil(),
        Rounding::Floor => x.log10().floor(),
    };
    Some(10f64.powf(exponent))
}

// ============================================================================
// Data limits
// ============================================================================

/// Extent of one or more datasets, tracking the smallest positive value on
/// each axis so log axes can ignore non-positive data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataLimits {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_min_positive: Option<f64>,
    pub y_min_positive: Option<f64>,
}

impl DataLimits {
    /// Limits of the finite `(x, y)` pairs, or `None` if there are none.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Option<Self> {
        let mut limits: Option<DataLimits> = None;
        for (&a, &b) in x.iter().zip(y) {
            if !a.is_finite() || !b.is_finite() {
                continue;
            }
            let point = DataLimits::point(a, b);
            match limits {
                Some(ref mut acc) => acc.merge(&point),
                None => limits = Some(point),
            }
        }
        limits
    }

    pub fn point(x: f64, y: f64) -> Self {
        DataLimits {
            x_min: x,
            x_max: x,
            y_min: y,
            y_max: y,
            x_min_positive: (x > 0.0).then_some(x),
            y_min_positive: (y > 0.0).then_some(y),
        }
    }

    pub fn merge(&mut self, other: &DataLimits) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
        self.x_min_positive = min_option(self.x_min_positive, other.x_min_positive);
        self.y_min_positive = min_option(self.y_min_positive, other.y_min_positive);
    }

    /// Union of several optional limits.
    pub fn merge_all<I>(limits: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<DataLimits>>,
    {
        limits.into_iter().flatten().reduce(|mut acc, l| {
            acc.merge(&l);
            acc
        })
    }
}

fn min_option(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Fraction of the data span added on each side of a linear axis.
pub const LINEAR_PAD: f64 = 0.04;

/// Axis limits for the data range `[lo, hi]`.
///
/// Linear axes pad by 4% of the span on each side. Log axes round the low
/// end down and the high end up to powers of ten; a non-positive `lo` is
/// replaced by `min_positive`. Returns `None` when a log axis has no
/// positive data.
pub fn compute_auto_limits(
    lo: f64,
    hi: f64,
    min_positive: Option<f64>,
    log: bool,
) -> Option<(f64, f64)> {
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    if log {
        let lo = if lo > 0.0 { Some(lo) } else { min_positive };
        let low = magnitude_round(lo?, Rounding::Floor)?;
        let high = magnitude_round(hi, Rounding::Ceil)?;
        Some((low, high))
    } else {
        let pad = (hi - lo) * LINEAR_PAD;
        Some((lo - pad, hi + pad))
    }
}

// ============================================================================
// Legend
// ============================================================================

/// Legend decoration: a named preset or a fully custom configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum LegendSettings {
    Preset(String),
    Custom(Legend),
}

impl Default for LegendSettings {
    fn default() -> Self {
        LegendSettings::Preset("default inside".to_string())
    }
}

impl From<&str> for LegendSettings {
    fn from(name: &str) -> Self {
        LegendSettings::Preset(name.to_string())
    }
}

/// Lowercase, with `_` and `-` read as spaces.
fn normalize_preset(name: &str) -> String {
    name.trim().to_lowercase().replace(['_', '-'], " ")
}

/// Resolve a legend preset name.
pub fn legend_preset(name: &str) -> Option<Legend> {
    let legend = match normalize_preset(name).as_str() {
        "default inside" => Legend::new().loc(LegendLoc::Best).frame(false),
        "default outside" => Legend::new()
            .loc(LegendLoc::UpperLeft)
            .anchor(1.0, 1.0)
            .frame(false),
        "fancy inside" => Legend::new().loc(LegendLoc::Best).fancy(),
        "fancy outside" => Legend::new()
            .loc(LegendLoc::UpperLeft)
            .anchor(1.0, 1.0)
            .fancy(),
        _ => return None,
    };
    Some(legend)
}

/// Attach a legend with `entries` to `ax`.
///
/// Preset legends use `font_size`; custom legends keep their own text style.
/// An unknown preset logs a warning and leaves the axes without a legend.
/// Returns whether a legend was attached.
pub fn decorate_legend(
    ax: &mut Axes,
    entries: Vec<LegendEntry>,
    settings: &LegendSettings,
    font_size: f64,
) -> bool {
    let legend = match settings {
        LegendSettings::Preset(name) => match legend_preset(name) {
            Some(legend) => {
                let style = legend
                    .text_style
                    .clone()
                    .font_family(ax.rc().font_family.clone())
                    .color(ax.rc().text_color);
                legend.text_style(style).font_size(font_size)
            }
            None => {
                warn!(
                    "'{}' is not a legend preset (expected default/fancy inside/outside); skipping legend",
                    name
                );
                return false;
            }
        },
        LegendSettings::Custom(legend) => legend.clone(),
    };
    ax.legend(entries, legend);
    true
}

// ============================================================================
// Ticks & grid
// ============================================================================

/// Minor ticks on, optional explicit major ticks, inward ticks mirrored on
/// the top and right spines.
pub fn tick_adjuster(ax: &mut Axes, xticks: Option<&[f64]>, yticks: Option<&[f64]>) {
    ax.minorticks_on();
    if let Some(ticks) = xticks.filter(|t| !t.is_empty()) {
        ax.set_xticks(ticks.to_vec());
    }
    if let Some(ticks) = yticks.filter(|t| !t.is_empty()) {
        ax.set_yticks(ticks.to_vec());
    }
    ax.tick_params(TickDirection::In, true);
}

/// Grid decoration: a named preset or a fully custom configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSettings {
    Preset(String),
    Custom(GridConfig),
}

impl From<&str> for GridSettings {
    fn from(name: &str) -> Self {
        GridSettings::Preset(name.to_string())
    }
}

/// Resolve a grid preset name, coloured from `base`.
pub fn grid_preset(name: &str, base: GridConfig) -> Option<GridConfig> {
    let grid = match normalize_preset(name).as_str() {
        "default" | "solid" => base,
        "dashed" => base.dash(DashPattern::Dashed),
        "dotted" => base.dash(DashPattern::Dotted),
        "dash dot" | "dashdot" => base.dash(DashPattern::DashDot),
        "minor" => base.which(GridWhich::Both),
        _ => return None,
    };
    Some(grid)
}

/// Attach grid lines to `ax`. An unknown preset logs a warning and leaves
/// the axes without a grid. Returns whether a grid was attached.
pub fn grid_adjuster(ax: &mut Axes, settings: &GridSettings) -> bool {
    let config = match settings {
        GridSettings::Preset(name) => {
            let rc = ax.rc();
            let mut base = GridConfig::new().color(rc.grid_color);
            base.major_style.width = rc.grid_linewidth;
            match grid_preset(name, base) {
                Some(config) => config,
                None => {
                    warn!(
                        "'{}' is not a grid preset (expected default, dashed, dotted, dash-dot or minor); skipping grid",
                        name
                    );
                    return false;
                }
            }
        }
        GridSettings::Custom(config) => config.clone(),
    };
    ax.grid(config);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::{LegendHandle, LineStyle};

    #[test]
    fn test_validate_xy() {
        assert!(validate_xy(&[1.0, 2.0], &[3.0, 4.0]).is_ok());
        let err = validate_xy(&[1.0, 2.0], &[3.0]).unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
    }

    #[test]
    fn test_magnitude_round() {
        assert_eq!(magnitude_round(350.0, Rounding::Ceil), Some(1000.0));
        assert_eq!(magnitude_round(350.0, Rounding::Floor), Some(100.0));
        assert_eq!(magnitude_round(0.0, Rounding::Floor), None);
        assert_eq!(magnitude_round(-5.0, Rounding::Ceil), None);
    }

    #[test]
    fn test_linear_auto_limits_pad_four_percent() {
        let (lo, hi) = compute_auto_limits(0.0, 50.0, None, false).unwrap();
        assert!((lo + 2.0).abs() < 1e-12);
        assert!((hi - 52.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_auto_limits_use_min_positive() {
        assert_eq!(compute_auto_limits(3.0, 420.0, Some(3.0), true), Some((1.0, 1000.0)));
        let (lo, hi) = compute_auto_limits(-1.0, 420.0, Some(0.02), true).unwrap();
        assert!((lo - 0.01).abs() < 1e-15);
        assert!((hi - 1000.0).abs() < 1e-9);
        assert_eq!(compute_auto_limits(-1.0, 0.0, None, true), None);
    }

    #[test]
    fn test_data_limits_merge() {
        let a = DataLimits::from_xy(&[-1.0, 2.0], &[0.0, 5.0]).unwrap();
        let b = DataLimits::from_xy(&[0.5, f64::NAN], &[0.1, 1.0]).unwrap();
        let merged = DataLimits::merge_all([Some(a), None, Some(b)]).unwrap();
        assert_eq!((merged.x_min, merged.x_max), (-1.0, 2.0));
        assert_eq!(merged.x_min_positive, Some(0.5));
        assert_eq!(merged.y_min_positive, Some(0.1));
        assert!(DataLimits::from_xy(&[], &[]).is_none());
    }

    #[test]
    fn test_legend_presets_normalize_names() {
        let outside = legend_preset("Default_Outside").unwrap();
        assert_eq!(outside.anchor, Some((1.0, 1.0)));
        assert!(!outside.frame);
        let fancy = legend_preset("fancy-inside").unwrap();
        assert!(fancy.frame && fancy.rounded && fancy.shadow);
        assert!(legend_preset("sideways").is_none());
    }

    #[test]
    fn test_unknown_presets_leave_decoration_absent() {
        let mut ax = Axes::new();
        let entries = vec![LegendEntry::new("a", LegendHandle::line(LineStyle::default()))];
        assert!(!decorate_legend(&mut ax, entries, &"nowhere".into(), 10.0));
        assert!(ax.legend_entries().is_none());
        assert!(!grid_adjuster(&mut ax, &"plaid".into()));
        assert!(ax.grid_config().is_none());
    }

    #[test]
    fn test_grid_presets() {
        let mut ax = Axes::new();
        assert!(grid_adjuster(&mut ax, &"dash-dot".into()));
        assert_eq!(ax.grid_config().unwrap().major_style.dash, DashPattern::DashDot);
        assert!(grid_adjuster(&mut ax, &"minor".into()));
        assert!(ax.grid_config().unwrap().draws_minor());
    }

    #[test]
    fn test_tick_adjuster() {
        let mut ax = Axes::new();
        tick_adjuster(&mut ax, Some(&[0.0, 1.0]), None);
        assert!(ax.x_axis.show_minor && ax.y_axis.show_minor);
        assert_eq!(ax.x_axis.tick_positions, Some(vec![0.0, 1.0]));
        assert_eq!(ax.y_axis.tick_positions, None);
        assert_eq!(ax.x_axis.ticks.direction, TickDirection::In);
    }
}
