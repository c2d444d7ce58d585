//! Resolved per-figure style settings ("rc params").
//!
//! Style sheets and colour themes are mappings from matplotlib rc keys to
//! JSON values; [`RcParams::set`] applies one such entry.

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PlotError, PlotResult};
use crate::plotting::element::{TickDirection, TickParams};
use crate::plotting::style::{Color, DEFAULT_CYCLE};

/// Points per inch; figure sizes are given in inches, SVG user units are points.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Resolved style settings applied to a figure and its axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RcParams {
    /// Figure size in inches (width, height)
    pub figure_size: (f64, f64),
    pub figure_facecolor: Color,
    pub axes_facecolor: Color,
    pub axes_edgecolor: Color,
    pub axes_linewidth: f64,
    pub label_color: Color,
    pub text_color: Color,
    pub font_family: String,
    pub font_size: f64,
    pub title_size: f64,
    pub label_size: f64,
    pub legend_size: f64,
    pub xtick: TickParams,
    pub ytick: TickParams,
    pub line_width: f64,
    pub marker_size: f64,
    pub grid_color: Color,
    pub grid_linewidth: f64,
    pub color_cycle: Vec<Color>,
}

impl Default for RcParams {
    fn default() -> Self {
        RcParams {
            figure_size: (6.4, 4.8),
            figure_facecolor: Color::WHITE,
            axes_facecolor: Color::WHITE,
            axes_edgecolor: Color::BLACK,
            axes_linewidth: 0.8,
            label_color: Color::BLACK,
            text_color: Color::BLACK,
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
            title_size: 12.0,
            label_size: 10.0,
            legend_size: 10.0,
            xtick: TickParams::default(),
            ytick: TickParams::default(),
            line_width: 1.5,
            marker_size: 6.0,
            grid_color: Color::rgb(0xb0, 0xb0, 0xb0),
            grid_linewidth: 0.8,
            color_cycle: DEFAULT_CYCLE.to_vec(),
        }
    }
}

impl RcParams {
    /// Figure size in points.
    pub fn figure_points(&self) -> (f64, f64) {
        (
            self.figure_size.0 * POINTS_PER_INCH,
            self.figure_size.1 * POINTS_PER_INCH,
        )
    }

    /// Colour `index` of the property cycle.
    pub fn cycle_color(&self, index: usize) -> Color {
        if self.color_cycle.is_empty() {
            return crate::plotting::style::cycle_color(index);
        }
        self.color_cycle[index % self.color_cycle.len()]
    }

    /// Apply a mapping of rc keys to values, in iteration order.
    pub fn apply<'a, I>(&mut self, entries: I) -> PlotResult<()>
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        for (key, value) in entries {
            if !self.set(key, value)? {
                debug!("ignoring unsupported rc key '{}'", key);
            }
        }
        Ok(())
    }

    /// Apply one rc entry. Returns `Ok(false)` for keys this renderer does not use.
    pub fn set(&mut self, key: &str, value: &Value) -> PlotResult<bool> {
        match key {
            "figure.figsize" => self.figure_size = parse(key, value)?,
            "figure.facecolor" | "savefig.facecolor" => self.figure_facecolor = parse(key, value)?,
            "axes.facecolor" => self.axes_facecolor = parse(key, value)?,
            "axes.edgecolor" => self.axes_edgecolor = parse(key, value)?,
            "axes.linewidth" => self.axes_linewidth = parse(key, value)?,
            "axes.labelcolor" => self.label_color = parse(key, value)?,
            "text.color" => self.text_color = parse(key, value)?,
            "font.family" => self.font_family = parse_family(key, value)?,
            "font.size" => self.font_size = parse(key, value)?,
            "axes.titlesize" => self.title_size = parse(key, value)?,
            "axes.labelsize" => self.label_size = parse(key, value)?,
            "legend.fontsize" => self.legend_size = parse(key, value)?,
            "lines.linewidth" => self.line_width = parse(key, value)?,
            "lines.markersize" => self.marker_size = parse(key, value)?,
            "grid.color" => self.grid_color = parse(key, value)?,
            "grid.linewidth" => self.grid_linewidth = parse(key, value)?,
            "axes.prop_cycle" => self.color_cycle = parse(key, value)?,
            "xtick.top" => self.xtick.mirror = parse(key, value)?,
            "ytick.right" => self.ytick.mirror = parse(key, value)?,
            _ => {
                if let Some((axis, param)) = key.split_once('.') {
                    let ticks = match axis {
                        "xtick" => &mut self.xtick,
                        "ytick" => &mut self.ytick,
                        _ => return Ok(false),
                    };
                    return set_tick_param(ticks, key, param, value);
                }
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn set_tick_param(ticks: &mut TickParams, key: &str, param: &str, value: &Value) -> PlotResult<bool> {
    match param {
        "direction" => ticks.direction = parse::<TickDirection>(key, value)?,
        "labelsize" => ticks.label_size = parse(key, value)?,
        "color" => ticks.color = parse(key, value)?,
        "major.size" => ticks.major_size = parse(key, value)?,
        "minor.size" => ticks.minor_size = parse(key, value)?,
        "major.width" => ticks.major_width = parse(key, value)?,
        "minor.width" => ticks.minor_width = parse(key, value)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse<T: DeserializeOwned>(key: &str, value: &Value) -> PlotResult<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| PlotError::InvalidConfig(format!("rc key '{}': {}", key, e)))
}

/// `font.family` may be a single name or a preference list; the first entry wins.
fn parse_family(key: &str, value: &Value) -> PlotResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| PlotError::InvalidConfig(format!("rc key '{}': empty font list", key))),
        other => Err(PlotError::InvalidConfig(format!(
            "rc key '{}': expected a font name, got {}",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_known_keys() {
        let mut rc = RcParams::default();
        assert!(rc.set("figure.figsize", &json!([4, 3])).unwrap());
        assert!(rc.set("xtick.direction", &json!("in")).unwrap());
        assert!(rc.set("ytick.major.size", &json!(6)).unwrap());
        assert!(rc.set("axes.facecolor", &json!("#222222")).unwrap());
        assert!(rc.set("font.family", &json!(["Times New Roman", "serif"])).unwrap());
        assert_eq!(rc.figure_size, (4.0, 3.0));
        assert_eq!(rc.xtick.direction, TickDirection::In);
        assert_eq!(rc.ytick.major_size, 6.0);
        assert_eq!(rc.axes_facecolor, Color::rgb(0x22, 0x22, 0x22));
        assert_eq!(rc.font_family, "Times New Roman");
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut rc = RcParams::default();
        assert!(!rc.set("text.usetex", &json!(true)).unwrap());
        assert!(!rc.set("ztick.major.size", &json!(1)).unwrap());
        assert_eq!(rc, RcParams::default());
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let mut rc = RcParams::default();
        assert!(matches!(
            rc.set("axes.labelsize", &json!("huge")),
            Err(PlotError::InvalidConfig(_))
        ));
    }
}
