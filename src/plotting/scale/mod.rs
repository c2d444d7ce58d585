//! Axis scaling and transformation.

mod linear;
mod log;

pub use self::linear::LinearScale;
pub use self::log::LogScale;

use crate::error::PlotResult;

/// Which transformation an axis uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
}

impl ScaleKind {
    /// Build a fresh scale of this kind with a placeholder range.
    pub fn build(&self) -> Box<dyn Scale> {
        match self {
            ScaleKind::Linear => Box::new(LinearScale::auto()),
            ScaleKind::Log => Box::new(LogScale::auto()),
        }
    }
}

/// Trait for axis scale transformations.
pub trait Scale: std::fmt::Debug {
    /// Transform a data value to normalized coordinates (0.0 - 1.0).
    /// Values the scale cannot represent map to NaN.
    fn transform(&self, value: f64) -> f64;

    /// Inverse transform from normalized coordinates to data value.
    fn inverse(&self, normalized: f64) -> f64;

    /// Set the data range for this scale.
    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()>;

    /// Get the current data range.
    fn range(&self) -> (f64, f64);

    /// Generate nice major tick values for this scale.
    fn ticks(&self, num_ticks: usize) -> Vec<f64>;

    /// Minor tick values given the major ticks in use.
    fn minor_ticks(&self, major: &[f64]) -> Vec<f64>;

    /// Format a major tick value as a label.
    fn format_tick(&self, value: f64) -> String {
        format_number(value)
    }

    fn kind(&self) -> ScaleKind;

    /// Clone the scale into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Scale>;
}

impl Clone for Box<dyn Scale> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Compute "nice" numbers for axis ticks.
pub fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10_f64.powf(exponent);

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * 10_f64.powf(exponent)
}

/// Generate nice tick positions for a given range.
pub fn nice_ticks(min: f64, max: f64, num_ticks: usize) -> Vec<f64> {
    if num_ticks < 2 || !(max > min) {
        return vec![(min + max) / 2.0];
    }

    let range = nice_number(max - min, false);
    let tick_spacing = nice_number(range / (num_ticks - 1) as f64, true);
    let nice_min = (min / tick_spacing).floor() * tick_spacing;
    let nice_max = (max / tick_spacing).ceil() * tick_spacing;

    let mut ticks = Vec::new();
    let mut i = 0usize;
    loop {
        // Multiply instead of accumulating to keep 0.1-steps exact enough for labels
        let tick = nice_min + i as f64 * tick_spacing;
        if tick > nice_max + tick_spacing * 0.5 {
            break;
        }
        if tick >= min - tick_spacing * 0.001 && tick <= max + tick_spacing * 0.001 {
            ticks.push(snap_zero(tick, tick_spacing));
        }
        i += 1;
    }

    ticks
}

fn snap_zero(value: f64, spacing: f64) -> f64 {
    if value.abs() < spacing * 1e-9 {
        0.0
    } else {
        value
    }
}

/// Auto-format a tick value based on its magnitude.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e5 || value.abs() < 1e-3 {
        format!("{:.1e}", value)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_ticks_cover_range() {
        let ticks = nice_ticks(0.0, 10.0, 5);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(10.0));
        assert!(ticks.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1.5e6), "1.5e6");
    }
}
