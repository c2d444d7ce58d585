//! Base-10 logarithmic scale.

use super::{format_number, Scale, ScaleKind};
use crate::error::{PlotError, PlotResult};

/// A logarithmic (base 10) scale. Only strictly positive values are representable.
#[derive(Debug, Clone)]
pub struct LogScale {
    min: f64,
    max: f64,
}

impl LogScale {
    pub fn new(min: f64, max: f64) -> PlotResult<Self> {
        let mut scale = LogScale::auto();
        scale.set_range(min, max)?;
        Ok(scale)
    }

    pub fn auto() -> Self {
        LogScale { min: 1.0, max: 10.0 }
    }

    fn log_span(&self) -> (f64, f64) {
        (self.min.log10(), self.max.log10())
    }
}

impl Scale for LogScale {
    fn transform(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return f64::NAN;
        }
        let (lo, hi) = self.log_span();
        if hi == lo {
            return 0.5;
        }
        (value.log10() - lo) / (hi - lo)
    }

    fn inverse(&self, normalized: f64) -> f64 {
        let (lo, hi) = self.log_span();
        10_f64.powf(lo + normalized * (hi - lo))
    }

    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()> {
        if !(min > 0.0) || !max.is_finite() {
            return Err(PlotError::InvalidConfig(format!(
                "log scale needs strictly positive limits, got ({}, {})",
                min, max
            )));
        }
        if min >= max {
            self.min = min.min(max) / 10.0;
            self.max = min.max(max) * 10.0;
        } else {
            self.min = min;
            self.max = max;
        }
        Ok(())
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn ticks(&self, num_ticks: usize) -> Vec<f64> {
        let (lo, hi) = self.log_span();
        let first = (lo - 1e-9).ceil() as i32;
        let last = (hi + 1e-9).floor() as i32;

        if last - first < 1 {
            // Less than two decades visible: fall back to 1-2-5 multiples
            let mut ticks = Vec::new();
            for exp in (lo.floor() as i32)..=(hi.ceil() as i32) {
                for m in [1.0, 2.0, 5.0] {
                    let v = m * 10_f64.powi(exp);
                    if v >= self.min * (1.0 - 1e-9) && v <= self.max * (1.0 + 1e-9) {
                        ticks.push(v);
                    }
                }
            }
            return ticks;
        }

        let decades = (last - first + 1) as usize;
        let stride = decades.div_ceil(num_ticks.max(2)).max(1);
        (first..=last)
            .step_by(stride)
            .map(|exp| 10_f64.powi(exp))
            .collect()
    }

    fn minor_ticks(&self, _major: &[f64]) -> Vec<f64> {
        let (lo, hi) = self.log_span();
        let mut minor = Vec::new();
        for exp in (lo.floor() as i32)..=(hi.ceil() as i32) {
            let decade = 10_f64.powi(exp);
            for m in 2..=9 {
                let v = m as f64 * decade;
                if v >= self.min && v <= self.max {
                    minor.push(v);
                }
            }
        }
        minor
    }

    fn format_tick(&self, value: f64) -> String {
        let exp = value.log10().round();
        if (value - 10_f64.powf(exp)).abs() <= value * 1e-9 {
            format!("10{}", superscript(exp as i32))
        } else {
            format_number(value)
        }
    }

    fn kind(&self) -> ScaleKind {
        ScaleKind::Log
    }

    fn clone_box(&self) -> Box<dyn Scale> {
        Box::new(self.clone())
    }
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_ticks() {
        let s = LogScale::new(1e-2, 1e3).unwrap();
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 6);
        assert!((ticks[0] - 0.01).abs() < 1e-12);
        assert_eq!(s.format_tick(1000.0), "10³");
        assert_eq!(s.format_tick(0.01), "10⁻²");
    }

    #[test]
    fn test_non_positive_is_unrepresentable() {
        let s = LogScale::new(1.0, 100.0).unwrap();
        assert!(s.transform(0.0).is_nan());
        assert!((s.transform(10.0) - 0.5).abs() < 1e-12);
        assert!(LogScale::new(0.0, 10.0).is_err());
    }

    #[test]
    fn test_minor_ticks_per_decade() {
        let s = LogScale::new(1.0, 100.0).unwrap();
        assert_eq!(s.minor_ticks(&[]).len(), 16);
    }
}
