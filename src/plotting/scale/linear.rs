//! Linear scale transformation.

use super::{nice_ticks, Scale, ScaleKind};
use crate::error::{PlotError, PlotResult};

/// A linear scale for axis transformation.
#[derive(Debug, Clone)]
pub struct LinearScale {
    min: f64,
    max: f64,
}

impl LinearScale {
    /// Create a new linear scale with the given range.
    pub fn new(min: f64, max: f64) -> PlotResult<Self> {
        if !(min < max) {
            return Err(PlotError::InvalidConfig(
                "Scale minimum must be less than maximum".to_string(),
            ));
        }
        Ok(LinearScale { min, max })
    }

    /// Create a linear scale with automatic range (to be set later).
    pub fn auto() -> Self {
        LinearScale { min: 0.0, max: 1.0 }
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        LinearScale::auto()
    }
}

impl Scale for LinearScale {
    fn transform(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.5;
        }
        (value - self.min) / range
    }

    fn inverse(&self, normalized: f64) -> f64 {
        self.min + normalized * (self.max - self.min)
    }

    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PlotError::InvalidConfig(format!(
                "non-finite axis limits ({}, {})",
                min, max
            )));
        }
        if min >= max {
            // Widen a degenerate range
            let padding = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
            self.min = min.min(max) - padding;
            self.max = min.max(max) + padding;
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
        nice_ticks(self.min, self.max, num_ticks)
    }

    fn minor_ticks(&self, major: &[f64]) -> Vec<f64> {
        if major.len() < 2 {
            return Vec::new();
        }
        let step = major[1] - major[0];
        let mantissa = step / 10_f64.powf(step.log10().floor());
        let divisions = if (mantissa - 2.0).abs() < 1e-6 { 4 } else { 5 };
        let minor_step = step / divisions as f64;

        let first = major[0] - step;
        let count = (major.len() + 1) * divisions;
        (0..=count)
            .map(|i| first + i as f64 * minor_step)
            .filter(|v| *v >= self.min && *v <= self.max)
            .filter(|v| major.iter().all(|m| (m - v).abs() > minor_step * 1e-6))
            .collect()
    }

    fn kind(&self) -> ScaleKind {
        ScaleKind::Linear
    }

    fn clone_box(&self) -> Box<dyn Scale> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_roundtrip() {
        let s = LinearScale::new(-2.0, 6.0).unwrap();
        assert_eq!(s.transform(2.0), 0.5);
        assert_eq!(s.inverse(0.25), 0.0);
    }

    #[test]
    fn test_minor_ticks_between_majors() {
        let mut s = LinearScale::auto();
        s.set_range(0.0, 1.0).unwrap();
        let major = s.ticks(6);
        let minor = s.minor_ticks(&major);
        assert!(!minor.is_empty());
        assert!(minor.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut s = LinearScale::auto();
        assert!(s.set_range(f64::NAN, 1.0).is_err());
    }
}
