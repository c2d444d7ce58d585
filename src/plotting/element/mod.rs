//! Visual elements for plots.

mod axis;
mod grid;
mod legend;
pub mod text;

pub use axis::{AxisConfig, TickDirection, TickParams};
pub use grid::{GridConfig, GridWhich};
pub use legend::{Legend, LegendEntry, LegendHandle, LegendLoc};
pub use text::{escape_xml, LabelLoc, Text, TextCoords};

use crate::plotting::scale::Scale;

/// Bounding box for elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Create a unit bounds (0 to 1).
    pub fn unit() -> Self {
        Bounds::new(0.0, 1.0, 0.0, 1.0)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Expand bounds to include another bounds.
    pub fn include_bounds(&mut self, other: &Bounds) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Check if a point is inside the bounds.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::unit()
    }
}

/// Maps data and axes-fraction coordinates to pixel coordinates.
pub struct Transform<'a> {
    pub x_scale: &'a dyn Scale,
    pub y_scale: &'a dyn Scale,
    /// Plot area in pixels (y grows downward)
    pub pixel: Bounds,
}

impl<'a> Transform<'a> {
    /// Transform a data point; `None` when either coordinate cannot be represented.
    pub fn data(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let fx = self.x_scale.transform(x);
        let fy = self.y_scale.transform(y);
        if fx.is_finite() && fy.is_finite() {
            Some(self.axes(fx, fy))
        } else {
            None
        }
    }

    /// Transform an axes-fraction point.
    pub fn axes(&self, fx: f64, fy: f64) -> (f64, f64) {
        (
            self.pixel.x_min + fx * self.pixel.width(),
            // Flip Y axis since SVG has Y increasing downward
            self.pixel.y_max - fy * self.pixel.height(),
        )
    }

    pub fn data_x(&self, x: f64) -> Option<f64> {
        let fx = self.x_scale.transform(x);
        fx.is_finite()
            .then(|| self.pixel.x_min + fx * self.pixel.width())
    }

    pub fn data_y(&self, y: f64) -> Option<f64> {
        let fy = self.y_scale.transform(y);
        fy.is_finite()
            .then(|| self.pixel.y_max - fy * self.pixel.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::{LinearScale, LogScale};

    #[test]
    fn test_transform_flips_y() {
        let xs = LinearScale::new(0.0, 10.0).unwrap();
        let ys = LinearScale::new(0.0, 10.0).unwrap();
        let tr = Transform {
            x_scale: &xs,
            y_scale: &ys,
            pixel: Bounds::new(10.0, 110.0, 20.0, 120.0),
        };
        assert_eq!(tr.data(0.0, 0.0), Some((10.0, 120.0)));
        assert_eq!(tr.data(10.0, 10.0), Some((110.0, 20.0)));
    }

    #[test]
    fn test_transform_drops_unrepresentable() {
        let xs = LinearScale::new(0.0, 1.0).unwrap();
        let ys = LogScale::new(1.0, 10.0).unwrap();
        let tr = Transform {
            x_scale: &xs,
            y_scale: &ys,
            pixel: Bounds::unit(),
        };
        assert_eq!(tr.data(0.5, -1.0), None);
    }
}
