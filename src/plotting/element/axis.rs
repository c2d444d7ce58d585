//! Axis configuration: spine, tick geometry and tick labels.

use serde::Deserialize;

use crate::plotting::style::{Color, LineStyle, TextStyle};

/// Which side of the spine tick marks are drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickDirection {
    In,
    #[default]
    Out,
    InOut,
}

impl TickDirection {
    /// Offsets (inside, outside) of a tick of length `len` relative to the spine.
    pub fn extents(&self, len: f64) -> (f64, f64) {
        match self {
            TickDirection::In => (len, 0.0),
            TickDirection::Out => (0.0, len),
            TickDirection::InOut => (len / 2.0, len / 2.0),
        }
    }
}

/// Tick geometry for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TickParams {
    pub direction: TickDirection,
    /// Major tick length in points
    pub major_size: f64,
    pub minor_size: f64,
    pub major_width: f64,
    pub minor_width: f64,
    /// Tick label font size
    pub label_size: f64,
    pub color: Color,
    /// Draw ticks on the opposite spine too (top for x, right for y)
    pub mirror: bool,
}

impl Default for TickParams {
    fn default() -> Self {
        TickParams {
            direction: TickDirection::Out,
            major_size: 3.5,
            minor_size: 2.0,
            major_width: 0.8,
            minor_width: 0.6,
            label_size: 10.0,
            color: Color::BLACK,
            mirror: false,
        }
    }
}

/// Configuration for an axis.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    pub visible: bool,
    /// Spine style
    pub line_style: LineStyle,
    pub ticks: TickParams,
    pub show_minor: bool,
    /// Number of major ticks to aim for
    pub num_ticks: usize,
    /// Padding between tick marks and labels
    pub tick_padding: f64,
    /// Custom tick positions (overrides automatic generation)
    pub tick_positions: Option<Vec<f64>>,
    /// Custom tick labels, paired with `tick_positions`
    pub tick_labels: Option<Vec<String>>,
    pub tick_label_style: TextStyle,
}

impl AxisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn ticks(mut self, ticks: TickParams) -> Self {
        self.tick_label_style.font_size = ticks.label_size;
        self.tick_label_style.color = ticks.color;
        self.ticks = ticks;
        self
    }

    pub fn num_ticks(mut self, num: usize) -> Self {
        self.num_ticks = num;
        self
    }

    /// Set custom tick positions.
    pub fn tick_positions(mut self, positions: Vec<f64>) -> Self {
        self.tick_positions = Some(positions);
        self
    }

    /// Set custom tick labels.
    pub fn tick_labels(mut self, labels: Vec<String>) -> Self {
        self.tick_labels = Some(labels);
        self
    }

    /// Outside extent of tick marks plus label padding, in points.
    pub fn label_offset(&self) -> f64 {
        let (_, outside) = self.ticks.direction.extents(self.ticks.major_size);
        outside + self.tick_padding
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        let ticks = TickParams::default();
        AxisConfig {
            visible: true,
            line_style: LineStyle::new().color(Color::BLACK).width(0.8),
            show_minor: false,
            num_ticks: 6,
            tick_padding: 3.5,
            tick_positions: None,
            tick_labels: None,
            tick_label_style: TextStyle::new()
                .font_size(ticks.label_size)
                .color(ticks.color),
            ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_direction_extents() {
        assert_eq!(TickDirection::In.extents(6.0), (6.0, 0.0));
        assert_eq!(TickDirection::InOut.extents(6.0), (3.0, 3.0));
        let d: TickDirection = serde_json::from_str("\"inout\"").unwrap();
        assert_eq!(d, TickDirection::InOut);
    }
}
