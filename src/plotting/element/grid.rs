//! Grid configuration.

use crate::plotting::style::{Color, DashPattern, LineStyle};

/// Which tick levels grid lines follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridWhich {
    #[default]
    Major,
    Minor,
    Both,
}

/// Configuration for grid lines.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub which: GridWhich,
    /// Style for major grid lines
    pub major_style: LineStyle,
    /// Style for minor grid lines
    pub minor_style: LineStyle,
    /// Whether to show X grid lines
    pub show_x: bool,
    /// Whether to show Y grid lines
    pub show_y: bool,
    /// Grid line opacity
    pub alpha: f64,
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn which(mut self, which: GridWhich) -> Self {
        self.which = which;
        self
    }

    /// Set the major grid line style.
    pub fn major_style(mut self, style: LineStyle) -> Self {
        self.major_style = style;
        self
    }

    /// Set the dash pattern of the major lines.
    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.major_style.dash = dash;
        self
    }

    /// Set the grid color (affects both major and minor).
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        let c = color.into();
        self.major_style.color = c;
        self.minor_style.color = c;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set which axes to show grid for.
    pub fn axes(mut self, show_x: bool, show_y: bool) -> Self {
        self.show_x = show_x;
        self.show_y = show_y;
        self
    }

    pub fn draws_major(&self) -> bool {
        matches!(self.which, GridWhich::Major | GridWhich::Both)
    }

    pub fn draws_minor(&self) -> bool {
        matches!(self.which, GridWhich::Minor | GridWhich::Both)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        let grey = Color::rgb(0xb0, 0xb0, 0xb0);
        GridConfig {
            which: GridWhich::Major,
            major_style: LineStyle::new().color(grey).width(0.8),
            minor_style: LineStyle::new()
                .color(grey)
                .width(0.5)
                .dash(DashPattern::Dotted),
            show_x: true,
            show_y: true,
            alpha: 1.0,
        }
    }
}
