//! Styling primitives: colors, line styles, markers, fills and text.

pub mod color;
pub mod fill_style;
pub mod line_style;
pub mod marker;
pub mod text_style;

pub use color::{cycle_color, Color, DEFAULT_CYCLE};
pub use fill_style::{FillStyle, Hatch, HatchDirection};
pub use line_style::{DashPattern, LineStyle};
pub use marker::{Marker, MarkerStyle};
pub use text_style::{Baseline, TextAnchor, TextStyle};
