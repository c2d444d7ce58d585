//! Preset styles, colour themes and histogram-aware plot objects on top of a
//! small SVG plotting surface.
//!
//! ```no_run
//! use plotternova::{AxesSettings, BasicPlot, PlotOptions};
//!
//! # fn main() -> plotternova::PlotResult<()> {
//! let mut plot = BasicPlot::new(
//!     PlotOptions::new().style("publication").title("Calibration"),
//!     AxesSettings::new().xlabel("E [GeV]").ylabel("events"),
//! )?;
//! plot.add_data([1.0, 2.0, 3.0], [4.0, 9.0, 16.0], "fit", "pointslines")?;
//! plot.export("calibration.svg")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod input;
pub mod plot_classes;
pub mod plot_objects;
pub mod plotting;
pub mod theme;
pub mod utils;

pub use error::{PlotError, PlotResult};
pub use plot_classes::{AxesSettings, BasicPlot, HistPlot, PlotBase, PlotOptions, TextInfo};
pub use plot_objects::{
    Bins, Draw, ErrStyle, ErrorBar, FillBetween, Hist, HistBuilder, HistType, PlotObject,
    PointsLines, Step, StepWhere,
};
pub use theme::{ColorTheme, ColorThemeSetting, StyleSetting, StyleSheet};
pub use utils::{GridSettings, LegendSettings};
