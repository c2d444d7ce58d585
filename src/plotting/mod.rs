//! Minimal plotting surface with a matplotlib-like API and SVG/PNG output.
//!
//! An [`Axes`] collects primitive [`Artist`]s and decorations; a [`Figure`]
//! lays out axes and renders them through the SVG backend.

pub mod artist;
pub mod axes;
pub mod backend;
pub mod data;
pub mod element;
pub mod figure;
pub mod rc;
pub mod scale;
pub mod style;

pub use artist::Artist;
pub use axes::Axes;
pub use data::IntoPlotData;
pub use element::{
    Bounds, GridConfig, GridWhich, LabelLoc, Legend, LegendEntry, LegendHandle, LegendLoc,
    TextCoords, TickDirection, TickParams,
};
pub use figure::{Figure, SaveOptions};
pub use rc::RcParams;
pub use scale::{LinearScale, LogScale, Scale, ScaleKind};
pub use style::{
    Color, DashPattern, FillStyle, Hatch, LineStyle, Marker, MarkerStyle, TextStyle,
};
