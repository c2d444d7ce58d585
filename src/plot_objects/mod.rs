//! Plot objects: data series that draw themselves onto an [`Axes`].
//!
//! Every object implements [`Draw`]; [`PlotObject`] is the closed set the
//! plot classes store. Drawing returns the legend handle for the object
//! rather than registering it anywhere, so the caller decides which
//! handles end up in the legend.

pub mod error_bar;
pub mod fill_between;
pub mod hist;
pub mod points_lines;
pub mod step;

pub use error_bar::ErrorBar;
pub use fill_between::FillBetween;
pub use hist::{Bins, ErrStyle, ErrorSpec, Hist, HistBuilder, HistType};
pub use points_lines::PointsLines;
pub use step::{Step, StepWhere};

use crate::plotting::{Axes, LegendHandle};
use crate::utils::DataLimits;

/// Something that can be drawn onto an axes.
pub trait Draw {
    /// Add the object's artists to `ax` and return its legend sample.
    fn draw(&self, ax: &mut Axes) -> LegendHandle;

    /// Extent of the drawn data, `None` when there is nothing finite to show.
    fn data_limits(&self) -> Option<DataLimits>;

    fn label(&self) -> Option<&str> {
        None
    }
}

/// Any of the supported plot objects.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotObject {
    PointsLines(PointsLines),
    ErrorBar(ErrorBar),
    Hist(Hist),
    FillBetween(FillBetween),
    Step(Step),
}

impl PlotObject {
    fn inner(&self) -> &dyn Draw {
        match self {
            PlotObject::PointsLines(o) => o,
            PlotObject::ErrorBar(o) => o,
            PlotObject::Hist(o) => o,
            PlotObject::FillBetween(o) => o,
            PlotObject::Step(o) => o,
        }
    }

    pub fn as_hist(&self) -> Option<&Hist> {
        match self {
            PlotObject::Hist(h) => Some(h),
            _ => None,
        }
    }
}

impl Draw for PlotObject {
    fn draw(&self, ax: &mut Axes) -> LegendHandle {
        self.inner().draw(ax)
    }

    fn data_limits(&self) -> Option<DataLimits> {
        self.inner().data_limits()
    }

    fn label(&self) -> Option<&str> {
        self.inner().label()
    }
}

macro_rules! impl_from_plot_object {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for PlotObject {
                fn from(object: $variant) -> Self {
                    PlotObject::$variant(object)
                }
            }
        )*
    };
}

impl_from_plot_object!(PointsLines, ErrorBar, Hist, FillBetween, Step);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_forwards_label_and_limits() {
        let object: PlotObject = PointsLines::new([0.0, 2.0], [1.0, 3.0])
            .unwrap()
            .label("series")
            .into();
        assert_eq!(object.label(), Some("series"));
        assert_eq!(object.data_limits().unwrap().x_max, 2.0);
        assert!(object.as_hist().is_none());

        let mut ax = Axes::new();
        let handle = object.draw(&mut ax);
        assert!(handle.line.is_some());
    }
}
