//! Figure setup, axes decoration and export shared by all plot classes.

use std::path::Path;

use crate::error::PlotResult;
use crate::plotting::{
    Axes, Color, Figure, LabelLoc, RcParams, SaveOptions, ScaleKind, TextCoords, TextStyle,
};
use crate::theme::{resolve_rc, ColorThemeSetting, StyleSetting};
use crate::utils::{GridSettings, LegendSettings};

/// Suffix appended to axis labels aligned to the axis end.
const END_LABEL_PAD: &str = "   ";

// ============================================================================
// Options
// ============================================================================

/// Figure-level options.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub title: Option<String>,
    /// Raster resolution used on PNG export
    pub dpi: u32,
    pub style: StyleSetting,
    pub color_theme: ColorThemeSetting,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            title: None,
            dpi: 300,
            style: StyleSetting::default(),
            color_theme: ColorThemeSetting::default(),
        }
    }
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn style(mut self, style: impl Into<StyleSetting>) -> Self {
        self.style = style.into();
        self
    }

    pub fn color_theme(mut self, theme: impl Into<ColorThemeSetting>) -> Self {
        self.color_theme = theme.into();
        self
    }
}

/// A text annotation placed after the data is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInfo {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Axes fractions by default
    pub coords: TextCoords,
    pub color: Option<Color>,
    pub font_size: Option<f64>,
}

impl TextInfo {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        TextInfo {
            text: text.into(),
            x,
            y,
            coords: TextCoords::Axes,
            color: None,
            font_size: None,
        }
    }

    /// Interpret `(x, y)` as data coordinates.
    pub fn data_coords(mut self) -> Self {
        self.coords = TextCoords::Data;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }
}

/// Axis labels, scales, limits and decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesSettings {
    pub xlabel: String,
    pub ylabel: String,
    /// Explicit limits; `None` derives them from the data
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xticks: Option<Vec<f64>>,
    pub yticks: Option<Vec<f64>>,
    pub xlog: bool,
    pub ylog: bool,
    pub text_info: Vec<TextInfo>,
    /// `None` draws no legend
    pub legend: Option<LegendSettings>,
    /// `None` draws no grid
    pub grid: Option<GridSettings>,
}

impl Default for AxesSettings {
    fn default() -> Self {
        AxesSettings {
            xlabel: "x".to_string(),
            ylabel: "y".to_string(),
            xlim: None,
            ylim: None,
            xticks: None,
            yticks: None,
            xlog: false,
            ylog: false,
            text_info: Vec::new(),
            legend: Some(LegendSettings::default()),
            grid: None,
        }
    }
}

impl AxesSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = label.into();
        self
    }

    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = label.into();
        self
    }

    pub fn xlim(mut self, lo: f64, hi: f64) -> Self {
        self.xlim = Some((lo, hi));
        self
    }

    pub fn ylim(mut self, lo: f64, hi: f64) -> Self {
        self.ylim = Some((lo, hi));
        self
    }

    pub fn xticks(mut self, ticks: Vec<f64>) -> Self {
        self.xticks = Some(ticks);
        self
    }

    pub fn yticks(mut self, ticks: Vec<f64>) -> Self {
        self.yticks = Some(ticks);
        self
    }

    pub fn xlog(mut self, on: bool) -> Self {
        self.xlog = on;
        self
    }

    pub fn ylog(mut self, on: bool) -> Self {
        self.ylog = on;
        self
    }

    pub fn text(mut self, info: TextInfo) -> Self {
        self.text_info.push(info);
        self
    }

    pub fn legend(mut self, settings: Option<LegendSettings>) -> Self {
        self.legend = settings;
        self
    }

    pub fn grid(mut self, settings: Option<GridSettings>) -> Self {
        self.grid = settings;
        self
    }
}

// ============================================================================
// PlotBase
// ============================================================================

/// Owns the figure and the resolved style of a plot.
pub struct PlotBase {
    options: PlotOptions,
    rc: RcParams,
    figure: Figure,
}

impl PlotBase {
    /// Resolve the style and colour theme. Fails only when a custom sheet
    /// holds a value of the wrong type for a known key.
    pub fn new(options: PlotOptions) -> PlotResult<Self> {
        let rc = resolve_rc(&options.style, &options.color_theme)?;
        let figure = Figure::new(&rc);
        Ok(PlotBase {
            options,
            rc,
            figure,
        })
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    pub fn rc(&self) -> &RcParams {
        &self.rc
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    /// Replace the figure with a fresh one holding a single axes.
    pub fn setup_fig(&mut self) -> &mut Axes {
        self.figure = Figure::new(&self.rc);
        let ax = self.figure.add_subplot(1, 1, 1);
        if let Some(ref title) = self.options.title {
            ax.set_title(title.clone());
        }
        ax
    }

    /// Labels, log scales and limits for axes `index`. Publication and
    /// ATLAS styles put the x label at the right end and the y label at
    /// the top.
    pub fn apply_axes_settings(
        &mut self,
        index: usize,
        settings: &AxesSettings,
        xlim: Option<(f64, f64)>,
        ylim: Option<(f64, f64)>,
    ) {
        let at_end = self.options.style.aligns_labels_to_end();
        let Some(ax) = self.figure.axes_mut().get_mut(index) else {
            return;
        };
        if at_end {
            ax.set_xlabel(format!("{}{}", settings.xlabel, END_LABEL_PAD), LabelLoc::End);
            ax.set_ylabel(format!("{}{}", settings.ylabel, END_LABEL_PAD), LabelLoc::End);
        } else {
            ax.set_xlabel(settings.xlabel.clone(), LabelLoc::Center);
            ax.set_ylabel(settings.ylabel.clone(), LabelLoc::Center);
        }
        if settings.xlog {
            ax.set_xscale(ScaleKind::Log);
        }
        if settings.ylog {
            ax.set_yscale(ScaleKind::Log);
        }
        if let Some((lo, hi)) = xlim {
            ax.set_xlim(lo, hi);
        }
        if let Some((lo, hi)) = ylim {
            ax.set_ylim(lo, hi);
        }
    }

    /// Place text annotations on axes `index`.
    pub fn add_text(&mut self, index: usize, text_info: &[TextInfo]) {
        let rc = &self.rc;
        let Some(ax) = self.figure.axes_mut().get_mut(index) else {
            return;
        };
        for info in text_info {
            let style = TextStyle::new()
                .font_family(rc.font_family.clone())
                .font_size(info.font_size.unwrap_or(rc.font_size))
                .color(info.color.unwrap_or(rc.text_color));
            ax.text(info.text.clone(), info.x, info.y, info.coords, Some(style));
        }
    }

    /// Render the current figure as SVG on a white background.
    pub fn render_svg(&mut self) -> String {
        self.figure.render_with_background(Color::WHITE)
    }

    /// Write the current figure; the format follows the extension of `path`.
    pub fn export(&mut self, path: impl AsRef<Path>) -> PlotResult<()> {
        let options = SaveOptions {
            dpi: self.options.dpi,
            facecolor: Some(Color::WHITE),
        };
        self.figure.savefig(path, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;
    use crate::theme::StyleSheet;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = AxesSettings::default();
        assert_eq!((settings.xlabel.as_str(), settings.ylabel.as_str()), ("x", "y"));
        assert_eq!(settings.legend, Some(LegendSettings::Preset("default inside".into())));
        assert!(settings.grid.is_none());
        assert_eq!(PlotOptions::default().dpi, 300);
    }

    #[test]
    fn test_setup_fig_uses_style_size_and_title() {
        let mut base = PlotBase::new(PlotOptions::new().style("presentation").title("Run 2")).unwrap();
        base.setup_fig();
        assert_eq!(base.figure().width, 720.0);
        assert_eq!(base.figure().axes().len(), 1);
        assert!(base.render_svg().contains(">Run 2</text>"));
    }

    #[test]
    fn test_publication_labels_align_to_end() {
        let mut base = PlotBase::new(PlotOptions::new().style("publication")).unwrap();
        base.setup_fig();
        base.apply_axes_settings(0, &AxesSettings::new().xlabel("mass"), None, None);
        let svg = base.render_svg();
        assert!(svg.contains(">mass   </text>"));
        assert!(svg.contains("text-anchor=\"end\""));
    }

    #[test]
    fn test_bad_custom_style_value() {
        let sheet = StyleSheet::new().with("figure.figsize", json!("wide"));
        let err = PlotBase::new(PlotOptions::new().style(sheet)).err().unwrap();
        assert!(matches!(err, PlotError::InvalidConfig(_)));
    }

    #[test]
    fn test_export_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut base = PlotBase::new(PlotOptions::default()).unwrap();
        base.setup_fig();
        let err = base.export(dir.path().join("plot.pdf")).unwrap_err();
        assert!(matches!(err, PlotError::UnsupportedFormat(_)));
        assert!(base.export(dir.path().join("plot.svg")).is_ok());
    }
}
