//! Axes (subplot) implementation.

use log::{debug, warn};

use crate::plotting::artist::Artist;
use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{
    AxisConfig, Bounds, GridConfig, LabelLoc, Legend, LegendEntry, Text, TextCoords,
    TickDirection, Transform,
};
use crate::plotting::rc::RcParams;
use crate::plotting::scale::{Scale, ScaleKind};
use crate::plotting::style::{
    Baseline, Color, FillStyle, LineStyle, MarkerStyle, TextAnchor, TextStyle,
};

/// Padding applied around the artists' extent when no limits are set.
const AUTO_MARGIN: f64 = 0.05;

/// An axes object representing a single plot area.
pub struct Axes {
    /// Position within figure as fractions (left, right, bottom, top)
    pub position: Bounds,
    x_scale: Box<dyn Scale>,
    y_scale: Box<dyn Scale>,
    artists: Vec<Artist>,
    title: Option<Text>,
    x_label: Option<(Text, LabelLoc)>,
    y_label: Option<(Text, LabelLoc)>,
    legend: Option<(Legend, Vec<LegendEntry>)>,
    grid: Option<GridConfig>,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    x_lim: Option<(f64, f64)>,
    y_lim: Option<(f64, f64)>,
    color_index: usize,
    rc: RcParams,
}

impl Axes {
    /// Create a new axes with default settings.
    pub fn new() -> Self {
        Self::with_rc(&RcParams::default())
    }

    /// Create an axes styled by the given rc params.
    pub fn with_rc(rc: &RcParams) -> Self {
        let tick_font = TextStyle::new().font_family(rc.font_family.clone());
        let mut x_axis = AxisConfig {
            tick_label_style: tick_font.clone(),
            ..AxisConfig::default()
        }
        .ticks(rc.xtick.clone());
        let mut y_axis = AxisConfig {
            tick_label_style: tick_font,
            ..AxisConfig::default()
        }
        .ticks(rc.ytick.clone());
        for axis in [&mut x_axis, &mut y_axis] {
            axis.line_style = LineStyle::new()
                .color(rc.axes_edgecolor)
                .width(rc.axes_linewidth);
        }

        Axes {
            position: Bounds::new(0.125, 0.9, 0.11, 0.88),
            x_scale: ScaleKind::Linear.build(),
            y_scale: ScaleKind::Linear.build(),
            artists: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            legend: None,
            grid: None,
            x_axis,
            y_axis,
            x_lim: None,
            y_lim: None,
            color_index: 0,
            rc: rc.clone(),
        }
    }

    /// Set the position within the figure.
    pub fn position(mut self, left: f64, right: f64, bottom: f64, top: f64) -> Self {
        self.position = Bounds::new(left, right, bottom, top);
        self
    }

    pub fn rc(&self) -> &RcParams {
        &self.rc
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    pub fn add_artist(&mut self, artist: Artist) -> &mut Self {
        self.artists.push(artist);
        self
    }

    /// Add a polyline and/or markers.
    pub fn add_line(
        &mut self,
        x: Vec<f64>,
        y: Vec<f64>,
        style: Option<LineStyle>,
        marker: Option<MarkerStyle>,
    ) -> &mut Self {
        self.add_artist(Artist::Line {
            x,
            y,
            style,
            marker,
        })
    }

    pub fn add_polygon(&mut self, vertices: Vec<(f64, f64)>, fill: FillStyle) -> &mut Self {
        self.add_artist(Artist::Polygon { vertices, fill })
    }

    /// Vertical line across the axes at data coordinate `x`.
    pub fn axvline(&mut self, x: f64, style: LineStyle) -> &mut Self {
        self.add_artist(Artist::VLine { x, style })
    }

    /// Horizontal line across the axes at data coordinate `y`.
    pub fn axhline(&mut self, y: f64, style: LineStyle) -> &mut Self {
        self.add_artist(Artist::HLine { y, style })
    }

    /// Place an annotation. Without a style the rc text colour and base font size are used.
    pub fn text(
        &mut self,
        content: impl Into<String>,
        x: f64,
        y: f64,
        coords: TextCoords,
        style: Option<TextStyle>,
    ) -> &mut Self {
        let style = style.unwrap_or_else(|| self.base_text_style(self.rc.font_size));
        self.add_artist(Artist::Text {
            content: content.into(),
            x,
            y,
            coords,
            style,
        })
    }

    /// Get the next color from the cycle.
    pub fn next_color(&mut self) -> Color {
        let color = self.rc.cycle_color(self.color_index);
        self.color_index += 1;
        color
    }

    // ========================================================================
    // Decoration
    // ========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        let style = self.base_text_style(self.rc.title_size);
        self.title = Some(Text::new(title, style));
        self
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>, loc: LabelLoc) -> &mut Self {
        let style = self.label_style();
        self.x_label = Some((Text::new(label, style), loc));
        self
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>, loc: LabelLoc) -> &mut Self {
        let style = self.label_style();
        self.y_label = Some((Text::new(label, style), loc));
        self
    }

    pub fn set_xscale(&mut self, kind: ScaleKind) -> &mut Self {
        self.x_scale = kind.build();
        self
    }

    pub fn set_yscale(&mut self, kind: ScaleKind) -> &mut Self {
        self.y_scale = kind.build();
        self
    }

    pub fn xscale(&self) -> ScaleKind {
        self.x_scale.kind()
    }

    pub fn yscale(&self) -> ScaleKind {
        self.y_scale.kind()
    }

    /// Set the x-axis limits.
    pub fn set_xlim(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_lim = Some((min, max));
        self
    }

    /// Set the y-axis limits.
    pub fn set_ylim(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_lim = Some((min, max));
        self
    }

    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.x_lim
    }

    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.y_lim
    }

    /// Explicit major tick positions for the x axis.
    pub fn set_xticks(&mut self, ticks: Vec<f64>) -> &mut Self {
        self.x_axis.tick_positions = Some(ticks);
        self
    }

    pub fn set_yticks(&mut self, ticks: Vec<f64>) -> &mut Self {
        self.y_axis.tick_positions = Some(ticks);
        self
    }

    pub fn minorticks_on(&mut self) -> &mut Self {
        self.x_axis.show_minor = true;
        self.y_axis.show_minor = true;
        self
    }

    /// Set tick direction on both axes and whether ticks are mirrored on
    /// the top and right spines.
    pub fn tick_params(&mut self, direction: TickDirection, mirror: bool) -> &mut Self {
        for axis in [&mut self.x_axis, &mut self.y_axis] {
            axis.ticks.direction = direction;
            axis.ticks.mirror = mirror;
        }
        self
    }

    /// Show a legend with the given entries.
    pub fn legend(&mut self, entries: Vec<LegendEntry>, legend: Legend) -> &mut Self {
        self.legend = Some((legend, entries));
        self
    }

    pub fn legend_entries(&self) -> Option<&[LegendEntry]> {
        self.legend.as_ref().map(|(_, entries)| entries.as_slice())
    }

    pub fn grid(&mut self, config: GridConfig) -> &mut Self {
        self.grid = Some(config);
        self
    }

    pub fn grid_config(&self) -> Option<&GridConfig> {
        self.grid.as_ref()
    }

    fn base_text_style(&self, size: f64) -> TextStyle {
        TextStyle::new()
            .font_family(self.rc.font_family.clone())
            .font_size(size)
            .color(self.rc.text_color)
    }

    fn label_style(&self) -> TextStyle {
        self.base_text_style(self.rc.label_size)
            .color(self.rc.label_color)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Union of the data extents of all artists.
    pub fn data_bounds(&self) -> Option<Bounds> {
        self.artists
            .iter()
            .filter_map(Artist::data_bounds)
            .reduce(|mut acc, b| {
                acc.include_bounds(&b);
                acc
            })
    }

    fn resolve_limits(&mut self) {
        let data = self.data_bounds();
        let auto_x = data.map(|b| (b.x_min, b.x_max));
        let auto_y = data.map(|b| (b.y_min, b.y_max));
        resolve_axis_limits(self.x_scale.as_mut(), self.x_lim, auto_x, "x");
        resolve_axis_limits(self.y_scale.as_mut(), self.y_lim, auto_y, "y");
    }

    /// Render the axes into the backend. Returns the pixel box covered by the
    /// axes and its decorations, so the figure can grow to fit.
    pub fn render(&mut self, backend: &mut SvgBackend, figure_width: f64, figure_height: f64) -> Bounds {
        self.resolve_limits();

        let pixel = Bounds::new(
            self.position.x_min * figure_width,
            self.position.x_max * figure_width,
            (1.0 - self.position.y_max) * figure_height,
            (1.0 - self.position.y_min) * figure_height,
        );
        let tr = Transform {
            x_scale: self.x_scale.as_ref(),
            y_scale: self.y_scale.as_ref(),
            pixel,
        };
        let mut extent = pixel;

        backend.fill_rect(
            pixel.x_min,
            pixel.y_min,
            pixel.width(),
            pixel.height(),
            self.rc.axes_facecolor,
        );

        let (x_major, x_labels) = resolve_ticks(&self.x_axis, tr.x_scale);
        let (y_major, y_labels) = resolve_ticks(&self.y_axis, tr.y_scale);
        let x_minor = visible_minor(&self.x_axis, tr.x_scale, &x_major);
        let y_minor = visible_minor(&self.y_axis, tr.y_scale, &y_major);

        if let Some(ref grid) = self.grid {
            render_grid(
                grid,
                &tr,
                (x_major.as_slice(), x_minor.as_slice()),
                (y_major.as_slice(), y_minor.as_slice()),
                backend,
            );
        }

        backend.start_clip(pixel.x_min, pixel.y_min, pixel.width(), pixel.height());
        for artist in &self.artists {
            artist.render(&tr, backend);
        }
        backend.end_clip();

        // Spines
        let spine = &self.x_axis.line_style;
        if self.x_axis.visible {
            backend.draw_line(pixel.x_min, pixel.y_max, pixel.x_max, pixel.y_max, spine);
            backend.draw_line(pixel.x_min, pixel.y_min, pixel.x_max, pixel.y_min, spine);
        }
        let spine = &self.y_axis.line_style;
        if self.y_axis.visible {
            backend.draw_line(pixel.x_min, pixel.y_min, pixel.x_min, pixel.y_max, spine);
            backend.draw_line(pixel.x_max, pixel.y_min, pixel.x_max, pixel.y_max, spine);
        }

        // Ticks and tick labels
        if self.x_axis.visible {
            render_x_ticks(&self.x_axis, &tr, &x_major, &x_labels, &x_minor, backend);
            extent.y_max += self.x_axis.label_offset() + self.x_axis.ticks.label_size;
        }
        let y_label_width = if self.y_axis.visible {
            render_y_ticks(&self.y_axis, &tr, &y_major, &y_labels, &y_minor, backend)
        } else {
            0.0
        };
        extent.x_min -= self.y_axis.label_offset() + y_label_width;

        // Axis labels
        if let Some((ref label, loc)) = self.x_label {
            let offset = self.x_axis.label_offset() + self.x_axis.ticks.label_size + 4.0;
            let y = pixel.y_max + offset + label.style.font_size;
            let mut style = label.style.clone();
            let x = match loc {
                LabelLoc::Center => {
                    style.anchor = TextAnchor::Middle;
                    (pixel.x_min + pixel.x_max) / 2.0
                }
                LabelLoc::End => {
                    style.anchor = TextAnchor::End;
                    pixel.x_max
                }
            };
            backend.draw_text(x, y, &label.content, &style);
            extent.y_max = extent.y_max.max(y + label.style.font_size * 0.3);
        }

        if let Some((ref label, loc)) = self.y_label {
            let x = pixel.x_min - self.y_axis.label_offset() - y_label_width - 6.0;
            let mut style = label.style.clone();
            style.rotation = -90.0;
            let y = match loc {
                LabelLoc::Center => {
                    style.anchor = TextAnchor::Middle;
                    (pixel.y_min + pixel.y_max) / 2.0
                }
                LabelLoc::End => {
                    style.anchor = TextAnchor::End;
                    pixel.y_min
                }
            };
            backend.draw_text(x, y, &label.content, &style);
            extent.x_min = extent.x_min.min(x - label.style.font_size);
        }

        if let Some(ref title) = self.title {
            let mut style = title.style.clone();
            style.anchor = TextAnchor::Middle;
            let y = pixel.y_min - 6.0;
            backend.draw_text((pixel.x_min + pixel.x_max) / 2.0, y, &title.content, &style);
            extent.y_min = extent.y_min.min(y - title.style.font_size);
        }

        if let Some((ref legend, ref entries)) = self.legend {
            if !entries.is_empty() {
                let occupied: Vec<(f64, f64)> = self
                    .artists
                    .iter()
                    .flat_map(|a| a.pixel_points(&tr))
                    .collect();
                let legend_box = legend.render(entries, &pixel, &occupied, backend);
                extent.include_bounds(&legend_box);
            }
        }

        extent
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply explicit limits, or pad the data extent, or fall back to a unit range.
fn resolve_axis_limits(
    scale: &mut dyn Scale,
    explicit: Option<(f64, f64)>,
    data: Option<(f64, f64)>,
    name: &str,
) {
    if let Some((lo, hi)) = explicit {
        match scale.set_range(lo, hi) {
            Ok(()) => return,
            Err(e) => warn!("ignoring {}-limits ({}, {}): {}", name, lo, hi, e),
        }
    }

    let auto = data.map(|(lo, hi)| match scale.kind() {
        ScaleKind::Linear => {
            let pad = (hi - lo) * AUTO_MARGIN;
            (lo - pad, hi + pad)
        }
        ScaleKind::Log => {
            let lo = if lo > 0.0 { lo } else { hi / 1e3 };
            (lo / 1.5, hi * 1.5)
        }
    });
    let fallback = match scale.kind() {
        ScaleKind::Linear => (0.0, 1.0),
        ScaleKind::Log => (1.0, 10.0),
    };
    let (lo, hi) = auto.unwrap_or(fallback);
    if scale.set_range(lo, hi).is_err() {
        debug!("{}-axis has no usable data range, using {:?}", name, fallback);
        // The fallback ranges are valid for both scale kinds
        let _ = scale.set_range(fallback.0, fallback.1);
    }
}

fn resolve_ticks(axis: &AxisConfig, scale: &dyn Scale) -> (Vec<f64>, Vec<String>) {
    let (lo, hi) = scale.range();
    let within = |v: &f64| *v >= lo - (hi - lo) * 1e-9 && *v <= hi + (hi - lo) * 1e-9;
    match axis.tick_positions {
        Some(ref positions) => {
            let labels: Vec<String> = match axis.tick_labels {
                Some(ref labels) => labels.clone(),
                None => positions.iter().map(|t| scale.format_tick(*t)).collect(),
            };
            positions
                .iter()
                .zip(labels)
                .filter(|(t, _)| within(*t))
                .map(|(t, l)| (*t, l))
                .unzip()
        }
        None => {
            let ticks: Vec<f64> = scale.ticks(axis.num_ticks).into_iter().filter(within).collect();
            let labels = ticks.iter().map(|t| scale.format_tick(*t)).collect();
            (ticks, labels)
        }
    }
}

fn visible_minor(axis: &AxisConfig, scale: &dyn Scale, major: &[f64]) -> Vec<f64> {
    if axis.show_minor {
        scale.minor_ticks(major)
    } else {
        Vec::new()
    }
}

fn render_grid(
    grid: &GridConfig,
    tr: &Transform<'_>,
    x_ticks: (&[f64], &[f64]),
    y_ticks: (&[f64], &[f64]),
    backend: &mut SvgBackend,
) {
    let with_alpha = |style: &LineStyle| {
        let mut s = style.clone();
        s.color = s.color.with_alpha(s.color.a * grid.alpha);
        s
    };
    let mut levels = Vec::with_capacity(2);
    if grid.draws_minor() {
        levels.push((x_ticks.1, y_ticks.1, with_alpha(&grid.minor_style)));
    }
    if grid.draws_major() {
        levels.push((x_ticks.0, y_ticks.0, with_alpha(&grid.major_style)));
    }
    let p = tr.pixel;
    for (xs, ys, style) in levels {
        if grid.show_x {
            for px in xs.iter().filter_map(|x| tr.data_x(*x)) {
                backend.draw_line(px, p.y_min, px, p.y_max, &style);
            }
        }
        if grid.show_y {
            for py in ys.iter().filter_map(|y| tr.data_y(*y)) {
                backend.draw_line(p.x_min, py, p.x_max, py, &style);
            }
        }
    }
}

fn tick_style(axis: &AxisConfig, minor: bool) -> LineStyle {
    let width = if minor {
        axis.ticks.minor_width
    } else {
        axis.ticks.major_width
    };
    LineStyle::new().color(axis.ticks.color).width(width)
}

fn render_x_ticks(
    axis: &AxisConfig,
    tr: &Transform<'_>,
    major: &[f64],
    labels: &[String],
    minor: &[f64],
    backend: &mut SvgBackend,
) {
    let p = tr.pixel;
    let levels = [
        (major, axis.ticks.major_size, false),
        (minor, axis.ticks.minor_size, true),
    ];
    for (ticks, len, is_minor) in levels {
        let style = tick_style(axis, is_minor);
        let (inside, outside) = axis.ticks.direction.extents(len);
        for px in ticks.iter().filter_map(|t| tr.data_x(*t)) {
            backend.draw_line(px, p.y_max - inside, px, p.y_max + outside, &style);
            if axis.ticks.mirror {
                backend.draw_line(px, p.y_min + inside, px, p.y_min - outside, &style);
            }
        }
    }

    let mut style = axis.tick_label_style.clone();
    style.anchor = TextAnchor::Middle;
    style.baseline = Baseline::Hanging;
    let y = p.y_max + axis.label_offset();
    for (tick, label) in major.iter().zip(labels) {
        if let Some(px) = tr.data_x(*tick) {
            backend.draw_text(px, y, label, &style);
        }
    }
}

/// Returns the widest tick label, for placing the axis label.
fn render_y_ticks(
    axis: &AxisConfig,
    tr: &Transform<'_>,
    major: &[f64],
    labels: &[String],
    minor: &[f64],
    backend: &mut SvgBackend,
) -> f64 {
    let p = tr.pixel;
    let levels = [
        (major, axis.ticks.major_size, false),
        (minor, axis.ticks.minor_size, true),
    ];
    for (ticks, len, is_minor) in levels {
        let style = tick_style(axis, is_minor);
        let (inside, outside) = axis.ticks.direction.extents(len);
        for py in ticks.iter().filter_map(|t| tr.data_y(*t)) {
            backend.draw_line(p.x_min - outside, py, p.x_min + inside, py, &style);
            if axis.ticks.mirror {
                backend.draw_line(p.x_max - inside, py, p.x_max + outside, py, &style);
            }
        }
    }

    let mut style = axis.tick_label_style.clone();
    style.anchor = TextAnchor::End;
    style.baseline = Baseline::Middle;
    let x = p.x_min - axis.label_offset();
    let mut widest: f64 = 0.0;
    for (tick, label) in major.iter().zip(labels) {
        if let Some(py) = tr.data_y(*tick) {
            backend.draw_text(x, py, label, &style);
            widest = widest.max(style.approx_width(label));
        }
    }
    widest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::element::{GridWhich, LegendHandle};

    fn render(ax: &mut Axes) -> String {
        let mut backend = SvgBackend::new(400.0, 300.0);
        ax.render(&mut backend, 400.0, 300.0);
        backend.render()
    }

    #[test]
    fn test_auto_limits_pad_data() {
        let mut ax = Axes::new();
        ax.add_line(vec![0.0, 10.0], vec![0.0, 1.0], Some(LineStyle::default()), None);
        ax.resolve_limits();
        let (lo, hi) = ax.x_scale.range();
        assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_log_limits_fall_back() {
        let mut ax = Axes::new();
        ax.set_yscale(ScaleKind::Log).set_ylim(-1.0, 10.0);
        ax.add_line(vec![1.0, 2.0], vec![1.0, 100.0], Some(LineStyle::default()), None);
        ax.resolve_limits();
        let (lo, hi) = ax.y_scale.range();
        assert!(lo > 0.0 && hi >= 100.0);
    }

    #[test]
    fn test_renders_labels_title_and_legend() {
        let mut ax = Axes::new();
        ax.add_line(vec![0.0, 1.0], vec![0.0, 1.0], Some(LineStyle::default()), None);
        ax.set_title("Signal").set_xlabel("mass", LabelLoc::End);
        ax.grid(GridConfig::new().which(GridWhich::Both));
        ax.legend(
            vec![LegendEntry::new("data", LegendHandle::line(LineStyle::default()))],
            Legend::new(),
        );
        let svg = render(&mut ax);
        assert!(svg.contains(">Signal</text>"));
        assert!(svg.contains(">mass</text>"));
        assert!(svg.contains(">data</text>"));
        assert!(svg.contains("text-anchor=\"end\""));
    }

    #[test]
    fn test_mirrored_inward_ticks() {
        let mut ax = Axes::new();
        ax.tick_params(TickDirection::In, true).minorticks_on();
        assert!(ax.x_axis.ticks.mirror && ax.y_axis.ticks.mirror);
        assert_eq!(ax.x_axis.ticks.direction, TickDirection::In);
        let svg = render(&mut ax);
        assert!(svg.contains("<line"));
    }
}
