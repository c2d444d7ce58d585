use std::fs;

use plotternova::plotting::Artist;
use plotternova::{
    AxesSettings, BasicPlot, ErrStyle, ErrorBar, FillBetween, GridSettings, Hist, HistPlot,
    HistType, LegendSettings, PlotError, PlotOptions, PointsLines, StyleSheet, TextInfo,
};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_basic_plot_end_to_end() {
    let dir = TempDir::new().unwrap();
    let settings = AxesSettings::new()
        .xlabel("voltage")
        .ylabel("current")
        .legend(Some(LegendSettings::from("fancy_outside")))
        .grid(Some(GridSettings::from("minor")))
        .text(TextInfo::new("preliminary", 0.05, 0.9));
    let mut plot = BasicPlot::new(
        PlotOptions::new().style("presentation").color_theme("dark"),
        settings,
    )
    .unwrap();
    plot.add_points_lines(
        PointsLines::new([0.0, 1.0, 2.0], [0.0, 1.0, 4.0])
            .unwrap()
            .format("r--o")
            .unwrap()
            .label("measured"),
    );
    plot.add_error_bar(
        ErrorBar::new([0.5, 1.5], [0.3, 2.1], [0.1, 0.2])
            .unwrap()
            .label("calibration"),
    );
    plot.add_fill_between(
        FillBetween::new([0.0, 2.0], [0.0, 3.0], [1.0, 5.0])
            .unwrap()
            .label("envelope"),
    );

    let svg_path = dir.path().join("iv.svg");
    plot.export(&svg_path).unwrap();
    let svg = fs::read_to_string(&svg_path).unwrap();
    for text in [">voltage</text>", ">measured</text>", ">envelope</text>", ">preliminary</text>"] {
        assert!(svg.contains(text), "missing {}", text);
    }
}

#[cfg(feature = "png")]
#[test]
fn test_png_export() {
    let dir = TempDir::new().unwrap();
    let mut plot = BasicPlot::new(PlotOptions::new().dpi(72), AxesSettings::default()).unwrap();
    plot.add_data([0.0, 1.0], [1.0, 0.0], "a", "line").unwrap();
    let path = dir.path().join("plot.png");
    plot.export(&path).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_hist_plot_stacked_with_atlas_band() {
    let dir = TempDir::new().unwrap();
    let mut plot = HistPlot::new(
        PlotOptions::new().style("ATLAS"),
        AxesSettings::new().xlabel("m [GeV]").ylabel("events"),
    )
    .unwrap()
    .stack(true)
    .hist_type(HistType::Bar);

    let edges = [0.0, 1.0, 2.0, 3.0];
    let background = plot
        .hist_builder([0.5, 1.5, 1.6, 2.5], edges)
        .label("background")
        .build()
        .unwrap();
    let signal = plot
        .hist_builder([1.5, 1.7], edges)
        .errors(true)
        .err_style(ErrStyle::Atlas)
        .label("signal")
        .build()
        .unwrap();
    plot.add(background).add(signal);

    let entries = plot.plot().unwrap();
    assert_eq!(entries.len(), 2);
    let ax = &plot.base().figure().axes()[0];
    let hatched = ax.artists().iter().any(|a| match a {
        Artist::Polygon { fill, .. } => fill.hatch.is_some(),
        _ => false,
    });
    assert!(hatched);
    plot.export(dir.path().join("stack.svg")).unwrap();
}

#[test]
fn test_hist_plot_rejects_mismatched_stack() {
    let dir = TempDir::new().unwrap();
    let mut plot = HistPlot::new(PlotOptions::default(), AxesSettings::default())
        .unwrap()
        .stack(true);
    plot.add(Hist::new([0.5], [0.0, 1.0]).unwrap());
    plot.add(Hist::new([0.5], [0.0, 2.0]).unwrap());
    let path = dir.path().join("stack.svg");
    let err = plot.export(&path).unwrap_err();
    assert!(matches!(err, PlotError::InvalidData(_)));
    assert!(!path.exists());
}

#[test]
fn test_custom_style_sheet_from_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("style.json");
    fs::write(
        &path,
        json!({"figure.figsize": [4.0, 3.0], "unknown.key": true}).to_string(),
    )
    .unwrap();
    let sheet = StyleSheet::load(&path).unwrap();
    let mut plot = BasicPlot::new(PlotOptions::new().style(sheet), AxesSettings::default()).unwrap();
    plot.add_data([0.0, 1.0], [0.0, 1.0], "", "points").unwrap();
    plot.plot();
    assert_eq!(plot.base().figure().width, 288.0);
    assert_eq!(plot.base().figure().height, 216.0);
}
