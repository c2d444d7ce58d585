//! Rasterise rendered SVG documents to PNG.

use resvg::{tiny_skia, usvg};

use crate::error::{PlotError, PlotResult};
use crate::plotting::style::Color;

/// Convert an SVG document (sized in points) to PNG bytes at the given DPI,
/// painting `background` underneath.
pub fn svg_to_png(svg: &str, dpi: u32, background: Color) -> PlotResult<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| PlotError::Render(e.to_string()))?;

    let scale = dpi as f32 / 72.0;
    let size = tree.size();
    let w = (size.width() * scale).ceil() as u32;
    let h = (size.height() * scale).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| PlotError::Render(format!("cannot allocate a {}x{} pixmap", w, h)))?;

    pixmap.fill(tiny_skia::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        (background.a * 255.0).round() as u8,
    ));

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|e| PlotError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::backend::SvgBackend;

    #[test]
    fn test_png_scales_with_dpi() {
        let svg = SvgBackend::new(72.0, 36.0).render();
        let png = svg_to_png(&svg, 144, Color::WHITE).unwrap();
        // PNG signature followed by the IHDR width/height
        assert_eq!(&png[1..4], b"PNG");
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        assert_eq!((width, height), (144, 72));
    }
}
