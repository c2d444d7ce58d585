//! Output backends.

#[cfg(feature = "png")]
mod png;
mod svg;

#[cfg(feature = "png")]
pub use png::svg_to_png;
pub use svg::SvgBackend;
