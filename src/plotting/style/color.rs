//! Color definitions and utilities.

use std::fmt;

use serde::Deserialize;

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in 0.0 - 1.0
    pub a: f64,
}

impl Color {
    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Create an RGBA color.
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create a color from a hex string (e.g., "#FF0000", "FF0000" or "#FF000080").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)? as f64 / 255.0,
            )),
            _ => None,
        }
    }

    /// Parse a color specification: hex code, CSS/matplotlib name, cycle
    /// reference ("C0".."C9") or single-letter shortcut ("r", "k", ...).
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.starts_with('#') {
            return Color::from_hex(spec);
        }
        if let Some(color) = named_color(spec) {
            return Some(color);
        }
        // Bare hex without the leading '#'
        if spec.len() >= 6 && spec.chars().all(|c| c.is_ascii_hexdigit()) {
            return Color::from_hex(spec);
        }
        None
    }

    /// Return the same color with a different opacity.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Color {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Hex representation of the RGB part, suitable for SVG paint attributes.
    pub fn to_svg_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Whether the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    // Predefined colors
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        DEFAULT_CYCLE[0]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a < 1.0 {
            write!(f, "{}{:02x}", self.to_svg_string(), (self.a * 255.0).round() as u8)
        } else {
            f.write_str(&self.to_svg_string())
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(spec: String) -> Result<Self, Self::Error> {
        Color::parse(&spec).ok_or_else(|| format!("unrecognised color '{}'", spec))
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, f64)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, f64)) -> Self {
        Color::rgba(r, g, b, a)
    }
}

/// The default ("tab10") property cycle.
pub const DEFAULT_CYCLE: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

/// Get a color from the default color cycle by index.
pub fn cycle_color(index: usize) -> Color {
    DEFAULT_CYCLE[index % DEFAULT_CYCLE.len()]
}

fn named_color(name: &str) -> Option<Color> {
    let lower = name.to_lowercase();

    // Matplotlib-style cycle colors (C0-C9)
    if let Some(idx) = lower.strip_prefix('c').and_then(|d| d.parse::<usize>().ok()) {
        return Some(cycle_color(idx));
    }

    let color = match lower.as_str() {
        "black" | "k" => Color::BLACK,
        "white" | "w" => Color::WHITE,
        "red" | "r" => Color::RED,
        "green" | "g" => Color::GREEN,
        "blue" | "b" => Color::BLUE,
        "yellow" | "y" => Color::rgb(255, 255, 0),
        "cyan" | "aqua" | "c" => Color::rgb(0, 255, 255),
        "magenta" | "fuchsia" | "m" => Color::rgb(255, 0, 255),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "gray" | "grey" => Color::GRAY,
        "lightgray" | "lightgrey" => Color::LIGHT_GRAY,
        "darkgray" | "darkgrey" => Color::DARK_GRAY,
        "pink" => Color::rgb(255, 192, 203),
        "brown" => Color::rgb(165, 42, 42),
        "navy" => Color::rgb(0, 0, 128),
        "teal" => Color::rgb(0, 128, 128),
        "olive" => Color::rgb(128, 128, 0),
        "maroon" => Color::rgb(128, 0, 0),
        "lime" => Color::rgb(0, 255, 0),
        "silver" => Color::rgb(192, 192, 192),
        "none" | "transparent" => Color::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}
