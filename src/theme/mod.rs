//! Named style sheets and colour themes, resolved into [`RcParams`].
//!
//! Both are flat mappings from matplotlib rc keys (`"figure.figsize"`,
//! `"xtick.direction"`, `"axes.facecolor"`, ...) to JSON values. A plot
//! starts from [`RcParams::default`], applies its style sheet and then its
//! colour theme, so theme entries win over style entries.

pub mod color_theme;
pub mod style;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PlotError, PlotResult};
use crate::plotting::RcParams;

pub use color_theme::{ColorTheme, ColorThemeSetting, COLOR_THEME_NAMES};
pub use style::{StyleSetting, StyleSheet, STYLE_NAMES};

/// Resolve a style and a colour theme into rc params.
pub fn resolve_rc(style: &StyleSetting, theme: &ColorThemeSetting) -> PlotResult<RcParams> {
    let mut rc = RcParams::default();
    rc.apply(style.resolve().entries())?;
    rc.apply(theme.resolve().entries())?;
    Ok(rc)
}

/// Read a JSON object of rc entries from disk into a sheet or theme.
fn load_rc_map<T: DeserializeOwned>(path: &Path) -> PlotResult<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    match serde_json::from_reader(reader)? {
        map @ Value::Object(_) => Ok(serde_json::from_value(map)?),
        other => Err(PlotError::InvalidConfig(format!(
            "{}: expected a JSON object of rc entries, got {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::{Color, TickDirection};
    use std::io::Write;

    #[test]
    fn test_theme_overrides_style() {
        let rc = resolve_rc(&"publication".into(), &"dark".into()).unwrap();
        assert_eq!(rc.figure_size, (6.0, 4.0));
        assert_eq!(rc.font_family, "Times New Roman");
        assert_eq!(rc.xtick.direction, TickDirection::In);
        assert!(rc.xtick.mirror && rc.ytick.mirror);
        assert_eq!(rc.axes_facecolor, Color::rgb(0x22, 0x22, 0x22));
        assert_eq!(rc.text_color, Color::WHITE);
    }

    #[test]
    fn test_load_rejects_non_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        let err = load_rc_map::<StyleSheet>(file.path()).unwrap_err();
        assert!(matches!(err, PlotError::InvalidConfig(ref m) if m.contains("an array")));
    }

    #[test]
    fn test_load_theme_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"axes.facecolor": "black", "text.color": "white"}}"#).unwrap();
        let theme = ColorTheme::load(file.path()).unwrap();
        assert_eq!(theme.entries().count(), 2);
        let rc = resolve_rc(&StyleSetting::default(), &theme.into()).unwrap();
        assert_eq!(rc.text_color, Color::WHITE);
    }
}
