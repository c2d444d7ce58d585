//! Colour themes: face, edge and text colours layered over a style sheet.

use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::PlotResult;

pub const COLOR_THEME_NAMES: [&str; 2] = ["light", "dark"];

/// A mapping of colour rc keys to values.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct ColorTheme(Map<String, Value>);

impl ColorTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Option<Self> {
        let value = match name {
            "light" => json!({
                "axes.facecolor": "white",
                "axes.edgecolor": "black",
                "figure.facecolor": "white",
            }),
            "dark" => json!({
                "axes.facecolor": "#222222",
                "axes.edgecolor": "white",
                "figure.facecolor": "#222222",
                "text.color": "white",
            }),
            _ => return None,
        };
        match value {
            Value::Object(map) => Some(ColorTheme(map)),
            _ => None,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> PlotResult<Self> {
        super::load_rc_map(path.as_ref())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A colour theme chosen by name or given as a custom mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorThemeSetting {
    Named(String),
    Custom(ColorTheme),
}

impl ColorThemeSetting {
    /// The theme to apply. Unknown names apply no colour overrides.
    pub fn resolve(&self) -> ColorTheme {
        match self {
            ColorThemeSetting::Named(name) => ColorTheme::named(name).unwrap_or_else(|| {
                warn!(
                    "unknown colour theme '{}' (available: {}); no colour overrides applied",
                    name,
                    COLOR_THEME_NAMES.join(", ")
                );
                ColorTheme::new()
            }),
            ColorThemeSetting::Custom(theme) => theme.clone(),
        }
    }
}

impl Default for ColorThemeSetting {
    fn default() -> Self {
        ColorThemeSetting::Named("light".to_string())
    }
}

impl From<&str> for ColorThemeSetting {
    fn from(name: &str) -> Self {
        ColorThemeSetting::Named(name.to_string())
    }
}

impl From<ColorTheme> for ColorThemeSetting {
    fn from(theme: ColorTheme) -> Self {
        ColorThemeSetting::Custom(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_is_empty() {
        assert!(ColorThemeSetting::from("solarized").resolve().is_empty());
        assert!(!ColorThemeSetting::default().resolve().is_empty());
    }

    #[test]
    fn test_custom_theme_entries() {
        let theme = ColorTheme::new().with("axes.facecolor", "#eeeeee");
        let resolved = ColorThemeSetting::from(theme.clone()).resolve();
        assert_eq!(resolved, theme);
        assert_eq!(resolved.entries().count(), 1);
    }
}
