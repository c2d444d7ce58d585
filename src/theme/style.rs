//! Style sheets: figure size, fonts and tick geometry.

use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::PlotResult;

/// Names of the built-in style sheets.
pub const STYLE_NAMES: [&str; 5] = [
    "default",
    "publication small",
    "publication",
    "presentation",
    "ATLAS",
];

/// A mapping of rc keys to values.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet(Map<String, Value>);

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a built-in style sheet by its exact name.
    pub fn named(name: &str) -> Option<Self> {
        let value = match name {
            "default" => json!({
                "figure.figsize": [6, 4],
                "font.family": "serif",
                "axes.labelsize": 12,
                "xtick.labelsize": 10,
                "ytick.labelsize": 10,
                "legend.fontsize": 10,
                "axes.titlesize": 14,
                "xtick.direction": "out",
                "ytick.direction": "out",
                "xtick.major.size": 6,
                "ytick.major.size": 6,
                "xtick.minor.size": 3,
                "ytick.minor.size": 3,
                "xtick.major.width": 1.1,
                "ytick.major.width": 1.1,
                "xtick.minor.width": 0.75,
                "ytick.minor.width": 0.75,
            }),
            "publication small" => json!({
                "figure.figsize": [4, 3],
                "font.family": "Times New Roman",
                "axes.titlesize": 12,
                "axes.labelsize": 10,
                "xtick.labelsize": 8,
                "ytick.labelsize": 8,
                "legend.fontsize": 8,
                "xtick.top": true,
                "ytick.right": true,
                "xtick.direction": "in",
                "ytick.direction": "in",
                "xtick.major.size": 5,
                "ytick.major.size": 5,
                "xtick.minor.size": 3,
                "ytick.minor.size": 3,
                "xtick.major.width": 1,
                "ytick.major.width": 1,
                "xtick.minor.width": 0.75,
                "ytick.minor.width": 0.75,
                "text.usetex": true,
                "text.latex.preamble": "\\usepackage{amsmath}",
            }),
            "publication" => json!({
                "figure.figsize": [6, 4],
                "font.family": "Times New Roman",
                "axes.titlesize": 14,
                "axes.labelsize": 12,
                "xtick.labelsize": 10,
                "ytick.labelsize": 10,
                "legend.fontsize": 10,
                "xtick.top": true,
                "ytick.right": true,
                "xtick.direction": "in",
                "ytick.direction": "in",
                "xtick.major.size": 6,
                "ytick.major.size": 6,
                "xtick.minor.size": 3,
                "ytick.minor.size": 3,
                "xtick.major.width": 1.25,
                "ytick.major.width": 1.25,
                "xtick.minor.width": 0.8,
                "ytick.minor.width": 0.8,
            }),
            "presentation" => json!({
                "figure.figsize": [10, 6],
                "axes.titlesize": 18,
                "axes.labelsize": 16,
                "lines.linewidth": 3,
                "lines.markersize": 8,
            }),
            "ATLAS" => json!({}),
            _ => return None,
        };
        match value {
            Value::Object(map) => Some(StyleSheet(map)),
            _ => None,
        }
    }

    /// Load a custom style sheet from a JSON object of rc entries.
    pub fn load(path: impl AsRef<Path>) -> PlotResult<Self> {
        super::load_rc_map(path.as_ref())
    }

    /// Add or replace one entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for StyleSheet {
    fn from(map: Map<String, Value>) -> Self {
        StyleSheet(map)
    }
}

/// A style chosen by name or given as a custom sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSetting {
    Named(String),
    Custom(StyleSheet),
}

impl StyleSetting {
    /// The name used for label placement decisions; `"custom"` for custom sheets.
    pub fn name(&self) -> &str {
        match self {
            StyleSetting::Named(name) => name,
            StyleSetting::Custom(_) => "custom",
        }
    }

    /// Publication and ATLAS styles right/top-align the axis labels.
    pub fn aligns_labels_to_end(&self) -> bool {
        let name = self.name();
        name.contains("publication") || name.contains("ATLAS")
    }

    /// The style sheet to apply. Unknown names fall back to `default`.
    pub fn resolve(&self) -> StyleSheet {
        match self {
            StyleSetting::Named(name) => StyleSheet::named(name).unwrap_or_else(|| {
                warn!(
                    "unknown style '{}' (available: {}); using 'default'",
                    name,
                    STYLE_NAMES.join(", ")
                );
                StyleSheet::named("default").unwrap_or_default()
            }),
            StyleSetting::Custom(sheet) => sheet.clone(),
        }
    }
}

impl Default for StyleSetting {
    fn default() -> Self {
        StyleSetting::Named("default".to_string())
    }
}

impl From<&str> for StyleSetting {
    fn from(name: &str) -> Self {
        StyleSetting::Named(name.to_string())
    }
}

impl From<StyleSheet> for StyleSetting {
    fn from(sheet: StyleSheet) -> Self {
        StyleSetting::Custom(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_all_presets_exist() {
        for name in STYLE_NAMES {
            assert!(StyleSheet::named(name).is_some(), "{}", name);
        }
        assert!(StyleSheet::named("ATLAS").unwrap().is_empty());
        assert_eq!(StyleSheet::named("presentation").unwrap().len(), 5);
    }

    #[test]
    fn test_unknown_style_falls_back_to_default() {
        let sheet = StyleSetting::from("glossy").resolve();
        assert_eq!(sheet, StyleSheet::named("default").unwrap());
    }

    #[test]
    fn test_label_alignment_by_name() {
        assert!(StyleSetting::from("publication small").aligns_labels_to_end());
        assert!(StyleSetting::from("ATLAS").aligns_labels_to_end());
        assert!(!StyleSetting::from("presentation").aligns_labels_to_end());
        assert!(!StyleSetting::Custom(StyleSheet::new()).aligns_labels_to_end());
    }

    #[test]
    fn test_load_custom_sheet() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"figure.figsize": [5, 5], "axes.labelsize": 9}}"#).unwrap();
        let sheet = StyleSheet::load(file.path()).unwrap();
        assert_eq!(sheet.get("axes.labelsize"), Some(&json!(9)));
        assert!(StyleSheet::load("/nonexistent/style.json").is_err());
    }
}
