//! Color theme for diagram primitives
//!
//! Primitives carry their fill and stroke as plain strings so that any
//! rendering backend can interpret them. The theme decides those strings
//! once, at layout time, and can be loaded from a TOML file for callers
//! that want a different palette.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("failed to read theme file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse theme TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Colors applied to emitted primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Optional name for the theme
    pub name: Option<String>,
    /// Fill of terminal boxes
    pub box_fill: String,
    /// Stroke of terminal boxes
    pub box_stroke: String,
    /// Stroke of connector paths
    pub line_stroke: String,
    /// Stroke of group frames
    pub frame_stroke: String,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: TomlColors,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

#[derive(Deserialize, Default)]
struct TomlColors {
    #[serde(rename = "box-fill")]
    box_fill: Option<String>,
    #[serde(rename = "box-stroke")]
    box_stroke: Option<String>,
    #[serde(rename = "line")]
    line: Option<String>,
    #[serde(rename = "frame")]
    frame: Option<String>,
}

const DEFAULT_BOX_FILL: &str = "#bada55";
const DEFAULT_BOX_STROKE: &str = "#000000";
const DEFAULT_LINE_STROKE: &str = "#000000";
const DEFAULT_FRAME_STROKE: &str = "#908c83";

impl Theme {
    /// Load a theme from a TOML file. Missing colors keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a theme from a TOML string. Missing colors keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;
        Ok(Theme {
            name: parsed.metadata.and_then(|m| m.name),
            box_fill: parsed
                .colors
                .box_fill
                .unwrap_or_else(|| DEFAULT_BOX_FILL.to_string()),
            box_stroke: parsed
                .colors
                .box_stroke
                .unwrap_or_else(|| DEFAULT_BOX_STROKE.to_string()),
            line_stroke: parsed
                .colors
                .line
                .unwrap_or_else(|| DEFAULT_LINE_STROKE.to_string()),
            frame_stroke: parsed
                .colors
                .frame
                .unwrap_or_else(|| DEFAULT_FRAME_STROKE.to_string()),
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: None,
            box_fill: DEFAULT_BOX_FILL.to_string(),
            box_stroke: DEFAULT_BOX_STROKE.to_string(),
            line_stroke: DEFAULT_LINE_STROKE.to_string(),
            frame_stroke: DEFAULT_FRAME_STROKE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.box_fill, "#bada55");
        assert_eq!(theme.line_stroke, "#000000");
        assert_eq!(theme.name, None);
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Night"

[colors]
box-fill = "#2b2b2b"
line = "#e0e0e0"
"##;
        let theme = Theme::from_toml_str(toml_str).expect("should parse");
        assert_eq!(theme.name, Some("Night".to_string()));
        assert_eq!(theme.box_fill, "#2b2b2b");
        assert_eq!(theme.line_stroke, "#e0e0e0");
        // Unspecified colors fall back to defaults.
        assert_eq!(theme.frame_stroke, "#908c83");
    }

    #[test]
    fn test_parse_toml_without_colors() {
        let theme = Theme::from_toml_str("").expect("should parse");
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(Theme::from_toml_str("this is not valid toml {{{{").is_err());
    }
}
