//! Configuration for the layout engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a layout configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read layout config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse layout config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Fixed metrics for the layout walk.
///
/// All lengths share one abstract unit; the rendering backend decides what
/// that unit maps to on its surface. `char_width` is the per-character text
/// advance at `font_size` and scales linearly for other sizes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height of a terminal box.
    pub box_height: f64,
    /// Text advance per character at `font_size`.
    pub char_width: f64,
    /// Horizontal padding inside a terminal box.
    pub box_padding: f64,
    /// Horizontal spacing between consecutive elements.
    pub element_spacing: f64,
    /// Corner radius of terminal boxes.
    pub corner_radius: f64,
    /// Font size for box labels.
    pub font_size: f64,
    /// Font size for captions (class headings, quantifier text, group markers).
    pub caption_font_size: f64,
    /// Vertical gap between a caption baseline and what it captions.
    pub caption_gap: f64,
    /// Horizontal room reserved for branch divergence and convergence.
    pub branch_offset: f64,
    /// Vertical pitch between alternation branches.
    pub branch_spacing: f64,
    /// Height of the bypass curve above the main line.
    pub bypass_height: f64,
    /// Depth of the loop-back curve below the main line.
    pub loop_height: f64,
    /// Horizontal inset of an item wrapped by a bypass or loop.
    pub loop_inset: f64,
    /// Gap between boxes inside a character class row.
    pub class_item_gap: f64,
    /// Padding between a group's content and its dashed frame.
    pub group_padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_height: 30.0,
            char_width: 8.0,
            box_padding: 10.0,
            element_spacing: 10.0,
            corner_radius: 3.0,
            font_size: 14.0,
            caption_font_size: 12.0,
            caption_gap: 8.0,
            branch_offset: 20.0,
            branch_spacing: 50.0,
            bypass_height: 25.0,
            loop_height: 25.0,
            loop_inset: 10.0,
            class_item_gap: 5.0,
            group_padding: 10.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file. Missing keys keep defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string. Missing keys keep defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the terminal box height
    pub fn with_box_height(mut self, height: f64) -> Self {
        self.box_height = height;
        self
    }

    /// Set the spacing between elements
    pub fn with_element_spacing(mut self, spacing: f64) -> Self {
        self.element_spacing = spacing;
        self
    }

    /// Set the vertical pitch between alternation branches
    pub fn with_branch_spacing(mut self, spacing: f64) -> Self {
        self.branch_spacing = spacing;
        self
    }

    /// Set the box label font size
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the padding between group content and its frame
    pub fn with_group_padding(mut self, padding: f64) -> Self {
        self.group_padding = padding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.box_height, 30.0);
        assert_eq!(config.char_width, 8.0);
        assert_eq!(config.element_spacing, 10.0);
        assert_eq!(config.branch_spacing, 50.0);
        assert_eq!(config.loop_height, 25.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_box_height(40.0)
            .with_element_spacing(16.0);

        assert_eq!(config.box_height, 40.0);
        assert_eq!(config.element_spacing, 16.0);
    }

    #[test]
    fn test_from_toml_partial_override() {
        let config = LayoutConfig::from_toml_str("box_height = 44.0\nfont_size = 18.0\n")
            .expect("should parse");
        assert_eq!(config.box_height, 44.0);
        assert_eq!(config.font_size, 18.0);
        // Everything else keeps its default.
        assert_eq!(config.element_spacing, 10.0);
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(LayoutConfig::from_toml_str("box_height = \"tall\"").is_err());
    }
}
