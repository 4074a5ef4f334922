//! Regex Railroad - railroad (syntax) diagrams for regular expressions
//!
//! This library parses a regular-expression pattern into a syntax tree and
//! lays the tree out as a railroad diagram: a flat list of abstract drawing
//! primitives (boxes, captions, routed paths, arrowheads, dashed frames)
//! plus a bounding box. It never touches a concrete graphics API; callers
//! replay the primitive trace onto whatever surface they own.
//!
//! # Example
//!
//! ```rust
//! use regex_railroad::diagram;
//!
//! let diagram = diagram("colou?r").unwrap();
//! assert!(!diagram.primitives.is_empty());
//! assert!(diagram.bounds.width() > 0.0);
//! ```

pub mod error;
pub mod layout;
pub mod parser;
pub mod theme;

pub use error::SyntaxError;
pub use layout::{
    layout, layout_with, BoundingBox, Diagram, Direction, LayoutConfig, PathData, Point,
    Primitive, TextAnchor,
};
pub use parser::{parse, ClassItem, GroupKind, Node};
pub use theme::Theme;

/// Configuration for the complete diagram pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout metrics
    pub layout: LayoutConfig,
    /// Colors applied to primitives
    pub theme: Theme,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// Parse a pattern and lay it out with default configuration.
///
/// This is the main entry point for the library. Both stages are pure
/// functions of their input: no state survives the call and concurrent
/// invocations share nothing.
///
/// # Errors
///
/// Returns the parser's [`SyntaxError`] when the pattern is not a legal
/// sentence of the supported grammar. Layout itself never fails.
pub fn diagram(pattern: &str) -> Result<Diagram, SyntaxError> {
    diagram_with_config(pattern, RenderConfig::default())
}

/// Parse a pattern and lay it out with custom configuration.
///
/// # Example
///
/// ```rust
/// use regex_railroad::{diagram_with_config, LayoutConfig, RenderConfig};
///
/// let config = RenderConfig::new()
///     .with_layout(LayoutConfig::default().with_element_spacing(16.0));
///
/// let diagram = diagram_with_config("ab", config).unwrap();
/// assert_eq!(diagram.primitives.len(), 2);
/// ```
pub fn diagram_with_config(pattern: &str, config: RenderConfig) -> Result<Diagram, SyntaxError> {
    let node = parse(pattern)?;
    Ok(layout_with(&node, &config.layout, &config.theme))
}
