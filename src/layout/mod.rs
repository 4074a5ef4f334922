//! Layout engine for turning a pattern tree into a railroad diagram
//!
//! This module walks a parsed tree and produces a `Diagram`: an ordered
//! list of abstract drawing primitives plus the bounding box a rendering
//! backend should size its surface to.

pub mod config;
pub mod engine;
pub mod primitives;

pub use config::{ConfigError, LayoutConfig};
pub use engine::{layout, layout_with};
pub use primitives::{
    BoundingBox, Diagram, Direction, PathData, Point, Primitive, TextAnchor,
};
