//! Abstract drawing primitives
//!
//! Pure data with no behavior beyond extent arithmetic. A layout call
//! produces a deterministic, replayable trace of these shapes; a rendering
//! backend (SVG, canvas, PDF, a test harness) consumes them without this
//! crate knowing which one.

use serde::Serialize;

/// A 2D point in the diagram coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal anchor of a text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Direction an arrowhead points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// Geometry of a connector path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PathData {
    /// Straight segments through the listed points.
    Line(Vec<Point>),
    /// One cubic curve.
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
}

/// One drawing instruction. Emitted in draw order; the list is append-only
/// during layout and never reordered afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// A labeled terminal box.
    Box {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        label: String,
        fill: String,
        stroke: String,
    },
    /// A free-floating caption. `x`/`y` is the text baseline position.
    TextLabel {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        anchor: TextAnchor,
    },
    /// A connector.
    Path { data: PathData, stroke: String },
    /// A small filled triangle marking loop-back direction.
    Arrowhead { x: f64, y: f64, direction: Direction },
    /// The dashed bounding frame drawn around a group's content.
    DashedFrame {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke: String,
    },
}

/// Min/max extents of a diagram or a slice of one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// A zero-sized box at the origin.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

/// The complete result of one layout call: the primitive trace plus the
/// extent the caller should size its surface to. Owned entirely by the
/// caller; the engine keeps nothing between calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub primitives: Vec<Primitive>,
    pub bounds: BoundingBox,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_dimensions() {
        let bb = BoundingBox::new(10.0, -15.0, 76.0, 15.0);
        assert_eq!(bb.width(), 66.0);
        assert_eq!(bb.height(), 30.0);
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b = BoundingBox::new(-10.0, 25.0, 30.0, 80.0);
        assert_eq!(a.union(&b), BoundingBox::new(-10.0, 0.0, 50.0, 80.0));
    }

    #[test]
    fn test_primitive_serializes_with_kind_tag() {
        let primitive = Primitive::Arrowhead {
            x: 1.0,
            y: 2.0,
            direction: Direction::Left,
        };
        let json = serde_json::to_string(&primitive).unwrap();
        assert!(json.contains("\"kind\":\"arrowhead\""));
        assert!(json.contains("\"direction\":\"left\""));
    }
}
