//! Diagram layout engine
//!
//! Walks a parsed pattern tree once, left to right, emitting drawing
//! primitives at a moving cursor. Each node handler receives the cursor,
//! appends what it draws, and returns the cursor advanced past it, so the
//! whole layout is sequential recursion with no separate measure pass. The
//! cursor is threaded as a value and the accumulator is local to one call,
//! which keeps `layout` referentially transparent and safe to invoke
//! concurrently.

use crate::parser::ast::{ClassItem, GroupKind, Node};
use crate::theme::Theme;

use super::config::LayoutConfig;
use super::primitives::{
    BoundingBox, Diagram, Direction, PathData, Point, Primitive, TextAnchor,
};

/// Lay out a pattern tree with the default configuration and theme.
pub fn layout(node: &Node) -> Diagram {
    layout_with(node, &LayoutConfig::default(), &Theme::default())
}

/// Lay out a pattern tree with an explicit configuration and theme.
///
/// Never fails: every tree the parser produces is well formed, and every
/// node variant has a handler.
pub fn layout_with(node: &Node, config: &LayoutConfig, theme: &Theme) -> Diagram {
    let mut engine = Engine {
        config,
        theme,
        primitives: Vec::new(),
    };
    engine.node(node, Point::new(0.0, 0.0));
    let bounds = engine.extent_from(0).unwrap_or_else(BoundingBox::zero);
    Diagram {
        primitives: engine.primitives,
        bounds,
    }
}

struct Engine<'a> {
    config: &'a LayoutConfig,
    theme: &'a Theme,
    primitives: Vec<Primitive>,
}

impl Engine<'_> {
    /// Render one node at `cursor` and return the cursor for the next
    /// sibling. The x coordinate never decreases across a call.
    fn node(&mut self, node: &Node, cursor: Point) -> Point {
        match node {
            Node::Literal(c) => self.terminal(&c.to_string(), cursor),
            Node::Escape(text) => self.terminal(escape_label(text), cursor),
            Node::AnyChar => self.terminal("any character", cursor),
            Node::AnchorStart => self.terminal("start of line", cursor),
            Node::AnchorEnd => self.terminal("end of line", cursor),
            Node::CharClass { items, negated } => self.char_class(items, *negated, cursor),
            Node::Sequence(items) => {
                let mut cursor = cursor;
                for item in items {
                    cursor = self.node(item, cursor);
                }
                cursor
            }
            Node::Choice(alternatives) => self.choice(alternatives, cursor),
            Node::Optional(item) => self.wrapped(item, cursor, true, false),
            Node::ZeroOrMore(item) => self.wrapped(item, cursor, true, true),
            Node::OneOrMore(item) => self.wrapped(item, cursor, false, true),
            Node::Repeat { item, quantifier } => self.repeat(item, quantifier, cursor),
            Node::Group { content, kind } => self.group(content, *kind, cursor),
            Node::Empty => cursor,
        }
    }

    /// One labeled box, vertically centered on the main line.
    fn terminal(&mut self, label: &str, cursor: Point) -> Point {
        let cfg = self.config;
        let width = self.box_width(label);
        self.primitives.push(Primitive::Box {
            x: cursor.x,
            y: cursor.y - cfg.box_height / 2.0,
            width,
            height: cfg.box_height,
            corner_radius: cfg.corner_radius,
            label: label.to_string(),
            fill: self.theme.box_fill.clone(),
            stroke: self.theme.box_stroke.clone(),
        });
        Point::new(cursor.x + width + cfg.element_spacing, cursor.y)
    }

    /// `One of:` / `None of:` caption above a row of member boxes.
    fn char_class(&mut self, items: &[ClassItem], negated: bool, cursor: Point) -> Point {
        let cfg = self.config;
        let caption = if negated { "None of:" } else { "One of:" };
        let caption_width = self.text_width(caption, cfg.caption_font_size);
        self.primitives.push(Primitive::TextLabel {
            x: cursor.x,
            y: cursor.y - cfg.box_height / 2.0 - cfg.caption_gap,
            text: caption.to_string(),
            font_size: cfg.caption_font_size,
            anchor: TextAnchor::Start,
        });

        let mut x = cursor.x;
        for item in items {
            let label = class_item_label(item);
            let width = self.box_width(&label);
            self.primitives.push(Primitive::Box {
                x,
                y: cursor.y - cfg.box_height / 2.0,
                width,
                height: cfg.box_height,
                corner_radius: cfg.corner_radius,
                label,
                fill: self.theme.box_fill.clone(),
                stroke: self.theme.box_stroke.clone(),
            });
            x += width + cfg.class_item_gap;
        }
        let row_width = if items.is_empty() {
            0.0
        } else {
            x - cursor.x - cfg.class_item_gap
        };

        let advance = row_width.max(caption_width);
        Point::new(cursor.x + advance + cfg.element_spacing, cursor.y)
    }

    /// Branch fan-out. Alternatives stack vertically around the main line,
    /// index order top to bottom, and are joined to the shared entry and
    /// exit points at both ends. The cursor advances past the widest
    /// alternative plus the divergence room on each side.
    fn choice(&mut self, alternatives: &[Node], cursor: Point) -> Point {
        let cfg = self.config;
        let count = alternatives.len();
        let branch_x = cursor.x + cfg.branch_offset;

        let mut ends: Vec<(Point, f64)> = Vec::with_capacity(count);
        for (index, alternative) in alternatives.iter().enumerate() {
            let offset = (index as f64 - (count as f64 - 1.0) / 2.0) * cfg.branch_spacing;
            let end = self.node(alternative, Point::new(branch_x, cursor.y + offset));
            ends.push((end, offset));
        }

        let join_x = ends.iter().map(|(end, _)| end.x).fold(branch_x, f64::max);
        let exit = Point::new(join_x + cfg.branch_offset, cursor.y);
        for (end, offset) in &ends {
            let branch_y = cursor.y + offset;
            self.connect(cursor, Point::new(branch_x, branch_y));
            if end.x < join_x {
                // Short alternatives get a straight run out to the join column.
                self.primitives.push(Primitive::Path {
                    data: PathData::Line(vec![
                        Point::new(end.x, branch_y),
                        Point::new(join_x, branch_y),
                    ]),
                    stroke: self.theme.line_stroke.clone(),
                });
            }
            self.connect(Point::new(join_x, branch_y), exit);
        }

        Point::new(exit.x + cfg.element_spacing, cursor.y)
    }

    /// Bypass and/or loop-back around one wrapped item: `?` draws only the
    /// bypass, `*` both, `+` only the loop.
    fn wrapped(&mut self, item: &Node, cursor: Point, bypass: bool, loop_back: bool) -> Point {
        let cfg = self.config;
        let entry = cursor;
        let inner = self.node(item, Point::new(cursor.x + cfg.loop_inset, cursor.y));
        let exit = Point::new(inner.x, cursor.y);

        if bypass {
            self.primitives.push(Primitive::Path {
                data: PathData::Cubic {
                    from: entry,
                    ctrl1: Point::new(entry.x, entry.y - cfg.bypass_height),
                    ctrl2: Point::new(exit.x, exit.y - cfg.bypass_height),
                    to: exit,
                },
                stroke: self.theme.line_stroke.clone(),
            });
        }
        if loop_back {
            self.primitives.push(Primitive::Path {
                data: PathData::Cubic {
                    from: exit,
                    ctrl1: Point::new(exit.x, exit.y + cfg.loop_height),
                    ctrl2: Point::new(entry.x, entry.y + cfg.loop_height),
                    to: entry,
                },
                stroke: self.theme.line_stroke.clone(),
            });
            self.primitives.push(Primitive::Arrowhead {
                x: (entry.x + exit.x) / 2.0,
                y: cursor.y + cfg.loop_height,
                direction: Direction::Left,
            });
        }

        Point::new(exit.x + cfg.loop_inset, cursor.y)
    }

    /// Quantifier text drawn verbatim above the item. The repetition count
    /// is informational only and is never expanded structurally.
    fn repeat(&mut self, item: &Node, quantifier: &str, cursor: Point) -> Point {
        let cfg = self.config;
        let before = self.primitives.len();
        let end = self.node(item, cursor);
        let extent = self.extent_from(before).unwrap_or_else(|| {
            BoundingBox::new(cursor.x, cursor.y, cursor.x, cursor.y)
        });
        self.primitives.push(Primitive::TextLabel {
            x: (extent.min_x + extent.max_x) / 2.0,
            y: extent.min_y - cfg.caption_gap,
            text: quantifier.to_string(),
            font_size: cfg.caption_font_size,
            anchor: TextAnchor::Middle,
        });
        end
    }

    /// Group content indented by the frame padding, then the dashed frame
    /// around its extent, then the kind marker above the frame (capturing
    /// groups carry none).
    fn group(&mut self, content: &Node, kind: GroupKind, cursor: Point) -> Point {
        let cfg = self.config;
        let before = self.primitives.len();
        let inner = Point::new(cursor.x + cfg.group_padding, cursor.y);
        self.node(content, inner);

        let half = cfg.box_height / 2.0;
        let extent = self.extent_from(before).unwrap_or_else(|| {
            // Empty content still gets a frame tall enough for the main line.
            BoundingBox::new(inner.x, cursor.y - half, inner.x, cursor.y + half)
        });
        let frame = BoundingBox::new(
            extent.min_x - cfg.group_padding,
            extent.min_y - cfg.group_padding,
            extent.max_x + cfg.group_padding,
            extent.max_y + cfg.group_padding,
        );
        self.primitives.push(Primitive::DashedFrame {
            x: frame.min_x,
            y: frame.min_y,
            width: frame.width(),
            height: frame.height(),
            stroke: self.theme.frame_stroke.clone(),
        });

        let marker = kind.marker();
        if !marker.is_empty() {
            self.primitives.push(Primitive::TextLabel {
                x: frame.min_x,
                y: frame.min_y - cfg.caption_gap,
                text: marker.to_string(),
                font_size: cfg.caption_font_size,
                anchor: TextAnchor::Start,
            });
        }

        Point::new(frame.max_x + cfg.element_spacing, cursor.y)
    }

    /// Straight line when both endpoints share a y, otherwise a cubic whose
    /// control points are pulled toward the horizontal midpoint.
    fn connect(&mut self, from: Point, to: Point) {
        let data = if from.y == to.y {
            PathData::Line(vec![from, to])
        } else {
            let mid = (from.x + to.x) / 2.0;
            PathData::Cubic {
                from,
                ctrl1: Point::new(mid, from.y),
                ctrl2: Point::new(mid, to.y),
                to,
            }
        };
        self.primitives.push(Primitive::Path {
            data,
            stroke: self.theme.line_stroke.clone(),
        });
    }

    fn box_width(&self, label: &str) -> f64 {
        self.text_width(label, self.config.font_size) + 2.0 * self.config.box_padding
    }

    /// Approximate text width from the configured per-character advance.
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * self.config.char_width * (font_size / self.config.font_size)
    }

    /// Min/max extent over the boxes and text labels emitted at or after
    /// `from`. Paths and arrowheads stay within this envelope and are
    /// ignored; so are frames, whose own extent derives from it.
    fn extent_from(&self, from: usize) -> Option<BoundingBox> {
        let mut extent: Option<BoundingBox> = None;
        for primitive in &self.primitives[from..] {
            let next = match primitive {
                Primitive::Box {
                    x, y, width, height, ..
                } => BoundingBox::new(*x, *y, x + width, y + height),
                Primitive::TextLabel {
                    x,
                    y,
                    text,
                    font_size,
                    anchor,
                } => {
                    let width = self.text_width(text, *font_size);
                    let (min_x, max_x) = match anchor {
                        TextAnchor::Start => (*x, x + width),
                        TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
                        TextAnchor::End => (x - width, *x),
                    };
                    // Text extends above its baseline position.
                    BoundingBox::new(min_x, y - font_size, max_x, *y)
                }
                Primitive::Path { .. }
                | Primitive::Arrowhead { .. }
                | Primitive::DashedFrame { .. } => continue,
            };
            extent = Some(match extent {
                Some(current) => current.union(&next),
                None => next,
            });
        }
        extent
    }
}

/// Human-readable label for an escape's source text. Unrecognized escapes
/// keep their verbatim text.
fn escape_label(text: &str) -> &str {
    match text {
        "\\d" => "digit 0-9",
        "\\D" => "non-digit",
        "\\w" => "word character",
        "\\W" => "non-word character",
        "\\s" => "whitespace",
        "\\S" => "non-whitespace",
        "\\b" => "word boundary",
        "\\B" => "non-word boundary",
        "\\n" => "newline",
        "\\r" => "carriage return",
        "\\t" => "tab",
        "\\f" => "form feed",
        "\\v" => "vertical tab",
        "\\0" => "null",
        other => other,
    }
}

fn class_item_label(item: &ClassItem) -> String {
    match item {
        ClassItem::Literal(c) => c.to_string(),
        ClassItem::Escape(text) => escape_label(text).to_string(),
        ClassItem::Range(lo, hi) => format!("{lo}-{hi}"),
    }
}
