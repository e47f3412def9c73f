//! Core types for the layout engine

use std::collections::HashSet;
use std::fmt;

/// A 2D point in the canvas coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by an offset
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned box; width and height may be negative for zones whose
/// corners are given in reverse order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box spanned by two opposite corners, taken as given
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Copy with the corners reordered so width and height are non-negative
    pub fn normalized(&self) -> BoundingBox {
        let x = self.x.min(self.right());
        let y = self.y.min(self.bottom());
        BoundingBox::new(x, y, self.width.abs(), self.height.abs())
    }

    /// Check if this bounding box intersects another (strict, edges touching do not count)
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
    }

    /// Check if this box lies entirely within another
    pub fn within(&self, outer: &BoundingBox) -> bool {
        let a = self.normalized();
        let b = outer.normalized();
        a.x >= b.x && a.y >= b.y && a.right() <= b.right() && a.bottom() <= b.bottom()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Bounding box of a placed zone label; (x, y) is the top-left corner after centering
pub type Footprint = BoundingBox;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A labeled rectangular region on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub label: String,
    /// First corner; `None` when the source token was missing or unparseable
    pub corner_a: Option<Point>,
    /// Opposite corner
    pub corner_b: Option<Point>,
    pub font_size: f64,
}

impl Zone {
    pub fn new(label: impl Into<String>, corner_a: Point, corner_b: Point, font_size: f64) -> Self {
        Self {
            label: label.into(),
            corner_a: Some(corner_a),
            corner_b: Some(corner_b),
            font_size,
        }
    }

    /// Both corners, if present
    pub fn corners(&self) -> Option<(Point, Point)> {
        Some((self.corner_a?, self.corner_b?))
    }
}

/// A coordinate with membership flags across profiles
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Marker {
    /// `None` when the source token was missing or unparseable
    pub position: Option<Point>,
    /// Keys of the profiles this marker belongs to
    pub members: HashSet<String>,
}

impl Marker {
    pub fn new(position: Point) -> Self {
        Self {
            position: Some(position),
            members: HashSet::new(),
        }
    }

    /// Add a profile membership
    pub fn with_member(mut self, key: impl Into<String>) -> Self {
        self.members.insert(key.into());
        self
    }

    pub fn is_member(&self, key: &str) -> bool {
        self.members.contains(key)
    }
}

/// A named, colored category that markers may belong to
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub key: String,
    pub color: Rgb,
    pub display_name: String,
}

impl Profile {
    pub fn new(key: impl Into<String>, color: Rgb, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            color,
            display_name: display_name.into(),
        }
    }
}

/// What a text block annotates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// Wrapped label centered in a zone, overlap-resolved
    ZoneLabel,
    /// Profile name next to a marker circle, not overlap-resolved
    Badge,
}

/// A block of text lines sharing one x position
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f64,
    /// Baseline of the first line
    pub y: f64,
    pub lines: Vec<String>,
    pub font_size: f64,
    pub role: TextRole,
}

/// A renderable drawing unit with resolved pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Image { href: String, bounds: BoundingBox },
    Rect { bounds: BoundingBox },
    Text(TextBlock),
    Circle { center: Point, radius: f64, color: Rgb },
}

/// Where a zone label started and where the overlap resolver left it
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    /// Index of the zone in the input
    pub zone: usize,
    pub initial: Point,
    pub resolved: Point,
    pub attempts: usize,
    /// False when the attempt budget ran out while still overlapping
    pub settled: bool,
}

/// Which input table a skipped record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Zone,
    Marker,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Zone => write!(f, "zone"),
            RecordKind::Marker => write!(f, "point"),
        }
    }
}

/// A record the engine left out because its geometry was absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub kind: RecordKind,
    pub index: usize,
}

/// The complete result of one layout pass
#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub canvas: Size,
    /// Drawing primitives in emission order
    pub primitives: Vec<Primitive>,
    /// Zone label footprints in placement order
    pub footprints: Vec<Footprint>,
    pub placements: Vec<LabelPlacement>,
    pub skipped: Vec<SkippedRecord>,
}

impl LayoutResult {
    pub fn new(canvas: Size) -> Self {
        Self {
            canvas,
            primitives: vec![],
            footprints: vec![],
            placements: vec![],
            skipped: vec![],
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = &BoundingBox> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Rect { bounds } => Some(bounds),
            _ => None,
        })
    }

    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(block) => Some(block),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point, f64, Rgb)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Circle {
                center,
                radius,
                color,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }
}
