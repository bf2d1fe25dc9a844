use crate::figure::color::Color;
use crate::prelude::{VizError, VizResult};
use serde::{Deserialize, Serialize};

/// A position in data coordinates (meters for pitch figures).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(with = "crate::nan_serde")]
    pub x: f64,
    #[serde(with = "crate::nan_serde")]
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Marker glyphs, keyed by their matplotlib style character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Point,
    Square,
    Diamond,
    TriangleUp,
    TriangleDown,
    Plus,
    Cross,
    Star,
}

impl MarkerShape {
    pub fn from_style(style: char) -> VizResult<Self> {
        let shape = match style {
            'o' => MarkerShape::Circle,
            '.' => MarkerShape::Point,
            's' => MarkerShape::Square,
            'D' | 'd' => MarkerShape::Diamond,
            '^' => MarkerShape::TriangleUp,
            'v' => MarkerShape::TriangleDown,
            '+' => MarkerShape::Plus,
            'x' => MarkerShape::Cross,
            '*' => MarkerShape::Star,
            other => return Err(VizError::InvalidMarker(other)),
        };
        Ok(shape)
    }

    /// Glyphs drawn as outlines rather than filled areas.
    pub fn is_stroked(self) -> bool {
        matches!(self, MarkerShape::Plus | MarkerShape::Cross)
    }
}

/// Connected line through `points`; a non-finite point breaks the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub color: Color,
    /// Stroke width in points.
    pub width: f64,
}

/// Unconnected markers sharing one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Markers {
    pub points: Vec<Point>,
    pub shape: MarkerShape,
    pub color: Color,
    /// Marker diameter in points.
    pub size: f64,
}

/// Velocity field: one arrow per origin, length scaled in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiver {
    pub origins: Vec<Point>,
    pub vectors: Vec<Point>,
    pub color: Color,
    /// Data units per inch of arrow length.
    pub units_per_inch: f64,
    /// Shaft width as a fraction of the axes width.
    pub shaft_width: f64,
    /// Head length in multiples of the shaft width.
    pub head_length: f64,
    /// Head width in multiples of the shaft width.
    pub head_width: f64,
}

impl Quiver {
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Annotation arrow between two data points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    /// Shaft width in points.
    pub shaft_width: f64,
    /// Head length in points.
    pub head_length: f64,
    /// Head width in points.
    pub head_width: f64,
    /// Whether the arrow is hidden when it leaves the axes.
    pub clip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub at: Point,
    pub content: String,
    pub color: Color,
    /// Font size in points.
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Polyline(Polyline),
    Markers(Markers),
    Quiver(Quiver),
    Arrow(Arrow),
    Text(Text),
}
