//! Retained drawing surface that overlays append primitives to.

pub mod color;
pub mod primitive;

pub use color::Color;
pub use primitive::{Arrow, MarkerShape, Markers, Point, Polyline, Primitive, Quiver, Text};

use serde::{Deserialize, Serialize};

/// A single-axes figure: page size, axes styling and the primitives drawn so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Page size in inches (width, height).
    pub size_inches: (f64, f64),
    /// Axes background; `None` leaves the page background.
    pub face_color: Option<Color>,
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
    pub show_ticks: bool,
    pub primitives: Vec<Primitive>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(12.0, 8.0)
    }
}

impl Figure {
    pub fn new(width_inches: f64, height_inches: f64) -> Self {
        Self {
            size_inches: (width_inches, height_inches),
            face_color: None,
            x_limits: (0.0, 1.0),
            y_limits: (0.0, 1.0),
            show_ticks: true,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Line through the given points.
    pub fn plot_line<P: Into<Point>>(
        &mut self,
        points: impl IntoIterator<Item = P>,
        color: Color,
        width: f64,
    ) {
        self.push(Primitive::Polyline(Polyline {
            points: points.into_iter().map(Into::into).collect(),
            color,
            width,
        }));
    }

    /// Markers with a diameter of `size` points.
    pub fn plot_markers<P: Into<Point>>(
        &mut self,
        points: impl IntoIterator<Item = P>,
        shape: MarkerShape,
        color: Color,
        size: f64,
    ) {
        self.push(Primitive::Markers(Markers {
            points: points.into_iter().map(Into::into).collect(),
            shape,
            color,
            size,
        }));
    }

    /// Circle marker sized by area in points², as scatter plots are.
    pub fn scatter(&mut self, at: Point, color: Color, area: f64) {
        self.plot_markers([at], MarkerShape::Circle, color, area.max(0.0).sqrt());
    }

    pub fn text(&mut self, at: Point, content: impl Into<String>, color: Color, font_size: f64) {
        self.push(Primitive::Text(Text {
            at,
            content: content.into(),
            color,
            font_size,
        }));
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Polyline(line) => Some(line),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Markers> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Markers(markers) => Some(markers),
            _ => None,
        })
    }

    pub fn quivers(&self) -> impl Iterator<Item = &Quiver> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Quiver(quiver) => Some(quiver),
            _ => None,
        })
    }

    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Arrow(arrow) => Some(arrow),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
