use crate::figure::Figure;
use crate::pitch::{plot_pitch, PitchStyle};
use serde::{Deserialize, Serialize};

/// Length and width of the field in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDimensions {
    pub length: f64,
    pub width: f64,
}

impl FieldDimensions {
    pub const fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }
}

impl Default for FieldDimensions {
    fn default() -> Self {
        Self::new(106.0, 68.0)
    }
}

impl From<(f64, f64)> for FieldDimensions {
    fn from((length, width): (f64, f64)) -> Self {
        Self::new(length, width)
    }
}

/// Common error type for drawing operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum VizError {
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("{x} x columns but {y} y columns")]
    ColumnMismatch { x: usize, y: usize },
    #[error("event row {row}: missing field {field}")]
    MissingField { row: usize, field: &'static str },
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("invalid marker style: {0:?}")]
    InvalidMarker(char),
}

pub type VizResult<T> = Result<T, VizError>;

/// A layer that draws on top of a pitch figure.
pub trait Overlay {
    /// Field size used when no figure is supplied.
    fn field_dimensions(&self) -> FieldDimensions;

    fn draw(&self, figure: &mut Figure) -> VizResult<()>;

    /// Draws onto `figure`, or onto a fresh default pitch when `None`.
    fn render(&self, figure: Option<Figure>) -> VizResult<Figure> {
        let mut figure = figure.unwrap_or_else(|| {
            plot_pitch(&PitchStyle {
                dimensions: self.field_dimensions(),
                ..Default::default()
            })
        });
        self.draw(&mut figure)?;
        Ok(figure)
    }
}
