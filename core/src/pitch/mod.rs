pub mod draw;
pub mod geometry;

pub use draw::{plot_pitch, FieldColor, PitchStyle};
pub use geometry::{PitchGeometry, METERS_PER_YARD};
