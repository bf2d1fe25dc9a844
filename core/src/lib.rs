//! Pitch diagrams and tracking/event overlays for Metrica soccer data.
//!
//! Drawing calls append primitives to a [`figure::Figure`] in pitch
//! coordinates (meters, origin at the centre spot); [`render`] backends turn
//! the figure into SVG or paint it onto a GUI canvas.

pub mod figure;
pub mod math;
mod nan_serde;
pub mod overlay;
pub mod pitch;
pub mod prelude;
pub mod records;
pub mod render;
pub mod telemetry;

pub use figure::{Color, Figure};
pub use overlay::{plot_events, plot_events_threat, plot_frame};
pub use pitch::{plot_pitch, PitchStyle};
pub use prelude::{FieldDimensions, Overlay, VizError, VizResult};
