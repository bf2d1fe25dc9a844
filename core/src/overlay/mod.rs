pub mod annotation;
pub mod events;
pub mod frame;

pub use annotation::AnnotationStyle;
pub use events::{plot_events, plot_events_threat, EventOptions, EventOverlay, Indicator};
pub use frame::{plot_frame, FrameOptions, FrameOverlay};
