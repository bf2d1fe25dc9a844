pub mod event;
pub mod tracking;

pub use event::EventRecord;
pub use tracking::{PlayerColumns, TrackingRecord};
