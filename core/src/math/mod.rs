pub mod arc;

pub use arc::ArcHelper;
