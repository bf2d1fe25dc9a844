use log::{debug, info};

/// Tags log lines with the layer that produced them.
pub struct LogManager {
    layer: &'static str,
}

impl LogManager {
    pub fn new(layer: &'static str) -> Self {
        Self { layer }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.layer, message);
    }

    pub fn trace(&self, message: &str) {
        debug!("[{}] {}", self.layer, message);
    }
}
