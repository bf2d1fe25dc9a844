use std::sync::Mutex;

/// Counts what backends drew and what they skipped for non-finite input.
pub struct RenderMetrics {
    inner: Mutex<Counts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub figures: usize,
    pub drawn: usize,
    pub skipped: usize,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counts::default()),
        }
    }

    pub fn record_figure(&self) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.figures += 1;
        }
    }

    pub fn record_drawn(&self, items: usize) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.drawn += items;
        }
    }

    pub fn record_skipped(&self, items: usize) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.skipped += items;
        }
    }

    pub fn snapshot(&self) -> Counts {
        self.inner
            .lock()
            .map(|counts| *counts)
            .unwrap_or_default()
    }
}

impl Default for RenderMetrics {
    fn default() -> Self {
        Self::new()
    }
}
