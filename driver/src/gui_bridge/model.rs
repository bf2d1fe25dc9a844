use metricaviz::Figure;
use serde::{Deserialize, Serialize};

/// What the viewer polls: the latest figure and how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub revision: u64,
    pub figure: Option<Figure>,
    pub notes: Vec<String>,
}

impl VisualizationModel {
    pub fn new(figure: Figure, notes: Vec<String>) -> Self {
        Self {
            revision: 0,
            figure: Some(figure),
            notes,
        }
    }
}
