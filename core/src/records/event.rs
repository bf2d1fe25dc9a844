use crate::figure::Point;
use serde::{Deserialize, Serialize};

/// One row of Metrica event data, with the analytics columns the
/// annotation layers read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Team", default)]
    pub team: Option<String>,
    #[serde(rename = "Type", default)]
    pub event_type: Option<String>,
    #[serde(rename = "Subtype", default)]
    pub subtype: Option<String>,
    #[serde(rename = "Period", default)]
    pub period: Option<u8>,
    #[serde(rename = "Start Frame", default)]
    pub start_frame: Option<u64>,
    #[serde(rename = "Start Time [s]", default)]
    pub start_time: Option<f64>,
    #[serde(rename = "End Frame", default)]
    pub end_frame: Option<u64>,
    #[serde(rename = "End Time [s]", default)]
    pub end_time: Option<f64>,
    #[serde(rename = "From", default)]
    pub from: Option<String>,
    #[serde(rename = "To", default)]
    pub to: Option<String>,
    #[serde(rename = "Start X", with = "crate::nan_serde", default = "nan")]
    pub start_x: f64,
    #[serde(rename = "Start Y", with = "crate::nan_serde", default = "nan")]
    pub start_y: f64,
    #[serde(rename = "End X", with = "crate::nan_serde", default = "nan")]
    pub end_x: f64,
    #[serde(rename = "End Y", with = "crate::nan_serde", default = "nan")]
    pub end_y: f64,
    #[serde(rename = "Type_of_Pass", default)]
    pub type_of_pass: Option<String>,
    #[serde(rename = "possession_score", default)]
    pub possession_score: Option<f64>,
    #[serde(rename = "scoring_score", default)]
    pub scoring_score: Option<f64>,
    #[serde(rename = "Improved_Impact_Score", default)]
    pub improved_impact_score: Option<f64>,
    #[serde(rename = "xThreat_Pass", default)]
    pub xthreat_pass: Option<f64>,
}

fn nan() -> f64 {
    f64::NAN
}

impl EventRecord {
    /// Event of `event_type` from `start` to `end`, every other field empty.
    pub fn new(event_type: impl Into<String>, start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            team: None,
            event_type: Some(event_type.into()),
            subtype: None,
            period: None,
            start_frame: None,
            start_time: None,
            end_frame: None,
            end_time: None,
            from: None,
            to: None,
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
            type_of_pass: None,
            possession_score: None,
            scoring_score: None,
            improved_impact_score: None,
            xthreat_pass: None,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    pub fn is_pass(&self) -> bool {
        self.event_type.as_deref() == Some("PASS")
    }
}
