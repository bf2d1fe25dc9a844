use anyhow::Context;
use metricaviz::records::{EventRecord, TrackingRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Home and away rows for the same instant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingFrame {
    pub home: TrackingRecord,
    pub away: TrackingRecord,
}

/// Everything one render draws on top of the pitch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchInput {
    pub frame: Option<TrackingFrame>,
    pub events: Vec<EventRecord>,
}

impl MatchInput {
    pub fn load(tracking: Option<&Path>, events: Option<&Path>) -> anyhow::Result<Self> {
        let frame = tracking.map(load_frame).transpose()?;
        let events = events.map(load_events).transpose()?.unwrap_or_default();
        Ok(Self { frame, events })
    }
}

pub fn load_frame(path: &Path) -> anyhow::Result<TrackingFrame> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading tracking frame {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing tracking frame {}", path.display()))
}

pub fn load_events(path: &Path) -> anyhow::Result<Vec<EventRecord>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading events {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing events {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> tempfile::TempPath {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(contents.as_bytes()).unwrap();
        temp.into_temp_path()
    }

    #[test]
    fn loads_frame_and_events() {
        let tracking = write_temp(
            r#"{"home": {"Home_1_x": -50.0, "Home_1_y": 0.0, "ball_x": 0.0, "ball_y": 0.0},
                "away": {"Away_25_x": null, "Away_25_y": null}}"#,
        );
        let events = write_temp(
            r#"[{"Type": "PASS", "Start X": 0.0, "Start Y": 0.0, "End X": 10.0, "End Y": 5.0}]"#,
        );
        let input = MatchInput::load(Some(&*tracking), Some(&*events)).unwrap();
        let frame = input.frame.unwrap();
        assert_eq!(frame.home.get("Home_1_x"), Some(-50.0));
        assert!(frame.away.get("Away_25_x").unwrap().is_nan());
        assert_eq!(input.events.len(), 1);
    }

    #[test]
    fn missing_inputs_are_empty() {
        let input = MatchInput::load(None, None).unwrap();
        assert!(input.frame.is_none());
        assert!(input.events.is_empty());
    }

    #[test]
    fn parse_errors_name_the_file() {
        let broken = write_temp("[{");
        let err = load_events(&broken).unwrap_err();
        assert!(format!("{}", err).starts_with("parsing events"));
    }
}
