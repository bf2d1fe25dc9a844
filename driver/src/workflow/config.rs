use anyhow::Context;
use metricaviz::figure::Color;
use metricaviz::overlay::{AnnotationStyle, EventOptions, FrameOptions, Indicator};
use metricaviz::pitch::PitchStyle;
use metricaviz::render::Viewport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Rendering settings loaded from YAML; every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub pitch: PitchStyle,
    pub frame: FrameConfig,
    pub events: EventConfig,
    pub dpi: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub home_color: String,
    pub away_color: String,
    pub include_player_velocities: bool,
    pub player_marker_size: f64,
    pub player_alpha: f64,
    pub annotate: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub indicators: Vec<Indicator>,
    pub color: String,
    pub marker_style: char,
    pub alpha: f64,
    pub annotate: bool,
    pub annotation: AnnotationStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pitch: PitchStyle::default(),
            frame: FrameConfig::default(),
            events: EventConfig::default(),
            dpi: Viewport::DEFAULT_DPI,
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            home_color: "r".into(),
            away_color: "b".into(),
            include_player_velocities: false,
            player_marker_size: 10.0,
            player_alpha: 0.7,
            annotate: false,
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            indicators: vec![Indicator::Marker, Indicator::Arrow],
            color: "r".into(),
            marker_style: 'o',
            alpha: 0.5,
            annotate: false,
            annotation: AnnotationStyle::ScoreSummary,
        }
    }
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading render config {}", path_ref.display()))?;
        let config: RenderConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing render config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_frame_options(&self) -> anyhow::Result<FrameOptions> {
        let home = Color::parse(&self.frame.home_color).context("home team color")?;
        let away = Color::parse(&self.frame.away_color).context("away team color")?;
        Ok(FrameOptions {
            team_colors: (home, away),
            field_dimen: self.pitch.dimensions,
            include_player_velocities: self.frame.include_player_velocities,
            player_marker_size: self.frame.player_marker_size,
            player_alpha: self.frame.player_alpha,
            annotate: self.frame.annotate,
        })
    }

    pub fn to_event_options(&self) -> anyhow::Result<EventOptions> {
        let color = Color::parse(&self.events.color).context("event color")?;
        Ok(EventOptions {
            field_dimen: self.pitch.dimensions,
            indicators: self.events.indicators.clone(),
            color,
            marker_style: self.events.marker_style,
            alpha: self.events.alpha,
            annotate: self.events.annotate,
            annotation: self.events.annotation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metricaviz::pitch::FieldColor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_matches_library_defaults() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.to_frame_options().unwrap(), FrameOptions::default());
        assert_eq!(cfg.to_event_options().unwrap(), EventOptions::default());
    }

    #[test]
    fn config_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"pitch:\n  field_color: white\n  dimensions: { length: 105.0, width: 68.0 }\n\
              frame:\n  home_color: orange\n  include_player_velocities: true\n\
              events:\n  indicators: [arrow]\n  annotation: pass-threat\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = RenderConfig::load(&path).unwrap();

        assert_eq!(cfg.pitch.field_color, FieldColor::White);
        assert_eq!(cfg.pitch.line_width, 2.0);
        assert_eq!(cfg.dpi, 100.0);

        let frame = cfg.to_frame_options().unwrap();
        assert!(frame.include_player_velocities);
        assert_eq!(frame.team_colors.1, Color::BLUE);
        assert_eq!(frame.field_dimen.length, 105.0);

        let events = cfg.to_event_options().unwrap();
        assert_eq!(events.indicators, vec![Indicator::Arrow]);
        assert_eq!(events.annotation, AnnotationStyle::PassThreat);
    }

    #[test]
    fn unknown_colors_are_reported() {
        let mut cfg = RenderConfig::default();
        cfg.events.color = "not-a-color".into();
        let err = cfg.to_event_options().unwrap_err();
        assert!(format!("{:#}", err).contains("not-a-color"));
    }
}
