use crate::workflow::config::RenderConfig;
use crate::workflow::input::MatchInput;
use anyhow::Context;
use metricaviz::overlay::{plot_events, plot_events_threat, plot_frame, AnnotationStyle};
use metricaviz::pitch::plot_pitch;
use metricaviz::render::figure_to_svg;
use metricaviz::telemetry::{Counts, LogManager, RenderMetrics};
use metricaviz::Figure;
use std::sync::Arc;

pub struct RenderResult {
    pub figure: Figure,
    pub home_players: usize,
    pub away_players: usize,
    pub event_count: usize,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: RenderConfig,
    metrics: Arc<RenderMetrics>,
}

impl Runner {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(RenderMetrics::new()),
        }
    }

    /// Pitch, then the tracking frame, then events.
    pub fn execute(&self, input: &MatchInput) -> anyhow::Result<RenderResult> {
        let mut figure = plot_pitch(&self.config.pitch);
        let mut notes = vec![format!(
            "pitch {}x{} m",
            self.config.pitch.dimensions.length, self.config.pitch.dimensions.width
        )];

        let (mut home_players, mut away_players) = (0, 0);
        if let Some(frame) = &input.frame {
            let options = self.config.to_frame_options()?;
            figure = plot_frame(&frame.home, &frame.away, Some(figure), options)
                .context("drawing tracking frame")?;
            home_players = frame.home.x_columns().len();
            away_players = frame.away.x_columns().len();
            notes.push(format!(
                "frame: {} home / {} away players",
                home_players, away_players
            ));
        }

        if !input.events.is_empty() {
            let options = self.config.to_event_options()?;
            let draw = match options.annotation {
                AnnotationStyle::ScoreSummary => plot_events,
                AnnotationStyle::PassThreat => plot_events_threat,
            };
            figure = draw(&input.events, Some(figure), options).context("drawing events")?;
            notes.push(format!("events: {}", input.events.len()));
        }

        LogManager::new("runner").record(&format!(
            "rendered {} primitives ({})",
            figure.primitives.len(),
            notes.join(", ")
        ));

        Ok(RenderResult {
            figure,
            home_players,
            away_players,
            event_count: input.events.len(),
            notes,
        })
    }

    pub fn to_svg(&self, figure: &Figure) -> String {
        figure_to_svg(figure, self.config.dpi, &self.metrics)
    }

    pub fn metrics(&self) -> Counts {
        self.metrics.snapshot()
    }
}
