use crate::figure::{Arrow, Color, Figure, MarkerShape, Point, Primitive};
use crate::overlay::annotation::AnnotationStyle;
use crate::prelude::{FieldDimensions, Overlay, VizResult};
use crate::records::EventRecord;
use crate::telemetry::LogManager;
use serde::{Deserialize, Serialize};

const EVENT_MARKER_SIZE: f64 = 6.0;
const ARROW_SHAFT_WIDTH: f64 = 0.5;
const ARROW_HEAD_LENGTH: f64 = 4.0;
const ARROW_HEAD_WIDTH: f64 = 4.0;
const LABEL_FONT_SIZE: f64 = 10.0;

/// How each event is marked on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    /// Marker at the start position.
    Marker,
    /// Arrow from the start to the end position.
    Arrow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventOptions {
    pub field_dimen: FieldDimensions,
    pub indicators: Vec<Indicator>,
    pub color: Color,
    /// matplotlib marker character, e.g. `o` or `s`.
    pub marker_style: char,
    pub alpha: f64,
    pub annotate: bool,
    pub annotation: AnnotationStyle,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self {
            field_dimen: FieldDimensions::default(),
            indicators: vec![Indicator::Marker, Indicator::Arrow],
            color: Color::RED,
            marker_style: 'o',
            alpha: 0.5,
            annotate: false,
            annotation: AnnotationStyle::ScoreSummary,
        }
    }
}

impl EventOptions {
    fn shows(&self, indicator: Indicator) -> bool {
        self.indicators.contains(&indicator)
    }
}

/// Markers, arrows and labels for a list of events.
pub struct EventOverlay<'a> {
    events: &'a [EventRecord],
    options: EventOptions,
    logger: LogManager,
}

impl<'a> EventOverlay<'a> {
    pub fn new(events: &'a [EventRecord], options: EventOptions) -> Self {
        Self {
            events,
            options,
            logger: LogManager::new("events"),
        }
    }
}

impl Overlay for EventOverlay<'_> {
    fn field_dimensions(&self) -> FieldDimensions {
        self.options.field_dimen
    }

    fn draw(&self, figure: &mut Figure) -> VizResult<()> {
        let options = &self.options;
        let shape = MarkerShape::from_style(options.marker_style)?;
        let faded = options.color.with_alpha(options.alpha);

        for (row, event) in self.events.iter().enumerate() {
            let start = event.start();
            if options.shows(Indicator::Marker) {
                figure.plot_markers([start], shape, faded, EVENT_MARKER_SIZE);
            }
            if options.shows(Indicator::Arrow) {
                figure.push(Primitive::Arrow(Arrow {
                    from: start,
                    to: event.end(),
                    color: faded,
                    shaft_width: ARROW_SHAFT_WIDTH,
                    head_length: ARROW_HEAD_LENGTH,
                    head_width: ARROW_HEAD_WIDTH,
                    clip: false,
                }));
            }
            if options.annotate {
                let label = options.annotation.label(row, event)?;
                let offset = options.annotation.offset(options.alpha);
                figure.text(
                    Point::new(start.x + offset, start.y + offset),
                    label,
                    options.color,
                    LABEL_FONT_SIZE,
                );
            }
        }

        self.logger.trace(&format!(
            "{} events drawn with {:?}",
            self.events.len(),
            options.indicators
        ));
        Ok(())
    }
}

/// Draws events onto `figure`, or onto a fresh pitch when `None`, labelling
/// them with the score summary when annotation is on.
pub fn plot_events(
    events: &[EventRecord],
    figure: Option<Figure>,
    options: EventOptions,
) -> VizResult<Figure> {
    EventOverlay::new(
        events,
        EventOptions {
            annotation: AnnotationStyle::ScoreSummary,
            ..options
        },
    )
    .render(figure)
}

/// Same as [`plot_events`] but labels passes with their expected threat and
/// other events with their subtype.
pub fn plot_events_threat(
    events: &[EventRecord],
    figure: Option<Figure>,
    options: EventOptions,
) -> VizResult<Figure> {
    EventOverlay::new(
        events,
        EventOptions {
            annotation: AnnotationStyle::PassThreat,
            ..options
        },
    )
    .render(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::VizError;

    fn events() -> Vec<EventRecord> {
        let mut pass = EventRecord::new("PASS", (-10.0, 5.0), (12.0, -3.0));
        pass.xthreat_pass = Some(0.0456);
        pass.type_of_pass = Some("forward".into());
        pass.possession_score = Some(0.5);
        pass.scoring_score = Some(0.25);
        pass.improved_impact_score = Some(0.75);

        let mut recovery = EventRecord::new("RECOVERY", (30.0, -8.0), (f64::NAN, f64::NAN));
        recovery.subtype = Some("INTERCEPTION".into());
        recovery.type_of_pass = Some("none".into());
        recovery.possession_score = Some(0.1);
        recovery.scoring_score = Some(0.0);
        recovery.improved_impact_score = Some(0.0);

        let shot = EventRecord::new("SHOT", (45.0, 2.0), (53.0, 0.5));
        vec![pass, recovery, shot]
    }

    #[test]
    fn one_marker_and_arrow_per_row() {
        let rows = events();
        let figure = plot_events(&rows, Some(Figure::default()), EventOptions::default()).unwrap();
        assert_eq!(figure.markers().count(), rows.len());
        assert_eq!(figure.arrows().count(), rows.len());
        assert_eq!(figure.texts().count(), 0);

        let arrow = figure.arrows().next().unwrap();
        assert_eq!(arrow.from, Point::new(-10.0, 5.0));
        assert_eq!(arrow.to, Point::new(12.0, -3.0));
        assert_eq!(arrow.color, Color::RED.with_alpha(0.5));
        assert!(!arrow.clip);
    }

    #[test]
    fn indicators_select_what_is_drawn() {
        let rows = events();
        let markers_only = EventOptions {
            indicators: vec![Indicator::Marker],
            marker_style: 's',
            ..Default::default()
        };
        let figure = plot_events(&rows, Some(Figure::default()), markers_only).unwrap();
        assert_eq!(figure.markers().count(), 3);
        assert_eq!(figure.arrows().count(), 0);
        assert!(figure.markers().all(|m| m.shape == MarkerShape::Square));

        let arrows_only = EventOptions {
            indicators: vec![Indicator::Arrow],
            ..Default::default()
        };
        let figure = plot_events(&rows, Some(Figure::default()), arrows_only).unwrap();
        assert_eq!(figure.markers().count(), 0);
        assert_eq!(figure.arrows().count(), 3);
    }

    #[test]
    fn score_summary_labels_are_offset_by_alpha() {
        let rows = events();
        let options = EventOptions {
            annotate: true,
            ..Default::default()
        };
        let figure = plot_events(&rows[..2], Some(Figure::default()), options).unwrap();
        let labels: Vec<_> = figure.texts().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].content, "F: [ 0.5; 0.25; 0.75 ]");
        assert_eq!(labels[0].at, Point::new(-9.5, 5.5));
        assert_eq!(labels[0].color, Color::RED);
        assert_eq!(labels[1].content, "N: [ 0.1; 0.0; 0.0 ]");
    }

    #[test]
    fn threat_labels_sit_on_the_start() {
        let rows = events();
        let options = EventOptions {
            annotate: true,
            color: Color::BLUE,
            ..Default::default()
        };
        let figure = plot_events_threat(&rows, Some(Figure::default()), options).unwrap();
        let labels: Vec<_> = figure.texts().map(|t| t.content.as_str()).collect();
        assert_eq!(labels, vec![" [ xT: 0.046 ]", " [ INTERCEPTION ]", " [ nan ]"]);
        assert_eq!(figure.texts().nth(1).unwrap().at, Point::new(30.0, -8.0));
    }

    #[test]
    fn missing_scores_fail_the_overlay() {
        let rows = events();
        let options = EventOptions {
            annotate: true,
            ..Default::default()
        };
        let err = plot_events(&rows, None, options).unwrap_err();
        assert_eq!(
            err,
            VizError::MissingField {
                row: 2,
                field: "Type_of_Pass"
            }
        );
    }

    #[test]
    fn unknown_marker_style_is_rejected() {
        let options = EventOptions {
            marker_style: '?',
            ..Default::default()
        };
        assert_eq!(
            plot_events(&events(), None, options).unwrap_err(),
            VizError::InvalidMarker('?')
        );
    }

    #[test]
    fn empty_event_list_only_draws_pitch() {
        let figure = plot_events(&[], None, EventOptions::default()).unwrap();
        assert_eq!(figure.arrows().count(), 0);
        assert!(!figure.show_ticks);
    }
}
