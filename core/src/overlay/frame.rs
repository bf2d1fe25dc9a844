use crate::figure::{Color, Figure, MarkerShape, Point, Primitive, Quiver};
use crate::prelude::{FieldDimensions, Overlay, VizResult};
use crate::records::TrackingRecord;
use crate::telemetry::LogManager;

const QUIVER_UNITS_PER_INCH: f64 = 10.0;
const QUIVER_WIDTH: f64 = 0.0015;
const QUIVER_HEAD_LENGTH: f64 = 5.0;
const QUIVER_HEAD_WIDTH: f64 = 3.0;
const JERSEY_OFFSET: f64 = 0.5;
const JERSEY_FONT_SIZE: f64 = 10.0;
const BALL_MARKER_SIZE: f64 = 6.0;

/// Options for drawing one frame of tracking data.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOptions {
    /// Home and away colors.
    pub team_colors: (Color, Color),
    /// Pitch size used when no figure is supplied.
    pub field_dimen: FieldDimensions,
    pub include_player_velocities: bool,
    pub player_marker_size: f64,
    pub player_alpha: f64,
    /// Label players with their jersey numbers.
    pub annotate: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            team_colors: (Color::RED, Color::BLUE),
            field_dimen: FieldDimensions::default(),
            include_player_velocities: false,
            player_marker_size: 10.0,
            player_alpha: 0.7,
            annotate: false,
        }
    }
}

/// Player positions (and optionally velocities and jersey numbers) for both
/// teams plus the ball, at one instant.
pub struct FrameOverlay<'a> {
    home: &'a TrackingRecord,
    away: &'a TrackingRecord,
    options: FrameOptions,
    logger: LogManager,
}

impl<'a> FrameOverlay<'a> {
    pub fn new(home: &'a TrackingRecord, away: &'a TrackingRecord, options: FrameOptions) -> Self {
        Self {
            home,
            away,
            options,
            logger: LogManager::new("frame"),
        }
    }

    fn draw_team(
        &self,
        figure: &mut Figure,
        team: &TrackingRecord,
        color: Color,
    ) -> VizResult<usize> {
        let players = team.players()?;
        let alpha_color = color.with_alpha(self.options.player_alpha);

        figure.plot_markers(
            players.iter().map(|p| Point::new(p.x, p.y)),
            MarkerShape::Circle,
            alpha_color,
            self.options.player_marker_size,
        );

        if self.options.include_player_velocities {
            let mut origins = Vec::with_capacity(players.len());
            let mut vectors = Vec::with_capacity(players.len());
            for player in &players {
                let (vx, vy) = team.velocity(player)?;
                if player.has_position() {
                    origins.push(Point::new(player.x, player.y));
                    vectors.push(Point::new(vx, vy));
                }
            }
            figure.push(Primitive::Quiver(Quiver {
                origins,
                vectors,
                color: alpha_color,
                units_per_inch: QUIVER_UNITS_PER_INCH,
                shaft_width: QUIVER_WIDTH,
                head_length: QUIVER_HEAD_LENGTH,
                head_width: QUIVER_HEAD_WIDTH,
            }));
        }

        if self.options.annotate {
            for player in players.iter().filter(|p| p.has_position()) {
                figure.text(
                    Point::new(player.x + JERSEY_OFFSET, player.y + JERSEY_OFFSET),
                    player.jersey(),
                    color,
                    JERSEY_FONT_SIZE,
                );
            }
        }

        Ok(players.len())
    }
}

impl Overlay for FrameOverlay<'_> {
    fn field_dimensions(&self) -> FieldDimensions {
        self.options.field_dimen
    }

    fn draw(&self, figure: &mut Figure) -> VizResult<()> {
        let (home_color, away_color) = self.options.team_colors;
        let home_count = self.draw_team(figure, self.home, home_color)?;
        let away_count = self.draw_team(figure, self.away, away_color)?;

        let (ball_x, ball_y) = self.home.ball()?;
        figure.plot_markers(
            [(ball_x, ball_y)],
            MarkerShape::Circle,
            Color::BLACK,
            BALL_MARKER_SIZE,
        );

        self.logger.trace(&format!(
            "{} home / {} away players, velocities {}",
            home_count, away_count, self.options.include_player_velocities
        ));
        Ok(())
    }
}

/// Draws a tracking frame onto `figure`, or onto a fresh pitch when `None`.
pub fn plot_frame(
    home: &TrackingRecord,
    away: &TrackingRecord,
    figure: Option<Figure>,
    options: FrameOptions,
) -> VizResult<Figure> {
    FrameOverlay::new(home, away, options).render(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::{plot_pitch, PitchStyle};
    use crate::prelude::VizError;

    fn team(prefix: &str, players: &[(u32, f64, f64, f64, f64)]) -> TrackingRecord {
        let mut row = TrackingRecord::new();
        for &(jersey, x, y, vx, vy) in players {
            row.insert(format!("{}_{}_x", prefix, jersey), x);
            row.insert(format!("{}_{}_y", prefix, jersey), y);
            row.insert(format!("{}_{}_vx", prefix, jersey), vx);
            row.insert(format!("{}_{}_vy", prefix, jersey), vy);
        }
        row
    }

    fn frame() -> (TrackingRecord, TrackingRecord) {
        let home = team(
            "Home",
            &[
                (1, -50.0, 0.0, 0.1, 0.0),
                (4, -20.0, 10.0, 2.0, -1.0),
                (9, f64::NAN, f64::NAN, f64::NAN, f64::NAN),
            ],
        )
        .with("ball_x", 3.0)
        .with("ball_y", -2.0);
        let away = team(
            "Away",
            &[(25, 48.0, 1.0, 0.0, 0.0), (17, 10.0, -5.0, -3.0, 0.5)],
        );
        (home, away)
    }

    #[test]
    fn new_pitch_is_drawn_when_no_figure_is_given() {
        let (home, away) = frame();
        let pitch_len = plot_pitch(&PitchStyle::default()).primitives.len();
        let figure = plot_frame(&home, &away, None, FrameOptions::default()).unwrap();
        // two teams and the ball
        assert_eq!(figure.primitives.len(), pitch_len + 3);
    }

    #[test]
    fn overlays_onto_existing_figure() {
        let (home, away) = frame();
        let figure = plot_frame(&home, &away, Some(Figure::default()), FrameOptions::default())
            .unwrap();
        assert_eq!(figure.primitives.len(), 3);
        assert_eq!(figure.x_limits, (0.0, 1.0));
    }

    #[test]
    fn nan_players_keep_their_marker_slot() {
        let (home, away) = frame();
        let figure = plot_frame(&home, &away, Some(Figure::default()), FrameOptions::default())
            .unwrap();
        let markers: Vec<_> = figure.markers().collect();
        assert_eq!(markers[0].points.len(), 3);
        assert!(!markers[0].points[2].is_finite());
        assert_eq!(markers[0].color, Color::RED.with_alpha(0.7));
        assert_eq!(markers[1].points.len(), 2);
        assert_eq!(markers[1].color, Color::BLUE.with_alpha(0.7));
        assert_eq!(markers[2].points, vec![Point::new(3.0, -2.0)]);
        assert_eq!(markers[2].color, Color::BLACK);
        assert_eq!(markers[2].size, 6.0);
    }

    #[test]
    fn one_vector_per_positioned_player() {
        let (home, away) = frame();
        let options = FrameOptions {
            include_player_velocities: true,
            ..Default::default()
        };
        let figure = plot_frame(&home, &away, Some(Figure::default()), options).unwrap();
        let quivers: Vec<_> = figure.quivers().collect();
        assert_eq!(quivers.len(), 2);
        assert_eq!(quivers[0].len(), 2);
        assert_eq!(quivers[1].len(), 2);
        assert_eq!(quivers[0].vectors[1], Point::new(2.0, -1.0));
        assert_eq!(quivers[0].units_per_inch, 10.0);
    }

    #[test]
    fn jersey_labels_skip_missing_players() {
        let (home, away) = frame();
        let options = FrameOptions {
            annotate: true,
            ..Default::default()
        };
        let figure = plot_frame(&home, &away, Some(Figure::default()), options).unwrap();
        let labels: Vec<_> = figure.texts().map(|t| t.content.as_str()).collect();
        assert_eq!(labels, vec!["1", "4", "25", "17"]);

        let first = figure.texts().next().unwrap();
        assert_eq!(first.at, Point::new(-49.5, 0.5));
        assert_eq!(first.color, Color::RED);
        assert_eq!(first.font_size, 10.0);
    }

    #[test]
    fn ball_columns_are_required() {
        let (_, away) = frame();
        let err = plot_frame(&away, &away, None, FrameOptions::default()).unwrap_err();
        assert_eq!(err, VizError::MissingColumn("ball_x".into()));
    }

    #[test]
    fn velocity_columns_are_required_when_requested() {
        let home = TrackingRecord::new()
            .with("Home_3_x", 1.0)
            .with("Home_3_y", 1.0)
            .with("ball_x", 0.0)
            .with("ball_y", 0.0);
        let options = FrameOptions {
            include_player_velocities: true,
            ..Default::default()
        };
        let err = plot_frame(&home, &home, None, options).unwrap_err();
        assert_eq!(err, VizError::MissingColumn("Home_3_vx".into()));
    }
}
