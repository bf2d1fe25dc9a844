use crate::figure::{Color, Figure, MarkerShape, Point};
use crate::math::ArcHelper;
use crate::pitch::geometry::PitchGeometry;
use crate::prelude::FieldDimensions;
use log::debug;
use serde::{Deserialize, Serialize};

/// Field color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldColor {
    #[default]
    Green,
    White,
}

impl FieldColor {
    /// Axes background, line color and spot color.
    pub fn palette(self) -> (Option<Color>, Color, Color) {
        match self {
            FieldColor::Green => (
                Some(Color::MEDIUM_SEA_GREEN),
                Color::WHITE_SMOKE,
                Color::WHITE,
            ),
            FieldColor::White => (None, Color::BLACK, Color::BLACK),
        }
    }
}

/// Parameters for [`plot_pitch`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchStyle {
    pub dimensions: FieldDimensions,
    pub field_color: FieldColor,
    /// Line width in points.
    pub line_width: f64,
    /// Spot area in points²; goal posts scale from it.
    pub marker_size: f64,
}

impl Default for PitchStyle {
    fn default() -> Self {
        Self {
            dimensions: FieldDimensions::default(),
            field_color: FieldColor::Green,
            line_width: 2.0,
            marker_size: 20.0,
        }
    }
}

/// Draws a soccer pitch centred on the origin, all distances in meters.
///
/// The returned figure has ticks hidden and limits set to the field plus a
/// 3 m border, ready for overlays.
pub fn plot_pitch(style: &PitchStyle) -> Figure {
    let geometry = PitchGeometry::new(style.dimensions);
    let (face, lc, pc) = style.field_color.palette();
    let lw = style.line_width;
    let hl = geometry.half_length;
    let hw = geometry.half_width;

    let mut figure = Figure::default();
    figure.face_color = face;

    // halfway line and centre circle
    figure.plot_line([(0.0, -hw), (0.0, hw)], lc, lw);
    figure.scatter(Point::new(0.0, 0.0), lc, style.marker_size);
    let circle = ArcHelper::half_circle(geometry.centre_circle_radius);
    figure.plot_line(circle.iter().map(|p| (p.x, p.y)), lc, lw);
    figure.plot_line(circle.iter().map(|p| (-p.x, p.y)), lc, lw);

    for s in [-1.0, 1.0] {
        let goal_x = geometry.goal_line_x(s);

        // boundary
        figure.plot_line([(-hl, s * hw), (hl, s * hw)], lc, lw);
        figure.plot_line([(goal_x, -hw), (goal_x, hw)], lc, lw);

        // goal posts
        let half_goal = geometry.goal_line_width / 2.0;
        figure.plot_markers(
            [(goal_x, -half_goal), (goal_x, half_goal)],
            MarkerShape::Square,
            pc,
            6.0 * style.marker_size / 20.0,
        );

        // six yard box and penalty area
        for (depth, width) in [
            (geometry.box_length, geometry.box_width),
            (geometry.area_length, geometry.area_width),
        ] {
            let inner_x = geometry.from_goal_line(s, depth);
            let half = width / 2.0;
            figure.plot_line([(goal_x, half), (inner_x, half)], lc, lw);
            figure.plot_line([(goal_x, -half), (inner_x, -half)], lc, lw);
            figure.plot_line([(inner_x, -half), (inner_x, half)], lc, lw);
        }

        figure.scatter(
            Point::new(geometry.from_goal_line(s, geometry.penalty_spot), 0.0),
            lc,
            style.marker_size,
        );

        // corner arcs
        let corner = ArcHelper::quarter_circle(geometry.corner_radius);
        figure.plot_line(
            corner.iter().map(|p| (goal_x - s * p.x, -hw + p.y)),
            lc,
            lw,
        );
        figure.plot_line(
            corner.iter().map(|p| (goal_x - s * p.x, hw - p.y)),
            lc,
            lw,
        );

        // the D
        let d = ArcHelper::chord_arc(geometry.d_radius, geometry.d_length, geometry.d_pos);
        figure.plot_line(d.iter().map(|p| (goal_x - s * p.x, p.y)), lc, lw);
    }

    let (x_limits, y_limits) = geometry.axis_limits();
    figure.x_limits = x_limits;
    figure.y_limits = y_limits;
    figure.show_ticks = false;

    debug!(
        "pitch {}x{} drawn with {} primitives",
        style.dimensions.length,
        style.dimensions.width,
        figure.primitives.len()
    );
    figure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Primitive;

    #[test]
    fn pitch_has_fixed_primitive_layout() {
        let figure = plot_pitch(&PitchStyle::default());
        // halfway + 2 circle halves, then per side: 2 boundary, 6 box/area, 2 corners, 1 D
        assert_eq!(figure.polylines().count(), 3 + 2 * 11);
        // centre spot, then per side: posts + penalty spot
        assert_eq!(figure.markers().count(), 1 + 2 * 2);
        assert_eq!(figure.x_limits, (-56.0, 56.0));
        assert_eq!(figure.y_limits, (-37.0, 37.0));
        assert!(!figure.show_ticks);
        assert_eq!(figure.face_color, Some(Color::MEDIUM_SEA_GREEN));
    }

    #[test]
    fn pitch_is_deterministic() {
        let style = PitchStyle::default();
        assert_eq!(plot_pitch(&style), plot_pitch(&style));
    }

    #[test]
    fn pitch_is_symmetric_about_halfway_line() {
        let figure = plot_pitch(&PitchStyle::default());
        let mirror = |p: &Point| (-p.x, p.y);
        let lines: Vec<Vec<(f64, f64)>> = figure
            .polylines()
            .map(|l| l.points.iter().map(|p| (p.x, p.y)).collect())
            .collect();
        for line in figure.polylines() {
            let mirrored: Vec<(f64, f64)> = line.points.iter().map(mirror).collect();
            let close = |a: &(f64, f64), b: &(f64, f64)| {
                (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
            };
            // Lines that cross the halfway line mirror onto themselves reversed.
            let found = lines.iter().any(|other| {
                other.len() == mirrored.len()
                    && (other.iter().zip(&mirrored).all(|(a, b)| close(a, b))
                        || other.iter().rev().zip(&mirrored).all(|(a, b)| close(a, b)))
            });
            assert!(found, "no mirror image for line starting at {:?}", line.points[0]);
        }
    }

    #[test]
    fn goal_posts_use_spot_color_and_scaled_size() {
        let style = PitchStyle {
            marker_size: 40.0,
            ..Default::default()
        };
        let figure = plot_pitch(&style);
        let posts: Vec<_> = figure
            .markers()
            .filter(|m| m.shape == MarkerShape::Square)
            .collect();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].size, 12.0);
        assert_eq!(posts[0].color, Color::WHITE);
        assert_eq!(posts[0].points[0].x, -53.0);
    }

    #[test]
    fn white_scheme_draws_black_lines_without_background() {
        let figure = plot_pitch(&PitchStyle {
            field_color: FieldColor::White,
            ..Default::default()
        });
        assert_eq!(figure.face_color, None);
        assert!(figure.primitives.iter().all(|p| match p {
            Primitive::Polyline(l) => l.color == Color::BLACK,
            Primitive::Markers(m) => m.color == Color::BLACK,
            _ => false,
        }));
    }

    #[test]
    fn field_dimensions_move_the_boundary() {
        let figure = plot_pitch(&PitchStyle {
            dimensions: FieldDimensions::new(100.0, 60.0),
            ..Default::default()
        });
        assert_eq!(figure.x_limits, (-53.0, 53.0));
        let top = figure.polylines().nth(3).unwrap();
        assert_eq!(top.points[0], Point::new(-50.0, -30.0));
        assert_eq!(top.points[1], Point::new(50.0, -30.0));
    }
}
