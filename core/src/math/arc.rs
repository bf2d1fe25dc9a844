use crate::figure::Point;
use ndarray::Array1;

/// Number of samples used for every curved pitch marking.
pub const ARC_SAMPLES: usize = 50;

/// Samples circle segments the way the pitch markings are defined:
/// `y` evenly spaced, `x = sqrt(r² - y²)`.
pub struct ArcHelper;

impl ArcHelper {
    /// `ARC_SAMPLES` values evenly spaced over `[start, end] * scale`.
    pub fn linspace(start: f64, end: f64, scale: f64) -> Array1<f64> {
        Array1::linspace(start, end, ARC_SAMPLES) * scale
    }

    /// Right half of a circle of `radius` about the origin, bottom to top.
    pub fn half_circle(radius: f64) -> Vec<Point> {
        Self::chord_arc(radius, radius, 0.0)
    }

    /// Quarter circle in the first quadrant, from `(radius, 0)` to `(0, radius)`.
    pub fn quarter_circle(radius: f64) -> Vec<Point> {
        let y = Self::linspace(0.0, 1.0, radius);
        Self::points(radius, &y, 0.0)
    }

    /// Arc of a circle of `radius` cut off at `±half_chord` on the y axis,
    /// shifted by `offset` along x.
    pub fn chord_arc(radius: f64, half_chord: f64, offset: f64) -> Vec<Point> {
        let y = Self::linspace(-1.0, 1.0, half_chord);
        Self::points(radius, &y, offset)
    }

    fn points(radius: f64, y: &Array1<f64>, offset: f64) -> Vec<Point> {
        // Clamp so rounding at the chord ends cannot produce sqrt of a negative.
        let x = y.mapv(|v| (radius * radius - v * v).max(0.0).sqrt() + offset);
        x.iter()
            .zip(y.iter())
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_circle_stays_on_radius() {
        let arc = ArcHelper::half_circle(5.0);
        assert_eq!(arc.len(), ARC_SAMPLES);
        for point in &arc {
            let r = (point.x * point.x + point.y * point.y).sqrt();
            assert!((r - 5.0).abs() < 1e-9);
            assert!(point.x >= 0.0);
        }
        assert!((arc[0].y + 5.0).abs() < 1e-12);
        assert!((arc[ARC_SAMPLES - 1].y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn quarter_circle_runs_from_x_axis_to_y_axis() {
        let arc = ArcHelper::quarter_circle(2.0);
        assert!((arc[0].x - 2.0).abs() < 1e-12);
        assert!(arc[0].y.abs() < 1e-12);
        assert!(arc[ARC_SAMPLES - 1].x.abs() < 1e-6);
    }

    #[test]
    fn chord_arc_is_offset() {
        // 6-8-10 triangle: chord ends sit 6 from the centre.
        let arc = ArcHelper::chord_arc(10.0, 8.0, 12.0);
        assert!((arc[0].x - 18.0).abs() < 1e-9);
        assert!((arc[ARC_SAMPLES / 2].x - 22.0).abs() < 0.1);
    }
}
