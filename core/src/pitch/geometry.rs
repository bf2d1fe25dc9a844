use crate::prelude::FieldDimensions;

pub const METERS_PER_YARD: f64 = 0.9144;

/// Width of the margin drawn around the field, in meters.
pub const BORDER: (f64, f64) = (3.0, 3.0);

/// Derived pitch measurements in meters. Markings are defined in yards and
/// converted; only the outer dimensions vary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchGeometry {
    pub dimensions: FieldDimensions,
    pub half_length: f64,
    pub half_width: f64,
    pub goal_line_width: f64,
    pub box_width: f64,
    pub box_length: f64,
    pub area_width: f64,
    pub area_length: f64,
    pub penalty_spot: f64,
    pub corner_radius: f64,
    /// Half chord of the D where it meets the penalty area.
    pub d_length: f64,
    pub d_radius: f64,
    /// Distance of the D's centre from the goal line.
    pub d_pos: f64,
    pub centre_circle_radius: f64,
}

impl PitchGeometry {
    pub fn new(dimensions: FieldDimensions) -> Self {
        let yards = |n: f64| n * METERS_PER_YARD;
        Self {
            dimensions,
            half_length: dimensions.length / 2.0,
            half_width: dimensions.width / 2.0,
            goal_line_width: yards(8.0),
            box_width: yards(20.0),
            box_length: yards(6.0),
            area_width: yards(44.0),
            area_length: yards(18.0),
            penalty_spot: yards(12.0),
            corner_radius: yards(1.0),
            d_length: yards(8.0),
            d_radius: yards(10.0),
            d_pos: yards(12.0),
            centre_circle_radius: yards(10.0),
        }
    }

    /// Symmetric axis limits including the border.
    pub fn axis_limits(&self) -> ((f64, f64), (f64, f64)) {
        let xmax = self.half_length + BORDER.0;
        let ymax = self.half_width + BORDER.1;
        ((-xmax, xmax), (-ymax, ymax))
    }

    /// x coordinate of the goal line on side `sign` (-1 left, 1 right).
    pub fn goal_line_x(&self, sign: f64) -> f64 {
        sign * self.half_length
    }

    /// x coordinate `depth` meters in from the goal line on side `sign`.
    pub fn from_goal_line(&self, sign: f64, depth: f64) -> f64 {
        sign * self.half_length - sign * depth
    }
}

impl Default for PitchGeometry {
    fn default() -> Self {
        Self::new(FieldDimensions::default())
    }
}
