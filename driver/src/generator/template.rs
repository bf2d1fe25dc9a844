/// 4-4-2 shape as fractions of the half pitch (x toward the opponent's goal,
/// y across), goalkeeper first.
pub const FORMATION_442: [(f64, f64); 11] = [
    (-0.95, 0.0),
    (-0.65, -0.6),
    (-0.7, -0.2),
    (-0.7, 0.2),
    (-0.65, 0.6),
    (-0.3, -0.65),
    (-0.35, -0.2),
    (-0.35, 0.2),
    (-0.3, 0.65),
    (-0.05, -0.15),
    (-0.05, 0.15),
];

/// Metrica numbering: home players 1-11, away players 25-35.
pub const HOME_FIRST_JERSEY: u32 = 1;
pub const AWAY_FIRST_JERSEY: u32 = 25;
