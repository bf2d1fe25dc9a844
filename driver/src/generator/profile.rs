use crate::generator::template::{AWAY_FIRST_JERSEY, FORMATION_442, HOME_FIRST_JERSEY};
use crate::workflow::input::{MatchInput, TrackingFrame};
use anyhow::ensure;
use metricaviz::records::{EventRecord, TrackingRecord};
use metricaviz::FieldDimensions;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic frame and pass sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub dimensions: FieldDimensions,
    /// Maximum displacement from the formation slot, in meters.
    pub jitter: f64,
    /// Maximum speed along each axis, in m/s.
    pub max_speed: f64,
    pub passes: usize,
    /// Players whose tracking is missing (NaN), counted from the last away player.
    pub missing_players: usize,
    pub description: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            dimensions: FieldDimensions::default(),
            jitter: 4.0,
            max_speed: 6.0,
            passes: 5,
            missing_players: 0,
            description: None,
        }
    }
}

fn build_team(
    rng: &mut StdRng,
    config: &GeneratorConfig,
    prefix: &str,
    first_jersey: u32,
    direction: f64,
    missing: usize,
) -> TrackingRecord {
    let half_length = config.dimensions.length / 2.0;
    let half_width = config.dimensions.width / 2.0;
    let mut row = TrackingRecord::new();
    let present = FORMATION_442.len().saturating_sub(missing);

    for (slot, &(fx, fy)) in FORMATION_442.iter().enumerate() {
        let jersey = first_jersey + slot as u32;
        let column = format!("{}_{}", prefix, jersey);
        let (x, y, vx, vy) = if slot < present {
            let jitter = config.jitter.max(f64::EPSILON);
            let speed = config.max_speed.max(f64::EPSILON);
            (
                direction * fx * half_length + rng.gen_range(-jitter..jitter),
                fy * half_width + rng.gen_range(-jitter..jitter),
                rng.gen_range(-speed..speed),
                rng.gen_range(-speed..speed),
            )
        } else {
            (f64::NAN, f64::NAN, f64::NAN, f64::NAN)
        };
        row.insert(format!("{}_x", column), x);
        row.insert(format!("{}_y", column), y);
        row.insert(format!("{}_vx", column), vx);
        row.insert(format!("{}_vy", column), vy);
    }
    row
}

fn build_passes(
    rng: &mut StdRng,
    config: &GeneratorConfig,
    home: &TrackingRecord,
) -> Vec<EventRecord> {
    let players: Vec<_> = home
        .players()
        .map(|players| {
            players
                .into_iter()
                .filter(|p| p.has_position())
                .map(|p| (p.jersey().to_string(), p.x, p.y))
                .collect()
        })
        .unwrap_or_default();
    if players.len() < 2 {
        return Vec::new();
    }

    let mut events = Vec::with_capacity(config.passes);
    let mut holder = rng.gen_range(0..players.len());
    let mut frame = 1u64;
    for _ in 0..config.passes {
        let mut receiver = rng.gen_range(0..players.len() - 1);
        if receiver >= holder {
            receiver += 1;
        }
        let (from_name, sx, sy) = &players[holder];
        let (to_name, ex, ey) = &players[receiver];

        let mut event = EventRecord::new("PASS", (*sx, *sy), (*ex, *ey));
        event.team = Some("Home".into());
        event.period = Some(1);
        event.start_frame = Some(frame);
        event.end_frame = Some(frame + 25);
        event.start_time = Some(frame as f64 * 0.04);
        event.end_time = Some((frame + 25) as f64 * 0.04);
        event.from = Some(format!("Player{}", from_name));
        event.to = Some(format!("Player{}", to_name));
        event.type_of_pass = Some(
            match ex - sx {
                dx if dx > 5.0 => "forward",
                dx if dx < -5.0 => "backward",
                _ => "lateral",
            }
            .into(),
        );
        event.possession_score = Some(rng.gen_range(0.0..1.0));
        event.scoring_score = Some(rng.gen_range(0.0..0.2));
        event.improved_impact_score = Some(rng.gen_range(-0.1..0.3));
        event.xthreat_pass = Some(rng.gen_range(-0.02..0.08));
        events.push(event);

        holder = receiver;
        frame += 50;
    }
    events
}

/// Seeded 4-4-2 versus 4-4-2 frame (home attacking right) with a pass chain
/// between home players.
pub fn build_demo_match(config: &GeneratorConfig) -> anyhow::Result<MatchInput> {
    ensure!(
        config.dimensions.length > 0.0 && config.dimensions.width > 0.0,
        "pitch dimensions must be positive"
    );
    ensure!(
        (2.0 * config.jitter).is_finite() && (2.0 * config.max_speed).is_finite(),
        "jitter and max_speed must be finite"
    );
    let mut rng = StdRng::seed_from_u64(config.seed);

    let home = build_team(&mut rng, config, "Home", HOME_FIRST_JERSEY, 1.0, 0)
        .with("ball_x", rng.gen_range(-5.0..5.0))
        .with("ball_y", rng.gen_range(-5.0..5.0));
    let away = build_team(
        &mut rng,
        config,
        "Away",
        AWAY_FIRST_JERSEY,
        -1.0,
        config.missing_players,
    );
    let events = build_passes(&mut rng, config, &home);

    Ok(MatchInput {
        frame: Some(TrackingFrame { home, away }),
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_full_teams() {
        let input = build_demo_match(&GeneratorConfig::default()).unwrap();
        let frame = input.frame.unwrap();
        assert_eq!(frame.home.x_columns().len(), 11);
        assert_eq!(frame.away.x_columns().len(), 11);
        assert!(frame.home.ball().is_ok());
        assert_eq!(frame.away.x_columns()[0], "Away_25_x");
        assert_eq!(input.events.len(), 5);
    }

    #[test]
    fn generator_is_deterministic_for_a_seed() {
        let config = GeneratorConfig {
            seed: 42,
            ..Default::default()
        };
        let a = build_demo_match(&config).unwrap();
        let b = build_demo_match(&config).unwrap();
        assert_eq!(a, b);

        let other = build_demo_match(&GeneratorConfig {
            seed: 43,
            ..Default::default()
        })
        .unwrap();
        assert_ne!(a.frame, other.frame);
    }

    #[test]
    fn missing_players_are_nan() {
        let config = GeneratorConfig {
            missing_players: 2,
            ..Default::default()
        };
        let frame = build_demo_match(&config).unwrap().frame.unwrap();
        let players = frame.away.players().unwrap();
        assert_eq!(players.iter().filter(|p| !p.has_position()).count(), 2);
        assert!(!players[10].has_position());
    }

    #[test]
    fn passes_chain_between_home_players() {
        let input = build_demo_match(&GeneratorConfig {
            passes: 8,
            ..Default::default()
        })
        .unwrap();
        for pair in input.events.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert!(input.events.iter().all(|e| e.is_pass()));
    }

    #[test]
    fn rejects_degenerate_pitch() {
        let config = GeneratorConfig {
            dimensions: FieldDimensions::new(0.0, 68.0),
            ..Default::default()
        };
        assert!(build_demo_match(&config).is_err());
    }

    #[test]
    fn rejects_unbounded_jitter_and_speed() {
        let cases = [
            (1e308, 6.0),
            (4.0, 1e308),
            (f64::NAN, 6.0),
            (4.0, f64::INFINITY),
        ];
        for (jitter, max_speed) in cases {
            let config = GeneratorConfig {
                jitter,
                max_speed,
                ..Default::default()
            };
            assert!(build_demo_match(&config).is_err());
        }
    }
}
