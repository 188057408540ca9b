// Sample store builders. The engine only depends on the SampleSource contract,
// so a real tracker can replace the mock generator without touching sync or query code.

use crate::error::EngineError;
use crate::store::SampleStore;
use crate::types::*;

/// Produces an ordered sample store covering `[0, duration]`.
pub trait SampleSource {
    fn build(&self, duration: f64) -> Result<SampleStore, EngineError>;
}

/// Placeholder motion model: each player oscillates around a fixed base position.
pub struct MockMotionGenerator {
    court: CourtDimensions,
    interval: f64,
    max_samples: usize,
}

// (id, name, team, number, base x fraction, base y fraction)
const ROSTER: [(u32, &str, Team, u32, f64, f64); 10] = [
    (1, "James Wilson", Team::Home, 23, 0.25, 0.3),
    (2, "Marcus Johnson", Team::Home, 15, 0.35, 0.45),
    (3, "David Chen", Team::Home, 7, 0.2, 0.5),
    (4, "Alex Rodriguez", Team::Home, 32, 0.3, 0.6),
    (5, "Tyler Brown", Team::Home, 11, 0.22, 0.4),
    (6, "Kevin Smith", Team::Away, 8, 0.75, 0.35),
    (7, "Ryan Davis", Team::Away, 21, 0.65, 0.5),
    (8, "Michael Lee", Team::Away, 14, 0.8, 0.45),
    (9, "Chris Garcia", Team::Away, 9, 0.7, 0.65),
    (10, "Jordan Taylor", Team::Away, 3, 0.78, 0.55),
];

const SWAY_X: f64 = 30.0;
const SWAY_Y: f64 = 20.0;

impl MockMotionGenerator {
    pub fn new(court: CourtDimensions, interval: f64) -> Self {
        MockMotionGenerator {
            court,
            interval,
            max_samples: default_max_samples(),
        }
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        MockMotionGenerator::new(config.court, config.sample_interval)
            .with_max_samples(config.max_samples)
    }

    /// Roster at its base positions.
    pub fn roster(&self) -> Vec<Player> {
        ROSTER
            .iter()
            .map(|&(id, name, team, number, fx, fy)| Player {
                id: PlayerId::new(id),
                name: name.to_string(),
                team,
                position: CourtPoint::new(self.court.width * fx, self.court.height * fy),
                number,
            })
            .collect()
    }

    fn displaced(player: &Player, t: f64) -> Player {
        let phase = player.id.as_u32() as f64;
        Player {
            position: CourtPoint::new(
                player.position.x + (t * 0.02 + phase).sin() * SWAY_X,
                player.position.y + (t * 0.015 + phase).cos() * SWAY_Y,
            ),
            ..player.clone()
        }
    }
}

impl SampleSource for MockMotionGenerator {
    fn build(&self, duration: f64) -> Result<SampleStore, EngineError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "duration must be non-negative, got {}",
                duration
            )));
        }
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "sample interval must be positive, got {}",
                self.interval
            )));
        }

        // Checked in f64 before the cast: the quotient can exceed usize.
        let steps = (duration / self.interval).floor();
        if steps >= self.max_samples as f64 {
            return Err(EngineError::InvalidConfig(format!(
                "{} s at {} s per sample exceeds the limit of {} samples",
                duration, self.interval, self.max_samples
            )));
        }
        let steps = steps as usize;

        let roster = self.roster();
        // Index-based stepping avoids float drift accumulating across hundreds of samples.
        let snapshots = (0..=steps)
            .map(|i| {
                let t = i as f64 * self.interval;
                Snapshot {
                    timestamp: t,
                    players: roster.iter().map(|p| Self::displaced(p, t)).collect(),
                }
            })
            .collect();

        SampleStore::new(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> MockMotionGenerator {
        MockMotionGenerator::new(CourtDimensions::default(), 0.5)
    }

    #[test]
    fn sixty_seconds_yields_121_samples() {
        let store = generator().build(60.0).unwrap();
        assert_eq!(store.len(), 121);
        assert_eq!(store.duration(), 60.0);
    }

    #[test]
    fn roster_is_five_a_side() {
        let store = generator().build(1.0).unwrap();
        let first = &store.snapshots()[0];
        assert_eq!(first.players.len(), 10);
        assert_eq!(first.team_count(Team::Home), 5);
        assert_eq!(first.team_count(Team::Away), 5);
    }

    #[test]
    fn positions_follow_the_sway_model() {
        let store = generator().build(10.0).unwrap();
        let snap = &store.snapshots()[4]; // t = 2.0
        let p = snap.player(PlayerId::new(1)).unwrap();
        let expected_x = 940.0 * 0.25 + (2.0_f64 * 0.02 + 1.0).sin() * 30.0;
        let expected_y = 500.0 * 0.3 + (2.0_f64 * 0.015 + 1.0).cos() * 20.0;
        assert!((p.position.x - expected_x).abs() < 1e-9);
        assert!((p.position.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_yields_single_sample() {
        let store = generator().build(0.0).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejects_negative_duration() {
        assert!(matches!(
            generator().build(-1.0),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_clips_beyond_sample_limit() {
        assert!(matches!(
            generator().build(1e12),
            Err(EngineError::InvalidConfig(_))
        ));

        let capped = generator().with_max_samples(3);
        assert_eq!(capped.build(1.0).unwrap().len(), 3);
        assert!(capped.build(1.5).is_err());
    }

    #[test]
    fn from_config_carries_sample_limit() {
        let config = EngineConfig {
            max_samples: 10,
            ..Default::default()
        };
        let generator = MockMotionGenerator::from_config(&config);
        assert!(generator.build(4.5).is_ok());
        assert!(generator.build(5.0).is_err());
    }

    #[test]
    fn rejects_zero_interval() {
        let generator = MockMotionGenerator::new(CourtDimensions::default(), 0.0);
        assert!(generator.build(5.0).is_err());
    }
}
