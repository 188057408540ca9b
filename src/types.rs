// Strong typing over strings. Newtypes for player ids, court-space and pixel-space points.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Player identifier. Stable across every snapshot of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        PlayerId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Team affiliation. Exactly two sides on the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

/// Position in logical court space (court units, not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CourtPoint {
    pub x: f64,
    pub y: f64,
}

impl CourtPoint {
    pub fn new(x: f64, y: f64) -> Self {
        CourtPoint { x, y }
    }
}

/// Position in rendering-surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub fn new(x: f64, y: f64) -> Self {
        SurfacePoint { x, y }
    }

    pub fn distance_to(&self, other: &SurfacePoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pixel dimensions of a surface: either the canvas backing store or the element as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        SurfaceSize { width, height }
    }

    pub(crate) fn validate(&self, what: &str) -> Result<(), EngineError> {
        if is_positive(self.width) && is_positive(self.height) {
            Ok(())
        } else {
            Err(EngineError::InvalidSurface(format!(
                "{} must be positive, got {}x{}",
                what, self.width, self.height
            )))
        }
    }
}

/// A tracked court occupant at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
    pub position: CourtPoint,
    pub number: u32,
}

/// A timestamped set of player records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Seconds from the start of the clip.
    pub timestamp: f64,
    pub players: Vec<Player>,
}

impl Snapshot {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn team_count(&self, team: Team) -> usize {
        self.players.iter().filter(|p| p.team == team).count()
    }
}

/// Logical court size. Player positions are expressed in these units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtDimensions {
    pub width: f64,
    pub height: f64,
}

impl CourtDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        CourtDimensions { width, height }
    }

    pub fn center(&self) -> CourtPoint {
        CourtPoint::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for CourtDimensions {
    /// 94 ft x 50 ft at 10 units per foot.
    fn default() -> Self {
        CourtDimensions {
            width: 940.0,
            height: 500.0,
        }
    }
}

/// How overlapping hit circles are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// First player in snapshot order whose hit circle contains the pointer.
    #[default]
    FirstMatch,
    /// Closest containing player; ties go to the earlier one.
    Nearest,
}

/// What happens to trail history when trails mode is re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrailPolicy {
    #[default]
    RetainAcrossSwitches,
    ResetOnEntry,
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub court: CourtDimensions,
    /// Marker radius in surface pixels.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
    #[serde(default = "default_selected_marker_radius")]
    pub selected_marker_radius: f64,
    /// Click target radius. Matches the selected marker so unselected markers get a generous target.
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f64,
    #[serde(default)]
    pub hit_policy: HitPolicy,
    #[serde(default = "default_trail_capacity")]
    pub trail_capacity: usize,
    #[serde(default)]
    pub trail_policy: TrailPolicy,
    #[serde(default = "default_heatmap_radius")]
    pub heatmap_radius: f64,
    /// Seconds between generated samples.
    #[serde(default = "default_sample_interval")]
    pub sample_interval: f64,
    /// Clip length (seconds) used when generating mock positions.
    #[serde(default = "default_duration")]
    pub default_duration: f64,
    /// Upper bound on generated snapshots per clip.
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

fn default_marker_radius() -> f64 {
    6.0
}

fn default_selected_marker_radius() -> f64 {
    8.0
}

fn default_hit_radius() -> f64 {
    8.0
}

fn default_trail_capacity() -> usize {
    20
}

fn default_heatmap_radius() -> f64 {
    30.0
}

fn default_sample_interval() -> f64 {
    0.5
}

fn default_duration() -> f64 {
    60.0
}

pub(crate) fn default_max_samples() -> usize {
    100_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            court: CourtDimensions::default(),
            marker_radius: default_marker_radius(),
            selected_marker_radius: default_selected_marker_radius(),
            hit_radius: default_hit_radius(),
            hit_policy: HitPolicy::default(),
            trail_capacity: default_trail_capacity(),
            trail_policy: TrailPolicy::default(),
            heatmap_radius: default_heatmap_radius(),
            sample_interval: default_sample_interval(),
            default_duration: default_duration(),
            max_samples: default_max_samples(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !is_positive(self.court.width) || !is_positive(self.court.height) {
            return Err(EngineError::InvalidConfig(format!(
                "court dimensions must be positive, got {}x{}",
                self.court.width, self.court.height
            )));
        }

        let radii = [
            ("marker_radius", self.marker_radius),
            ("selected_marker_radius", self.selected_marker_radius),
            ("hit_radius", self.hit_radius),
            ("heatmap_radius", self.heatmap_radius),
            ("sample_interval", self.sample_interval),
        ];
        for (name, value) in radii {
            if !is_positive(value) {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.trail_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "trail_capacity must be at least 1".to_string(),
            ));
        }

        if self.max_samples == 0 {
            return Err(EngineError::InvalidConfig(
                "max_samples must be at least 1".to_string(),
            ));
        }

        if !self.default_duration.is_finite() || self.default_duration < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "default_duration must be non-negative, got {}",
                self.default_duration
            )));
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.court.width, 940.0);
        assert_eq!(config.trail_capacity, 20);
        assert_eq!(config.hit_policy, HitPolicy::FirstMatch);
    }

    #[test]
    fn config_overrides_parse() {
        let config = EngineConfig::from_json(
            r#"{"hit_policy":"nearest","trail_policy":"reset_on_entry","trail_capacity":5}"#,
        )
        .unwrap();
        assert_eq!(config.hit_policy, HitPolicy::Nearest);
        assert_eq!(config.trail_policy, TrailPolicy::ResetOnEntry);
        assert_eq!(config.trail_capacity, 5);
    }

    #[test]
    fn config_rejects_zero_capacity() {
        let err = EngineConfig::from_json(r#"{"trail_capacity":0}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn config_rejects_zero_max_samples() {
        let err = EngineConfig::from_json(r#"{"max_samples":0}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
        assert_eq!(EngineConfig::default().max_samples, 100_000);
    }

    #[test]
    fn config_rejects_degenerate_court() {
        let err = EngineConfig::from_json(r#"{"court":{"width":0,"height":500}}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn player_serializes_like_the_client_model() {
        let player = Player {
            id: PlayerId::new(7),
            name: "Ryan Davis".to_string(),
            team: Team::Away,
            position: CourtPoint::new(611.0, 250.0),
            number: 21,
        };
        let value = serde_json::to_value(&player).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["team"], "away");
        assert_eq!(value["position"]["x"], 611.0);
    }

    #[test]
    fn court_center() {
        let center = CourtDimensions::default().center();
        assert_eq!(center, CourtPoint::new(470.0, 250.0));
    }
}
