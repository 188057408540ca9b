// Coordinate scaling between court space, surface pixels, and displayed pixels, plus marker hit-testing.
// Axes scale independently; marker aspect ratio is not preserved.

use crate::error::EngineError;
use crate::types::*;

/// Per-axis scale from court units to rendering-surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtScale {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl CourtScale {
    pub fn new(court: CourtDimensions, surface: SurfaceSize) -> Result<Self, EngineError> {
        SurfaceSize::new(court.width, court.height).validate("court")?;
        surface.validate("rendering surface")?;

        Ok(CourtScale {
            scale_x: surface.width / court.width,
            scale_y: surface.height / court.height,
        })
    }

    pub fn to_surface(&self, point: CourtPoint) -> SurfacePoint {
        SurfacePoint::new(point.x * self.scale_x, point.y * self.scale_y)
    }
}

/// Convert a pointer position on the displayed element to surface pixels.
/// The element may be CSS-scaled relative to its backing store.
pub fn display_to_surface(
    pointer: SurfacePoint,
    surface: SurfaceSize,
    displayed: SurfaceSize,
) -> Result<SurfacePoint, EngineError> {
    surface.validate("rendering surface")?;
    displayed.validate("displayed element")?;

    Ok(SurfacePoint::new(
        pointer.x * (surface.width / displayed.width),
        pointer.y * (surface.height / displayed.height),
    ))
}

/// Drawn marker radius in surface pixels.
pub fn marker_radius(config: &EngineConfig, selected: bool) -> f64 {
    if selected {
        config.selected_marker_radius
    } else {
        config.marker_radius
    }
}

/// A pointer event as reported by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerQuery {
    /// Offset from the displayed element's top-left corner.
    pub pointer: SurfacePoint,
    pub surface: SurfaceSize,
    pub displayed: SurfaceSize,
}

/// Hit-tests markers against a pointer position in surface pixels.
pub struct HitTester {
    scale: CourtScale,
    radius: f64,
    policy: HitPolicy,
}

impl HitTester {
    pub fn new(config: &EngineConfig, surface: SurfaceSize) -> Result<Self, EngineError> {
        Ok(HitTester {
            scale: CourtScale::new(config.court, surface)?,
            radius: config.hit_radius,
            policy: config.hit_policy,
        })
    }

    /// Player whose hit circle contains `point`, per the configured policy.
    pub fn hit(&self, snapshot: &Snapshot, point: SurfacePoint) -> Option<PlayerId> {
        let mut candidates = snapshot.players.iter().filter_map(|player| {
            let distance = self.scale.to_surface(player.position).distance_to(&point);
            (distance <= self.radius).then_some((player.id, distance))
        });

        match self.policy {
            HitPolicy::FirstMatch => candidates.next().map(|(id, _)| id),
            HitPolicy::Nearest => candidates
                .fold(None, |best: Option<(PlayerId, f64)>, (id, d)| match best {
                    Some((_, best_d)) if best_d <= d => best,
                    _ => Some((id, d)),
                })
                .map(|(id, _)| id),
        }
    }
}

/// Resolve a pointer event on the displayed element to a player, if any.
pub fn hit_test(
    config: &EngineConfig,
    snapshot: &Snapshot,
    query: PointerQuery,
) -> Result<Option<PlayerId>, EngineError> {
    let point = display_to_surface(query.pointer, query.surface, query.displayed)?;
    let tester = HitTester::new(config, query.surface)?;
    Ok(tester.hit(snapshot, point))
}
