//! Collision resolution between the ball, the boxes and the home base
//!
//! Resolution is read-only: it scans a snapshot of the live boxes and returns
//! events. The session removes boxes and updates lives when applying them.

use glam::Vec2;

use super::field::BoxField;
use super::state::GameEvent;
use crate::settings::GameSettings;
use crate::vision::TrackedObject;

/// The circle boxes must not reach
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseZone {
    pub center: Vec2,
    pub radius: f32,
}

impl BaseZone {
    /// Base for the field size configured in `settings`
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::for_field(settings, settings.field_size())
    }

    /// Base centered under a field of the given size
    pub fn for_field(settings: &GameSettings, field_size: Vec2) -> Self {
        Self {
            center: settings.base_point_in(field_size),
            radius: settings.base_radius,
        }
    }
}

/// Two circles overlap only when strictly closer than their combined radii
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Find every hit and every base breach this tick
///
/// A box that is hit is not also tested against the base. The hit test is
/// skipped entirely while the ball is undetected or moving away.
pub fn resolve(tracked: &TrackedObject, field: &BoxField, base: &BaseZone) -> Vec<GameEvent> {
    let ball_live = tracked.detected && !tracked.suppressed;
    let mut events = Vec::new();

    for b in field.boxes() {
        let center = b.center();
        let radius = b.collision_radius();

        if ball_live && circles_overlap(center, radius, tracked.centroid, tracked.radius) {
            events.push(GameEvent::BoxHit {
                box_id: b.id,
                impact_point: center,
            });
            continue;
        }

        if circles_overlap(center, radius, base.center, base.radius) {
            events.push(GameEvent::BoxReachedBase { box_id: b.id });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::FieldParams;
    use proptest::prelude::*;

    fn field_with(positions: &[Vec2]) -> BoxField {
        let mut field = BoxField::new(FieldParams::from(&GameSettings::default()));
        for &pos in positions {
            field.insert_box(pos, [255, 0, 0]);
        }
        field
    }

    fn base() -> BaseZone {
        BaseZone::from_settings(&GameSettings::default())
    }

    #[test]
    fn test_overlap_boundary_is_strict() {
        let a = Vec2::new(100.0, 100.0);
        assert!(!circles_overlap(a, 20.0, Vec2::new(130.0, 100.0), 10.0));
        assert!(circles_overlap(a, 20.0, Vec2::new(129.999, 100.0), 10.0));
    }

    #[test]
    fn test_hit_at_exact_sum_is_miss() {
        // Box center (100, 100), radius 20
        let field = field_with(&[Vec2::new(70.0, 70.0)]);
        let exact = TrackedObject::at(Vec2::new(100.0, 130.0), 10.0);
        assert!(resolve(&exact, &field, &base()).is_empty());

        let inside = TrackedObject::at(Vec2::new(100.0, 129.999), 10.0);
        let events = resolve(&inside, &field, &base());
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::BoxHit { box_id: 1, .. }));
    }

    #[test]
    fn test_hit_reports_box_center() {
        let field = field_with(&[Vec2::new(70.0, 70.0)]);
        let ball = TrackedObject::at(Vec2::new(103.0, 104.0), 15.0);
        let events = resolve(&ball, &field, &base());
        assert_eq!(
            events,
            vec![GameEvent::BoxHit {
                box_id: 1,
                impact_point: Vec2::new(100.0, 100.0)
            }]
        );
    }

    #[test]
    fn test_overlapping_boxes_all_hit() {
        let field = field_with(&[Vec2::new(70.0, 70.0), Vec2::new(80.0, 70.0)]);
        let ball = TrackedObject::at(Vec2::new(105.0, 100.0), 12.0);
        let events = resolve(&ball, &field, &base());
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| matches!(e, GameEvent::BoxHit { .. })));
    }

    #[test]
    fn test_undetected_ball_never_hits() {
        let field = field_with(&[Vec2::new(70.0, 70.0)]);
        let mut ball = TrackedObject::at(Vec2::new(100.0, 100.0), 30.0);
        ball.detected = false;
        assert!(resolve(&ball, &field, &base()).is_empty());
    }

    #[test]
    fn test_base_follows_field_size() {
        let settings = GameSettings::default();
        let zone = BaseZone::for_field(&settings, Vec2::new(320.0, 240.0));
        assert_eq!(zone.center, Vec2::new(160.0, 265.0));
        assert_eq!(zone.radius, settings.base_radius);
    }

    #[test]
    fn test_box_at_base() {
        // Center exactly on the base point (320, 505)
        let field = field_with(&[Vec2::new(290.0, 475.0)]);
        let events = resolve(&TrackedObject::not_detected(), &field, &base());
        assert_eq!(events, vec![GameEvent::BoxReachedBase { box_id: 1 }]);
    }

    #[test]
    fn test_base_boundary_is_strict() {
        // Box radius 20 + base radius 100 = 120; center straight above the base point
        let field = field_with(&[Vec2::new(290.0, 505.0 - 120.0 - 30.0)]);
        assert!(resolve(&TrackedObject::not_detected(), &field, &base()).is_empty());

        let field = field_with(&[Vec2::new(290.0, 505.0 - 119.5 - 30.0)]);
        assert_eq!(resolve(&TrackedObject::not_detected(), &field, &base()).len(), 1);
    }

    #[test]
    fn test_hit_takes_precedence_over_base() {
        let field = field_with(&[Vec2::new(290.0, 475.0)]);
        let ball = TrackedObject::at(Vec2::new(320.0, 505.0), 10.0);
        let events = resolve(&ball, &field, &base());
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::BoxHit { .. }));
    }

    #[test]
    fn test_base_ignores_suppression() {
        let field = field_with(&[Vec2::new(290.0, 475.0)]);
        let mut ball = TrackedObject::at(Vec2::new(320.0, 505.0), 10.0);
        ball.suppressed = true;
        let events = resolve(&ball, &field, &base());
        assert_eq!(events, vec![GameEvent::BoxReachedBase { box_id: 1 }]);
    }

    proptest! {
        #[test]
        fn prop_suppressed_ball_never_hits(
            boxes in prop::collection::vec((0.0f32..640.0, 0.0f32..480.0), 1..8),
            bx in 0.0f32..640.0,
            by in 0.0f32..480.0,
            br in 0.0f32..200.0,
        ) {
            let positions: Vec<Vec2> = boxes.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
            let field = field_with(&positions);
            let mut ball = TrackedObject::at(Vec2::new(bx, by), br);
            ball.suppressed = true;
            let events = resolve(&ball, &field, &base());
            let no_hits = events
                .iter()
                .all(|e| matches!(e, GameEvent::BoxReachedBase { .. }));
            prop_assert!(no_hits);
        }
    }
}
