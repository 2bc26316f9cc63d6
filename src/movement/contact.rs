//! Ground, wall and ceiling detection via short shape casts.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{ContactHit, ContactSensor, ContactState};

/// Shape-cast queries against the physics world.
pub trait ShapeCaster {
    /// Cast an axis-aligned box from `origin` along `direction` (unit length)
    /// for at most `max_distance`, returning the first hit.
    fn cast_box(
        &self,
        origin: Vec2,
        half_extents: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: QueryFilter<'_>,
    ) -> Option<ContactHit>;
}

impl ShapeCaster for RapierContext {
    fn cast_box(
        &self,
        origin: Vec2,
        half_extents: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: QueryFilter<'_>,
    ) -> Option<ContactHit> {
        let shape = Collider::cuboid(half_extents.x, half_extents.y);
        let options = ShapeCastOptions {
            max_time_of_impact: max_distance,
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: true,
        };

        self.cast_shape(origin, 0.0, direction, &shape, options, filter)
            .map(|(entity, hit)| ContactHit {
                entity,
                normal: hit.details.map_or(-direction, |details| details.normal2),
                distance: hit.time_of_impact,
            })
    }
}

/// Probe all four directions around a body centred at `origin`.
///
/// Horizontal probes are shrunk vertically by the skin (and vertical probes
/// horizontally) so a floor is never reported as a wall.
pub fn probe_contacts(
    caster: &impl ShapeCaster,
    origin: Vec2,
    sensor: &ContactSensor,
    filter: QueryFilter<'_>,
) -> ContactState {
    let half = sensor.half_extents;
    let horizontal_probe = Vec2::new(half.x, (half.y - sensor.skin).max(0.01));
    let vertical_probe = Vec2::new((half.x - sensor.skin).max(0.01), half.y);

    let ground = caster.cast_box(origin, vertical_probe, Vec2::NEG_Y, sensor.ground_distance, filter);
    let ceiling = caster.cast_box(origin, vertical_probe, Vec2::Y, sensor.ceiling_distance, filter);
    let wall_left = caster.cast_box(origin, horizontal_probe, Vec2::NEG_X, sensor.wall_distance, filter);
    let wall_right = caster.cast_box(origin, horizontal_probe, Vec2::X, sensor.wall_distance, filter);

    ContactState::from_hits(ground, ceiling, wall_left, wall_right)
}

/// Refresh every character's contact state. Runs before movement each fixed tick.
pub fn sense_contacts(
    rapier_context: Query<&RapierContext>,
    mut query: Query<(Entity, &GlobalTransform, &ContactSensor, &mut ContactState)>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (entity, transform, sensor, mut contact) in query.iter_mut() {
        let filter = QueryFilter::default()
            .exclude_collider(entity)
            .exclude_sensors()
            .groups(sensor.filter);

        let sensed = probe_contacts(context, transform.translation().truncate(), sensor, filter);
        if *contact != sensed {
            *contact = sensed;
        }
    }
}
