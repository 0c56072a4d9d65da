//! Velocity integration for planar bodies.
//!
//! Headless stand-in for the engine's physics step: the host normally owns
//! collision and integration, so this only does `position += velocity * dt`.

use bevy::prelude::*;

use crate::components::PhysicsBody;
use crate::locomotion::LocomotionController;

/// System: bleed off knockback on bodies nobody steers.
///
/// Controller-driven bodies get their velocity rewritten every tick.
pub fn damp_free_bodies(
    mut query: Query<&mut PhysicsBody, Without<LocomotionController>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut body in query.iter_mut() {
        if body.velocity != Vec2::ZERO {
            body.damp(delta);
        }
    }
}

/// System: integrate velocity into `Transform` (x, y plane).
pub fn integrate_velocity_to_transform(
    mut query: Query<(&PhysicsBody, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        if body.velocity == Vec2::ZERO {
            continue;
        }
        transform.translation += (body.velocity * delta).extend(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_integration_moves_body() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(Time::<Fixed>::from_hz(64.0));
        app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            Duration::from_micros(15_625),
        ));
        app.add_systems(FixedUpdate, (damp_free_bodies, integrate_velocity_to_transform).chain());

        let entity = app
            .world_mut()
            .spawn((
                Transform::default(),
                PhysicsBody {
                    velocity: Vec2::new(4.0, 0.0),
                    linear_damping: 0.0,
                    ..default()
                },
            ))
            .id();

        for _ in 0..65 {
            app.update();
        }

        // First update has zero delta, then 64 ticks of 1/64 s.
        let transform = app.world().get::<Transform>(entity).expect("entity");
        assert!((transform.translation.x - 4.0).abs() < 1e-3, "x = {}", transform.translation.x);
        assert_eq!(transform.translation.y, 0.0);
    }
}
