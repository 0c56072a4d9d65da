//! Kinematic body state shared by the player and damageable targets.

use bevy::prelude::*;

/// Planar velocity integrated into `Transform` each fixed tick.
///
/// The player's velocity is written by the locomotion controller every tick.
/// Other bodies keep whatever knockback they received and bleed it off
/// through `linear_damping`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec2,
    /// Mass for impulse response (kg), never below `MIN_MASS`
    pub mass: f32,
    /// Fraction of velocity lost per second (0 = none)
    pub linear_damping: f32,
}

impl PhysicsBody {
    pub const MIN_MASS: f32 = 0.01;

    pub fn new(mass: f32) -> Self {
        Self {
            mass: mass.max(Self::MIN_MASS),
            ..default()
        }
    }

    /// Instant velocity change from an impulse.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass.max(Self::MIN_MASS);
    }

    /// Exponential-ish damping step, clamped so it never reverses direction.
    pub fn damp(&mut self, delta: f32) {
        let keep = (1.0 - self.linear_damping.max(0.0) * delta).max(0.0);
        self.velocity *= keep;
        if self.velocity.length_squared() < 1e-6 {
            self.velocity = Vec2::ZERO;
        }
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass: 1.0,
            linear_damping: 8.0,
        }
    }
}

/// Planar position of an entity (x, y of the translation).
pub fn planar_position(transform: &Transform) -> Vec2 {
    transform.translation.truncate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_scales_with_mass() {
        let mut light = PhysicsBody::new(1.0);
        let mut heavy = PhysicsBody::new(4.0);

        light.apply_impulse(Vec2::new(8.0, 0.0));
        heavy.apply_impulse(Vec2::new(8.0, 0.0));

        assert_eq!(light.velocity, Vec2::new(8.0, 0.0));
        assert_eq!(heavy.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_damping_never_reverses() {
        let mut body = PhysicsBody::default();
        body.velocity = Vec2::new(5.0, -3.0);

        // Huge delta would overshoot a naive integrator.
        body.damp(10.0);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_zero_mass_is_clamped() {
        let mut body = PhysicsBody::new(0.0);
        body.apply_impulse(Vec2::X);
        assert!(body.velocity.x.is_finite());
    }
}
