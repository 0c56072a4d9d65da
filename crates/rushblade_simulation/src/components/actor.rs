//! Actor components: Actor, Health, Player, Enemy

use bevy::prelude::*;

use super::physics::PhysicsBody;

/// Living combatant (player or enemy).
///
/// Pulls in Health and PhysicsBody through Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, PhysicsBody, Transform)]
pub struct Actor;

/// Health pool.
///
/// Invariant: 0 ≤ current ≤ max, max ≥ 1
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Subtract `amount`, saturating at zero. Dead targets take nothing.
    ///
    /// Returns the damage actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// Set health from a save value, clamped to `[0, max]`.
    pub fn init_from_save(&mut self, hp: i64) {
        self.current = hp.clamp(0, i64::from(self.max)) as u32;
    }
}

/// Marker for the player-controlled actor.
///
/// Systems that drive locomotion and persistence use `With<Player>`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Enemy with a stable id, used to match save records on restore.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub struct Enemy {
    pub id: String,
}

impl Enemy {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.take_damage(30), 30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        assert_eq!(health.take_damage(100), 70); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());

        assert_eq!(health.take_damage(10), 0);
    }

    #[test]
    fn test_health_init_from_save_clamps() {
        let mut health = Health::new(100);
        health.init_from_save(-5);
        assert_eq!(health.current, 0);

        health.init_from_save(250);
        assert_eq!(health.current, 100);

        health.init_from_save(42);
        assert_eq!(health.current, 42);
    }

    #[test]
    fn test_zero_max_health_is_clamped() {
        let health = Health::new(0);
        assert_eq!(health.max, 1);
        assert!(health.is_alive());
    }
}
