//! Combat events.
//!
//! `IncomingDamage` comes from outside the simulation (enemy attacks, hazards).
//! Everything else is produced here for feedback, UI and range-indicator
//! collaborators.

use bevy::prelude::*;

use super::attack::{AttackProfile, AttackTier};

/// A swing's windup elapsed; resolve it this tick.
#[derive(Event, Debug, Clone)]
pub struct SwingDue {
    pub attacker: Entity,
    pub tier: AttackTier,
    pub profile: AttackProfile,
}

/// A swing was resolved (for the range indicator).
#[derive(Event, Debug, Clone)]
pub struct SwingResolved {
    pub attacker: Entity,
    pub tier: AttackTier,
    pub origin: Vec2,
    pub facing: Vec2,
    pub radius: f32,
    pub arc_degrees: f32,
    pub hits: usize,
}

/// One target hit by a swing (hit VFX at `position`).
#[derive(Event, Debug, Clone)]
pub struct AttackHit {
    pub attacker: Entity,
    pub target: Entity,
    pub position: Vec2,
    pub damage: u32,
}

/// Damage dealt to an actor by something outside the swing resolver.
#[derive(Event, Debug, Clone)]
pub struct IncomingDamage {
    pub target: Entity,
    pub source: Option<Entity>,
    pub amount: u32,
    /// Direction the hit pushes the target (any length, zero = no push)
    pub direction: Vec2,
}

/// Health was reduced. Emitted for swing hits and incoming damage alike.
#[derive(Event, Debug, Clone)]
pub struct DamageTaken {
    pub target: Entity,
    pub source: Option<Entity>,
    pub amount: u32,
    pub knockback: Vec2,
}

/// Entity health reached zero.
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
