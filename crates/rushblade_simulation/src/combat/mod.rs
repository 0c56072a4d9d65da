//! Combat module
//!
//! - resolver: pure directional sector query (`resolve_swing`)
//! - swing: ECS adapter that resolves due swings against hurtboxes
//! - damage: incoming damage, stagger reaction, death, corpse cleanup
//!
//! Swings are scheduled by the locomotion controller (windup) and arrive here
//! as `SwingDue` events. Every hit feeds the attacker's combo meter, and every
//! `DamageTaken` on an actor with a controller interrupts its combo.

use bevy::prelude::*;

pub mod attack;
pub mod attacker;
pub mod damage;
pub mod events;
pub mod layers;
pub mod resolver;
pub mod swing;

#[cfg(test)]
mod resolver_tests;

pub use attack::{AttackLoadout, AttackProfile, AttackTier};
pub use attacker::Attacker;
pub use damage::{CombatTuning, Dead, DespawnAfter};
pub use events::{AttackHit, DamageTaken, EntityDied, IncomingDamage, SwingDue, SwingResolved};
pub use layers::{CombatLayers, Hurtbox};
pub use resolver::{resolve_swing, Damageable, HitRecord, SwingParams};

use crate::SimulationSet;

/// Combat Plugin
///
/// Order inside the tick:
/// 1. apply_incoming_damage, react_to_damage (Damage, before controllers
///    tick: a hit cancels a windup expiring on the same tick)
/// 2. resolve_due_swings (Combat)
/// 3. despawn_after_timeout (Reactions)
///
/// `DamageTaken` written by swings is picked up by `react_to_damage` on the
/// next tick.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>();

        app.add_event::<SwingDue>()
            .add_event::<SwingResolved>()
            .add_event::<AttackHit>()
            .add_event::<IncomingDamage>()
            .add_event::<DamageTaken>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (
                (damage::apply_incoming_damage, damage::react_to_damage)
                    .chain()
                    .in_set(SimulationSet::Damage),
                swing::resolve_due_swings.in_set(SimulationSet::Combat),
                damage::despawn_after_timeout.in_set(SimulationSet::Reactions),
            ),
        );
    }
}
