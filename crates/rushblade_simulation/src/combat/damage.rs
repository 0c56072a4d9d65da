//! Damage pipeline: incoming damage, hit reactions, death and corpse cleanup.

use bevy::prelude::*;
use std::collections::HashSet;

use super::events::{DamageTaken, EntityDied, IncomingDamage};
use crate::combo::ComboMeter;
use crate::components::{Health, PhysicsBody, Player};
use crate::locomotion::LocomotionController;

/// Damage response tuning.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CombatTuning {
    /// Impulse applied to a target of `IncomingDamage`
    pub hit_knockback: f32,
    /// Seconds a dead non-player body stays before despawn
    pub corpse_linger: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            hit_knockback: 3.0,
            corpse_linger: 1.0,
        }
    }
}

/// Marker: entity is dead (health reached zero).
///
/// Dead entities are no longer swing targets and no longer move on their own.
#[derive(Component, Debug)]
pub struct Dead;

/// Despawn the entity once the fixed clock passes `despawn_time`.
#[derive(Component, Debug)]
pub struct DespawnAfter {
    /// Fixed-clock time (seconds)
    pub despawn_time: f32,
}

/// System: apply `IncomingDamage` to health and push the target.
pub fn apply_incoming_damage(
    mut incoming: EventReader<IncomingDamage>,
    mut targets: Query<(&mut Health, &mut PhysicsBody), Without<Dead>>,
    mut damage_events: EventWriter<DamageTaken>,
    tuning: Res<CombatTuning>,
) {
    for event in incoming.read() {
        let Ok((mut health, mut body)) = targets.get_mut(event.target) else {
            crate::logger::log_warning(&format!(
                "IncomingDamage for missing or dead target {:?}",
                event.target
            ));
            continue;
        };

        let amount = health.take_damage(event.amount);
        let knockback = event.direction.normalize_or_zero() * tuning.hit_knockback;
        body.apply_impulse(knockback);

        damage_events.write(DamageTaken {
            target: event.target,
            source: event.source,
            amount,
            knockback,
        });
    }
}

/// System: stagger controllers that took damage and handle deaths.
///
/// An actor with a locomotion controller and combo meter loses its combo and
/// any pending swing. A target at zero health gets `Dead`, and non-players
/// are scheduled for despawn.
pub fn react_to_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageTaken>,
    mut victims: Query<
        (
            &Health,
            Option<&mut LocomotionController>,
            Option<&mut ComboMeter>,
            Has<Player>,
        ),
        Without<Dead>,
    >,
    mut death_events: EventWriter<EntityDied>,
    tuning: Res<CombatTuning>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();
    let mut died = HashSet::new();

    for event in damage_events.read() {
        if died.contains(&event.target) {
            continue;
        }
        let Ok((health, controller, meter, is_player)) = victims.get_mut(event.target) else {
            continue;
        };

        if let (Some(mut controller), Some(mut meter)) = (controller, meter) {
            controller.take_hit(&mut meter, now);
        }

        if health.is_alive() {
            continue;
        }

        died.insert(event.target);
        let mut entity_commands = commands.entity(event.target);
        entity_commands.insert(Dead);
        if !is_player {
            entity_commands.insert(DespawnAfter {
                despawn_time: now + tuning.corpse_linger,
            });
        }

        crate::logger::log_info(&format!(
            "Entity {:?} died (killer: {:?})",
            event.target, event.source
        ));
        death_events.write(EntityDied {
            entity: event.target,
            killer: event.source,
        });
    }
}

/// System: despawn entities whose `DespawnAfter` time has passed.
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
