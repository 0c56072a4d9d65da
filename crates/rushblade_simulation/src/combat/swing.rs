//! Swing resolution system: turns due swings into hits against the world.

use bevy::prelude::*;

use super::attacker::Attacker;
use super::damage::Dead;
use super::events::{AttackHit, DamageTaken, SwingDue, SwingResolved};
use super::layers::{CombatLayers, Hurtbox};
use super::resolver::{resolve_swing, Damageable, SwingParams};
use crate::combo::ComboMeter;
use crate::components::{planar_position, Health, PhysicsBody};
use crate::locomotion::LocomotionController;

/// Query view of one damageable entity.
struct SwingTarget<'w> {
    entity: Entity,
    position: Vec2,
    layers: CombatLayers,
    health: Mut<'w, Health>,
    body: Mut<'w, PhysicsBody>,
}

impl Damageable for SwingTarget<'_> {
    type Id = Entity;

    fn id(&self) -> Entity {
        self.entity
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn layers(&self) -> CombatLayers {
        self.layers
    }

    fn take_damage(&mut self, amount: u32, knockback: Vec2) {
        self.health.take_damage(amount);
        self.body.apply_impulse(knockback);
    }
}

/// System: resolve every swing whose windup elapsed this tick.
///
/// Uses the attacker's position, facing and combo damage multiplier at
/// resolution time. Each hit registers one combo hit on the attacker.
pub fn resolve_due_swings(
    mut swings: EventReader<SwingDue>,
    mut attackers: Query<(&Transform, &LocomotionController, &Attacker, &mut ComboMeter), Without<Dead>>,
    mut targets: Query<(Entity, &Transform, &Hurtbox, &mut Health, &mut PhysicsBody), Without<Dead>>,
    mut hit_events: EventWriter<AttackHit>,
    mut damage_events: EventWriter<DamageTaken>,
    mut resolved_events: EventWriter<SwingResolved>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for swing in swings.read() {
        let Ok((transform, controller, attacker, mut meter)) = attackers.get_mut(swing.attacker) else {
            // Attacker died or despawned during windup.
            continue;
        };

        let params = SwingParams {
            origin: planar_position(transform),
            facing: controller.facing(),
            radius: swing.profile.radius,
            half_angle_degrees: swing.profile.half_angle_degrees(),
            damage: swing.profile.damage,
            knockback: swing.profile.knockback,
            damage_multiplier: meter.bonuses().damage,
            mask: attacker.mask,
        };

        let candidates = targets
            .iter_mut()
            .filter(|(entity, ..)| *entity != swing.attacker)
            .filter(|(_, _, _, health, _)| health.is_alive())
            .map(|(entity, transform, hurtbox, health, body)| SwingTarget {
                entity,
                position: planar_position(transform),
                layers: hurtbox.layers,
                health,
                body,
            });
        let hits = resolve_swing(&params, candidates);

        for hit in &hits {
            meter.register_hit(now);
            hit_events.write(AttackHit {
                attacker: swing.attacker,
                target: hit.target,
                position: hit.position,
                damage: hit.applied_damage,
            });
            damage_events.write(DamageTaken {
                target: hit.target,
                source: Some(swing.attacker),
                amount: hit.applied_damage,
                knockback: hit.knockback,
            });
        }

        crate::logger::log(&format!(
            "Swing {:?} by {:?} resolved: {} hit(s), x{:.2} damage",
            swing.tier,
            swing.attacker,
            hits.len(),
            params.damage_multiplier
        ));
        resolved_events.write(SwingResolved {
            attacker: swing.attacker,
            tier: swing.tier,
            origin: params.origin,
            facing: params.direction(),
            radius: params.radius,
            arc_degrees: swing.profile.arc_degrees,
            hits: hits.len(),
        });
    }
}
