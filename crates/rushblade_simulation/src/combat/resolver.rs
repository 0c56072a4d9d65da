//! Directional sector query: who a swing hits, for how much, and which way
//! they get pushed.
//!
//! Pure and stateless. The ECS side adapts its target queries to
//! [`Damageable`] and feeds every returned hit to the attacker's combo meter.

use bevy::prelude::*;

use super::layers::CombatLayers;

/// Capability a swing needs from a target.
pub trait Damageable {
    type Id: Copy;

    fn id(&self) -> Self::Id;
    fn position(&self) -> Vec2;
    fn layers(&self) -> CombatLayers;
    fn take_damage(&mut self, amount: u32, knockback: Vec2);
}

/// One swing, fully parameterised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingParams {
    pub origin: Vec2,
    pub facing: Vec2,
    pub radius: f32,
    pub half_angle_degrees: f32,
    pub damage: u32,
    pub knockback: f32,
    pub damage_multiplier: f32,
    pub mask: CombatLayers,
}

impl SwingParams {
    /// Unit facing. Zero facing falls back to +X.
    pub fn direction(&self) -> Vec2 {
        self.facing.try_normalize().unwrap_or(Vec2::X)
    }

    /// `damage * multiplier` rounded half to even, multiplier clamped at zero.
    pub fn applied_damage(&self) -> u32 {
        (self.damage as f32 * self.damage_multiplier.max(0.0)).round_ties_even() as u32
    }

    /// Range and angle test for a single point.
    ///
    /// A point exactly at the origin is inside.
    pub fn contains(&self, point: Vec2) -> bool {
        let offset = point - self.origin;
        if offset.length_squared() > self.radius * self.radius {
            return false;
        }
        let Some(to_target) = offset.try_normalize() else {
            return true;
        };
        let cos = self.direction().dot(to_target).clamp(-1.0, 1.0);
        cos.acos().to_degrees() <= self.half_angle_degrees
    }

    /// Knockback impulse for a target at `point`.
    pub fn knockback_for(&self, point: Vec2) -> Vec2 {
        let away = (point - self.origin)
            .try_normalize()
            .unwrap_or_else(|| self.direction());
        away * self.knockback
    }
}

/// A target hit by a swing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord<Id> {
    pub target: Id,
    pub position: Vec2,
    pub applied_damage: u32,
    pub knockback: Vec2,
}

/// Resolve one swing against `candidates`.
///
/// Candidates outside the mask, radius or arc are skipped. Every kept target
/// takes damage and knockback through [`Damageable::take_damage`]. The result
/// has one record per hit; callers register one combo hit per record.
pub fn resolve_swing<T, I>(params: &SwingParams, candidates: I) -> Vec<HitRecord<T::Id>>
where
    T: Damageable,
    I: IntoIterator<Item = T>,
{
    let applied_damage = params.applied_damage();
    let mut hits = Vec::new();

    for mut target in candidates {
        if !target.layers().intersects(params.mask) {
            continue;
        }
        let position = target.position();
        if !params.contains(position) {
            continue;
        }

        let knockback = params.knockback_for(position);
        target.take_damage(applied_damage, knockback);
        hits.push(HitRecord {
            target: target.id(),
            position,
            applied_damage,
            knockback,
        });
    }

    hits
}
