//! Attacker component: what an actor's swings are allowed to hit.

use bevy::prelude::*;

use super::layers::CombatLayers;

/// Actor that can resolve swings.
///
/// Swing geometry and damage come from the locomotion controller's loadout;
/// this only carries the target mask.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attacker {
    pub mask: CombatLayers,
}

impl Default for Attacker {
    fn default() -> Self {
        Self {
            mask: CombatLayers::ENEMY | CombatLayers::DESTRUCTIBLE,
        }
    }
}

impl Attacker {
    pub fn new(mask: CombatLayers) -> Self {
        Self { mask }
    }
}
