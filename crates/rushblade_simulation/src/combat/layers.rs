//! Combat layers used as the spatial filter mask for swings.

use bevy::prelude::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Which groups an entity belongs to (on a hurtbox) or hits (on a swing).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CombatLayers: u8 {
        const PLAYER       = 1 << 0;
        const ENEMY        = 1 << 1;
        const DESTRUCTIBLE = 1 << 2;
    }
}

/// Marks an entity as a valid swing target.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hurtbox {
    pub layers: CombatLayers,
}

impl Hurtbox {
    pub fn new(layers: CombatLayers) -> Self {
        Self { layers }
    }

    /// True if a swing with `mask` can hit this hurtbox.
    pub fn matches(&self, mask: CombatLayers) -> bool {
        self.layers.intersects(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hurtbox_mask() {
        let crate_box = Hurtbox::new(CombatLayers::DESTRUCTIBLE);
        let enemy = Hurtbox::new(CombatLayers::ENEMY);
        let mask = CombatLayers::ENEMY | CombatLayers::DESTRUCTIBLE;

        assert!(crate_box.matches(mask));
        assert!(enemy.matches(mask));
        assert!(!Hurtbox::new(CombatLayers::PLAYER).matches(mask));
        assert!(!enemy.matches(CombatLayers::empty()));
    }
}
