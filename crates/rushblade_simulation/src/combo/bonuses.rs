//! Combo multipliers and the pure bonus formula.

use serde::{Deserialize, Serialize};

/// Share of the progress bonus that applies to move speed.
pub const MOVE_BONUS_SCALE: f32 = 0.8;

/// Multipliers granted by the combo meter. All start at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboBonuses {
    pub attack_speed: f32,
    pub move_speed: f32,
    pub damage: f32,
}

impl Default for ComboBonuses {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ComboBonuses {
    pub const IDENTITY: Self = Self {
        attack_speed: 1.0,
        move_speed: 1.0,
        damage: 1.0,
    };

    /// Apply a progress bonus on top of this baseline.
    pub fn scaled(&self, bonus: f32) -> Self {
        let bonus = bonus.max(0.0);
        Self {
            attack_speed: self.attack_speed * (1.0 + bonus),
            move_speed: self.move_speed * (1.0 + bonus * MOVE_BONUS_SCALE),
            damage: self.damage * (1.0 + bonus),
        }
    }
}

/// Bonuses for the given meter state.
///
/// `progress = clamp01(current_combo / hits_per_rank)`,
/// `bonus = current_max_bonus * progress`, applied on top of `saved`.
pub fn compute_bonuses(
    saved: &ComboBonuses,
    current_max_bonus: f32,
    current_combo: u32,
    hits_per_rank: u32,
) -> ComboBonuses {
    let progress = (current_combo as f32 / hits_per_rank.max(1) as f32).clamp(0.0, 1.0);
    saved.scaled(current_max_bonus.max(0.0) * progress)
}
