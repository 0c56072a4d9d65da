//! Attack tiers and their tuning.

use serde::{Deserialize, Serialize};

/// Light or heavy swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTier {
    Light,
    Heavy,
}

/// Tuning for one attack tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackProfile {
    /// Reach from the attacker's position (meters)
    pub radius: f32,
    /// Full width of the hit sector (degrees)
    pub arc_degrees: f32,
    /// Damage before the combo multiplier
    pub damage: u32,
    /// Impulse applied to each target, away from the attacker
    pub knockback: f32,
    /// Delay between trigger and resolution (seconds)
    pub windup: f32,
    /// Base cooldown, divided by the attack-speed multiplier at trigger time
    pub cooldown: f32,
}

impl AttackProfile {
    pub fn light() -> Self {
        Self {
            radius: 2.5,
            arc_degrees: 120.0,
            damage: 10,
            knockback: 7.0,
            windup: 0.04,
            cooldown: 0.25,
        }
    }

    pub fn heavy() -> Self {
        Self {
            radius: 3.5,
            arc_degrees: 120.0,
            damage: 20,
            knockback: 7.0,
            windup: 0.12,
            cooldown: 0.6,
        }
    }

    pub fn half_angle_degrees(&self) -> f32 {
        self.arc_degrees * 0.5
    }

    pub fn sanitized(self) -> Self {
        Self {
            radius: self.radius.max(0.0),
            arc_degrees: self.arc_degrees.clamp(0.0, 360.0),
            damage: self.damage,
            knockback: self.knockback.max(0.0),
            windup: self.windup.max(0.0),
            cooldown: self.cooldown.max(0.0),
        }
    }
}

impl Default for AttackProfile {
    fn default() -> Self {
        Self::light()
    }
}

/// Both tiers together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackLoadout {
    pub light: AttackProfile,
    pub heavy: AttackProfile,
}

impl Default for AttackLoadout {
    fn default() -> Self {
        Self {
            light: AttackProfile::light(),
            heavy: AttackProfile::heavy(),
        }
    }
}

impl AttackLoadout {
    pub fn profile(&self, tier: AttackTier) -> &AttackProfile {
        match tier {
            AttackTier::Light => &self.light,
            AttackTier::Heavy => &self.heavy,
        }
    }

    pub fn sanitized(self) -> Self {
        Self {
            light: self.light.sanitized(),
            heavy: self.heavy.sanitized(),
        }
    }
}
