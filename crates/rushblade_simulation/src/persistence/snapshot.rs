//! Saved session state.

use serde::{Deserialize, Serialize};

use crate::combo::ComboMeter;
use crate::components::{Health, PhysicsBody};
use bevy::prelude::*;

/// Everything a restore needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Fixed-clock time of the save (seconds)
    #[serde(default)]
    pub saved_at: f32,
    pub player: PlayerSnapshot,
    #[serde(default)]
    pub enemies: Vec<EnemySnapshot>,
}

/// Saved player state.
///
/// Counts are signed so out-of-range values from a damaged save survive
/// decoding and get clamped on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub health: i64,
    /// Running combo at save time (informational, restore starts a fresh tier)
    #[serde(default)]
    pub combo_level: u32,
    pub total_hits: i64,
    pub x: f32,
    pub y: f32,
}

impl PlayerSnapshot {
    pub fn capture(health: &Health, meter: &ComboMeter, transform: &Transform) -> Self {
        Self {
            health: i64::from(health.current),
            combo_level: meter.combo_level(),
            total_hits: i64::from(meter.total_hits()),
            x: transform.translation.x,
            y: transform.translation.y,
        }
    }
}

/// Saved enemy state, matched on restore by `Enemy::id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub id: String,
    pub health: i64,
    pub x: f32,
    pub y: f32,
}

/// Apply the player part of a snapshot.
///
/// Health clamps to `[0, max]`, the hit count clamps at zero, velocity is
/// cleared.
pub fn apply_player_snapshot(
    snapshot: &PlayerSnapshot,
    health: &mut Health,
    meter: &mut ComboMeter,
    transform: &mut Transform,
    body: Option<&mut PhysicsBody>,
) {
    health.init_from_save(snapshot.health);
    meter.load_from_hits(snapshot.total_hits);
    transform.translation.x = snapshot.x;
    transform.translation.y = snapshot.y;
    if let Some(body) = body {
        body.velocity = Vec2::ZERO;
    }
}
