//! Combo rank meter.
//!
//! Tracks landed hits per actor, decays the running combo after a timeout
//! and promotes the actor through ranks D..S on lifetime session hits.
//! Each rank locks the current multipliers in as the baseline for the next
//! tier, so attack speed, move speed and damage compound across ranks.
//!
//! The meter is a plain component with pure methods; the systems here only
//! feed it the fixed clock and publish its notifications.

use bevy::prelude::*;

pub mod bonuses;
pub mod events;
pub mod meter;
pub mod rank;
pub mod systems;

#[cfg(test)]
mod meter_tests;

pub use bonuses::{compute_bonuses, ComboBonuses, MOVE_BONUS_SCALE};
pub use events::{ComboChanged, RankAchieved};
pub use meter::{ComboConfig, ComboEvent, ComboMeter};
pub use rank::Rank;

use crate::SimulationSet;

/// Combo Plugin
///
/// - `tick_combo_meters` runs first in the tick (timeout decay)
/// - `publish_combo_events` runs after swings and damage are applied
pub struct ComboPlugin;

impl Plugin for ComboPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RankAchieved>().add_event::<ComboChanged>();

        app.add_systems(
            FixedUpdate,
            (
                systems::tick_combo_meters.in_set(SimulationSet::ComboDecay),
                systems::publish_combo_events.in_set(SimulationSet::Publish),
            ),
        );
    }
}
