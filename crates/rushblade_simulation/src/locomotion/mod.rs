//! Locomotion module
//!
//! The controller owns the movement state machine (Normal / Dashing /
//! Sliding / Staggered), cooldowns and the windup table for attacks. It is a
//! plain component with a pure `tick`; `drive_locomotion` feeds it input and
//! the fixed clock and hands its output to physics and combat.

use bevy::prelude::*;

pub mod controller;
pub mod mode;
pub mod scheduler;
pub mod systems;


pub use controller::{
    move_towards, LocomotionConfig, LocomotionController, LocomotionSignal, PendingSwing, TickInput, TickReport,
};
pub use mode::LocomotionMode;
pub use scheduler::{CancelToken, DeferredActions};
pub use systems::LocomotionEvent;

use crate::SimulationSet;

/// Locomotion Plugin
///
/// `drive_locomotion` runs after incoming damage has staggered its victims
/// and before combat, so swings that become due this tick are resolved in
/// the same tick unless a hit cancelled them first.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LocomotionEvent>();

        app.add_systems(
            FixedUpdate,
            systems::drive_locomotion.in_set(SimulationSet::Locomotion),
        );
    }
}
