//! Physics module
//!
//! Planar velocity integration and knockback damping for headless runs.

use bevy::prelude::*;

pub mod movement;

pub use movement::{damp_free_bodies, integrate_velocity_to_transform};

use crate::SimulationSet;

/// Physics Plugin: runs last in the tick, after every velocity write.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (damp_free_bodies, integrate_velocity_to_transform)
                .chain()
                .in_set(SimulationSet::Physics),
        );
    }
}
