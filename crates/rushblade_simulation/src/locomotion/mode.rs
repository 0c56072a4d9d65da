//! Exclusive locomotion modes.

use bevy::prelude::*;

/// Movement mode. Exactly one is active; mode data lives in the variant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum LocomotionMode {
    /// Input-driven movement with acceleration blending
    #[default]
    Normal,
    /// Fixed-speed burst along `direction`
    Dashing { timer: f32, direction: Vec2 },
    /// Decaying-speed slide along `direction`, cancellable by attacks
    Sliding { timer: f32, direction: Vec2, speed: f32 },
    /// Forced idle after taking damage
    Staggered { timer: f32 },
}

impl LocomotionMode {
    pub fn is_normal(&self) -> bool {
        matches!(self, LocomotionMode::Normal)
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self, LocomotionMode::Dashing { .. })
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self, LocomotionMode::Sliding { .. })
    }

    pub fn is_staggered(&self) -> bool {
        matches!(self, LocomotionMode::Staggered { .. })
    }

    /// Dash and slide lock the movement direction (and facing).
    pub fn locks_direction(&self) -> bool {
        self.is_dashing() || self.is_sliding()
    }

    /// Remaining time of the current mode (0 in Normal).
    pub fn timer(&self) -> f32 {
        match *self {
            LocomotionMode::Normal => 0.0,
            LocomotionMode::Dashing { timer, .. }
            | LocomotionMode::Sliding { timer, .. }
            | LocomotionMode::Staggered { timer } => timer,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocomotionMode::Normal => "Normal",
            LocomotionMode::Dashing { .. } => "Dashing",
            LocomotionMode::Sliding { .. } => "Sliding",
            LocomotionMode::Staggered { .. } => "Staggered",
        }
    }
}
