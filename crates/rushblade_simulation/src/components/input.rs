//! Per-tick input written by the input collaborator.

use bevy::prelude::*;
use bitflags::bitflags;

bitflags! {
    /// Action keys sampled each tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ActionButtons: u8 {
        const DASH         = 1 << 0;
        const LIGHT_ATTACK = 1 << 1;
        const HEAVY_ATTACK = 1 << 2;
    }
}

/// Raw input state for an actor: movement axes and held buttons.
///
/// For headless runs and tests this is filled directly; a game host writes
/// it from its device layer before the fixed tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ActorInput {
    /// Movement axes, normalised by the controller
    pub direction: Vec2,
    /// Buttons currently held down
    pub held: ActionButtons,
}

/// Turns held-button state into press edges.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct InputLatch {
    previous: ActionButtons,
}

impl InputLatch {
    /// Buttons that went down since the last call.
    pub fn press_edges(&mut self, held: ActionButtons) -> ActionButtons {
        let pressed = held & !self.previous;
        self.previous = held;
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edges_fire_once_per_press() {
        let mut latch = InputLatch::default();

        assert_eq!(latch.press_edges(ActionButtons::DASH), ActionButtons::DASH);
        // Still held: no new edge
        assert_eq!(latch.press_edges(ActionButtons::DASH), ActionButtons::empty());

        let both = ActionButtons::DASH | ActionButtons::LIGHT_ATTACK;
        assert_eq!(latch.press_edges(both), ActionButtons::LIGHT_ATTACK);

        assert_eq!(latch.press_edges(ActionButtons::empty()), ActionButtons::empty());
        assert_eq!(latch.press_edges(ActionButtons::DASH), ActionButtons::DASH);
    }
}
