//! Locomotion systems.

use bevy::prelude::*;

use super::controller::{LocomotionController, LocomotionSignal, TickInput};
use crate::combat::{Dead, SwingDue};
use crate::combo::ComboMeter;
use crate::components::{ActorInput, InputLatch, PhysicsBody};

/// Controller signal tagged with its actor (animation/audio collaborators).
#[derive(Event, Debug, Clone)]
pub struct LocomotionEvent {
    pub entity: Entity,
    pub signal: LocomotionSignal,
}

/// System: run every controller for one fixed tick.
///
/// Reads the combo bonuses as they stand after this tick's decay, writes
/// the body velocity and emits swings whose windup elapsed.
pub fn drive_locomotion(
    mut actors: Query<
        (
            Entity,
            &mut LocomotionController,
            &ActorInput,
            &mut InputLatch,
            &ComboMeter,
            &mut PhysicsBody,
        ),
        Without<Dead>,
    >,
    mut swing_events: EventWriter<SwingDue>,
    mut locomotion_events: EventWriter<LocomotionEvent>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    for (entity, mut controller, input, mut latch, meter, mut body) in actors.iter_mut() {
        let tick_input = TickInput::new(input.direction, latch.press_edges(input.held));
        let report = controller.tick(&tick_input, now, delta, &meter.bonuses());

        body.velocity = report.velocity;

        for signal in report.signals {
            locomotion_events.write(LocomotionEvent { entity, signal });
        }
        for swing in report.swings {
            swing_events.write(SwingDue {
                attacker: entity,
                tier: swing.tier,
                profile: swing.profile,
            });
        }
    }
}
