//! Combo systems.

use bevy::prelude::*;

use super::events::{ComboChanged, RankAchieved};
use super::meter::{ComboEvent, ComboMeter};

/// System: drop timed-out combos.
pub fn tick_combo_meters(mut meters: Query<&mut ComboMeter>, time: Res<Time<Fixed>>) {
    let now = time.elapsed_secs();

    for mut meter in meters.iter_mut() {
        meter.tick(now);
    }
}

/// System: forward queued meter notifications as Bevy events.
///
/// Runs after everything that can mutate a meter this tick (hits, damage,
/// restores), so readers see one consistent batch per tick.
pub fn publish_combo_events(
    mut meters: Query<(Entity, &mut ComboMeter)>,
    mut rank_events: EventWriter<RankAchieved>,
    mut changed_events: EventWriter<ComboChanged>,
) {
    for (entity, mut meter) in meters.iter_mut() {
        for event in meter.take_events() {
            match event {
                ComboEvent::RankAchieved(rank) => {
                    rank_events.write(RankAchieved { entity, rank });
                }
                ComboEvent::Changed { combo, bonuses, rank } => {
                    changed_events.write(ComboChanged {
                        entity,
                        combo,
                        bonuses,
                        rank,
                    });
                }
            }
        }
    }
}
