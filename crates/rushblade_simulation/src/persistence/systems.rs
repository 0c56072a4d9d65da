//! Save/restore systems and their request/notification events.

use bevy::prelude::*;
use std::collections::HashMap;

use super::snapshot::{apply_player_snapshot, EnemySnapshot, PlayerSnapshot, SessionSnapshot};
use super::Persistence;
use crate::combat::{Dead, DespawnAfter};
use crate::combo::ComboMeter;
use crate::components::{Enemy, Health, PhysicsBody, Player};

/// Request: save the session at the end of this tick.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SaveRequested;

/// Request: restore the last saved session.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LoadRequested;

/// A save completed (save icon flash).
#[derive(Event, Debug, Clone)]
pub struct SessionSaved {
    pub enemies: usize,
}

/// A restore completed.
#[derive(Event, Debug, Clone)]
pub struct SessionRestored {
    pub total_hits: u32,
    pub enemies_restored: usize,
}

/// System: write a snapshot when a save was requested.
///
/// Several requests in one tick produce one save.
pub fn save_session(
    mut requests: EventReader<SaveRequested>,
    persistence: Res<Persistence>,
    players: Query<(&Health, &ComboMeter, &Transform), With<Player>>,
    enemies: Query<(&Enemy, &Health, &Transform), (Without<Player>, Without<Dead>)>,
    mut saved_events: EventWriter<SessionSaved>,
    time: Res<Time<Fixed>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    let Ok((health, meter, transform)) = players.single() else {
        crate::logger::log_warning("Save requested but there is no single player to save");
        return;
    };

    let mut enemy_snapshots: Vec<EnemySnapshot> = enemies
        .iter()
        .map(|(enemy, health, transform)| EnemySnapshot {
            id: enemy.id.clone(),
            health: i64::from(health.current),
            x: transform.translation.x,
            y: transform.translation.y,
        })
        .collect();
    enemy_snapshots.sort_by(|a, b| a.id.cmp(&b.id));

    let snapshot = SessionSnapshot {
        saved_at: time.elapsed_secs(),
        player: PlayerSnapshot::capture(health, meter, transform),
        enemies: enemy_snapshots,
    };

    match persistence.store().write(&snapshot) {
        Ok(()) => {
            crate::logger::log_info(&format!(
                "Session saved (hp {}, hits {}, {} enemies)",
                snapshot.player.health,
                snapshot.player.total_hits,
                snapshot.enemies.len()
            ));
            saved_events.write(SessionSaved {
                enemies: snapshot.enemies.len(),
            });
        }
        Err(e) => crate::logger::log_error(&format!("Session save failed: {}", e)),
    }
}

/// System: restore the saved snapshot when a load was requested.
///
/// A missing save is logged and ignored. Enemies are matched by id; saved
/// enemies with no live counterpart are skipped.
pub fn restore_session(
    mut commands: Commands,
    mut requests: EventReader<LoadRequested>,
    persistence: Res<Persistence>,
    mut players: Query<
        (Entity, &mut Health, &mut ComboMeter, &mut Transform, Option<&mut PhysicsBody>),
        With<Player>,
    >,
    mut enemies: Query<(Entity, &Enemy, &mut Health, &mut Transform), Without<Player>>,
    mut restored_events: EventWriter<SessionRestored>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    let snapshot = match persistence.store().read() {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            crate::logger::log_info("No saved session found");
            return;
        }
        Err(e) => {
            crate::logger::log_error(&format!("Session restore failed: {}", e));
            return;
        }
    };

    let Ok((entity, mut health, mut meter, mut transform, body)) = players.single_mut() else {
        crate::logger::log_warning("Load requested but there is no single player to restore");
        return;
    };
    apply_player_snapshot(
        &snapshot.player,
        &mut health,
        &mut meter,
        &mut transform,
        body.map(|body| body.into_inner()),
    );
    if health.is_alive() {
        commands.entity(entity).remove::<Dead>();
    }
    let total_hits = meter.total_hits();

    let saved: HashMap<&str, &EnemySnapshot> = snapshot
        .enemies
        .iter()
        .map(|enemy| (enemy.id.as_str(), enemy))
        .collect();

    let mut enemies_restored = 0;
    for (enemy_entity, enemy, mut enemy_health, mut enemy_transform) in enemies.iter_mut() {
        let Some(saved_enemy) = saved.get(enemy.id.as_str()) else {
            continue;
        };
        enemy_health.init_from_save(saved_enemy.health);
        enemy_transform.translation.x = saved_enemy.x;
        enemy_transform.translation.y = saved_enemy.y;
        if enemy_health.is_alive() {
            commands.entity(enemy_entity).remove::<(Dead, DespawnAfter)>();
        }
        enemies_restored += 1;
    }

    if enemies_restored < snapshot.enemies.len() {
        crate::logger::log_warning(&format!(
            "Restore: {} saved enemies had no live counterpart",
            snapshot.enemies.len() - enemies_restored
        ));
    }
    crate::logger::log_info(&format!(
        "Session restored (hp {}, hits {}, {} enemies)",
        health.current, total_hits, enemies_restored
    ));

    restored_events.write(SessionRestored {
        total_hits,
        enemies_restored,
    });
}
