//! Save/restore through the full App with a shared in-memory store.

use bevy::prelude::*;
use rushblade_simulation::*;
use std::sync::Arc;

#[derive(Resource, Default)]
struct Observed {
    saved: usize,
    restored: Vec<u32>,
}

fn observe(
    mut saved: EventReader<SessionSaved>,
    mut restored: EventReader<SessionRestored>,
    mut observed: ResMut<Observed>,
) {
    observed.saved += saved.read().count();
    observed.restored.extend(restored.read().map(|event| event.total_hits));
}

fn create_app(store: Arc<InMemoryStore>) -> App {
    let mut app = create_headless_app_with(7, SimulationPlugin::default().with_store(store));
    app.init_resource::<Observed>();
    app.add_systems(FixedUpdate, observe.after(SimulationSet::Publish));
    app.update();
    app
}

fn land_light_swing(app: &mut App, player: Entity) {
    app.world_mut().get_mut::<ActorInput>(player).expect("input").held = ActionButtons::LIGHT_ATTACK;
    app.update();
    app.world_mut().get_mut::<ActorInput>(player).expect("input").held = ActionButtons::empty();
    for _ in 0..10 {
        app.update();
    }
}

#[test]
fn test_save_then_restore_session() {
    let store = Arc::new(InMemoryStore::new());
    let mut app = create_app(store.clone());

    let player = spawn_player(app.world_mut(), Vec2::ZERO);
    let grunt = spawn_enemy(app.world_mut(), "grunt", Vec2::new(1.0, 0.0));
    land_light_swing(&mut app, player);
    assert_eq!(app.world().get::<ComboMeter>(player).expect("meter").total_hits(), 1);

    app.world_mut().get_mut::<Transform>(player).expect("transform").translation = Vec3::new(4.0, 1.0, 0.0);
    app.world_mut().get_mut::<Health>(player).expect("health").current = 70;
    app.world_mut().send_event(SaveRequested);
    app.update();

    assert!(store.has_save());
    assert_eq!(app.world().resource::<Observed>().saved, 1);
    let snapshot = store.read().expect("read").expect("snapshot");
    assert_eq!(snapshot.player.health, 70);
    assert_eq!(snapshot.player.total_hits, 1);
    assert_eq!(snapshot.enemies.len(), 1);
    assert_eq!(snapshot.enemies[0].id, "grunt");
    assert_eq!(snapshot.enemies[0].health, 40);

    // Wreck the live state.
    app.world_mut().get_mut::<Transform>(player).expect("transform").translation = Vec3::ZERO;
    app.world_mut().get_mut::<Health>(player).expect("health").current = 5;
    app.world_mut().get_mut::<ComboMeter>(player).expect("meter").interrupt();
    app.world_mut().get_mut::<Health>(grunt).expect("health").current = 1;

    app.world_mut().send_event(LoadRequested);
    app.update();

    let transform = app.world().get::<Transform>(player).expect("transform");
    assert_eq!(transform.translation.truncate(), Vec2::new(4.0, 1.0));
    assert_eq!(app.world().get::<Health>(player).expect("health").current, 70);
    let meter = app.world().get::<ComboMeter>(player).expect("meter");
    assert_eq!(meter.total_hits(), 1);
    assert_eq!(meter.combo_level(), 0);
    assert_eq!(app.world().get::<Health>(grunt).expect("health").current, 40);
    assert_eq!(app.world().resource::<Observed>().restored, vec![1]);
}

#[test]
fn test_restore_rebuilds_rank() {
    let store = Arc::new(InMemoryStore::new());
    store
        .write(&SessionSnapshot {
            saved_at: 0.0,
            player: persistence::PlayerSnapshot {
                health: 90,
                combo_level: 4,
                total_hits: 12,
                x: 0.0,
                y: 0.0,
            },
            enemies: Vec::new(),
        })
        .expect("write");

    let mut app = create_app(store);
    let player = spawn_player(app.world_mut(), Vec2::ZERO);
    app.world_mut().send_event(LoadRequested);
    app.update();

    let meter = app.world().get::<ComboMeter>(player).expect("meter");
    assert_eq!(meter.rank(), Rank::C);
    assert_eq!(meter.total_hits(), 12);
    assert!(meter.saved_multipliers().damage > 1.25);
}

#[test]
fn test_load_without_save_is_a_no_op() {
    let store = Arc::new(InMemoryStore::new());
    let mut app = create_app(store);
    let player = spawn_player(app.world_mut(), Vec2::new(2.0, 2.0));

    app.world_mut().send_event(LoadRequested);
    app.update();

    let transform = app.world().get::<Transform>(player).expect("transform");
    assert_eq!(transform.translation.truncate(), Vec2::new(2.0, 2.0));
    assert!(app.world().resource::<Observed>().restored.is_empty());
}

#[test]
fn test_corrupted_save_is_logged_not_applied() {
    let store = Arc::new(InMemoryStore::with_raw("this is not toml ]["));
    let mut app = create_app(store);
    let player = spawn_player(app.world_mut(), Vec2::ZERO);

    app.world_mut().send_event(LoadRequested);
    app.update();

    assert_eq!(app.world().get::<Health>(player).expect("health").current, 100);
    assert!(app.world().resource::<Observed>().restored.is_empty());
}
