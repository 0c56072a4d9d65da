//! Headless Rushblade simulation
//!
//! Spawns a player among a few enemies and drives it with seeded random
//! input, printing combo and health as it goes. Same seed, same run.

use bevy::prelude::*;
use rand::Rng;
use std::path::Path;

use rushblade_simulation::{
    create_headless_app_with, logger, spawn_enemy, spawn_player, ActionButtons, ActorInput, ComboMeter,
    DeterministicRng, EntityDied, Health, IncomingDamage, Player, RankAchieved, SaveRequested, SimulationConfig,
    SimulationPlugin, SimulationSet,
};

const TICKS: u32 = 64 * 30;
const CONFIG_PATH: &str = "crates/rushblade_simulation/config/default.toml";

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    logger::init_logger();
    logger::set_log_level(logger::LogLevel::Info);

    let config = if Path::new(CONFIG_PATH).exists() {
        SimulationConfig::load_or_default(CONFIG_PATH)
    } else {
        SimulationConfig::default()
    };

    println!("Starting Rushblade headless simulation (seed: {})", seed);

    let mut app = create_headless_app_with(seed, SimulationPlugin::new(config));
    app.add_systems(
        FixedUpdate,
        (scripted_input, hostile_pressure)
            .chain()
            .before(SimulationSet::ComboDecay),
    );
    app.add_systems(Update, (report_ranks, report_deaths));

    let player = spawn_player(app.world_mut(), Vec2::ZERO);
    for (index, position) in [(2.0, 0.0), (-2.0, 1.0), (0.0, 2.5), (3.0, -2.0)].iter().enumerate() {
        spawn_enemy(app.world_mut(), format!("grunt_{}", index), Vec2::new(position.0, position.1));
    }

    for tick in 0..=TICKS {
        app.update();

        if tick % (64 * 5) == 0 {
            app.world_mut().send_event(SaveRequested);

            let world = app.world();
            let (Some(meter), Some(health)) = (world.get::<ComboMeter>(player), world.get::<Health>(player)) else {
                println!("Tick {}: player gone", tick);
                break;
            };
            println!(
                "Tick {}: hp {}/{}, combo x{}, total hits {}, rank {:?}, {} entities",
                tick,
                health.current,
                health.max,
                meter.combo_level(),
                meter.total_hits(),
                meter.rank(),
                world.entities().len()
            );
        }
    }

    println!("Simulation complete!");
}

/// Random movement and button mashing from the seeded RNG.
fn scripted_input(mut rng: ResMut<DeterministicRng>, mut players: Query<&mut ActorInput, With<Player>>) {
    for mut input in players.iter_mut() {
        if rng.rng.gen_bool(0.1) {
            let angle = rng.rng.gen_range(0.0..std::f32::consts::TAU);
            input.direction = if rng.rng.gen_bool(0.2) {
                Vec2::ZERO
            } else {
                Vec2::from_angle(angle)
            };
        }

        let mut held = ActionButtons::empty();
        if rng.rng.gen_bool(0.02) {
            held |= ActionButtons::DASH;
        }
        if rng.rng.gen_bool(0.15) {
            held |= ActionButtons::LIGHT_ATTACK;
        }
        if rng.rng.gen_bool(0.05) {
            held |= ActionButtons::HEAVY_ATTACK;
        }
        input.held = held;
    }
}

/// Occasional hits on the player, standing in for enemy attacks.
fn hostile_pressure(
    mut rng: ResMut<DeterministicRng>,
    players: Query<Entity, With<Player>>,
    mut damage: EventWriter<IncomingDamage>,
) {
    for player in players.iter() {
        if rng.rng.gen_bool(0.004) {
            damage.write(IncomingDamage {
                target: player,
                source: None,
                amount: rng.rng.gen_range(3..8),
                direction: Vec2::from_angle(rng.rng.gen_range(0.0..std::f32::consts::TAU)),
            });
        }
    }
}

fn report_ranks(mut ranks: EventReader<RankAchieved>) {
    for event in ranks.read() {
        println!("  rank {} reached by {:?}", event.rank.label(), event.entity);
    }
}

fn report_deaths(mut deaths: EventReader<EntityDied>) {
    for event in deaths.read() {
        println!("  {:?} died", event.entity);
    }
}
