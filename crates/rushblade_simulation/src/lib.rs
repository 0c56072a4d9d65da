//! Rushblade Simulation Core
//!
//! Headless Bevy 0.16 simulation of the combat-progression and locomotion
//! layer of a 2D action game.
//!
//! - combo: rank meter, compounding attack/move/damage bonuses
//! - locomotion: movement state machine (normal, dash, slide, stagger) and
//!   attack triggering with windup
//! - combat: sector swing resolver and the damage pipeline
//! - persistence: session snapshot save/restore through an injected store
//!
//! Rendering, audio, UI and enemy decision making are external: they talk to
//! the simulation through components (`ActorInput`) and events.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;

pub mod combat;
pub mod combo;
pub mod components;
pub mod config;
pub mod locomotion;
pub mod logger;
pub mod persistence;
pub mod physics;

pub use combat::{
    resolve_swing, AttackHit, AttackLoadout, AttackProfile, AttackTier, Attacker, CombatLayers, CombatPlugin,
    CombatTuning, DamageTaken, Damageable, Dead, DespawnAfter, EntityDied, HitRecord, Hurtbox, IncomingDamage,
    SwingDue, SwingParams, SwingResolved,
};
pub use combo::{ComboBonuses, ComboChanged, ComboConfig, ComboMeter, ComboPlugin, Rank, RankAchieved};
pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use locomotion::{
    LocomotionConfig, LocomotionController, LocomotionEvent, LocomotionMode, LocomotionPlugin, LocomotionSignal,
    TickInput, TickReport,
};
pub use logger::{init_logger, LogLevel, LogPrinter};
pub use persistence::{
    InMemoryStore, LoadRequested, PersistenceError, PersistencePlugin, SaveRequested, SessionRestored, SessionSaved,
    SessionSnapshot, SessionStore,
};
pub use physics::PhysicsPlugin;

/// Fixed simulation rate.
pub const TICK_HZ: f64 = 64.0;

/// One fixed tick (1/64 s).
pub const TICK: Duration = Duration::from_micros(15_625);

/// Per-tick phases, configured in this order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Combo timeouts
    ComboDecay,
    /// Incoming damage, stagger and death, before controllers tick
    Damage,
    /// Controllers read input and bonuses, write velocity, emit due swings
    Locomotion,
    /// Swing resolution
    Combat,
    /// Corpse cleanup
    Reactions,
    /// Save/restore requests
    Persistence,
    /// Combo notifications go out
    Publish,
    /// Velocity integration
    Physics,
}

/// Main simulation plugin (combines every domain plugin).
pub struct SimulationPlugin {
    config: SimulationConfig,
    store: Arc<dyn SessionStore>,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config: config.sanitized(),
            store: Arc::new(InMemoryStore::new()),
        }
    }

    /// Use `store` for session saves (shared with the caller).
    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .insert_resource(self.config)
            .insert_resource(CombatTuning {
                hit_knockback: self.config.player.hit_knockback,
                corpse_linger: self.config.enemy.corpse_linger,
            });

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::ComboDecay,
                SimulationSet::Damage,
                SimulationSet::Locomotion,
                SimulationSet::Combat,
                SimulationSet::Reactions,
                SimulationSet::Persistence,
                SimulationSet::Publish,
                SimulationSet::Physics,
            )
                .chain(),
        );

        app.add_plugins((
            ComboPlugin,
            LocomotionPlugin,
            CombatPlugin,
            PersistencePlugin::shared(self.store.clone()),
            PhysicsPlugin,
        ));
    }
}

/// Deterministic RNG resource (seeded).
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal headless App with the full simulation.
///
/// Time advances exactly one fixed tick per `app.update()` (the very first
/// update has zero delta and runs no fixed step).
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with(seed, SimulationPlugin::default())
}

pub fn create_headless_app_with(seed: u64, plugin: SimulationPlugin) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(TICK))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(plugin);

    app
}

/// Spawn the player actor with tuning from `SimulationConfig`.
pub fn spawn_player(world: &mut World, position: Vec2) -> Entity {
    let config = world.get_resource::<SimulationConfig>().copied().unwrap_or_default();

    world
        .spawn((
            Actor,
            Player,
            Health::new(config.player.max_health),
            PhysicsBody::new(config.player.mass),
            Transform::from_translation(position.extend(0.0)),
            ActorInput::default(),
            InputLatch::default(),
            ComboMeter::new(config.combo),
            LocomotionController::new(config.locomotion, config.attacks),
            Attacker::default(),
            Hurtbox::new(CombatLayers::PLAYER),
        ))
        .id()
}

/// Spawn a damageable enemy body with a stable save id.
pub fn spawn_enemy(world: &mut World, id: impl Into<String>, position: Vec2) -> Entity {
    let config = world.get_resource::<SimulationConfig>().copied().unwrap_or_default();

    world
        .spawn((
            Actor,
            Enemy::new(id),
            Health::new(config.enemy.max_health),
            PhysicsBody {
                linear_damping: config.enemy.linear_damping,
                ..PhysicsBody::new(config.enemy.mass)
            },
            Transform::from_translation(position.extend(0.0)),
            Hurtbox::new(CombatLayers::ENEMY),
        ))
        .id()
}

/// World snapshot for determinism comparison.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Sort by entity index so iteration order doesn't leak in.
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
