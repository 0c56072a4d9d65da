//! Session save/restore
//!
//! - snapshot: what gets saved (player health, combo, position; enemies by id)
//! - store: `SessionStore` contract and the in-memory implementation
//! - systems: `save_session` / `restore_session`, driven by request events
//!
//! The store is injected through `PersistencePlugin::new`, there is no global
//! save manager. Encoding lives in the store; the simulation only deals in
//! `SessionSnapshot` values.

use bevy::prelude::*;
use std::sync::Arc;

pub mod error;
pub mod snapshot;
pub mod store;
pub mod systems;

pub use error::PersistenceError;
pub use snapshot::{apply_player_snapshot, EnemySnapshot, PlayerSnapshot, SessionSnapshot};
pub use store::{InMemoryStore, SessionStore};
pub use systems::{LoadRequested, SaveRequested, SessionRestored, SessionSaved};

use crate::SimulationSet;

/// Resource: the injected store.
#[derive(Resource, Clone)]
pub struct Persistence {
    store: Arc<dyn SessionStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }
}

/// Persistence Plugin
///
/// Save and restore run after swings and damage are applied and before combo
/// events are published, so a snapshot reflects the fully applied tick and a
/// restore is announced in the same tick.
pub struct PersistencePlugin {
    store: Arc<dyn SessionStore>,
}

impl PersistencePlugin {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Share a store the caller keeps a handle to.
    pub fn shared(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

impl Default for PersistencePlugin {
    fn default() -> Self {
        Self::new(InMemoryStore::new())
    }
}

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Persistence::new(self.store.clone()));

        app.add_event::<SaveRequested>()
            .add_event::<LoadRequested>()
            .add_event::<SessionSaved>()
            .add_event::<SessionRestored>();

        app.add_systems(
            FixedUpdate,
            (systems::save_session, systems::restore_session)
                .chain()
                .in_set(SimulationSet::Persistence),
        );
    }
}
