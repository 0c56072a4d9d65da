//! Simulation tuning loaded from TOML.
//!
//! Every section is optional; missing keys keep their defaults. Values out
//! of range are clamped by `sanitized()` rather than rejected.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::combat::AttackLoadout;
use crate::combo::ComboConfig;
use crate::locomotion::LocomotionConfig;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Player spawn tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: u32,
    /// Impulse applied when the player takes damage
    pub hit_knockback: f32,
    pub mass: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            hit_knockback: 3.0,
            mass: 1.0,
        }
    }
}

/// Enemy spawn tuning (bodies only, behaviour is external).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: u32,
    pub mass: f32,
    /// Fraction of knockback velocity lost per second
    pub linear_damping: f32,
    /// Seconds a dead enemy stays before despawn
    pub corpse_linger: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 50,
            mass: 1.0,
            linear_damping: 8.0,
            corpse_linger: 1.0,
        }
    }
}

/// Root config resource.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub combo: ComboConfig,
    pub locomotion: LocomotionConfig,
    pub attacks: AttackLoadout,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
}

impl SimulationConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path`, falling back to defaults (with a warning) on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                crate::logger::log_warning(&format!("{}; using default tuning", e));
                Self::default()
            }
        }
    }

    pub fn sanitized(self) -> Self {
        Self {
            combo: self.combo.sanitized(),
            locomotion: self.locomotion.sanitized(),
            attacks: self.attacks.sanitized(),
            player: PlayerConfig {
                max_health: self.player.max_health.max(1),
                hit_knockback: self.player.hit_knockback.max(0.0),
                mass: self.player.mass.max(crate::components::PhysicsBody::MIN_MASS),
            },
            enemy: EnemyConfig {
                max_health: self.enemy.max_health.max(1),
                mass: self.enemy.mass.max(crate::components::PhysicsBody::MIN_MASS),
                linear_damping: self.enemy.linear_damping.max(0.0),
                corpse_linger: self.enemy.corpse_linger.max(0.0),
            },
        }
    }
}
