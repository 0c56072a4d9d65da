//! Combo events (UI/audio collaborators subscribe through `EventReader`).

use bevy::prelude::*;

use super::bonuses::ComboBonuses;
use super::rank::Rank;

/// An actor reached a new rank.
#[derive(Event, Debug, Clone)]
pub struct RankAchieved {
    pub entity: Entity,
    pub rank: Rank,
}

/// An actor's combo, bonuses or rank changed.
#[derive(Event, Debug, Clone)]
pub struct ComboChanged {
    pub entity: Entity,
    pub combo: u32,
    pub bonuses: ComboBonuses,
    pub rank: Rank,
}
