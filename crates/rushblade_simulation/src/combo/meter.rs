//! Combo meter: hit counting, timeout decay and rank progression.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::bonuses::{compute_bonuses, ComboBonuses};
use super::rank::Rank;

/// Tuning for the combo meter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboConfig {
    /// Max gap between hits before the running combo drops (seconds)
    pub timeout: f32,
    /// Lifetime hits needed per rank step
    pub hits_per_rank: u32,
    /// Ceiling growth per rank (and the ceiling at rank None)
    pub base_increment: f32,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            timeout: 1.2,
            hits_per_rank: 5,
            base_increment: 0.25,
        }
    }
}

impl ComboConfig {
    /// Clamp out-of-range values instead of rejecting them.
    pub fn sanitized(self) -> Self {
        Self {
            timeout: self.timeout.max(0.0),
            hits_per_rank: self.hits_per_rank.max(1),
            base_increment: self.base_increment.max(0.0),
        }
    }
}

/// Notifications produced by the meter's mutating calls.
#[derive(Debug, Clone, PartialEq)]
pub enum ComboEvent {
    RankAchieved(Rank),
    Changed {
        combo: u32,
        bonuses: ComboBonuses,
        rank: Rank,
    },
}

/// Per-actor combo state.
///
/// `bonuses()` is a cached value refreshed by every mutating call
/// (`register_hit`, `tick`, `interrupt`, `load_from_hits`), so readers on the
/// physics and UI side always see the result of the last mutation.
#[derive(Component, Debug, Clone)]
pub struct ComboMeter {
    config: ComboConfig,
    current_combo: u32,
    total_hits: u32,
    rank: Rank,
    /// Multipliers locked in when the current rank was reached
    saved: ComboBonuses,
    current_max_bonus: f32,
    last_hit_at: Option<f32>,
    bonuses: ComboBonuses,
    events: Vec<ComboEvent>,
}

impl Default for ComboMeter {
    fn default() -> Self {
        Self::new(ComboConfig::default())
    }
}

impl ComboMeter {
    pub fn new(config: ComboConfig) -> Self {
        let config = config.sanitized();
        Self {
            config,
            current_combo: 0,
            total_hits: 0,
            rank: Rank::None,
            saved: ComboBonuses::IDENTITY,
            current_max_bonus: config.base_increment,
            last_hit_at: None,
            bonuses: ComboBonuses::IDENTITY,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &ComboConfig {
        &self.config
    }

    /// Count one landed hit at simulation time `now`.
    pub fn register_hit(&mut self, now: f32) {
        // Catch up on a timeout the tick didn't see yet.
        if self.current_combo > 0 && self.is_timed_out(now) {
            self.current_combo = 0;
        }

        self.current_combo = self.current_combo.saturating_add(1);
        self.total_hits = self.total_hits.saturating_add(1);
        self.last_hit_at = Some(now);

        let new_rank = Rank::from_total_hits(self.total_hits, self.config.hits_per_rank);
        if new_rank > self.rank {
            // Snapshot must use the pre-transition ceiling and combo.
            self.saved = self.current_bonuses();
            self.rank = new_rank;
            self.current_max_bonus += self.config.base_increment;
            self.current_combo = 0;

            crate::logger::log_info(&format!(
                "Rank {} achieved (total hits: {}, ceiling: {:.2})",
                new_rank.label(),
                self.total_hits,
                self.current_max_bonus
            ));
            self.events.push(ComboEvent::RankAchieved(new_rank));
        }

        self.refresh();
    }

    /// Drop the running combo once the timeout has elapsed.
    ///
    /// Rank, total hits and saved multipliers are untouched.
    pub fn tick(&mut self, now: f32) {
        if self.current_combo > 0 && self.is_timed_out(now) {
            crate::logger::log(&format!(
                "Combo x{} timed out (rank {} kept)",
                self.current_combo,
                self.rank.label()
            ));
            self.current_combo = 0;
            self.refresh();
        }
    }

    /// Full reset, used when the owner takes damage.
    pub fn interrupt(&mut self) {
        self.current_combo = 0;
        self.total_hits = 0;
        self.rank = Rank::None;
        self.saved = ComboBonuses::IDENTITY;
        self.current_max_bonus = self.config.base_increment;
        self.last_hit_at = None;
        self.refresh();
    }

    /// Restore from a saved lifetime hit count.
    ///
    /// Negative counts clamp to zero. The running combo restarts at zero and
    /// the saved multipliers are rebuilt as if every reached rank had been
    /// entered from a full tier.
    pub fn load_from_hits(&mut self, total_hits: i64) {
        let clamped = total_hits.clamp(0, i64::from(u32::MAX)) as u32;
        if i64::from(clamped) != total_hits {
            crate::logger::log_warning(&format!(
                "Combo restore: hit count {} out of range, clamped to {}",
                total_hits, clamped
            ));
        }

        let hits_per_rank = self.config.hits_per_rank;
        self.total_hits = clamped;
        self.current_combo = 0;
        self.last_hit_at = None;
        self.rank = Rank::from_total_hits(clamped, hits_per_rank);
        self.saved = ComboBonuses::IDENTITY;
        self.current_max_bonus = self.config.base_increment;

        for _ in 0..self.rank.index() {
            self.saved = compute_bonuses(&self.saved, self.current_max_bonus, hits_per_rank, hits_per_rank);
            self.current_max_bonus += self.config.base_increment;
        }

        self.refresh();
    }

    /// Bonuses for the current state (pure, not cached).
    pub fn current_bonuses(&self) -> ComboBonuses {
        compute_bonuses(
            &self.saved,
            self.current_max_bonus,
            self.current_combo,
            self.config.hits_per_rank,
        )
    }

    /// Cached bonuses from the last mutating call.
    pub fn bonuses(&self) -> ComboBonuses {
        self.bonuses
    }

    pub fn combo_level(&self) -> u32 {
        self.current_combo
    }

    pub fn total_hits(&self) -> u32 {
        self.total_hits
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn saved_multipliers(&self) -> ComboBonuses {
        self.saved
    }

    pub fn current_max_bonus(&self) -> f32 {
        self.current_max_bonus
    }

    /// Fraction of the way from the current rank threshold to the next (1.0 at S).
    pub fn progress_to_next_rank(&self) -> f32 {
        if self.rank.is_terminal() {
            return 1.0;
        }
        let hits_per_rank = self.config.hits_per_rank;
        let into_tier = self.total_hits.saturating_sub(self.rank.index().saturating_mul(hits_per_rank));
        (into_tier as f32 / hits_per_rank as f32).clamp(0.0, 1.0)
    }

    /// Hits still needed for the next rank (0 at S).
    pub fn hits_to_next_rank(&self) -> u32 {
        if self.rank.is_terminal() {
            return 0;
        }
        (self.rank.index() + 1)
            .saturating_mul(self.config.hits_per_rank)
            .saturating_sub(self.total_hits)
    }

    /// Take the notifications queued since the last call.
    pub fn take_events(&mut self) -> Vec<ComboEvent> {
        std::mem::take(&mut self.events)
    }

    fn is_timed_out(&self, now: f32) -> bool {
        match self.last_hit_at {
            Some(last) => now - last >= self.config.timeout,
            None => false,
        }
    }

    fn refresh(&mut self) {
        self.bonuses = self.current_bonuses();
        self.events.push(ComboEvent::Changed {
            combo: self.current_combo,
            bonuses: self.bonuses,
            rank: self.rank,
        });
    }
}
