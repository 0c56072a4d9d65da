//! Combo ranks (None → D → C → B → A → S).

use serde::{Deserialize, Serialize};

/// Coarse progression tier derived from session hit count.
///
/// Ordering is meaningful: `Rank::S > Rank::A > ... > Rank::None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    None,
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    /// Terminal rank index. Hit counts beyond `MAX_INDEX * hits_per_rank` stay at S.
    pub const MAX_INDEX: u32 = 5;

    /// Rank for a lifetime hit count: `total >= k * hits_per_rank` → rank `k`.
    ///
    /// `hits_per_rank` of 0 is treated as 1.
    pub fn from_total_hits(total_hits: u32, hits_per_rank: u32) -> Self {
        let tier = total_hits / hits_per_rank.max(1);
        Self::from_index(tier.min(Self::MAX_INDEX))
    }

    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Rank::None,
            1 => Rank::D,
            2 => Rank::C,
            3 => Rank::B,
            4 => Rank::A,
            _ => Rank::S,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Rank::None => 0,
            Rank::D => 1,
            Rank::C => 2,
            Rank::B => 3,
            Rank::A => 4,
            Rank::S => 5,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Rank::S
    }

    /// Short label for HUD text (`""` for no rank).
    pub fn label(self) -> &'static str {
        match self {
            Rank::None => "",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        }
    }
}
