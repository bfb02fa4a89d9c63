//! Players and the fatigue-adjusted skill model.
//!
//! Skaters and goaltenders share one `Player` type tagged by `PlayerKind`;
//! the kind decides which base ratings exist. Every rating used by the engine
//! goes through [`effective_rating`], read fresh at the moment of use.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

pub type PlayerId = u32;

/// Full energy. A player at this level plays at exactly their base ratings.
pub const FULL_ENERGY: u8 = 100;

/// Fatigue-adjusted rating: `floor(base * 100 / energy)`.
///
/// Returns `None` when `energy` is zero.
#[inline]
pub fn effective_rating(base: u32, energy: u8) -> Option<u32> {
    if energy == 0 {
        return None;
    }
    let scaled = u64::from(base) * u64::from(FULL_ENERGY) / u64::from(energy);
    Some(u32::try_from(scaled).unwrap_or(u32::MAX))
}

/// Which base rating to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Passing,
    Shooting,
    Defending,
    Stopping,
}

/// Ratings that exist only for one kind of player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerKind {
    Skater { shooting: u32, defending: u32 },
    Goaltender { stopping: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub passing: u32,
    /// Current energy percentage, nominally 0-100.
    #[serde(default = "default_energy")]
    pub energy: u8,
    #[serde(flatten)]
    pub kind: PlayerKind,
}

fn default_energy() -> u8 {
    FULL_ENERGY
}

impl Player {
    pub fn skater(id: PlayerId, passing: u32, shooting: u32, defending: u32) -> Self {
        Self {
            id,
            passing,
            energy: FULL_ENERGY,
            kind: PlayerKind::Skater { shooting, defending },
        }
    }

    pub fn goaltender(id: PlayerId, passing: u32, stopping: u32) -> Self {
        Self { id, passing, energy: FULL_ENERGY, kind: PlayerKind::Goaltender { stopping } }
    }

    pub fn with_energy(mut self, energy: u8) -> Self {
        self.energy = energy;
        self
    }

    pub fn is_skater(&self) -> bool {
        matches!(self.kind, PlayerKind::Skater { .. })
    }

    pub fn is_goaltender(&self) -> bool {
        matches!(self.kind, PlayerKind::Goaltender { .. })
    }

    /// Base (unadjusted) rating, or `None` when this kind of player lacks it.
    pub fn base(&self, rating: Rating) -> Option<u32> {
        match (rating, self.kind) {
            (Rating::Passing, _) => Some(self.passing),
            (Rating::Shooting, PlayerKind::Skater { shooting, .. }) => Some(shooting),
            (Rating::Defending, PlayerKind::Skater { defending, .. }) => Some(defending),
            (Rating::Stopping, PlayerKind::Goaltender { stopping }) => Some(stopping),
            _ => None,
        }
    }

    /// Fatigue-adjusted rating.
    ///
    /// A rating the player does not have is a roster error: a goaltender
    /// placed in a skater slot, for instance.
    pub fn effective(&self, rating: Rating) -> Result<u32> {
        let base = self.base(rating).ok_or_else(|| {
            SimError::roster(format!("player {} has no {:?} rating", self.id, rating))
        })?;
        effective_rating(base, self.energy)
            .ok_or(SimError::NonPositiveEnergy { player: self.id })
    }

    pub fn passing(&self) -> Result<u32> {
        self.effective(Rating::Passing)
    }

    pub fn shooting(&self) -> Result<u32> {
        self.effective(Rating::Shooting)
    }

    pub fn defending(&self) -> Result<u32> {
        self.effective(Rating::Defending)
    }

    pub fn stopping(&self) -> Result<u32> {
        self.effective(Rating::Stopping)
    }
}
