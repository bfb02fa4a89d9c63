//! Match Simulation Engine
//!
//! Resolves a game as a sequence of atomic 10-second plays.
//!
//! ## Layers
//!
//! - `selection.rs` - stateless weighted draws
//! - `play.rs` - one play: possession, pass, shot (exactly one event out)
//! - `game.rs` - period and game loops, overtime, intermissions
//! - `box_score.rs` - per-player and per-team statistics folded from events
//! - `series.rs` - independent games run in parallel
//!
//! ```text
//!   Lineup ──active_four()──► ActiveFour ─┐
//!   Lineup ──active_four()──► ActiveFour ─┴─► simulate_play ──► Event
//!                                                                 │
//!   simulate_period: repeat until period_length (or first goal) ◄─┘
//!   simulate_game:   regulation periods, then sudden death while tied
//! ```
//!
//! The engine owns its random source. Seed it with [`MatchEngine::from_seed`]
//! for reproducible games, or inject any `Rng` with [`MatchEngine::new`].

pub mod box_score;
pub mod config;
mod game;
mod play;
pub mod selection;
pub mod series;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use box_score::{BoxScore, GoaltenderLine, SkaterLine, TeamLine};
pub use config::{EngineConfig, GameRules};
pub use game::{GameResult, Intermission};
pub use play::resolve_play;
pub use selection::{contest, select_weighted};
pub use series::{simulate_series, SeriesSummary};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::Result;

/// Match simulator bound to one random source.
///
/// A single engine is not meant to be shared across threads; run parallel
/// games on separate engines with separate seeds.
#[derive(Debug, Clone)]
pub struct MatchEngine<R: Rng = ChaCha8Rng> {
    rng: R,
    config: EngineConfig,
}

impl MatchEngine<ChaCha8Rng> {
    /// Deterministic engine with the default configuration.
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), config: EngineConfig::default() }
    }
}

impl<R: Rng> MatchEngine<R> {
    pub fn new(rng: R, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { rng, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}
