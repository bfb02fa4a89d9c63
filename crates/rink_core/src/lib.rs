//! # rink_core - Three-on-Three Hockey Match Simulation Engine
//!
//! Given two lineups, the engine plays a game as a sequence of atomic
//! 10-second plays. Each play produces exactly one event (possession change,
//! saved shot or goal); the score and box score are folds over that log.
//!
//! ## Features
//! - Deterministic simulation (same seed = same game)
//! - Fatigue-adjusted ratings read fresh on every play
//! - Two-line rotation with a configurable bias
//! - Sudden-death overtime until a tie is broken
//! - JSON API for hosts
//!
//! ```rust
//! use rink_core::engine::{GameRules, MatchEngine};
//! use rink_core::models::{Line, Lineup, Player};
//!
//! let skater = |id| Player::skater(id, 50, 50, 50);
//! let lineup = |b: u32| {
//!     Lineup::new(
//!         Line::new(skater(b + 1), skater(b + 2), skater(b + 3)),
//!         Line::new(skater(b + 4), skater(b + 5), skater(b + 6)),
//!         Player::goaltender(b + 7, 30, 60),
//!     )
//! };
//!
//! let mut engine = MatchEngine::from_seed(42);
//! let result = engine.simulate_game(&lineup(0), &lineup(100), &GameRules::default()).unwrap();
//! assert!(!result.score.tied());
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_game_json, simulate_series_json, ApiError};
pub use engine::{
    simulate_series, BoxScore, EngineConfig, GameResult, GameRules, Intermission, MatchEngine,
};
pub use error::{Result, SimError};
pub use models::{
    ActiveFour, Event, EventBase, GameOutcome, Line, Lineup, Player, PlayerId, Record, Score,
    TeamSide,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
