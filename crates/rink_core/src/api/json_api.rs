//! JSON entry points for hosts (UI, persistence layer).
//!
//! Requests carry a seed so the same payload always yields the same game.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::engine::{
    simulate_series, BoxScore, EngineConfig, GameRules, MatchEngine, SeriesSummary,
};
use crate::error::SimError;
use crate::models::{Event, Lineup};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid JSON request: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unsupported schema version: {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error(transparent)]
    Simulation(#[from] SimError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home: Lineup,
    pub away: Lineup,
    #[serde(default)]
    pub rules: GameRules,
    #[serde(default)]
    pub config: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub score_home: u32,
    pub score_away: u32,
    pub overtime_periods: u32,
    /// Events per period, regulation first.
    pub periods: Vec<Vec<Event>>,
    pub box_score: BoxScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub games: u32,
    pub home: Lineup,
    pub away: Lineup,
    #[serde(default)]
    pub rules: GameRules,
    #[serde(default)]
    pub config: EngineConfig,
}

fn check_schema(found: u8) -> Result<(), ApiError> {
    if found != SCHEMA_VERSION {
        warn!(found, "rejecting request with unsupported schema version");
        return Err(ApiError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

/// Simulates one game described by a [`GameRequest`] and returns a
/// [`GameResponse`] as JSON.
pub fn simulate_game_json(request_json: &str) -> Result<String, ApiError> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    info!(seed = request.seed, "simulating game");

    let rng = ChaCha8Rng::seed_from_u64(request.seed);
    let mut engine = MatchEngine::new(rng, request.config)?;
    let result = engine.simulate_game(&request.home, &request.away, &request.rules)?;

    let response = GameResponse {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        score_home: result.score.home,
        score_away: result.score.away,
        overtime_periods: result.overtime_periods(),
        periods: result.periods.into_values().collect(),
        box_score: result.box_score,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Simulates a series described by a [`SeriesRequest`] and returns its
/// [`SeriesSummary`] as JSON.
pub fn simulate_series_json(request_json: &str) -> Result<String, ApiError> {
    let request: SeriesRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    info!(seed = request.seed, games = request.games, "simulating series");

    let results = simulate_series(
        &request.home,
        &request.away,
        &request.config,
        &request.rules,
        request.seed,
        request.games,
    )?;
    Ok(serde_json::to_string(&SeriesSummary::from_results(&results))?)
}
