//! Batches of independent games.
//!
//! Each game gets its own `ChaCha8Rng` seeded from `base_seed + index`, so a
//! series is reproducible regardless of how rayon schedules it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{EngineConfig, GameRules};
use super::game::GameResult;
use super::MatchEngine;
use crate::error::Result;
use crate::models::{validate_matchup, Lineup, Record, TeamSide};

/// Below this many games the thread-pool overhead outweighs the work.
const PARALLEL_THRESHOLD: u32 = 8;

/// Simulates `games` independent games between the same lineups.
///
/// Results come back in game-index order. The first error aborts the series.
pub fn simulate_series(
    home: &Lineup,
    away: &Lineup,
    config: &EngineConfig,
    rules: &GameRules,
    base_seed: u64,
    games: u32,
) -> Result<Vec<GameResult>> {
    config.validate()?;
    rules.validate()?;
    validate_matchup(home, away)?;

    let play = |index: u32| -> Result<GameResult> {
        let rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(u64::from(index)));
        MatchEngine::new(rng, *config)?.simulate_game(home, away, rules)
    };

    debug!(games, base_seed, "simulating series");
    if games > PARALLEL_THRESHOLD {
        (0..games).into_par_iter().map(play).collect()
    } else {
        (0..games).map(play).collect()
    }
}

/// Standings-style totals over a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub home: Record,
    pub away: Record,
    pub overtime_games: u32,
    pub home_goals: u32,
    pub away_goals: u32,
}

impl SeriesSummary {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a GameResult>) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.home.apply(&result.score, TeamSide::Home);
            summary.away.apply(&result.score, TeamSide::Away);
            summary.home_goals += result.score.home;
            summary.away_goals += result.score.away;
            if result.went_to_overtime() {
                summary.overtime_games += 1;
            }
        }
        summary
    }

    pub fn games(&self) -> u32 {
        self.home.games()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::*;
    use crate::error::SimError;

    #[test]
    fn test_series_is_reproducible() {
        let (home, away) = create_test_pair(50);
        let rules = GameRules::new(300, 3, true);
        let config = EngineConfig::default();

        let a = simulate_series(&home, &away, &config, &rules, 1000, 24).unwrap();
        let b = simulate_series(&home, &away, &config, &rules, 1000, 24).unwrap();
        assert_eq!(a.len(), 24);
        assert_eq!(a, b);
    }

    #[test]
    fn test_series_game_matches_single_engine() {
        let (home, away) = create_test_pair(50);
        let rules = GameRules::new(300, 3, true);
        let config = EngineConfig::default();

        let series = simulate_series(&home, &away, &config, &rules, 500, 12).unwrap();
        let rng = ChaCha8Rng::seed_from_u64(505);
        let single =
            MatchEngine::new(rng, config).unwrap().simulate_game(&home, &away, &rules).unwrap();
        assert_eq!(series[5], single);
    }

    #[test]
    fn test_summary_counts_every_game() {
        let (home, away) = create_test_pair(50);
        let rules = GameRules::new(300, 3, true);
        let results =
            simulate_series(&home, &away, &EngineConfig::default(), &rules, 7, 20).unwrap();
        let summary = SeriesSummary::from_results(&results);

        assert_eq!(summary.games(), 20);
        assert_eq!(summary.home.ties, 0);
        assert_eq!(summary.home.wins, summary.away.losses);
        assert_eq!(summary.home.wins + summary.away.wins, 20);
    }

    #[test]
    fn test_series_rejects_shared_ids() {
        let (home, _) = create_test_pair(50);
        let away = create_test_lineup(0, 50);
        let result =
            simulate_series(&home, &away, &EngineConfig::default(), &GameRules::default(), 0, 3);
        assert!(matches!(result, Err(SimError::DegenerateRoster(_))));
    }

    #[test]
    fn test_series_rejects_bad_lineup() {
        let (home, mut away) = create_test_pair(50);
        away.goaltender = None;
        let result =
            simulate_series(&home, &away, &EngineConfig::default(), &GameRules::default(), 0, 3);
        assert!(matches!(result, Err(SimError::DegenerateRoster(_))));
    }
}
