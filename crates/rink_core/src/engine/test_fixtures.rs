//! Test Fixtures Module
//!
//! Shared lineup builders for engine and model tests.
//!
//! ## Usage
//! ```ignore
//! use crate::engine::test_fixtures::*;
//! ```

use crate::models::{Line, Lineup, Player, PlayerId};

// =============================================================================
// Lineup Creation Helpers
// =============================================================================

/// Create a lineup whose players all share one rating.
///
/// Ids are assigned from `base_id`:
/// - first line: `base_id + 1..=3` (forward, flex, defender)
/// - second line: `base_id + 4..=6`
/// - goaltender: `base_id + 7`, backup: `base_id + 8`
pub fn create_test_lineup(base_id: PlayerId, rating: u32) -> Lineup {
    let skater = |offset| Player::skater(base_id + offset, rating, rating, rating);
    Lineup::new(
        Line::new(skater(1), skater(2), skater(3)),
        Line::new(skater(4), skater(5), skater(6)),
        Player::goaltender(base_id + 7, rating, rating),
    )
    .with_backup(Player::goaltender(base_id + 8, rating, rating))
}

/// Home lineup (ids 1-8) and away lineup (ids 101-108), both rated `rating`.
pub fn create_test_pair(rating: u32) -> (Lineup, Lineup) {
    (create_test_lineup(0, rating), create_test_lineup(100, rating))
}

/// Lineup with every player at the given energy.
pub fn create_tired_lineup(base_id: PlayerId, rating: u32, energy: u8) -> Lineup {
    let mut lineup = create_test_lineup(base_id, rating);
    for offset in 1..=8 {
        lineup.set_energy(base_id + offset, energy).unwrap();
    }
    lineup
}
