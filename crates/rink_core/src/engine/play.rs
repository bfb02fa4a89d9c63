//! Single-play resolution.
//!
//! A play walks five stages, each a single weighted draw:
//!
//! 1. possession contest: `defending + passing` of each side's skaters
//! 2. passer: the attackers' passing (goaltender scaled down)
//! 3. pass contest: passer's passing vs. the defenders' total defending;
//!    losing it ends the play as a possession change
//! 4. shooter: attacking skaters other than the passer, by shooting
//! 5. shot contest: shooting vs. goaltender stopping plus the save bias
//!
//! There is no retry: every call produces exactly one event.

use rand::Rng;
use tracing::trace;

use super::config::EngineConfig;
use super::selection::{contest, select_weighted};
use super::MatchEngine;
use crate::error::Result;
use crate::models::{ActiveFour, Event, EventBase, Player, TeamSide};

impl<R: Rng> MatchEngine<R> {
    /// Resolves one play starting `time` seconds into the period.
    pub fn simulate_play(
        &mut self,
        home: &ActiveFour<'_>,
        away: &ActiveFour<'_>,
        time: u32,
    ) -> Result<Event> {
        resolve_play(&mut self.rng, &self.config, home, away, time)
    }
}

/// Free-function form of [`MatchEngine::simulate_play`] for callers that
/// manage their own random source.
pub fn resolve_play<R: Rng>(
    rng: &mut R,
    config: &EngineConfig,
    home: &ActiveFour<'_>,
    away: &ActiveFour<'_>,
    time: u32,
) -> Result<Event> {
    let base = |team| EventBase { time, length: config.play_length, team };

    // 1. possession
    let home_possession = home.possession()? as f64;
    let away_possession = away.possession()? as f64;
    let (side, attacking, defending) = if contest(rng, home_possession, away_possession)? {
        (TeamSide::Home, home, away)
    } else {
        (TeamSide::Away, away, home)
    };

    // 2. passer
    let passer = select_passer(rng, config, attacking)?;

    // 3. pass contest
    let pass = passer.passing()? as f64;
    let coverage = defending.total_defending()? as f64;
    if !contest(rng, pass, coverage)? {
        trace!(time, passer = passer.id, "pass broken up");
        return Ok(Event::PossessionChange { base: base(side.opponent()) });
    }

    // 4. shooter
    let shooter = select_shooter(rng, attacking, passer)?;

    // 5. shot contest
    let goaltender = defending.goaltender;
    let shooting = shooter.shooting()? as f64;
    let stopping = f64::from(goaltender.stopping()?) + f64::from(config.save_bias);
    if contest(rng, shooting, stopping)? {
        trace!(time, shooter = shooter.id, passer = passer.id, ?side, "goal");
        Ok(Event::Goal {
            base: base(side),
            shooter: shooter.id,
            goaltender: goaltender.id,
            passer: passer.id,
            plus: attacking.skater_ids(),
            minus: defending.skater_ids(),
        })
    } else {
        trace!(time, shooter = shooter.id, goaltender = goaltender.id, "save");
        Ok(Event::Shot { base: base(side), shooter: shooter.id, goaltender: goaltender.id })
    }
}

fn select_passer<'a, R: Rng>(
    rng: &mut R,
    config: &EngineConfig,
    attacking: &ActiveFour<'a>,
) -> Result<&'a Player> {
    let [forward, flex, defender] = attacking.skaters();
    let goaltender = attacking.goaltender;
    let weights = [
        forward.passing()? as f64,
        flex.passing()? as f64,
        defender.passing()? as f64,
        (f64::from(goaltender.passing()?) * config.goaltender_pass_factor).floor(),
    ];
    let candidates = [forward, flex, defender, goaltender];
    Ok(candidates[select_weighted(rng, &weights)?])
}

/// Picks among the attacking skaters, never the passer. A goaltender passer
/// leaves all three skaters eligible.
fn select_shooter<'a, R: Rng>(
    rng: &mut R,
    attacking: &ActiveFour<'a>,
    passer: &Player,
) -> Result<&'a Player> {
    let candidates: Vec<&'a Player> =
        attacking.skaters().into_iter().filter(|p| p.id != passer.id).collect();
    let weights =
        candidates.iter().map(|p| p.shooting().map(f64::from)).collect::<Result<Vec<_>>>()?;
    Ok(candidates[select_weighted(rng, &weights)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::*;
    use crate::error::SimError;
    use crate::models::{Line, Lineup, Player};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    fn first_four(lineup: &Lineup) -> ActiveFour<'_> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        lineup.active_four(&mut rng).unwrap()
    }

    #[test]
    fn test_play_emits_one_event_with_fixed_length() {
        let home = create_test_lineup(0, 60).with_bias(1.0);
        let away = create_test_lineup(100, 60).with_bias(1.0);
        let (h, a) = (first_four(&home), first_four(&away));
        let mut engine = MatchEngine::from_seed(17);

        for t in 0..200 {
            let event = engine.simulate_play(&h, &a, t * 10).unwrap();
            assert_eq!(event.time(), t * 10);
            assert_eq!(event.length(), 10);
        }
    }

    #[test]
    fn test_goal_credits_on_ice_skaters_only() {
        let home = create_test_lineup(0, 90).with_bias(1.0);
        let away = create_test_lineup(100, 90).with_bias(1.0);
        let (h, a) = (first_four(&home), first_four(&away));
        let mut engine = MatchEngine::new(ChaCha8Rng::seed_from_u64(3), EngineConfig::arcade())
            .unwrap();

        let mut goals = 0;
        for t in 0..2_000 {
            if let Event::Goal { base, shooter, goaltender, passer, plus, minus } =
                engine.simulate_play(&h, &a, t).unwrap()
            {
                goals += 1;
                let (att, def) = match base.team {
                    TeamSide::Home => (&h, &a),
                    TeamSide::Away => (&a, &h),
                };
                assert_eq!(plus, att.skater_ids());
                assert_eq!(minus, def.skater_ids());
                assert!(!plus.contains(&att.goaltender.id));
                assert!(!minus.contains(&def.goaltender.id));
                assert_eq!(goaltender, def.goaltender.id);
                assert_ne!(shooter, passer);
                assert!(plus.contains(&shooter));
            }
        }
        assert!(goals > 0);
    }

    #[test]
    fn test_shooter_never_passer() {
        let home = create_test_lineup(0, 70).with_bias(1.0);
        let away = create_test_lineup(100, 10).with_bias(1.0);
        let (h, a) = (first_four(&home), first_four(&away));
        let mut engine = MatchEngine::from_seed(8);

        for t in 0..2_000 {
            match engine.simulate_play(&h, &a, t).unwrap() {
                Event::Shot { shooter, goaltender, .. } => {
                    assert!(shooter != goaltender);
                }
                Event::Goal { shooter, passer, .. } => assert_ne!(shooter, passer),
                Event::PossessionChange { .. } => {}
            }
        }
    }

    #[test]
    fn test_no_defending_means_no_turnover() {
        // Defenders with zero defending can never break up a pass, and a
        // zero-rated defending side never wins possession.
        let attackers = create_test_lineup(0, 50).with_bias(1.0);
        let zero = |id| Player::skater(id, 0, 0, 0);
        let defenders = Lineup::new(
            Line::new(zero(101), zero(102), zero(103)),
            Line::new(zero(104), zero(105), zero(106)),
            Player::goaltender(107, 0, 0),
        )
        .with_bias(1.0);
        let (h, a) = (first_four(&attackers), first_four(&defenders));
        let mut engine = MatchEngine::from_seed(21);

        for t in 0..500 {
            let event = engine.simulate_play(&h, &a, t).unwrap();
            assert!(event.is_shot_on_goal());
            assert_eq!(event.team(), TeamSide::Home);
        }
    }

    #[test]
    fn test_turnover_credits_defending_side() {
        let home = create_test_lineup(0, 40).with_bias(1.0);
        let away = create_test_lineup(100, 40).with_bias(1.0);
        let (h, a) = (first_four(&home), first_four(&away));
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let config = EngineConfig::default();

        let mut seen = BTreeSet::new();
        for t in 0..1_000 {
            if let Event::PossessionChange { base } = resolve_play(&mut rng, &config, &h, &a, t)
                .unwrap()
            {
                seen.insert(base.team.index());
            }
        }
        assert_eq!(seen, BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_all_zero_ratings_is_invalid_weights() {
        let zero = |id| Player::skater(id, 0, 0, 0);
        let lineup = Lineup::new(
            Line::new(zero(1), zero(2), zero(3)),
            Line::new(zero(4), zero(5), zero(6)),
            Player::goaltender(7, 0, 0),
        )
        .with_bias(1.0);
        let four = first_four(&lineup);
        let mut engine = MatchEngine::from_seed(1);

        assert!(matches!(
            engine.simulate_play(&four, &four, 0),
            Err(SimError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn test_zero_energy_aborts_play() {
        let mut home = create_test_lineup(0, 50).with_bias(1.0);
        home.set_energy(2, 0).unwrap();
        let away = create_test_lineup(100, 50).with_bias(1.0);
        let (h, a) = (first_four(&home), first_four(&away));
        let mut engine = MatchEngine::from_seed(1);

        assert_eq!(
            engine.simulate_play(&h, &a, 0),
            Err(SimError::NonPositiveEnergy { player: 2 })
        );
    }

    #[test]
    fn test_deterministic_for_seed() {
        let home = create_test_lineup(0, 55).with_bias(1.0);
        let away = create_test_lineup(100, 45).with_bias(1.0);
        let (h, a) = (first_four(&home), first_four(&away));

        let run = |seed| {
            let mut engine = MatchEngine::from_seed(seed);
            (0..100).map(|t| engine.simulate_play(&h, &a, t).unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(run(4), run(4));
    }
}
