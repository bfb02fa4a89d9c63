//! Period and game loops.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::box_score::BoxScore;
use super::config::GameRules;
use super::play::resolve_play;
use super::MatchEngine;
use crate::error::Result;
use crate::models::{validate_matchup, Event, Lineup, Score, TeamSide};

/// Periods longer than this grow their event log on demand.
const MAX_PREALLOCATED_PLAYS: usize = 1024;

/// Hook run before every period after the first.
///
/// This is where goaltender swaps and energy recovery belong; lineups are
/// never touched while a period is in progress.
pub trait Intermission {
    fn between_periods(
        &mut self,
        next_period: u32,
        home: &mut Lineup,
        away: &mut Lineup,
    ) -> Result<()>;
}

impl<F> Intermission for F
where
    F: FnMut(u32, &mut Lineup, &mut Lineup) -> Result<()>,
{
    fn between_periods(
        &mut self,
        next_period: u32,
        home: &mut Lineup,
        away: &mut Lineup,
    ) -> Result<()> {
        self(next_period, home, away)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// Events per period index. Indices at or past `regulation_periods` are
    /// sudden-death overtime.
    pub periods: BTreeMap<u32, Vec<Event>>,
    pub score: Score,
    pub box_score: BoxScore,
    pub regulation_periods: u32,
}

impl GameResult {
    /// All events in playback order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.periods.values().flatten()
    }

    pub fn overtime_periods(&self) -> u32 {
        (self.periods.len() as u32).saturating_sub(self.regulation_periods)
    }

    pub fn went_to_overtime(&self) -> bool {
        self.overtime_periods() > 0
    }
}

impl<R: Rng> MatchEngine<R> {
    /// Plays one period and returns its events in order.
    ///
    /// Plays run back to back until `period_length` seconds have elapsed. In
    /// sudden death the period also ends on the first goal.
    pub fn simulate_period(
        &mut self,
        home: &Lineup,
        away: &Lineup,
        period_length: u32,
        sudden_death: bool,
    ) -> Result<Vec<Event>> {
        self.play_period(home, away, period_length, sudden_death, None)
    }

    /// Plays regulation and, when enabled and tied, sudden-death overtime.
    pub fn simulate_game(
        &mut self,
        home: &Lineup,
        away: &Lineup,
        rules: &GameRules,
    ) -> Result<GameResult> {
        let (mut home, mut away) = (home.clone(), away.clone());
        let mut no_intermission =
            |_: u32, _: &mut Lineup, _: &mut Lineup| -> Result<()> { Ok(()) };
        self.simulate_game_with(&mut home, &mut away, rules, &mut no_intermission)
    }

    /// Like [`simulate_game`](Self::simulate_game), running `intermission`
    /// before every period after the first.
    pub fn simulate_game_with<I: Intermission>(
        &mut self,
        home: &mut Lineup,
        away: &mut Lineup,
        rules: &GameRules,
        intermission: &mut I,
    ) -> Result<GameResult> {
        rules.validate()?;

        let mut periods = BTreeMap::new();
        let mut score = Score::default();
        let mut box_score = BoxScore::new();

        for period in 0..rules.num_periods {
            if period > 0 {
                intermission.between_periods(period, home, away)?;
            }
            let events =
                self.play_period(home, away, rules.period_length, false, Some(&mut box_score))?;
            score.update(&events);
            periods.insert(period, events);
        }

        let mut period = rules.num_periods;
        while rules.overtime && score.tied() {
            debug!(period, home = score.home, away = score.away, "tied, sudden death");
            intermission.between_periods(period, home, away)?;
            let events =
                self.play_period(home, away, rules.period_length, true, Some(&mut box_score))?;
            score.update(&events);
            periods.insert(period, events);
            period += 1;
        }

        debug!(home = score.home, away = score.away, periods = periods.len(), "game complete");
        Ok(GameResult { periods, score, box_score, regulation_periods: rules.num_periods })
    }

    fn play_period(
        &mut self,
        home: &Lineup,
        away: &Lineup,
        period_length: u32,
        sudden_death: bool,
        mut box_score: Option<&mut BoxScore>,
    ) -> Result<Vec<Event>> {
        validate_matchup(home, away)?;

        let play_length = self.config.play_length;
        let expected = (period_length / play_length) as usize + 1;
        let mut events = Vec::with_capacity(expected.min(MAX_PREALLOCATED_PLAYS));
        let mut time = 0;

        while time < period_length {
            let home_four = home.draw_four(&mut self.rng)?;
            let away_four = away.draw_four(&mut self.rng)?;
            let event = resolve_play(&mut self.rng, &self.config, &home_four, &away_four, time)?;

            if let Some(bs) = box_score.as_deref_mut() {
                bs.record_shift(&home_four, TeamSide::Home, play_length);
                bs.record_shift(&away_four, TeamSide::Away, play_length);
                bs.record_event(&event);
            }

            let goal = event.is_goal();
            events.push(event);
            time += play_length;

            if sudden_death && goal {
                break;
            }
        }

        debug!(events = events.len(), sudden_death, elapsed = time, "period complete");
        Ok(events)
    }
}
