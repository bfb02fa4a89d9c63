//! Per-player and per-team game statistics.
//!
//! Like [`Score`](crate::models::Score), a box score is derived from the event
//! log and never feeds back into the simulation. Ice time is the one thing the
//! log does not carry, so the game loop reports shifts separately.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ActiveFour, Event, PlayerId, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkaterLine {
    pub team: TeamSide,
    pub seconds_played: u32,
    /// Shots on goal, including goals.
    pub shots: u32,
    pub goals: u32,
    pub assists: u32,
    pub plus: u32,
    pub minus: u32,
}

impl SkaterLine {
    fn new(team: TeamSide) -> Self {
        Self { team, seconds_played: 0, shots: 0, goals: 0, assists: 0, plus: 0, minus: 0 }
    }

    pub fn points(&self) -> u32 {
        self.goals + self.assists
    }

    pub fn plus_minus(&self) -> i64 {
        i64::from(self.plus) - i64::from(self.minus)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoaltenderLine {
    pub team: TeamSide,
    pub seconds_played: u32,
    /// Shots faced, including goals.
    pub shots_against: u32,
    pub goals_against: u32,
    pub assists: u32,
}

impl GoaltenderLine {
    fn new(team: TeamSide) -> Self {
        Self { team, seconds_played: 0, shots_against: 0, goals_against: 0, assists: 0 }
    }

    pub fn saves(&self) -> u32 {
        self.shots_against - self.goals_against
    }

    /// `None` until the goaltender has faced a shot.
    pub fn save_percentage(&self) -> Option<f64> {
        (self.shots_against > 0).then(|| f64::from(self.saves()) / f64::from(self.shots_against))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamLine {
    pub goals_for: u32,
    pub goals_against: u32,
    /// Shots on goal, including goals.
    pub shots_for: u32,
    pub shots_against: u32,
    /// Plays won: shots and goals taken plus possession changes gained.
    pub possessions: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxScore {
    pub skaters: BTreeMap<PlayerId, SkaterLine>,
    pub goaltenders: BTreeMap<PlayerId, GoaltenderLine>,
    pub home: TeamLine,
    pub away: TeamLine,
}

impl BoxScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Box score from the event log alone; ice time stays at zero.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut box_score = Self::new();
        for event in events {
            box_score.record_event(event);
        }
        box_score
    }

    pub fn team(&self, side: TeamSide) -> &TeamLine {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    fn team_mut(&mut self, side: TeamSide) -> &mut TeamLine {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn skater(&self, id: PlayerId) -> Option<&SkaterLine> {
        self.skaters.get(&id)
    }

    pub fn goaltender(&self, id: PlayerId) -> Option<&GoaltenderLine> {
        self.goaltenders.get(&id)
    }

    fn skater_mut(&mut self, id: PlayerId, team: TeamSide) -> &mut SkaterLine {
        self.skaters.entry(id).or_insert_with(|| SkaterLine::new(team))
    }

    fn goaltender_mut(&mut self, id: PlayerId, team: TeamSide) -> &mut GoaltenderLine {
        self.goaltenders.entry(id).or_insert_with(|| GoaltenderLine::new(team))
    }

    /// Adds ice time for the four players of one side.
    pub fn record_shift(&mut self, four: &ActiveFour<'_>, side: TeamSide, seconds: u32) {
        for skater in four.skaters() {
            self.skater_mut(skater.id, side).seconds_played += seconds;
        }
        self.goaltender_mut(four.goaltender.id, side).seconds_played += seconds;
    }

    pub fn record_event(&mut self, event: &Event) {
        let side = event.team();
        self.team_mut(side).possessions += 1;

        match event {
            Event::PossessionChange { .. } => {}
            Event::Shot { shooter, goaltender, .. } => {
                self.record_shot(side, *shooter, *goaltender);
            }
            Event::Goal { shooter, goaltender, passer, plus, minus, .. } => {
                self.record_shot(side, *shooter, *goaltender);
                self.skater_mut(*shooter, side).goals += 1;
                self.goaltender_mut(*goaltender, side.opponent()).goals_against += 1;
                self.team_mut(side).goals_for += 1;
                self.team_mut(side.opponent()).goals_against += 1;

                // A passer outside the attacking skaters is their goaltender.
                if passer != shooter {
                    if plus.contains(passer) {
                        self.skater_mut(*passer, side).assists += 1;
                    } else {
                        self.goaltender_mut(*passer, side).assists += 1;
                    }
                }
                for id in plus {
                    self.skater_mut(*id, side).plus += 1;
                }
                for id in minus {
                    self.skater_mut(*id, side.opponent()).minus += 1;
                }
            }
        }
    }

    fn record_shot(&mut self, side: TeamSide, shooter: PlayerId, goaltender: PlayerId) {
        self.skater_mut(shooter, side).shots += 1;
        self.goaltender_mut(goaltender, side.opponent()).shots_against += 1;
        self.team_mut(side).shots_for += 1;
        self.team_mut(side.opponent()).shots_against += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::*;
    use crate::models::EventBase;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    fn base(team: TeamSide, time: u32) -> EventBase {
        EventBase { time, length: 10, team }
    }

    fn sample_events() -> Vec<Event> {
        vec![
            Event::Shot { base: base(TeamSide::Home, 0), shooter: 1, goaltender: 107 },
            Event::Goal {
                base: base(TeamSide::Home, 10),
                shooter: 2,
                goaltender: 107,
                passer: 3,
                plus: BTreeSet::from([1, 2, 3]),
                minus: BTreeSet::from([101, 102, 103]),
            },
            Event::PossessionChange { base: base(TeamSide::Away, 20) },
            Event::Goal {
                base: base(TeamSide::Away, 30),
                shooter: 104,
                goaltender: 7,
                passer: 107,
                plus: BTreeSet::from([104, 105, 106]),
                minus: BTreeSet::from([1, 2, 3]),
            },
        ]
    }

    #[test]
    fn test_skater_lines() {
        let bs = BoxScore::from_events(&sample_events());

        let scorer = bs.skater(2).unwrap();
        assert_eq!((scorer.shots, scorer.goals, scorer.assists), (1, 1, 0));
        assert_eq!(scorer.plus_minus(), 0);

        let passer = bs.skater(3).unwrap();
        assert_eq!(passer.assists, 1);
        assert_eq!(passer.points(), 1);

        let defender = bs.skater(101).unwrap();
        assert_eq!(defender.team, TeamSide::Away);
        assert_eq!(defender.plus_minus(), -1);
    }

    #[test]
    fn test_goaltender_assist_and_saves() {
        let bs = BoxScore::from_events(&sample_events());

        let away_goalie = bs.goaltender(107).unwrap();
        assert_eq!(away_goalie.shots_against, 2);
        assert_eq!(away_goalie.goals_against, 1);
        assert_eq!(away_goalie.saves(), 1);
        assert_eq!(away_goalie.save_percentage(), Some(0.5));
        assert_eq!(away_goalie.assists, 1);
        assert!(bs.skater(107).is_none());

        let home_goalie = bs.goaltender(7).unwrap();
        assert_eq!(home_goalie.save_percentage(), Some(0.0));
    }

    #[test]
    fn test_team_lines() {
        let bs = BoxScore::from_events(&sample_events());
        assert_eq!(
            *bs.team(TeamSide::Home),
            TeamLine { goals_for: 1, goals_against: 1, shots_for: 2, shots_against: 1, possessions: 2 }
        );
        assert_eq!(bs.away.possessions, 2);
        assert_eq!(bs.away.shots_for, 1);
    }

    #[test]
    fn test_record_shift() {
        let lineup = create_test_lineup(0, 50).with_bias(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let four = lineup.active_four(&mut rng).unwrap();

        let mut bs = BoxScore::new();
        bs.record_shift(&four, TeamSide::Home, 10);
        bs.record_shift(&four, TeamSide::Home, 10);

        assert_eq!(bs.skater(1).unwrap().seconds_played, 20);
        assert_eq!(bs.goaltender(7).unwrap().seconds_played, 20);
        assert!(bs.skater(4).is_none());
        assert!(bs.goaltender(8).is_none());
    }

    #[test]
    fn test_unused_goaltender_has_no_save_percentage() {
        let line = GoaltenderLine::new(TeamSide::Home);
        assert_eq!(line.save_percentage(), None);
    }
}
