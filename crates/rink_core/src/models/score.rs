use serde::{Deserialize, Serialize};

use super::events::{Event, TeamSide};

/// Goals per side, derived by folding goal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    HomeWin,
    AwayWin,
    Tie,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut score = Self::default();
        score.update(events);
        score
    }

    /// Adds one goal per `Goal` event to the scoring side. Other events are
    /// ignored.
    pub fn update<'a>(&mut self, events: impl IntoIterator<Item = &'a Event>) {
        for event in events {
            match event {
                Event::Goal { base, .. } => match base.team {
                    TeamSide::Home => self.home += 1,
                    TeamSide::Away => self.away += 1,
                },
                Event::PossessionChange { .. } | Event::Shot { .. } => {}
            }
        }
    }

    pub fn tied(&self) -> bool {
        self.home == self.away
    }

    pub fn for_side(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => GameOutcome::HomeWin,
            std::cmp::Ordering::Less => GameOutcome::AwayWin,
            std::cmp::Ordering::Equal => GameOutcome::Tie,
        }
    }

    pub fn winner(&self) -> Option<TeamSide> {
        match self.outcome() {
            GameOutcome::HomeWin => Some(TeamSide::Home),
            GameOutcome::AwayWin => Some(TeamSide::Away),
            GameOutcome::Tie => None,
        }
    }
}

/// Win/loss/tie record for standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    /// Records one finished game from `side`'s point of view.
    pub fn apply(&mut self, score: &Score, side: TeamSide) {
        match score.winner() {
            Some(winner) if winner == side => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.ties += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub fn points(&self, per_win: u32, per_tie: u32) -> u32 {
        self.wins * per_win + self.ties * per_tie
    }
}
