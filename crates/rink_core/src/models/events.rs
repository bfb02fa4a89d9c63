use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Home or away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    /// 0 for home, 1 for away.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// Fields shared by every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBase {
    /// Seconds elapsed in the period when the play started.
    pub time: u32,
    /// Seconds the play consumed.
    pub length: u32,
    /// Side credited with the outcome: the new possessor for a possession
    /// change, the shooting side otherwise.
    pub team: TeamSide,
}

/// Outcome of one play. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    PossessionChange {
        #[serde(flatten)]
        base: EventBase,
    },
    /// Shot on goal that was saved.
    Shot {
        #[serde(flatten)]
        base: EventBase,
        shooter: PlayerId,
        goaltender: PlayerId,
    },
    Goal {
        #[serde(flatten)]
        base: EventBase,
        shooter: PlayerId,
        goaltender: PlayerId,
        passer: PlayerId,
        /// Attacking skaters on the ice.
        plus: BTreeSet<PlayerId>,
        /// Defending skaters on the ice.
        minus: BTreeSet<PlayerId>,
    },
}

impl Event {
    pub fn base(&self) -> &EventBase {
        match self {
            Event::PossessionChange { base }
            | Event::Shot { base, .. }
            | Event::Goal { base, .. } => base,
        }
    }

    pub fn time(&self) -> u32 {
        self.base().time
    }

    pub fn length(&self) -> u32 {
        self.base().length
    }

    pub fn team(&self) -> TeamSide {
        self.base().team
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, Event::Goal { .. })
    }

    /// True for saved shots and goals alike.
    pub fn is_shot_on_goal(&self) -> bool {
        matches!(self, Event::Shot { .. } | Event::Goal { .. })
    }
}
