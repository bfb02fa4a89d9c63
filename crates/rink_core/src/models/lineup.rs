//! Lines, lineups and on-ice selection.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use crate::error::{Result, SimError};

/// A forward/flex/defender trio eligible to be on the ice together.
///
/// Slots are optional so that incomplete lineups from a roster supplier can be
/// represented and rejected before any draw.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub forward: Option<Player>,
    #[serde(default)]
    pub flex: Option<Player>,
    #[serde(default)]
    pub defender: Option<Player>,
}

impl Line {
    pub fn new(forward: Player, flex: Player, defender: Player) -> Self {
        Self { forward: Some(forward), flex: Some(flex), defender: Some(defender) }
    }

    fn slots(&self) -> [(&'static str, Option<&Player>); 3] {
        [
            ("forward", self.forward.as_ref()),
            ("flex", self.flex.as_ref()),
            ("defender", self.defender.as_ref()),
        ]
    }

    fn slots_mut(&mut self) -> [Option<&mut Player>; 3] {
        [self.forward.as_mut(), self.flex.as_mut(), self.defender.as_mut()]
    }

    fn validate(&self, name: &str) -> Result<()> {
        for (slot, player) in self.slots() {
            let player =
                player.ok_or_else(|| SimError::roster(format!("{name} line has no {slot}")))?;
            if !player.is_skater() {
                return Err(SimError::roster(format!(
                    "{name} line {slot} (player {}) is not a skater",
                    player.id
                )));
            }
        }
        Ok(())
    }
}

/// Two alternating lines plus an active and a backup goaltender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub first: Line,
    pub second: Line,
    #[serde(default)]
    pub goaltender: Option<Player>,
    #[serde(default)]
    pub backup: Option<Player>,
    /// Probability of sending out the first line on a given play.
    #[serde(default = "default_bias")]
    pub bias: f64,
}

fn default_bias() -> f64 {
    0.5
}

impl Lineup {
    pub fn new(first: Line, second: Line, goaltender: Player) -> Self {
        Self { first, second, goaltender: Some(goaltender), backup: None, bias: default_bias() }
    }

    pub fn with_backup(mut self, backup: Player) -> Self {
        self.backup = Some(backup);
        self
    }

    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    /// Checks that both lines are complete, every slot holds the right kind of
    /// player, no id is dressed twice and the bias is a probability.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.bias) {
            return Err(SimError::InvalidBias(self.bias));
        }
        self.first.validate("first")?;
        self.second.validate("second")?;

        let goaltender =
            self.goaltender.as_ref().ok_or_else(|| SimError::roster("no active goaltender"))?;
        if !goaltender.is_goaltender() {
            return Err(SimError::roster(format!(
                "active goaltender (player {}) is not a goaltender",
                goaltender.id
            )));
        }
        if let Some(backup) = &self.backup {
            if !backup.is_goaltender() {
                return Err(SimError::roster(format!(
                    "backup goaltender (player {}) is not a goaltender",
                    backup.id
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for player in self.players() {
            if !seen.insert(player.id) {
                return Err(SimError::roster(format!("player {} is dressed twice", player.id)));
            }
        }
        Ok(())
    }

    /// Draws the line for one play and returns it with the active goaltender.
    ///
    /// Consumes exactly one boolean draw. The backup goaltender never plays.
    pub fn active_four<R: Rng>(&self, rng: &mut R) -> Result<ActiveFour<'_>> {
        if !(0.0..=1.0).contains(&self.bias) {
            return Err(SimError::InvalidBias(self.bias));
        }
        let (name, line) = self.draw_line(rng);
        line.validate(name)?;
        ActiveFour::from_line(name, line, self.goaltender.as_ref())
    }

    /// Same draw as [`active_four`](Self::active_four) for a lineup that has
    /// already passed [`validate`](Self::validate).
    pub(crate) fn draw_four<R: Rng>(&self, rng: &mut R) -> Result<ActiveFour<'_>> {
        let (name, line) = self.draw_line(rng);
        ActiveFour::from_line(name, line, self.goaltender.as_ref())
    }

    fn draw_line<R: Rng>(&self, rng: &mut R) -> (&'static str, &Line) {
        if rng.gen_bool(self.bias) {
            ("first", &self.first)
        } else {
            ("second", &self.second)
        }
    }

    /// Exchanges the active and backup goaltenders. Only call between periods.
    pub fn swap_goaltender(&mut self) {
        std::mem::swap(&mut self.goaltender, &mut self.backup);
    }

    /// Sets a player's energy in place, for recovery between periods.
    pub fn set_energy(&mut self, id: PlayerId, energy: u8) -> Result<()> {
        let player = self
            .first
            .slots_mut()
            .into_iter()
            .chain(self.second.slots_mut())
            .chain([self.goaltender.as_mut(), self.backup.as_mut()])
            .flatten()
            .find(|p| p.id == id)
            .ok_or_else(|| SimError::roster(format!("player {id} is not in the lineup")))?;
        player.energy = energy;
        Ok(())
    }

    /// Every player dressed in this lineup.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.first
            .slots()
            .into_iter()
            .chain(self.second.slots())
            .filter_map(|(_, p)| p)
            .chain(self.goaltender.as_ref())
            .chain(self.backup.as_ref())
    }
}

/// Validates both lineups and checks that no player id is dressed by both.
pub fn validate_matchup(home: &Lineup, away: &Lineup) -> Result<()> {
    home.validate()?;
    away.validate()?;

    let home_ids: BTreeSet<PlayerId> = home.players().map(|p| p.id).collect();
    if let Some(shared) = away.players().find(|p| home_ids.contains(&p.id)) {
        return Err(SimError::roster(format!("player {} is dressed by both teams", shared.id)));
    }
    Ok(())
}

/// The four players on the ice for a single play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveFour<'a> {
    pub forward: &'a Player,
    pub flex: &'a Player,
    pub defender: &'a Player,
    pub goaltender: &'a Player,
}

impl<'a> ActiveFour<'a> {
    fn from_line(name: &str, line: &'a Line, goaltender: Option<&'a Player>) -> Result<Self> {
        let missing = |slot: &str| SimError::roster(format!("{name} line has no {slot}"));
        let goaltender = goaltender.ok_or_else(|| SimError::roster("no active goaltender"))?;
        if !goaltender.is_goaltender() {
            return Err(SimError::roster(format!(
                "active goaltender (player {}) is not a goaltender",
                goaltender.id
            )));
        }
        Ok(Self {
            forward: line.forward.as_ref().ok_or_else(|| missing("forward"))?,
            flex: line.flex.as_ref().ok_or_else(|| missing("flex"))?,
            defender: line.defender.as_ref().ok_or_else(|| missing("defender"))?,
            goaltender,
        })
    }

    pub fn skaters(&self) -> [&'a Player; 3] {
        [self.forward, self.flex, self.defender]
    }

    pub fn skater_ids(&self) -> BTreeSet<PlayerId> {
        self.skaters().iter().map(|p| p.id).collect()
    }

    pub fn total_defending(&self) -> Result<u64> {
        self.skaters().iter().try_fold(0u64, |acc, p| Ok(acc + u64::from(p.defending()?)))
    }

    pub fn total_passing(&self) -> Result<u64> {
        self.skaters().iter().try_fold(0u64, |acc, p| Ok(acc + u64::from(p.passing()?)))
    }

    /// Weight of this side in the possession contest.
    pub fn possession(&self) -> Result<u64> {
        Ok(self.total_defending()? + self.total_passing()?)
    }
}
