//! Team sheet snapshot taken at kick-off.
//!
//! A `TeamSheet` can only be produced through [`TeamSheetBuilder::build`] (or
//! re-checked with [`TeamSheet::validate`] after deserialization), so the
//! engine never sees a sheet with a wrong eleven, a position assignment for a
//! bench player, or no goalkeeper. After kick-off the only mutation is an
//! atomic substitution swap.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::player::{PlayerId, Position, Roster};
use crate::error::SetupError;
use crate::tactics::Tactic;

pub const STARTING_ELEVEN: usize = 11;
pub const MAX_BENCH: usize = 9;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamSheet {
    pub name: String,
    starting_eleven: Vec<PlayerId>,
    bench: Vec<PlayerId>,
    /// Deployed position per starter (may differ from the natural position)
    assignments: BTreeMap<PlayerId, Position>,
    tactic: Tactic,
    captain: PlayerId,
}

impl TeamSheet {
    pub fn builder(name: impl Into<String>) -> TeamSheetBuilder {
        TeamSheetBuilder::new(name)
    }

    pub fn starting_eleven(&self) -> &[PlayerId] {
        &self.starting_eleven
    }

    pub fn bench(&self) -> &[PlayerId] {
        &self.bench
    }

    pub fn tactic(&self) -> Tactic {
        self.tactic
    }

    pub fn captain(&self) -> PlayerId {
        self.captain
    }

    pub fn assigned_position(&self, id: PlayerId) -> Option<Position> {
        self.assignments.get(&id).copied()
    }

    pub fn is_starting(&self, id: PlayerId) -> bool {
        self.starting_eleven.contains(&id)
    }

    pub fn is_on_bench(&self, id: PlayerId) -> bool {
        self.bench.contains(&id)
    }

    /// Starters paired with their deployed position, in sheet order.
    pub fn lineup(&self) -> impl Iterator<Item = (PlayerId, Position)> + '_ {
        self.starting_eleven
            .iter()
            .filter_map(move |id| self.assignments.get(id).map(|pos| (*id, *pos)))
    }

    /// Every id on the sheet, starters first.
    pub fn all_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.starting_eleven.iter().chain(self.bench.iter()).copied()
    }

    pub(crate) fn set_tactic(&mut self, tactic: Tactic) {
        self.tactic = tactic;
    }

    /// Swap `out_id` (starter) for `in_id` (bench). The incoming player takes
    /// over the outgoing slot and its position assignment. Returns the slot
    /// position, or `None` with the sheet untouched.
    pub(crate) fn apply_substitution(&mut self, out_id: PlayerId, in_id: PlayerId) -> Option<Position> {
        let slot = self.starting_eleven.iter().position(|&id| id == out_id)?;
        let bench_idx = self.bench.iter().position(|&id| id == in_id)?;
        let position = self.assignments.remove(&out_id)?;

        self.starting_eleven[slot] = in_id;
        self.bench.remove(bench_idx);
        self.assignments.insert(in_id, position);
        Some(position)
    }

    /// Re-check every structural invariant against a roster.
    pub fn validate(&self, roster: &Roster) -> Result<(), SetupError> {
        if self.starting_eleven.len() != STARTING_ELEVEN {
            return Err(SetupError::InvalidTeamSize {
                expected: STARTING_ELEVEN,
                found: self.starting_eleven.len(),
            });
        }
        if self.bench.len() > MAX_BENCH {
            return Err(SetupError::BenchTooLarge { max: MAX_BENCH, found: self.bench.len() });
        }

        let mut seen = HashSet::new();
        for id in self.all_players() {
            if !seen.insert(id) {
                return Err(SetupError::DuplicatePlayer(id));
            }
            let player = roster.get(&id).ok_or(SetupError::UnknownPlayer(id))?;
            player.validate()?;
        }

        for id in self.assignments.keys() {
            if !self.starting_eleven.contains(id) {
                return Err(SetupError::AssignmentOutsideEleven(*id));
            }
        }
        // every starter needs a deployed position
        if let Some(missing) = self.starting_eleven.iter().find(|id| !self.assignments.contains_key(id)) {
            return Err(SetupError::InvalidPlayer {
                id: *missing,
                reason: "starter without position assignment".to_string(),
            });
        }

        let keepers = self.assignments.values().filter(|p| p.is_goalkeeper()).count();
        if keepers != 1 {
            return Err(SetupError::GoalkeeperCount(keepers));
        }

        if !self.starting_eleven.contains(&self.captain) {
            return Err(SetupError::CaptainNotStarting(self.captain));
        }
        Ok(())
    }
}

/// Validated builder for [`TeamSheet`].
#[derive(Debug, Clone)]
pub struct TeamSheetBuilder {
    name: String,
    starters: Vec<(PlayerId, Option<Position>)>,
    bench: Vec<PlayerId>,
    tactic: Tactic,
    captain: Option<PlayerId>,
}

impl TeamSheetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            starters: Vec::with_capacity(STARTING_ELEVEN),
            bench: Vec::new(),
            tactic: Tactic::default(),
            captain: None,
        }
    }

    /// Starter deployed in their natural position.
    pub fn starter(mut self, id: PlayerId) -> Self {
        self.starters.push((id, None));
        self
    }

    /// Starter deployed in an explicit position.
    pub fn starter_at(mut self, id: PlayerId, position: Position) -> Self {
        self.starters.push((id, Some(position)));
        self
    }

    pub fn bench(mut self, id: PlayerId) -> Self {
        self.bench.push(id);
        self
    }

    pub fn bench_players(mut self, ids: impl IntoIterator<Item = PlayerId>) -> Self {
        self.bench.extend(ids);
        self
    }

    pub fn tactic(mut self, tactic: Tactic) -> Self {
        self.tactic = tactic;
        self
    }

    pub fn captain(mut self, id: PlayerId) -> Self {
        self.captain = Some(id);
        self
    }

    /// Resolve natural positions from the roster and validate the result.
    /// Without an explicit captain the first starter wears the armband.
    pub fn build(self, roster: &Roster) -> Result<TeamSheet, SetupError> {
        let mut assignments = BTreeMap::new();
        for (id, explicit) in &self.starters {
            let player = roster.get(id).ok_or(SetupError::UnknownPlayer(*id))?;
            if assignments.insert(*id, explicit.unwrap_or(player.position_main)).is_some() {
                return Err(SetupError::DuplicatePlayer(*id));
            }
        }

        let starting_eleven: Vec<PlayerId> = self.starters.iter().map(|(id, _)| *id).collect();
        let captain = self
            .captain
            .or_else(|| starting_eleven.first().copied())
            .ok_or(SetupError::InvalidTeamSize { expected: STARTING_ELEVEN, found: 0 })?;

        let sheet = TeamSheet {
            name: self.name,
            starting_eleven,
            bench: self.bench,
            assignments,
            tactic: self.tactic,
            captain,
        };
        sheet.validate(roster)?;
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Player;

    fn roster() -> Roster {
        let positions = [
            Position::GK,
            Position::DEF,
            Position::DEF,
            Position::DEF,
            Position::DEF,
            Position::MID,
            Position::MID,
            Position::MID,
            Position::MID,
            Position::FWD,
            Position::FWD,
            Position::GK,
            Position::MID,
        ];
        positions
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                let id = i as PlayerId + 1;
                (id, Player::new(id, format!("P{id}"), 25, *pos, 70))
            })
            .collect()
    }

    fn eleven(builder: TeamSheetBuilder) -> TeamSheetBuilder {
        (1..=11).fold(builder, |b, id| b.starter(id))
    }

    #[test]
    fn test_builds_with_natural_positions() {
        let roster = roster();
        let sheet = eleven(TeamSheet::builder("Home")).bench(12).bench(13).build(&roster).unwrap();
        assert_eq!(sheet.starting_eleven().len(), 11);
        assert_eq!(sheet.assigned_position(1), Some(Position::GK));
        assert_eq!(sheet.assigned_position(10), Some(Position::FWD));
        assert_eq!(sheet.captain(), 1);
        assert_eq!(sheet.assigned_position(12), None);
    }

    #[test]
    fn test_rejects_wrong_eleven_size() {
        let roster = roster();
        let err = (1..=10).fold(TeamSheet::builder("Short"), |b, id| b.starter(id)).build(&roster);
        assert_eq!(err, Err(SetupError::InvalidTeamSize { expected: 11, found: 10 }));
    }

    #[test]
    fn test_rejects_two_goalkeepers_and_none() {
        let roster = roster();
        let two = (1..=10)
            .fold(TeamSheet::builder("Two"), |b, id| b.starter(id))
            .starter(12)
            .build(&roster);
        assert_eq!(two, Err(SetupError::GoalkeeperCount(2)));

        let none = (2..=11)
            .fold(TeamSheet::builder("None"), |b, id| b.starter(id))
            .starter(13)
            .build(&roster);
        assert_eq!(none, Err(SetupError::GoalkeeperCount(0)));
    }

    #[test]
    fn test_outfield_player_can_be_deployed_in_goal() {
        let roster = roster();
        let sheet = (2..=11)
            .fold(TeamSheet::builder("Emergency"), |b, id| b.starter(id))
            .starter_at(13, Position::GK)
            .build(&roster)
            .unwrap();
        assert_eq!(sheet.assigned_position(13), Some(Position::GK));
    }

    #[test]
    fn test_rejects_duplicates_unknown_and_bad_captain() {
        let roster = roster();
        let dup = eleven(TeamSheet::builder("Dup")).bench(5).build(&roster);
        assert_eq!(dup, Err(SetupError::DuplicatePlayer(5)));

        let unknown = eleven(TeamSheet::builder("Unknown")).bench(99).build(&roster);
        assert_eq!(unknown, Err(SetupError::UnknownPlayer(99)));

        let captain = eleven(TeamSheet::builder("Cap")).bench(12).captain(12).build(&roster);
        assert_eq!(captain, Err(SetupError::CaptainNotStarting(12)));
    }

    #[test]
    fn test_rejects_oversized_bench() {
        let mut roster = roster();
        for id in 14..=23 {
            roster.insert(id, Player::new(id, format!("B{id}"), 22, Position::MID, 60));
        }
        let sheet = eleven(TeamSheet::builder("Bench")).bench_players(14..=23).build(&roster);
        assert_eq!(sheet, Err(SetupError::BenchTooLarge { max: 9, found: 10 }));
    }

    #[test]
    fn test_substitution_transfers_slot_and_assignment() {
        let roster = roster();
        let mut sheet = eleven(TeamSheet::builder("Home")).bench(13).build(&roster).unwrap();

        assert_eq!(sheet.apply_substitution(10, 13), Some(Position::FWD));
        assert_eq!(sheet.starting_eleven()[9], 13);
        assert_eq!(sheet.assigned_position(13), Some(Position::FWD));
        assert_eq!(sheet.assigned_position(10), None);
        assert!(sheet.bench().is_empty());
        assert!(sheet.validate(&roster).is_ok());

        // 10 is gone for good, 13 is no longer on the bench
        assert_eq!(sheet.apply_substitution(13, 10), None);
        assert_eq!(sheet.apply_substitution(2, 13), None);
    }
}
