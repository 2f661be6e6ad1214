use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::SetupError;

pub type PlayerId = u32;

/// Player records available to a match, keyed by id.
pub type Roster = HashMap<PlayerId, Player>;

pub const SKILL_MIN: u8 = 1;
pub const SKILL_MAX: u8 = 99;

/// Persistent player record.
///
/// `skill_base` is the only ability attribute. Everything the engine uses
/// (effective skill, team power, selection weights) is derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub nationality: String,
    pub skill_base: u8,
    /// Hidden ceiling for development
    pub potential: u8,
    pub position_main: Position,
    #[serde(default)]
    pub position_alt: Vec<Position>,
    #[serde(default)]
    pub condition: ConditionArrow,
    #[serde(default)]
    pub season_stats: SeasonStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injured_until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended_until: Option<NaiveDate>,
    #[serde(default)]
    pub chemistry_partners: Vec<PlayerId>,
    #[serde(default)]
    pub market_value: u64,
    /// Weekly wage
    #[serde(default)]
    pub wage: u64,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, age: u8, position: Position, skill: u8) -> Self {
        let skill = clamp_skill(skill as i32);
        Self {
            id,
            name: name.into(),
            age,
            nationality: String::new(),
            skill_base: skill,
            potential: skill,
            position_main: position,
            position_alt: Vec::new(),
            condition: ConditionArrow::Mid,
            season_stats: SeasonStats::default(),
            injured_until: None,
            suspended_until: None,
            chemistry_partners: Vec::new(),
            market_value: 0,
            wage: 0,
        }
    }

    pub fn with_potential(mut self, potential: u8) -> Self {
        self.potential = clamp_skill(potential as i32);
        self
    }

    pub fn with_alt_positions(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.position_alt = positions.into_iter().collect();
        self
    }

    pub fn with_condition(mut self, condition: ConditionArrow) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_partners(mut self, partners: impl IntoIterator<Item = PlayerId>) -> Self {
        self.chemistry_partners = partners.into_iter().collect();
        self
    }

    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = nationality.into();
        self
    }

    /// Fail fast on records the engine must never see.
    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |reason: String| SetupError::InvalidPlayer { id: self.id, reason };

        if self.name.trim().is_empty() {
            return Err(invalid("empty name".to_string()));
        }
        if !(SKILL_MIN..=SKILL_MAX).contains(&self.skill_base) {
            return Err(invalid(format!("skill_base {} outside 1..=99", self.skill_base)));
        }
        if !(SKILL_MIN..=SKILL_MAX).contains(&self.potential) {
            return Err(invalid(format!("potential {} outside 1..=99", self.potential)));
        }
        if self.position_alt.contains(&self.position_main) {
            return Err(invalid("main position repeated in alternatives".to_string()));
        }
        Ok(())
    }

    /// Not injured and not suspended on `date`.
    pub fn is_available(&self, date: NaiveDate) -> bool {
        let injured = self.injured_until.is_some_and(|until| date < until);
        let suspended = self.suspended_until.is_some_and(|until| date < until);
        !injured && !suspended
    }

    pub fn set_skill(&mut self, skill: i32) {
        self.skill_base = clamp_skill(skill);
    }
}

/// Clamp any intermediate skill value to the canonical 1..=99 band.
pub fn clamp_skill(value: i32) -> u8 {
    value.clamp(SKILL_MIN as i32, SKILL_MAX as i32) as u8
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    DEF,
    MID,
    FWD,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::GK, Position::DEF, Position::MID, Position::FWD];

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    /// Line graph DEF-MID-FWD. The goalkeeper has no neighbours.
    pub fn is_adjacent(&self, other: Position) -> bool {
        matches!(
            (self, other),
            (Position::DEF, Position::MID)
                | (Position::MID, Position::DEF)
                | (Position::MID, Position::FWD)
                | (Position::FWD, Position::MID)
        )
    }

    pub fn contributes_to_attack(&self) -> bool {
        matches!(self, Position::MID | Position::FWD)
    }

    /// MID counts for both attack and defense.
    pub fn contributes_to_defense(&self) -> bool {
        matches!(self, Position::GK | Position::DEF | Position::MID)
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DEF => "DEF",
            Position::MID => "MID",
            Position::FWD => "FWD",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// 5단계 컨디션 화살표 (short-term form)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionArrow {
    Up,
    SlightUp,
    #[default]
    Mid,
    SlightDown,
    Down,
}

impl ConditionArrow {
    /// Chain order, best form first.
    pub const CHAIN: [ConditionArrow; 5] = [
        ConditionArrow::Up,
        ConditionArrow::SlightUp,
        ConditionArrow::Mid,
        ConditionArrow::SlightDown,
        ConditionArrow::Down,
    ];

    pub fn index(&self) -> usize {
        match self {
            ConditionArrow::Up => 0,
            ConditionArrow::SlightUp => 1,
            ConditionArrow::Mid => 2,
            ConditionArrow::SlightDown => 3,
            ConditionArrow::Down => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::CHAIN.get(index).copied()
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            ConditionArrow::Up => "↑",
            ConditionArrow::SlightUp => "↗",
            ConditionArrow::Mid => "→",
            ConditionArrow::SlightDown => "↘",
            ConditionArrow::Down => "↓",
        }
    }
}

/// Season-cumulative statistics. Reset at every season boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeasonStats {
    pub appearances: u16,
    pub minutes: u32,
    pub goals: u16,
    pub assists: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
    pub clean_sheets: u16,
    /// Running mean of match ratings
    pub average_rating: f32,
}

impl SeasonStats {
    pub fn record_rating(&mut self, rating: f32) {
        // appearances already includes this match
        let n = self.appearances.max(1) as f32;
        self.average_rating += (rating - self.average_rating) / n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_adjacency_is_symmetric_and_excludes_gk() {
        for a in Position::iter() {
            for b in Position::iter() {
                assert_eq!(a.is_adjacent(b), b.is_adjacent(a), "{a} / {b}");
            }
            assert!(!Position::GK.is_adjacent(a));
        }
        assert!(Position::DEF.is_adjacent(Position::MID));
        assert!(!Position::DEF.is_adjacent(Position::FWD));
    }

    #[test]
    fn test_condition_chain_index_roundtrip() {
        for c in ConditionArrow::iter() {
            assert_eq!(ConditionArrow::from_index(c.index()), Some(c));
        }
        assert_eq!(ConditionArrow::from_index(5), None);
    }

    #[test]
    fn test_validate_rejects_bad_records() {
        let ok = Player::new(1, "Kim", 24, Position::MID, 70);
        assert!(ok.validate().is_ok());

        let mut no_name = ok.clone();
        no_name.name = "  ".into();
        assert!(no_name.validate().is_err());

        let mut zero_skill = ok.clone();
        zero_skill.skill_base = 0;
        assert!(matches!(zero_skill.validate(), Err(SetupError::InvalidPlayer { id: 1, .. })));

        let dup_alt = ok.with_alt_positions([Position::MID]);
        assert!(dup_alt.validate().is_err());
    }

    #[test]
    fn test_constructor_clamps_skill() {
        let p = Player::new(2, "Lee", 20, Position::FWD, 120).with_potential(0);
        assert_eq!(p.skill_base, 99);
        assert_eq!(p.potential, 1);
    }

    #[test]
    fn test_availability_window() {
        let mut p = Player::new(3, "Park", 27, Position::DEF, 65);
        let d = |day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        p.injured_until = Some(d(10));
        assert!(!p.is_available(d(9)));
        assert!(p.is_available(d(10)));

        p.suspended_until = Some(d(15));
        assert!(!p.is_available(d(12)));
    }

    #[test]
    fn test_running_average_rating() {
        let mut stats = SeasonStats::default();
        stats.appearances = 1;
        stats.record_rating(7.0);
        stats.appearances = 2;
        stats.record_rating(6.0);
        assert!((stats.average_rating - 6.5).abs() < 1e-6);
    }
}
