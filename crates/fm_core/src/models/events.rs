use serde::{Deserialize, Serialize};

use super::match_setup::TeamSide;
use super::player::PlayerId;

/// Immutable, minute-stamped match fact. The event log is append-only and is
/// the authoritative match history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub side: TeamSide,
    /// Acting player (scorer, carded player, incoming substitute, ...)
    pub player_id: PlayerId,
    /// Assister for goals, outgoing player for substitutions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_player_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injury_weeks: Option<u8>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Goal,
    Yellow,
    Red,
    Substitution,
    Injury,
    /// Goal roll that narrowly failed
    Chance,
}

impl MatchEvent {
    pub fn goal(minute: u8, side: TeamSide, scorer: PlayerId, assist: Option<PlayerId>) -> Self {
        Self {
            minute,
            event_type: EventType::Goal,
            side,
            player_id: scorer,
            secondary_player_id: assist,
            injury_weeks: None,
        }
    }

    pub fn chance(minute: u8, side: TeamSide, shooter: PlayerId) -> Self {
        Self::simple(minute, EventType::Chance, side, shooter)
    }

    pub fn yellow(minute: u8, side: TeamSide, player: PlayerId) -> Self {
        Self::simple(minute, EventType::Yellow, side, player)
    }

    pub fn red(minute: u8, side: TeamSide, player: PlayerId) -> Self {
        Self::simple(minute, EventType::Red, side, player)
    }

    pub fn injury(minute: u8, side: TeamSide, player: PlayerId, weeks: u8) -> Self {
        Self { injury_weeks: Some(weeks), ..Self::simple(minute, EventType::Injury, side, player) }
    }

    pub fn substitution(minute: u8, side: TeamSide, player_in: PlayerId, player_out: PlayerId) -> Self {
        Self {
            secondary_player_id: Some(player_out),
            ..Self::simple(minute, EventType::Substitution, side, player_in)
        }
    }

    fn simple(minute: u8, event_type: EventType, side: TeamSide, player_id: PlayerId) -> Self {
        Self { minute, event_type, side, player_id, secondary_player_id: None, injury_weeks: None }
    }

    pub fn is_goal(&self) -> bool {
        self.event_type == EventType::Goal
    }

    pub fn is_card(&self) -> bool {
        matches!(self.event_type, EventType::Yellow | EventType::Red)
    }

    /// Short timeline label, e.g. `67' GOAL (home) #9`.
    pub fn describe(&self) -> String {
        let side = match self.side {
            TeamSide::Home => "home",
            TeamSide::Away => "away",
        };
        let mut line = format!("{}' {:?} ({}) #{}", self.minute, self.event_type, side, self.player_id);
        match (self.event_type, self.secondary_player_id, self.injury_weeks) {
            (EventType::Goal, Some(assist), _) => line.push_str(&format!(" assist #{assist}")),
            (EventType::Substitution, Some(out), _) => line.push_str(&format!(" for #{out}")),
            (EventType::Injury, _, Some(weeks)) => line.push_str(&format!(" out {weeks}w")),
            _ => {}
        }
        line
    }
}
