use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use super::events::MatchEvent;
use super::match_setup::TeamSide;
use super::player::PlayerId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Finished,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn get(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub(crate) fn add_goal(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home = self.home.saturating_add(1),
            TeamSide::Away => self.away = self.away.saturating_add(1),
        }
    }

    /// Goals this side is behind by (0 when level or ahead).
    pub fn deficit(&self, side: TeamSide) -> u8 {
        self.get(side.opponent()).saturating_sub(self.get(side))
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }

    pub fn winner(&self) -> Option<TeamSide> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(TeamSide::Home),
            std::cmp::Ordering::Less => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Per-player line for one match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerMatchStats {
    pub side: TeamSide,
    pub minutes: u16,
    pub goals: u8,
    pub assists: u8,
    pub chances: u8,
    pub yellow_cards: u8,
    pub red_card: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injury_weeks: Option<u8>,
    pub rating: f32,
}

impl PlayerMatchStats {
    pub fn new(side: TeamSide, baseline_rating: f32) -> Self {
        Self {
            side,
            minutes: 0,
            goals: 0,
            assists: 0,
            chances: 0,
            yellow_cards: 0,
            red_card: false,
            injury_weeks: None,
            rating: baseline_rating,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub home_team: String,
    pub away_team: String,
    pub status: MatchStatus,
    pub minute: u8,
    pub score: Score,
    pub events: Vec<MatchEvent>,
    /// Ordered by player id so serialization is stable
    pub player_stats: BTreeMap<PlayerId, PlayerMatchStats>,
}

impl MatchResult {
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn goals(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(|e| e.is_goal())
    }

    pub fn rating(&self, id: PlayerId) -> Option<f32> {
        self.player_stats.get(&id).map(|s| s.rating)
    }

    /// SHA-256 over the JSON event log, hex encoded. Two runs with the same
    /// seed and inputs must produce the same digest.
    pub fn event_log_digest(&self) -> String {
        let bytes = serde_json::to_vec(&self.events).unwrap_or_default();
        let digest = Sha256::digest(&bytes);
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }
}
