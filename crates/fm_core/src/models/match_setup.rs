use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::player::{Player, PlayerId, Roster};
use super::team_sheet::TeamSheet;
use crate::error::SetupError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    pub fn opponent(&self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Index into `[home, away]` pairs.
    pub fn index(&self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }
}

/// Per-side modifiers that are not part of the sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TeamContext {
    /// Apply the home-advantage multiplier
    pub home_advantage: bool,
    /// Squad morale 0..=100, 50 is neutral
    pub morale: u8,
}

impl TeamContext {
    pub const NEUTRAL_MORALE: u8 = 50;

    pub fn home() -> Self {
        Self { home_advantage: true, morale: Self::NEUTRAL_MORALE }
    }

    pub fn away() -> Self {
        Self { home_advantage: false, morale: Self::NEUTRAL_MORALE }
    }

    pub fn with_morale(mut self, morale: u8) -> Self {
        self.morale = morale.min(100);
        self
    }
}

/// Everything the engine needs to kick off: both sheets, their context and
/// a snapshot of the player records involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSetup {
    pub home: TeamSheet,
    pub away: TeamSheet,
    pub home_context: TeamContext,
    pub away_context: TeamContext,
    roster: Roster,
}

impl MatchSetup {
    /// Validate both sheets against the given players. Only the players that
    /// appear on either sheet are kept in the snapshot.
    pub fn new(
        home: TeamSheet,
        away: TeamSheet,
        players: impl IntoIterator<Item = Player>,
    ) -> Result<Self, SetupError> {
        let wanted: HashSet<PlayerId> = home.all_players().chain(away.all_players()).collect();
        let roster: Roster = players
            .into_iter()
            .filter(|p| wanted.contains(&p.id))
            .map(|p| (p.id, p))
            .collect();

        home.validate(&roster)?;
        away.validate(&roster)?;

        let home_ids: HashSet<PlayerId> = home.all_players().collect();
        if let Some(shared) = away.all_players().find(|id| home_ids.contains(id)) {
            return Err(SetupError::SharedPlayer(shared));
        }

        Ok(Self {
            home,
            away,
            home_context: TeamContext::home(),
            away_context: TeamContext::away(),
            roster,
        })
    }

    /// No home advantage for either side.
    pub fn neutral_venue(mut self) -> Self {
        self.home_context.home_advantage = false;
        self.away_context.home_advantage = false;
        self
    }

    pub fn with_morale(mut self, home: u8, away: u8) -> Self {
        self.home_context = self.home_context.with_morale(home);
        self.away_context = self.away_context.with_morale(away);
        self
    }

    pub fn sheet(&self, side: TeamSide) -> &TeamSheet {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub(crate) fn sheet_mut(&mut self, side: TeamSide) -> &mut TeamSheet {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn context(&self, side: TeamSide) -> TeamContext {
        match side {
            TeamSide::Home => self.home_context,
            TeamSide::Away => self.away_context,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.get(&id)
    }

    /// Which side a player belongs to.
    pub fn side_of(&self, id: PlayerId) -> Option<TeamSide> {
        if self.home.all_players().any(|p| p == id) {
            Some(TeamSide::Home)
        } else if self.away.all_players().any(|p| p == id) {
            Some(TeamSide::Away)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::{demo_squad, demo_sheet};

    #[test]
    fn test_setup_keeps_only_listed_players() {
        let mut home_players = demo_squad(1, 70, 11);
        let away_players = demo_squad(100, 70, 12);
        let home = demo_sheet("Home", &home_players).unwrap();
        let away = demo_sheet("Away", &away_players).unwrap();

        home_players.push(Player::new(999, "Unlisted", 30, crate::models::Position::MID, 50));
        let setup =
            MatchSetup::new(home, away, home_players.into_iter().chain(away_players)).unwrap();

        assert!(setup.player(999).is_none());
        assert_eq!(setup.side_of(1), Some(TeamSide::Home));
        assert_eq!(setup.side_of(100), Some(TeamSide::Away));
        assert!(setup.home_context.home_advantage);
        assert!(!setup.away_context.home_advantage);
    }

    #[test]
    fn test_rejects_player_on_both_sheets() {
        let players = demo_squad(1, 70, 11);
        let home = demo_sheet("Home", &players).unwrap();
        let away = demo_sheet("Mirror", &players).unwrap();
        let err = MatchSetup::new(home, away, players).unwrap_err();
        assert!(matches!(err, SetupError::SharedPlayer(_)));
    }

    #[test]
    fn test_neutral_venue_and_morale() {
        let h = demo_squad(1, 70, 11);
        let a = demo_squad(100, 70, 11);
        let setup = MatchSetup::new(
            demo_sheet("H", &h).unwrap(),
            demo_sheet("A", &a).unwrap(),
            h.into_iter().chain(a),
        )
        .unwrap()
        .neutral_venue()
        .with_morale(80, 140);

        assert!(!setup.context(TeamSide::Home).home_advantage);
        assert_eq!(setup.context(TeamSide::Home).morale, 80);
        assert_eq!(setup.context(TeamSide::Away).morale, 100);
    }
}
