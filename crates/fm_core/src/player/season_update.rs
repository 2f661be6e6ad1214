//! Season-stats updater
//!
//! Folds a finished `MatchResult` into the persistent player records:
//! appearances, minutes, goals, assists, cards, clean sheets, running average
//! rating, and injury/suspension end dates.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{MatchResult, Player, Position};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonUpdateConfig {
    /// Suspension length after a red card (기본: 7일 = 1경기)
    pub red_card_ban_days: u64,
    /// Days per injury week (기본: 7)
    pub days_per_injury_week: u64,
}

impl Default for SeasonUpdateConfig {
    fn default() -> Self {
        Self { red_card_ban_days: 7, days_per_injury_week: 7 }
    }
}

/// Apply `result` (played on `match_date`) to `players`. Players not listed
/// in the result are untouched. Returns how many records were updated.
pub fn apply_match_result(
    players: &mut [Player],
    result: &MatchResult,
    match_date: NaiveDate,
    config: &SeasonUpdateConfig,
) -> usize {
    let mut updated = 0;

    for player in players.iter_mut() {
        let Some(line) = result.player_stats.get(&player.id) else {
            continue;
        };
        if line.minutes == 0 && line.goals == 0 && line.yellow_cards == 0 && !line.red_card {
            // named on the sheet, never took part
            continue;
        }

        let stats = &mut player.season_stats;
        stats.appearances = stats.appearances.saturating_add(1);
        stats.minutes = stats.minutes.saturating_add(line.minutes as u32);
        stats.goals = stats.goals.saturating_add(line.goals as u16);
        stats.assists = stats.assists.saturating_add(line.assists as u16);
        stats.yellow_cards = stats.yellow_cards.saturating_add(line.yellow_cards as u16);
        if line.red_card {
            stats.red_cards = stats.red_cards.saturating_add(1);
        }

        let conceded = result.score.get(line.side.opponent());
        let keeps_sheet = matches!(player.position_main, Position::GK | Position::DEF);
        if keeps_sheet && conceded == 0 && line.minutes > 0 {
            stats.clean_sheets = stats.clean_sheets.saturating_add(1);
        }
        stats.record_rating(line.rating);

        if let Some(weeks) = line.injury_weeks {
            let days = Days::new(weeks as u64 * config.days_per_injury_week);
            player.injured_until = match_date.checked_add_days(days);
            debug!("{} injured until {:?}", player.name, player.injured_until);
        }
        if line.red_card {
            player.suspended_until = match_date.checked_add_days(Days::new(config.red_card_ban_days));
        }
        updated += 1;
    }
    updated
}
