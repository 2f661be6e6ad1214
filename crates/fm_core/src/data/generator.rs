//! Squad Generator
//!
//! `demo_*` helpers build fully deterministic squads (every player at the same
//! skill, neutral condition) so tests and the CLI have a stable baseline.
//! `generate_squad` draws a varied squad from an injected generator.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SetupError;
use crate::models::{
    ConditionArrow, MatchSetup, Player, PlayerId, Position, Roster, TeamSheet, MAX_BENCH, STARTING_ELEVEN,
};
use crate::player::valuation::ValuationConfig;

/// Starting eleven in sheet order: GK, 4 DEF, 4 MID, 2 FWD.
pub const FORMATION_442: [Position; STARTING_ELEVEN] = [
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
];

/// Bench cover, cycled when the squad is larger than eleven.
const BENCH_ORDER: [Position; MAX_BENCH] = [
    Position::GK,
    Position::DEF,
    Position::MID,
    Position::FWD,
    Position::DEF,
    Position::MID,
    Position::FWD,
    Position::DEF,
    Position::MID,
];

const FIRST_NAMES: [&str; 16] = [
    "Alex", "Ben", "Carlos", "Daniel", "Erik", "Felix", "Gabriel", "Hugo", "Ivan", "Jonas",
    "Kai", "Luca", "Marco", "Nico", "Oscar", "Pedro",
];

const LAST_NAMES: [&str; 16] = [
    "Andersen", "Baker", "Costa", "Diaz", "Evans", "Fischer", "Garcia", "Hansen", "Ito", "Jensen",
    "Kim", "Lopez", "Moreau", "Novak", "Okafor", "Park",
];

const NATIONALITIES: [&str; 8] = ["ENG", "ESP", "GER", "FRA", "ITA", "BRA", "KOR", "NED"];

fn squad_position(index: usize) -> Position {
    if index < STARTING_ELEVEN {
        FORMATION_442[index]
    } else {
        BENCH_ORDER[(index - STARTING_ELEVEN) % BENCH_ORDER.len()]
    }
}

/// `size` players with consecutive ids from `base_id`, all 25 years old at
/// `skill`, condition MID. The first eleven fill a 4-4-2.
pub fn demo_squad(base_id: PlayerId, skill: u8, size: usize) -> Vec<Player> {
    (0..size)
        .map(|i| {
            let id = base_id + i as PlayerId;
            Player::new(id, format!("Player {}", id), 25, squad_position(i), skill)
        })
        .collect()
}

/// First eleven start in their natural positions, the next (up to nine) sit
/// on the bench. Fails if fewer than eleven players are given.
pub fn demo_sheet(name: &str, players: &[Player]) -> Result<TeamSheet, SetupError> {
    let roster: Roster = players.iter().map(|p| (p.id, p.clone())).collect();
    let mut builder = TeamSheet::builder(name);
    for p in players.iter().take(STARTING_ELEVEN) {
        builder = builder.starter(p.id);
    }
    builder = builder.bench_players(
        players.iter().skip(STARTING_ELEVEN).take(MAX_BENCH).map(|p| p.id),
    );
    builder.build(&roster)
}

/// Full demo fixture: two 20-player squads, home advantage for the home side.
pub fn demo_match(home_skill: u8, away_skill: u8) -> Result<MatchSetup, SetupError> {
    let home = demo_squad(1, home_skill, 20);
    let away = demo_squad(101, away_skill, 20);
    let home_sheet = demo_sheet("Home FC", &home)?;
    let away_sheet = demo_sheet("Away United", &away)?;
    MatchSetup::new(home_sheet, away_sheet, home.into_iter().chain(away))
}

/// Varied squad: ages 17..=34, skill 45..=85, youth with headroom above their
/// skill, some alternative positions and chemistry pairs. Market value and
/// wage are filled in from `valuation`.
pub fn generate_squad<R: Rng + ?Sized>(
    base_id: PlayerId,
    size: usize,
    valuation: &ValuationConfig,
    rng: &mut R,
) -> Vec<Player> {
    let mut squad: Vec<Player> = (0..size)
        .map(|i| {
            let id = base_id + i as PlayerId;
            let position = squad_position(i);
            let age: u8 = rng.gen_range(17..=34);
            let skill: u8 = rng.gen_range(45..=85);
            let headroom: u8 = if age <= 23 { rng.gen_range(5..=25) } else { rng.gen_range(0..=3) };
            let name = format!(
                "{} {}",
                FIRST_NAMES.choose(rng).copied().unwrap_or("Sam"),
                LAST_NAMES.choose(rng).copied().unwrap_or("Smith"),
            );

            let mut player = Player::new(id, name, age, position, skill)
                .with_potential(skill.saturating_add(headroom))
                .with_nationality(NATIONALITIES.choose(rng).copied().unwrap_or("ENG"));

            // 다재다능 선수 (30%)
            if !position.is_goalkeeper() && rng.gen_bool(0.3) {
                let alt = match position {
                    Position::DEF | Position::FWD => Position::MID,
                    _ => {
                        if rng.gen_bool(0.5) {
                            Position::DEF
                        } else {
                            Position::FWD
                        }
                    }
                };
                player = player.with_alt_positions([alt]);
            }
            player.condition = ConditionArrow::from_index(rng.gen_range(0..5))
                .unwrap_or_default();
            player
        })
        .collect();

    // 케미스트리: 인접한 필드 플레이어 쌍
    let outfield: Vec<PlayerId> =
        squad.iter().filter(|p| !p.position_main.is_goalkeeper()).map(|p| p.id).collect();
    for pair in outfield.chunks(2) {
        if let [a, b] = pair {
            if rng.gen_bool(0.25) {
                for p in squad.iter_mut() {
                    if p.id == *a {
                        p.chemistry_partners.push(*b);
                    } else if p.id == *b {
                        p.chemistry_partners.push(*a);
                    }
                }
            }
        }
    }

    for p in squad.iter_mut() {
        valuation.revalue(p);
    }
    squad
}
