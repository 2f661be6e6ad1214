//! Test Fixtures Module
//!
//! Centralized test helper functions for MatchEngine tests.
//!
//! ## Usage
//! ```ignore
//! use crate::engine::match_sim::test_fixtures::*;
//! ```

use super::MatchEngine;
use crate::data::generator::{demo_sheet, demo_squad};
use crate::engine::config::EngineConfig;
use crate::models::{MatchSetup, PlayerId, Position, TeamSide};

/// Home ids start here, away ids at `AWAY_BASE_ID`.
pub const HOME_BASE_ID: PlayerId = 1;
pub const AWAY_BASE_ID: PlayerId = 101;

/// 4-4-2 vs 4-4-2 with full benches, every player at the given skill.
/// Home side has home advantage.
pub fn create_test_setup(home_skill: u8, away_skill: u8) -> MatchSetup {
    let home = demo_squad(HOME_BASE_ID, home_skill, 20);
    let away = demo_squad(AWAY_BASE_ID, away_skill, 20);
    let home_sheet = demo_sheet("Home FC", &home).unwrap();
    let away_sheet = demo_sheet("Away United", &away).unwrap();
    MatchSetup::new(home_sheet, away_sheet, home.into_iter().chain(away)).unwrap()
}

pub fn create_test_engine(home_skill: u8, away_skill: u8, seed: u64) -> MatchEngine {
    MatchEngine::new(create_test_setup(home_skill, away_skill), EngineConfig::default(), seed).unwrap()
}

/// First bench player whose natural position is `position`.
pub fn bench_player_at(engine: &MatchEngine, side: TeamSide, position: Position) -> PlayerId {
    let setup = engine.setup();
    setup
        .sheet(side)
        .bench()
        .iter()
        .copied()
        .find(|id| setup.player(*id).map(|p| p.position_main) == Some(position))
        .unwrap()
}
