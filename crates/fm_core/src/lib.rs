//! # fm_core - Probabilistic Football Match Engine
//!
//! Tick-based match simulation driven by a single skill number per player,
//! plus the weekly/seasonal player development model around it.
//!
//! ## Features
//! - Reproducible simulation (same seed + same setup = same event log)
//! - Batch mode (1-minute ticks) and live mode with speed control
//! - Mid-match substitutions and tactic changes
//! - Condition arrows, growth/decline, retirement, market value
//! - JSON API and YAML-tunable engine configuration

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

pub mod api;
pub mod calibration;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod player;
pub mod tactics;

// Re-export main API functions
pub use api::{simulate_match_json, MatchRequest, MatchResponse};
pub use error::{CoreError, Result, SetupError};

// Re-export engine types
pub use engine::{
    simulate_match, EngineConfig, LiveMatchController, LivePhase, MatchEngine, MatchSpeed,
    SimulcastCoordinator, TeamPower, TeamPowerCalculator, TickReport,
};

// Re-export data model
pub use models::{
    ConditionArrow, EventType, MatchEvent, MatchResult, MatchSetup, MatchStatus, Player,
    PlayerId, Position, Score, TeamSheet, TeamSide,
};

// Re-export player system types
pub use player::{
    apply_match_result, effective_skill, DevelopmentConfig, DevelopmentProcessor, SeasonReport,
    ValuationConfig,
};

pub use calibration::{sample_goal_rate, GoalRateSample};
pub use tactics::Tactic;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
