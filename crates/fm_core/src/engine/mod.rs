pub mod config; // Tuning configuration (presets, YAML)
pub mod live_match; // Interactive controller over MatchEngine
pub mod match_sim;
pub mod probability;
pub mod simulcast; // Many live matches in lockstep
pub mod team_power;

pub use config::EngineConfig;
pub use live_match::{LiveMatchController, LivePhase, MatchSpeed};
pub use match_sim::{simulate_match, MatchEngine, MatchState, TickReport};
pub use simulcast::{ScoreboardLine, SimulcastCoordinator};
pub use team_power::{TeamPower, TeamPowerCalculator, MIN_POWER_DENOMINATOR};
