pub mod events;
pub mod match_result;
pub mod match_setup;
pub mod player;
pub mod team_sheet;

pub use events::{EventType, MatchEvent};
pub use match_result::{MatchResult, MatchStatus, PlayerMatchStats, Score};
pub use match_setup::{MatchSetup, TeamContext, TeamSide};
pub use player::{
    clamp_skill, ConditionArrow, Player, PlayerId, Position, Roster, SeasonStats, SKILL_MAX,
    SKILL_MIN,
};
pub use team_sheet::{TeamSheet, TeamSheetBuilder, MAX_BENCH, STARTING_ELEVEN};
