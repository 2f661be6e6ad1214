use thiserror::Error;

use crate::models::player::PlayerId;

/// Construction/validation failures.
///
/// These are raised before a match starts (team sheet building, match setup,
/// config loading). The tick loop itself never produces them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("Invalid team size: expected {expected} starters, found {found}")]
    InvalidTeamSize { expected: usize, found: usize },

    #[error("Bench too large: at most {max} substitutes, found {found}")]
    BenchTooLarge { max: usize, found: usize },

    #[error("Player {0} listed more than once")]
    DuplicatePlayer(PlayerId),

    #[error("Player {0} is assigned a position but is not in the starting eleven")]
    AssignmentOutsideEleven(PlayerId),

    #[error("Invalid formation: {0} goalkeepers assigned (expected 1)")]
    GoalkeeperCount(usize),

    #[error("Unknown player id: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Captain {0} is not in the starting eleven")]
    CaptainNotStarting(PlayerId),

    #[error("Player {0} appears in both team sheets")]
    SharedPlayer(PlayerId),

    #[error("Invalid player {id}: {reason}")]
    InvalidPlayer { id: PlayerId, reason: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },
}

impl CoreError {
    /// Setup errors come from bad input data; the rest are transport problems.
    pub fn is_setup_error(&self) -> bool {
        matches!(self, CoreError::Setup(_))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
