//! Effective Skill Model
//!
//! Converts a player's stored `skill_base` into the number used by power
//! aggregation and in-match selection:
//!
//! ```text
//! effective = round2(skill_base × fit × (1 + form) × (1 + chemistry))
//! ```
//!
//! - fit: NATURAL / ALT / ADJACENT / INVALID multiplier (`SkillModelConfig`)
//! - form: signed fraction per condition arrow (`FormTable`)
//! - chemistry: flat bonus when any partner is on the pitch (boolean gate)
//!
//! No clamp is applied after composition; effective skill may exceed 99.

use serde::{Deserialize, Serialize};

use crate::engine::config::SkillModelConfig;
use crate::models::{Player, PlayerId, Position};

/// How well an assigned position matches a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionFit {
    Natural,
    Alt,
    Adjacent,
    Invalid,
}

impl PositionFit {
    pub fn multiplier(&self, config: &SkillModelConfig) -> f64 {
        match self {
            PositionFit::Natural => config.natural,
            PositionFit::Alt => config.alternative,
            PositionFit::Adjacent => config.adjacent,
            PositionFit::Invalid => config.invalid,
        }
    }

    /// UI badge text
    pub fn badge(&self) -> &'static str {
        match self {
            PositionFit::Natural => "●",
            PositionFit::Alt => "◐",
            PositionFit::Adjacent => "○",
            PositionFit::Invalid => "✕",
        }
    }
}

/// Position-fit classification, evaluated in priority order
/// (main → alternatives → adjacent line → invalid).
pub fn position_fit(player: &Player, position: Position) -> PositionFit {
    if player.position_main == position {
        PositionFit::Natural
    } else if player.position_alt.contains(&position) {
        PositionFit::Alt
    } else if player.position_main.is_adjacent(position) {
        PositionFit::Adjacent
    } else {
        PositionFit::Invalid
    }
}

/// True if any chemistry partner is among `teammates`.
pub fn has_chemistry(player: &Player, teammates: &[PlayerId]) -> bool {
    player.chemistry_partners.iter().any(|partner| *partner != player.id && teammates.contains(partner))
}

/// Effective skill for `player` deployed at `position` alongside `teammates`.
pub fn effective_skill(
    player: &Player,
    position: Position,
    teammates: &[PlayerId],
    config: &SkillModelConfig,
) -> f64 {
    let fit = position_fit(player, position).multiplier(config);
    let form = config.form.modifier(player.condition);
    let chemistry = if has_chemistry(player, teammates) { config.chemistry_bonus } else { 0.0 };

    round_to(player.skill_base as f64 * fit * (1.0 + form) * (1.0 + chemistry), 2)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
