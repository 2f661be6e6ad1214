//! Team Power Calculator
//!
//! Aggregates a starting eleven into two scalars per side.
//!
//! ```text
//! attack  = avg(effective skill of MID/FWD)      × tactic.attack
//! defense = avg(effective skill of GK/DEF/MID)   × tactic.defense
//! both    × (1 + home_advantage) if home × (1 + (morale - 50) / 500)
//! ```
//!
//! Rounded to one decimal. Pure: callers recompute after every substitution
//! or tactic change instead of caching.

use serde::{Deserialize, Serialize};

use super::config::{PowerConfig, SkillModelConfig};
use crate::models::{PlayerId, Roster, TeamContext, TeamSheet};
use crate::player::skill_model::{effective_skill, round_to};

/// Smallest defense value used as a divisor.
pub const MIN_POWER_DENOMINATOR: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamPower {
    pub attack: f64,
    pub defense: f64,
    /// Tactic goal-chance multiplier, carried for the engine
    pub goal_chance_modifier: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TeamPowerCalculator {
    pub skill: SkillModelConfig,
    pub power: PowerConfig,
}

impl TeamPowerCalculator {
    pub fn new(skill: SkillModelConfig, power: PowerConfig) -> Self {
        Self { skill, power }
    }

    pub fn calculate(&self, sheet: &TeamSheet, roster: &Roster, context: TeamContext) -> TeamPower {
        let teammates: Vec<PlayerId> = sheet.starting_eleven().to_vec();

        let mut attack = Vec::with_capacity(11);
        let mut defense = Vec::with_capacity(11);
        for (id, position) in sheet.lineup() {
            let Some(player) = roster.get(&id) else {
                continue;
            };
            let eff = effective_skill(player, position, &teammates, &self.skill);
            if position.contributes_to_attack() {
                attack.push(eff);
            }
            if position.contributes_to_defense() {
                defense.push(eff);
            }
        }

        let modifiers = self.power.tactics.get(sheet.tactic());
        let venue = if context.home_advantage { 1.0 + self.power.home_advantage } else { 1.0 };
        let morale = self.morale_multiplier(context.morale);

        TeamPower {
            attack: round_to(average(&attack) * modifiers.attack * venue * morale, 1),
            defense: round_to(average(&defense) * modifiers.defense * venue * morale, 1),
            goal_chance_modifier: modifiers.goal_chance,
        }
    }

    pub fn morale_multiplier(&self, morale: u8) -> f64 {
        1.0 + (morale as f64 - self.power.morale_neutral) / self.power.morale_divisor.max(f64::EPSILON)
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
