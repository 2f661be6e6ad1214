//! Goal Model Configuration

use serde::{Deserialize, Serialize};

use crate::models::Position;

/// Shape of the goal-likelihood curve over the 90 minutes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MinuteCurve {
    /// Same likelihood every minute
    Flat,
    /// Quiet opening, pressure before half-time, open final quarter-hour
    #[default]
    Realistic,
}

/// Relative selection weight per deployed position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PositionWeights {
    pub gk: f64,
    pub def: f64,
    pub mid: f64,
    pub fwd: f64,
}

impl PositionWeights {
    pub const fn new(gk: f64, def: f64, mid: f64, fwd: f64) -> Self {
        Self { gk, def, mid, fwd }
    }

    pub fn get(&self, position: Position) -> f64 {
        match position {
            Position::GK => self.gk,
            Position::DEF => self.def,
            Position::MID => self.mid,
            Position::FWD => self.fwd,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        let all = [self.gk, self.def, self.mid, self.fwd];
        all.iter().all(|w| w.is_finite() && *w >= 0.0) && all.iter().sum::<f64>() > 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalConfig {
    /// Base goal likelihood per team per minute at equal strength (기본: 0.0135)
    pub rate_per_minute: f64,
    /// How strongly the relative attack/defense edge moves the rate (기본: 1.5)
    pub strength_sensitivity: f64,
    /// Floor/ceiling of the strength factor
    pub min_strength_factor: f64,
    pub max_strength_factor: f64,
    /// Per-minute clamp band (기본: 0.5% ~ 10%)
    pub min_chance: f64,
    pub max_chance: f64,
    #[serde(default)]
    pub curve: MinuteCurve,
    /// Extra push per goal of deficit, 0 disables (기본: 0.08)
    pub trailing_push_per_goal: f64,
    /// Cap on the trailing multiplier (기본: 1.3)
    pub trailing_push_cap: f64,
    /// Probability that a goal has an assister (기본: 0.68)
    pub assist_probability: f64,
    /// Failed roll below `chance * factor` records a CHANCE event, <= 1 disables (기본: 1.8)
    pub near_miss_factor: f64,
    pub scorer_weights: PositionWeights,
    pub assister_weights: PositionWeights,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            rate_per_minute: 0.0135,
            strength_sensitivity: 1.5,
            min_strength_factor: 0.25,
            max_strength_factor: 3.0,
            min_chance: 0.005,
            max_chance: 0.10,
            curve: MinuteCurve::Realistic,
            trailing_push_per_goal: 0.08,
            trailing_push_cap: 1.3,
            assist_probability: 0.68,
            near_miss_factor: 1.8,
            scorer_weights: PositionWeights::new(0.05, 0.8, 3.0, 6.0),
            assister_weights: PositionWeights::new(0.2, 1.5, 4.0, 2.0),
        }
    }
}
