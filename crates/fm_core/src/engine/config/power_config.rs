//! Team Power Configuration

use serde::{Deserialize, Serialize};

use crate::tactics::TacticTable;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PowerConfig {
    /// Multiplier bonus for the home side, applied to attack and defense (기본: 0.10)
    pub home_advantage: f64,
    /// Morale value with no effect (기본: 50)
    pub morale_neutral: f64,
    /// `1 + (morale - neutral) / divisor` (기본: 500 → ±10 morale ≈ ±2%)
    pub morale_divisor: f64,
    #[serde(default)]
    pub tactics: TacticTable,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            home_advantage: 0.10,
            morale_neutral: 50.0,
            morale_divisor: 500.0,
            tactics: TacticTable::default(),
        }
    }
}
