//! Skill Model Configuration

use serde::{Deserialize, Serialize};

use crate::models::ConditionArrow;

/// 포지션 적합도 배수 + 폼/케미 보정
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillModelConfig {
    /// Deployed in main position (기본: 1.0)
    pub natural: f64,
    /// Deployed in one of the alternative positions (기본: 0.95)
    pub alternative: f64,
    /// Neighbouring line of the main position (기본: 0.75)
    pub adjacent: f64,
    /// Anything else (기본: 0.05)
    pub invalid: f64,
    pub form: FormTable,
    /// Flat bonus when at least one chemistry partner is on the pitch (기본: 0.05)
    pub chemistry_bonus: f64,
}

impl Default for SkillModelConfig {
    fn default() -> Self {
        Self {
            natural: 1.0,
            alternative: 0.95,
            adjacent: 0.75,
            invalid: 0.05,
            form: FormTable::default(),
            chemistry_bonus: 0.05,
        }
    }
}

/// Signed fraction per condition step (0.10 = +10%).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FormTable {
    pub up: f64,
    pub slight_up: f64,
    pub mid: f64,
    pub slight_down: f64,
    pub down: f64,
}

impl Default for FormTable {
    fn default() -> Self {
        Self { up: 0.10, slight_up: 0.05, mid: 0.0, slight_down: -0.05, down: -0.10 }
    }
}

impl FormTable {
    pub fn modifier(&self, condition: ConditionArrow) -> f64 {
        match condition {
            ConditionArrow::Up => self.up,
            ConditionArrow::SlightUp => self.slight_up,
            ConditionArrow::Mid => self.mid,
            ConditionArrow::SlightDown => self.slight_down,
            ConditionArrow::Down => self.down,
        }
    }

    /// UP >= SLIGHT_UP >= MID >= SLIGHT_DOWN >= DOWN, and no step at or below -100%.
    pub fn is_monotonic(&self) -> bool {
        self.up >= self.slight_up
            && self.slight_up >= self.mid
            && self.mid >= self.slight_down
            && self.slight_down >= self.down
            && self.down > -1.0
    }
}
