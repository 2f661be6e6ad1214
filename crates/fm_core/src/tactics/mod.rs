//! Team Tactics
//!
//! Five-step tactical stance from ULTRA_DEFENSIVE to ULTRA_ATTACKING.
//! Each stance maps to an attack multiplier, a defense multiplier and a
//! goal-chance modifier consumed by the match engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tactic {
    UltraDefensive,
    Defensive,
    #[default]
    Balanced,
    Attacking,
    UltraAttacking,
}

impl Tactic {
    pub fn display_name(&self) -> &'static str {
        match self {
            Tactic::UltraDefensive => "Ultra Defensive",
            Tactic::Defensive => "Defensive",
            Tactic::Balanced => "Balanced",
            Tactic::Attacking => "Attacking",
            Tactic::UltraAttacking => "Ultra Attacking",
        }
    }
}

impl std::str::FromStr for Tactic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "ultra_defensive" => Ok(Tactic::UltraDefensive),
            "defensive" => Ok(Tactic::Defensive),
            "balanced" => Ok(Tactic::Balanced),
            "attacking" => Ok(Tactic::Attacking),
            "ultra_attacking" => Ok(Tactic::UltraAttacking),
            other => Err(format!("unknown tactic: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TacticModifiers {
    pub attack: f64,
    pub defense: f64,
    /// Multiplier on the per-tick goal chance
    pub goal_chance: f64,
}

impl TacticModifiers {
    pub const fn new(attack: f64, defense: f64, goal_chance: f64) -> Self {
        Self { attack, defense, goal_chance }
    }
}

/// 전술별 배수 테이블
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TacticTable {
    pub ultra_defensive: TacticModifiers,
    pub defensive: TacticModifiers,
    pub balanced: TacticModifiers,
    pub attacking: TacticModifiers,
    pub ultra_attacking: TacticModifiers,
}

impl Default for TacticTable {
    fn default() -> Self {
        Self {
            ultra_defensive: TacticModifiers::new(0.80, 1.20, 0.75),
            defensive: TacticModifiers::new(0.90, 1.10, 0.90),
            balanced: TacticModifiers::new(1.00, 1.00, 1.00),
            attacking: TacticModifiers::new(1.10, 0.90, 1.10),
            ultra_attacking: TacticModifiers::new(1.20, 0.80, 1.25),
        }
    }
}

impl TacticTable {
    pub fn get(&self, tactic: Tactic) -> TacticModifiers {
        match tactic {
            Tactic::UltraDefensive => self.ultra_defensive,
            Tactic::Defensive => self.defensive,
            Tactic::Balanced => self.balanced,
            Tactic::Attacking => self.attacking,
            Tactic::UltraAttacking => self.ultra_attacking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_balanced_is_neutral() {
        let m = TacticTable::default().get(Tactic::Balanced);
        assert_eq!(m, TacticModifiers::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_attack_rises_defense_falls_along_the_scale() {
        let table = TacticTable::default();
        let mods: Vec<_> = Tactic::iter().map(|t| table.get(t)).collect();
        for pair in mods.windows(2) {
            assert!(pair[0].attack < pair[1].attack);
            assert!(pair[0].defense > pair[1].defense);
            assert!(pair[0].goal_chance < pair[1].goal_chance);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("ultra-attacking".parse::<Tactic>(), Ok(Tactic::UltraAttacking));
        assert_eq!("Balanced".parse::<Tactic>(), Ok(Tactic::Balanced));
        assert!("park the bus".parse::<Tactic>().is_err());
    }
}
