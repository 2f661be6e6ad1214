//! Market value and wage model.
//!
//! ```text
//! value = base × exp(skill × growth) × age_multiplier × potential_bonus
//! wage  = value × wage_ratio × skill_premium        (weekly)
//! ```
//!
//! Values round to the nearest 1,000 and wages to the nearest 100.

use serde::{Deserialize, Serialize};

use crate::models::Player;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuationConfig {
    /// (기본: 10,000)
    pub base_value: f64,
    /// Exponent per skill point (기본: 0.085)
    pub growth_rate: f64,
    /// (max_age, multiplier), first match wins, last entry catches all
    pub age_multipliers: Vec<(u8, f64)>,
    /// Young high-potential bonus applies up to this age (기본: 23)
    pub potential_bonus_max_age: u8,
    /// Minimum potential gap for the bonus (기본: 10)
    pub potential_bonus_min_gap: u8,
    /// bonus = 1 + gap / divisor (기본: 50)
    pub potential_bonus_divisor: f64,
    /// Weekly wage as a share of value (기본: 0.25%)
    pub wage_ratio: f64,
    /// (min_skill, premium), highest matching tier wins
    pub wage_premiums: Vec<(u8, f64)>,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            base_value: 10_000.0,
            growth_rate: 0.085,
            age_multipliers: vec![(21, 1.3), (25, 1.2), (29, 1.0), (32, 0.7), (u8::MAX, 0.4)],
            potential_bonus_max_age: 23,
            potential_bonus_min_gap: 10,
            potential_bonus_divisor: 50.0,
            wage_ratio: 0.0025,
            wage_premiums: vec![(85, 1.5), (75, 1.25)],
        }
    }
}

impl ValuationConfig {
    pub fn age_multiplier(&self, age: u8) -> f64 {
        self.age_multipliers
            .iter()
            .find(|(max_age, _)| age <= *max_age)
            .map(|(_, m)| *m)
            .unwrap_or(1.0)
    }

    pub fn wage_premium(&self, skill: u8) -> f64 {
        self.wage_premiums
            .iter()
            .filter(|(min_skill, _)| skill >= *min_skill)
            .map(|(_, p)| *p)
            .fold(1.0, f64::max)
    }

    pub fn market_value(&self, player: &Player) -> u64 {
        let skill = player.skill_base as f64;
        let mut value = self.base_value * (skill * self.growth_rate).exp();
        value *= self.age_multiplier(player.age);

        let gap = player.potential.saturating_sub(player.skill_base);
        if player.age <= self.potential_bonus_max_age && gap >= self.potential_bonus_min_gap {
            value *= 1.0 + gap as f64 / self.potential_bonus_divisor;
        }
        round_to_nearest(value, 1_000)
    }

    pub fn weekly_wage(&self, market_value: u64, skill: u8) -> u64 {
        let wage = market_value as f64 * self.wage_ratio * self.wage_premium(skill);
        round_to_nearest(wage, 100)
    }

    /// Recompute and store value and wage.
    pub fn revalue(&self, player: &mut Player) {
        player.market_value = self.market_value(player);
        player.wage = self.weekly_wage(player.market_value, player.skill_base);
    }
}

fn round_to_nearest(value: f64, step: u64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / step as f64).round() as u64) * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use proptest::prelude::*;

    #[test]
    fn test_value_grows_exponentially_with_skill() {
        let cfg = ValuationConfig::default();
        let low = cfg.market_value(&Player::new(1, "A", 27, Position::MID, 50));
        let high = cfg.market_value(&Player::new(2, "B", 27, Position::MID, 80));
        // exp(30 × 0.085) ≈ 12.8
        assert!(high > low * 10);
        assert_eq!(low % 1_000, 0);
    }

    #[test]
    fn test_age_brackets() {
        let cfg = ValuationConfig::default();
        assert_eq!(cfg.age_multiplier(19), 1.3);
        assert_eq!(cfg.age_multiplier(24), 1.2);
        assert_eq!(cfg.age_multiplier(29), 1.0);
        assert_eq!(cfg.age_multiplier(31), 0.7);
        assert_eq!(cfg.age_multiplier(36), 0.4);
    }

    #[test]
    fn test_young_high_potential_bonus() {
        let cfg = ValuationConfig::default();
        let plain = Player::new(1, "Kid", 19, Position::FWD, 60);
        let prospect = plain.clone().with_potential(85);
        assert!(cfg.market_value(&prospect) > cfg.market_value(&plain));

        // gap below threshold: no bonus
        let small_gap = plain.clone().with_potential(65);
        assert_eq!(cfg.market_value(&small_gap), cfg.market_value(&plain));
    }

    #[test]
    fn test_wage_premium_tiers() {
        let cfg = ValuationConfig::default();
        assert_eq!(cfg.wage_premium(70), 1.0);
        assert_eq!(cfg.wage_premium(75), 1.25);
        assert_eq!(cfg.wage_premium(90), 1.5);
        assert_eq!(cfg.weekly_wage(1_000_000, 60), 2_500);
        assert_eq!(cfg.weekly_wage(1_000_000, 80), 3_100);
    }

    #[test]
    fn test_revalue_updates_player() {
        let cfg = ValuationConfig::default();
        let mut p = Player::new(1, "A", 25, Position::DEF, 70);
        cfg.revalue(&mut p);
        assert!(p.market_value > 0);
        assert_eq!(p.wage, cfg.weekly_wage(p.market_value, 70));
    }

    proptest! {
        #[test]
        fn prop_value_monotonic_in_skill(skill in 1u8..99, age in 16u8..40) {
            let cfg = ValuationConfig::default();
            let a = Player::new(1, "A", age, Position::MID, skill);
            let b = Player::new(2, "B", age, Position::MID, skill + 1);
            prop_assert!(cfg.market_value(&b) >= cfg.market_value(&a));
        }
    }
}
