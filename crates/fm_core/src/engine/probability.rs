//! Probability calculation utilities for match simulation
//!
//! All functions are pure - they take powers/config as input and return
//! probabilities. The tick loop in `match_sim` only rolls against them.
//!
//! Every minute of a tick is priced on its own and clamped to the per-minute
//! band. The tick chance is the sum of those minutes, so one 5-minute tick
//! carries the same expected event count as five 1-minute ticks.

use rand::{Rng, RngCore};

use super::config::{
    DisciplineConfig, GoalConfig, InjuryConfig, MinuteCurve, SeverityBand, TimingConfig,
};
use super::team_power::{TeamPower, MIN_POWER_DENOMINATOR};

// ============================================================================
// Goal Probability
// ============================================================================

/// 분 단위 골 곡선 배수
pub fn minute_curve_multiplier(curve: MinuteCurve, minute: u8) -> f64 {
    match curve {
        MinuteCurve::Flat => 1.0,
        MinuteCurve::Realistic => match minute {
            0..=14 => 0.7,
            40..=44 => 1.3,
            m if m >= 75 => 1.25,
            _ => 1.0,
        },
    }
}

/// Trailing side pushes harder: `min(1 + per_goal × deficit, cap)`.
pub fn trailing_multiplier(deficit: u8, config: &GoalConfig) -> f64 {
    if deficit == 0 || config.trailing_push_per_goal <= 0.0 {
        return 1.0;
    }
    (1.0 + config.trailing_push_per_goal * deficit as f64).min(config.trailing_push_cap)
}

/// Relative edge of attack over the opposing defense, mapped into the
/// configured factor band. Equal powers give exactly 1.0.
pub fn strength_factor(attack: f64, opposing_defense: f64, config: &GoalConfig) -> f64 {
    let denominator = opposing_defense.max(MIN_POWER_DENOMINATOR);
    let edge = (attack - opposing_defense) / denominator;
    (1.0 + edge * config.strength_sensitivity)
        .clamp(config.min_strength_factor, config.max_strength_factor)
}

/// Sum of `per_minute(m)` over the minutes a tick covers, capped at 1.
fn over_tick(minute: u8, tick_minutes: u8, per_minute: impl Fn(u8) -> f64) -> f64 {
    (0..tick_minutes.max(1))
        .map(|offset| per_minute(minute.saturating_add(offset)))
        .sum::<f64>()
        .min(1.0)
}

/// 분당 골 확률, `[min_chance, max_chance]` 로 클램프
pub fn goal_chance_per_minute(
    attacker: &TeamPower,
    defender: &TeamPower,
    minute: u8,
    deficit: u8,
    config: &GoalConfig,
) -> f64 {
    let chance = config.rate_per_minute
        * strength_factor(attacker.attack, defender.defense, config)
        * attacker.goal_chance_modifier
        * minute_curve_multiplier(config.curve, minute)
        * trailing_multiplier(deficit, config);
    chance.clamp(config.min_chance, config.max_chance)
}

/// 틱당 골 확률 (순수 함수)
pub fn goal_chance(
    attacker: &TeamPower,
    defender: &TeamPower,
    minute: u8,
    tick_minutes: u8,
    deficit: u8,
    config: &GoalConfig,
) -> f64 {
    over_tick(minute, tick_minutes, |m| {
        goal_chance_per_minute(attacker, defender, m, deficit, config)
    })
}

// ============================================================================
// Cards / Injuries / Clock
// ============================================================================

/// 틱당 카드 확률 (60분 이후 상승)
pub fn card_chance(minute: u8, tick_minutes: u8, config: &DisciplineConfig) -> f64 {
    if !config.enabled {
        return 0.0;
    }
    over_tick(minute, tick_minutes, |m| {
        let mut chance = config.card_rate_per_minute;
        if m >= config.escalation_minute {
            chance *= config.escalation_multiplier;
        }
        chance.clamp(0.0, 1.0)
    })
}

pub fn injury_chance(tick_minutes: u8, config: &InjuryConfig) -> f64 {
    if !config.enabled {
        return 0.0;
    }
    (config.rate_per_minute * tick_minutes as f64).clamp(0.0, 1.0)
}

/// Injury length in weeks from the severity bands.
pub fn draw_injury_weeks(bands: &[SeverityBand], rng: &mut dyn RngCore) -> u8 {
    let weights: Vec<f64> = bands.iter().map(|b| b.weight).collect();
    match weighted_index(&weights, rng).and_then(|i| bands.get(i)) {
        Some(band) if band.max_weeks > band.min_weeks => rng.gen_range(band.min_weeks..=band.max_weeks),
        Some(band) => band.min_weeks,
        None => 1,
    }
}

/// Injury time in minutes.
pub fn draw_stoppage(timing: &TimingConfig, rng: &mut dyn RngCore) -> u8 {
    if timing.max_stoppage > timing.min_stoppage {
        rng.gen_range(timing.min_stoppage..=timing.max_stoppage)
    } else {
        timing.min_stoppage
    }
}

// ============================================================================
// Weighted Selection
// ============================================================================

/// Cumulative-weight draw. `None` when nothing carries positive weight.
pub fn weighted_index(weights: &[f64], rng: &mut dyn RngCore) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let mut random = rng.gen::<f64>() * total;
    let mut last_positive = None;
    for (i, weight) in weights.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        last_positive = Some(i);
        random -= weight;
        if random < 0.0 {
            return Some(i);
        }
    }
    last_positive
}
