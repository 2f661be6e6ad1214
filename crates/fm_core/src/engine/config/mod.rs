//! # Engine Configuration Module
//!
//! 모든 튜닝 상수를 중앙에서 관리하는 설정 시스템.
//!
//! ## 목적
//! - 튜닝 상수를 코드에서 분리
//! - 프리셋 지원 (Realistic, Arcade, Simulation, Minimal)
//! - YAML 로딩/저장
//!
//! ## 사용법
//! ```rust
//! use fm_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.validate().is_ok());
//! ```

mod discipline_config;
mod goal_config;
mod power_config;
mod skill_config;
mod timing_config;

pub use discipline_config::{DisciplineConfig, InjuryConfig, SeverityBand};
pub use goal_config::{GoalConfig, MinuteCurve, PositionWeights};
pub use power_config::PowerConfig;
pub use skill_config::{FormTable, SkillModelConfig};
pub use timing_config::{RatingConfig, TimingConfig};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};

/// 전체 엔진 설정
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub skill: SkillModelConfig,
    #[serde(default)]
    pub power: PowerConfig,
    #[serde(default)]
    pub goals: GoalConfig,
    #[serde(default)]
    pub discipline: DisciplineConfig,
    #[serde(default)]
    pub injuries: InjuryConfig,
    #[serde(default)]
    pub ratings: RatingConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    /// Substitutions per side per match (기본: 5)
    #[serde(default = "default_max_substitutions")]
    pub max_substitutions: u8,
}

fn default_max_substitutions() -> u8 {
    5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skill: SkillModelConfig::default(),
            power: PowerConfig::default(),
            goals: GoalConfig::default(),
            discipline: DisciplineConfig::default(),
            injuries: InjuryConfig::default(),
            ratings: RatingConfig::default(),
            timing: TimingConfig::default(),
            max_substitutions: default_max_substitutions(),
        }
    }
}

impl EngineConfig {
    /// 현실적인 시뮬레이션 (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// 아케이드 스타일 (더 많은 골)
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.goals.rate_per_minute = 0.018;
        cfg.goals.max_chance = 0.12;
        cfg.goals.trailing_push_per_goal = 0.12;
        cfg.goals.trailing_push_cap = 1.5;
        cfg.discipline.card_rate_per_minute = 0.012;
        cfg
    }

    /// 시뮬레이션 스타일 (더 적은 골, 더 많은 카드)
    pub fn simulation() -> Self {
        let mut cfg = Self::default();
        cfg.goals.rate_per_minute = 0.0115;
        cfg.goals.strength_sensitivity = 1.8;
        cfg.discipline.card_rate_per_minute = 0.02;
        cfg.injuries.rate_per_minute = 0.0015;
        cfg
    }

    /// Plain tick engine: flat curve, no cards, no injuries, no trailing push.
    pub fn minimal() -> Self {
        let mut cfg = Self::default();
        cfg.goals.curve = MinuteCurve::Flat;
        cfg.goals.trailing_push_per_goal = 0.0;
        cfg.goals.near_miss_factor = 0.0;
        cfg.discipline.enabled = false;
        cfg.injuries.enabled = false;
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> std::result::Result<(), SetupError> {
        let invalid = |msg: &str| Err(SetupError::InvalidConfig(msg.to_string()));
        let is_probability = |p: f64| (0.0..=1.0).contains(&p);

        if !self.skill.form.is_monotonic() {
            return invalid("form table must be monotonic from UP to DOWN");
        }
        let fits = [self.skill.natural, self.skill.alternative, self.skill.adjacent, self.skill.invalid];
        if fits.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return invalid("position-fit multipliers must be non-negative");
        }
        if !(self.power.morale_divisor.is_finite() && self.power.morale_divisor > 0.0) {
            return invalid("morale_divisor must be positive");
        }

        let g = &self.goals;
        if !is_probability(g.rate_per_minute) || !is_probability(g.assist_probability) {
            return invalid("goal rates must be probabilities");
        }
        if !is_probability(g.min_chance) || !is_probability(g.max_chance) || g.min_chance > g.max_chance {
            return invalid("goal chance band must satisfy 0 <= min <= max <= 1");
        }
        if !g.min_strength_factor.is_finite()
            || !g.max_strength_factor.is_finite()
            || g.min_strength_factor <= 0.0
            || g.min_strength_factor > g.max_strength_factor
        {
            return invalid("strength factor band must be finite with 0 < min <= max");
        }
        if !g.strength_sensitivity.is_finite() || !g.near_miss_factor.is_finite() || g.near_miss_factor < 0.0 {
            return invalid("strength sensitivity and near-miss factor must be finite");
        }
        if !(g.trailing_push_per_goal.is_finite() && g.trailing_push_per_goal >= 0.0)
            || !(g.trailing_push_cap.is_finite() && g.trailing_push_cap >= 1.0)
        {
            return invalid("trailing push must be >= 0 with a cap >= 1");
        }
        if !g.scorer_weights.is_valid() || !g.assister_weights.is_valid() {
            return invalid("selection weights must be non-negative with a positive sum");
        }

        let d = &self.discipline;
        if !is_probability(d.card_rate_per_minute) || !is_probability(d.straight_red_probability) {
            return invalid("card rates must be probabilities");
        }
        if !(d.escalation_multiplier.is_finite() && d.escalation_multiplier >= 0.0) || !d.weights.is_valid() {
            return invalid("card weights/escalation must be non-negative");
        }

        let i = &self.injuries;
        if !is_probability(i.rate_per_minute) {
            return invalid("injury rate must be a probability");
        }
        if i.enabled
            && (i.severity.is_empty()
                || i.severity.iter().any(|b| !(b.weight.is_finite() && b.weight >= 0.0) || b.min_weeks == 0 || b.min_weeks > b.max_weeks)
                || i.severity.iter().map(|b| b.weight).sum::<f64>() <= 0.0)
        {
            return invalid("injury severity bands are malformed");
        }

        let t = &self.timing;
        if t.batch_tick_minutes == 0 || t.live_tick_minutes == 0 {
            return invalid("tick size must be at least one minute");
        }
        if t.min_stoppage > t.max_stoppage || t.half_time_minute >= t.regulation_minutes {
            return invalid("match clock is inconsistent");
        }
        if t.regulation_minutes as u16 + t.max_stoppage as u16 > u8::MAX as u16 {
            return invalid("match clock overflows");
        }

        let r = &self.ratings;
        if r.min > r.max || !(r.min..=r.max).contains(&r.baseline) {
            return invalid("rating baseline must lie within [min, max]");
        }
        if [r.goal, r.assist, r.yellow, r.red].iter().any(|x| !x.is_finite()) {
            return invalid("rating increments must be finite");
        }
        Ok(())
    }
}
