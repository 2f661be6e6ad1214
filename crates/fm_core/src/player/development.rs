//! Player Development Processor
//!
//! Two triggers mutate persistent player records between matches:
//!
//! - **Weekly tick** (every 7 days): condition arrow random walk, expired
//!   injury/suspension dates cleared.
//! - **Season boundary** (date crosses July 1st): age +1, skill delta by age
//!   bracket, market value/wage recomputed, season stats reset, retirement.
//!
//! ## Skill delta (applied with the new age)
//! - youth (≤ 23): `rand(1..=3) + round(gap × 0.15)`, never past potential
//! - peak (24–30): 30% chance of `rand(0..=2)`, never past potential
//! - veteran (≥ 31): `-(1 + (age - 30) / 2 + rand(0..=1))`
//!
//! Potential is a ceiling for growth coming from here only. Skill raised
//! above potential elsewhere is left alone.

use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::condition::ConditionTransitions;
use super::valuation::ValuationConfig;
use crate::error::SetupError;
use crate::models::{Player, PlayerId, SeasonStats};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetirementConfig {
    /// Always retire at this age (기본: 40)
    pub forced_age: u8,
    /// Probabilistic retirement starts above this age (기본: 33)
    pub min_age: u8,
    /// p = (age - reference_age) × per_year (기본: 32, 0.08)
    pub reference_age: u8,
    pub per_year: f64,
    /// Extra probability when skill fell below the floor (기본: 55, +0.15)
    pub low_skill_floor: u8,
    pub low_skill_bump: f64,
}

impl Default for RetirementConfig {
    fn default() -> Self {
        Self {
            forced_age: 40,
            min_age: 33,
            reference_age: 32,
            per_year: 0.08,
            low_skill_floor: 55,
            low_skill_bump: 0.15,
        }
    }
}

impl RetirementConfig {
    pub fn probability(&self, age: u8, skill: u8) -> f64 {
        if age >= self.forced_age {
            return 1.0;
        }
        if age <= self.min_age {
            return 0.0;
        }
        let mut p = age.saturating_sub(self.reference_age) as f64 * self.per_year;
        if skill < self.low_skill_floor {
            p += self.low_skill_bump;
        }
        p.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DevelopmentConfig {
    /// Last youth age (기본: 23)
    pub youth_max_age: u8,
    /// Last peak age (기본: 30)
    pub peak_max_age: u8,
    /// Random base growth for youth (기본: 1~3)
    pub youth_base_min: i32,
    pub youth_base_max: i32,
    /// Share of the potential gap added to youth growth (기본: 0.15)
    pub youth_gap_factor: f64,
    /// (기본: 0.30)
    pub peak_growth_probability: f64,
    /// (기본: 2)
    pub peak_growth_max: i32,
    /// Random extra decline for veterans, 0..=max (기본: 1)
    pub veteran_variance_max: i32,
    /// Season boundary month/day (기본: 7월 1일)
    pub season_start_month: u32,
    pub season_start_day: u32,
    /// Days between weekly ticks (기본: 7)
    pub weekly_interval_days: u64,
    #[serde(default)]
    pub retirement: RetirementConfig,
    #[serde(default)]
    pub transitions: ConditionTransitions,
    #[serde(default)]
    pub valuation: ValuationConfig,
}

impl Default for DevelopmentConfig {
    fn default() -> Self {
        Self {
            youth_max_age: 23,
            peak_max_age: 30,
            youth_base_min: 1,
            youth_base_max: 3,
            youth_gap_factor: 0.15,
            peak_growth_probability: 0.30,
            peak_growth_max: 2,
            veteran_variance_max: 1,
            season_start_month: 7,
            season_start_day: 1,
            weekly_interval_days: 7,
            retirement: RetirementConfig::default(),
            transitions: ConditionTransitions::default(),
            valuation: ValuationConfig::default(),
        }
    }
}

impl DevelopmentConfig {
    pub fn from_yaml_str(yaml: &str) -> crate::error::Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |msg: &str| Err(SetupError::InvalidConfig(msg.to_string()));
        let is_probability = |p: f64| (0.0..=1.0).contains(&p);

        if self.youth_max_age >= self.peak_max_age {
            return invalid("youth bracket must end before the peak bracket");
        }
        if self.youth_base_min > self.youth_base_max {
            return invalid("youth growth range is inverted");
        }
        if self.peak_growth_max < 0 || self.veteran_variance_max < 0 {
            return invalid("peak growth and veteran variance must be >= 0");
        }
        if !self.youth_gap_factor.is_finite() || self.youth_gap_factor < 0.0 {
            return invalid("youth_gap_factor must be a finite value >= 0");
        }
        if !is_probability(self.peak_growth_probability) {
            return invalid("peak_growth_probability must be a probability");
        }
        // 윤년이 아닌 해로 검사해서 2월 29일을 거른다
        if NaiveDate::from_ymd_opt(2001, self.season_start_month, self.season_start_day).is_none() {
            return invalid("season start is not a calendar date");
        }
        if self.weekly_interval_days == 0 {
            return invalid("weekly_interval_days must be at least 1");
        }

        let r = &self.retirement;
        if !is_probability(r.per_year) || !is_probability(r.low_skill_bump) {
            return invalid("retirement rates must be probabilities");
        }
        if r.min_age >= r.forced_age {
            return invalid("retirement min_age must be below forced_age");
        }

        if !self.transitions.is_valid() {
            return invalid("condition transition rows must be probabilities summing to 1");
        }

        let v = &self.valuation;
        if v.age_multipliers.is_empty() {
            return invalid("valuation needs at least one age multiplier");
        }
        let finite_non_negative = |x: f64| x.is_finite() && x >= 0.0;
        if !finite_non_negative(v.base_value)
            || !v.growth_rate.is_finite()
            || !finite_non_negative(v.wage_ratio)
            || !(v.potential_bonus_divisor.is_finite() && v.potential_bonus_divisor > 0.0)
            || v.age_multipliers.iter().chain(&v.wage_premiums).any(|(_, m)| !finite_non_negative(*m))
        {
            return invalid("valuation factors must be finite and non-negative");
        }
        Ok(())
    }
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillChange {
    pub id: PlayerId,
    pub age: u8,
    pub before: u8,
    pub after: u8,
}

impl SkillChange {
    pub fn delta(&self) -> i32 {
        self.after as i32 - self.before as i32
    }
}

/// Outcome of one season boundary. Retired players are handed back by value
/// and are no longer part of the squad.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeasonReport {
    pub changes: Vec<SkillChange>,
    pub retired: Vec<Player>,
}

impl SeasonReport {
    pub fn improved(&self) -> usize {
        self.changes.iter().filter(|c| c.delta() > 0).count()
    }

    pub fn declined(&self) -> usize {
        self.changes.iter().filter(|c| c.delta() < 0).count()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeeklyReport {
    pub condition_changes: usize,
    /// Players whose injury or suspension expired this week
    pub returned: Vec<PlayerId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdvanceReport {
    pub weeks: u32,
    pub seasons: Vec<SeasonReport>,
}

// ============================================================================
// Processor
// ============================================================================

/// Date-driven development clock over a squad.
#[derive(Debug)]
pub struct DevelopmentProcessor<R: Rng> {
    config: DevelopmentConfig,
    rng: R,
    current_date: NaiveDate,
    last_weekly: NaiveDate,
}

impl<R: Rng> DevelopmentProcessor<R> {
    pub fn new(config: DevelopmentConfig, rng: R, start_date: NaiveDate) -> Self {
        Self { config, rng, current_date: start_date, last_weekly: start_date }
    }

    pub fn config(&self) -> &DevelopmentConfig {
        &self.config
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Condition random walk for every player; clears injury/suspension
    /// dates that have passed by `today`.
    pub fn weekly_tick(&mut self, players: &mut [Player], today: NaiveDate) -> WeeklyReport {
        let mut report = WeeklyReport::default();
        for player in players.iter_mut() {
            let next = self.config.transitions.weekly_update(player.condition, &mut self.rng);
            if next != player.condition {
                report.condition_changes += 1;
                player.condition = next;
            }

            let was_unavailable = player.injured_until.is_some() || player.suspended_until.is_some();
            if player.injured_until.is_some_and(|until| today >= until) {
                player.injured_until = None;
            }
            if player.suspended_until.is_some_and(|until| today >= until) {
                player.suspended_until = None;
            }
            if was_unavailable && player.injured_until.is_none() && player.suspended_until.is_none() {
                report.returned.push(player.id);
            }
        }
        report
    }

    /// Skill delta for a player whose age has already been incremented.
    pub fn season_delta(&mut self, player: &Player) -> i32 {
        let cfg = &self.config;
        let skill = player.skill_base as i32;
        let gap = player.potential as i32 - skill;

        if player.age <= cfg.youth_max_age {
            if gap <= 0 {
                return 0;
            }
            let base = self.rng.gen_range(cfg.youth_base_min..=cfg.youth_base_max);
            let growth = base + (gap as f64 * cfg.youth_gap_factor).round() as i32;
            growth.min(gap)
        } else if player.age <= cfg.peak_max_age {
            if gap <= 0 || !self.rng.gen_bool(cfg.peak_growth_probability.clamp(0.0, 1.0)) {
                return 0;
            }
            self.rng.gen_range(0..=cfg.peak_growth_max).min(gap)
        } else {
            let years_over_peak = (player.age - cfg.peak_max_age) as i32;
            let variance = self.rng.gen_range(0..=cfg.veteran_variance_max);
            -(1 + years_over_peak / 2 + variance)
        }
    }

    /// Season boundary for the whole squad. Retiring players are removed
    /// from `players` and returned in the report.
    pub fn process_season_end(&mut self, players: &mut Vec<Player>) -> SeasonReport {
        let mut report = SeasonReport::default();
        let mut kept = Vec::with_capacity(players.len());

        for mut player in players.drain(..) {
            player.age = player.age.saturating_add(1);
            let before = player.skill_base;
            let delta = self.season_delta(&player);
            player.set_skill(before as i32 + delta);
            self.config.valuation.revalue(&mut player);
            player.season_stats = SeasonStats::default();

            report.changes.push(SkillChange {
                id: player.id,
                age: player.age,
                before,
                after: player.skill_base,
            });

            let p_retire = self.config.retirement.probability(player.age, player.skill_base);
            if p_retire > 0.0 && self.rng.gen::<f64>() < p_retire {
                debug!("{} ({}) retires at {}", player.name, player.id, player.age);
                report.retired.push(player);
            } else {
                kept.push(player);
            }
        }
        *players = kept;

        info!(
            "Season processed: {} improved, {} declined, {} retired",
            report.improved(),
            report.declined(),
            report.retired.len()
        );
        report
    }

    /// Move the clock to `date`, firing weekly ticks and season boundaries in
    /// chronological order (season first when both fall on the same day).
    pub fn advance_to(&mut self, date: NaiveDate, players: &mut Vec<Player>) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let interval = Days::new(self.config.weekly_interval_days.max(1));

        loop {
            let next_weekly = self.last_weekly.checked_add_days(interval).unwrap_or(NaiveDate::MAX);
            let next_season = self.next_season_start(self.current_date);
            let next = next_weekly.min(next_season);
            if next > date {
                break;
            }

            if next == next_season {
                report.seasons.push(self.process_season_end(players));
            }
            if next == next_weekly {
                self.weekly_tick(players, next);
                self.last_weekly = next;
                report.weeks += 1;
            }
            self.current_date = next;
        }

        if date > self.current_date {
            self.current_date = date;
        }
        report
    }

    /// First season start strictly after `after`.
    fn next_season_start(&self, after: NaiveDate) -> NaiveDate {
        let (m, d) = (self.config.season_start_month, self.config.season_start_day);
        let this_year = NaiveDate::from_ymd_opt(after.year(), m, d);
        match this_year {
            Some(start) if start > after => start,
            _ => NaiveDate::from_ymd_opt(after.year() + 1, m, d).unwrap_or(NaiveDate::MAX),
        }
    }
}
