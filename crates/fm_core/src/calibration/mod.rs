//! Goal-rate calibration
//!
//! Runs many seeded batch matches in parallel (rayon) and summarises the
//! outcome distribution. Used to tune `GoalConfig` against the real-world
//! band of roughly 2.5 goals per match.
//!
//! Every match gets its own engine and generator (seed = `base_seed + i`),
//! so the sample is reproducible regardless of thread scheduling.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::engine::config::EngineConfig;
use crate::engine::match_sim::MatchEngine;
use crate::error::SetupError;
use crate::models::{MatchSetup, TeamSide};

/// 병렬 처리 기준 (이보다 작으면 순차 실행)
const PARALLEL_THRESHOLD: usize = 64;

/// Aggregate of a goal-rate sample.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct GoalRateSample {
    pub matches: usize,
    pub mean_goals: f64,
    pub mean_home_goals: f64,
    pub mean_away_goals: f64,
    pub home_win_rate: f64,
    pub draw_rate: f64,
    pub away_win_rate: f64,
    pub mean_cards: f64,
    pub mean_injuries: f64,
}

impl GoalRateSample {
    /// True if the mean total goals lies within `[low, high]`.
    pub fn within(&self, low: f64, high: f64) -> bool {
        (low..=high).contains(&self.mean_goals)
    }
}

impl std::fmt::Display for GoalRateSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} matches: {:.3} goals/match ({:.2} home, {:.2} away) | H {:.1}% D {:.1}% A {:.1}% | {:.2} cards, {:.2} injuries",
            self.matches,
            self.mean_goals,
            self.mean_home_goals,
            self.mean_away_goals,
            self.home_win_rate * 100.0,
            self.draw_rate * 100.0,
            self.away_win_rate * 100.0,
            self.mean_cards,
            self.mean_injuries,
        )
    }
}

/// Per-match numbers folded into the sample.
#[derive(Debug, Clone, Copy, Default)]
struct Outcome {
    home_goals: u32,
    away_goals: u32,
    home_wins: u32,
    draws: u32,
    away_wins: u32,
    cards: u32,
    injuries: u32,
}

impl Outcome {
    fn merge(self, other: Outcome) -> Outcome {
        Outcome {
            home_goals: self.home_goals + other.home_goals,
            away_goals: self.away_goals + other.away_goals,
            home_wins: self.home_wins + other.home_wins,
            draws: self.draws + other.draws,
            away_wins: self.away_wins + other.away_wins,
            cards: self.cards + other.cards,
            injuries: self.injuries + other.injuries,
        }
    }
}

fn play_one(setup: &MatchSetup, config: &EngineConfig, seed: u64) -> Result<Outcome, SetupError> {
    let mut engine = MatchEngine::new(setup.clone(), config.clone(), seed)?;
    let result = engine.simulate();

    let (home_wins, draws, away_wins) = match result.score.winner() {
        Some(TeamSide::Home) => (1, 0, 0),
        Some(TeamSide::Away) => (0, 0, 1),
        None => (0, 1, 0),
    };
    let cards = result.events.iter().filter(|e| e.is_card()).count() as u32;
    let injuries = result.player_stats.values().filter(|s| s.injury_weeks.is_some()).count() as u32;

    Ok(Outcome {
        home_goals: result.score.home as u32,
        away_goals: result.score.away as u32,
        home_wins,
        draws,
        away_wins,
        cards,
        injuries,
    })
}

/// Simulate `matches` games of the same fixture and aggregate the outcome.
///
/// The config is validated once up front; an invalid config fails before any
/// match is played.
pub fn sample_goal_rate(
    setup: &MatchSetup,
    config: &EngineConfig,
    base_seed: u64,
    matches: usize,
) -> Result<GoalRateSample, SetupError> {
    config.validate()?;
    if matches == 0 {
        return Ok(GoalRateSample::default());
    }

    let seeds: Vec<u64> = (0..matches as u64).map(|i| base_seed.wrapping_add(i)).collect();
    let outcomes: Vec<Outcome> = if matches >= PARALLEL_THRESHOLD {
        seeds
            .par_iter()
            .map(|&seed| play_one(setup, config, seed))
            .collect::<Result<_, _>>()?
    } else {
        seeds
            .iter()
            .map(|&seed| play_one(setup, config, seed))
            .collect::<Result<_, _>>()?
    };

    let total = outcomes.into_iter().fold(Outcome::default(), Outcome::merge);
    let n = matches as f64;
    let sample = GoalRateSample {
        matches,
        mean_goals: (total.home_goals + total.away_goals) as f64 / n,
        mean_home_goals: total.home_goals as f64 / n,
        mean_away_goals: total.away_goals as f64 / n,
        home_win_rate: total.home_wins as f64 / n,
        draw_rate: total.draws as f64 / n,
        away_win_rate: total.away_wins as f64 / n,
        mean_cards: total.cards as f64 / n,
        mean_injuries: total.injuries as f64 / n,
    };

    info!("Calibration sample: {}", sample);
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::create_test_setup;

    #[test]
    fn test_empty_sample() {
        let setup = create_test_setup(70, 70);
        let sample = sample_goal_rate(&setup, &EngineConfig::default(), 0, 0).unwrap();
        assert_eq!(sample.matches, 0);
        assert_eq!(sample.mean_goals, 0.0);
    }

    #[test]
    fn test_rates_sum_to_one() {
        let setup = create_test_setup(72, 66);
        let sample = sample_goal_rate(&setup, &EngineConfig::default(), 11, 200).unwrap();
        let sum = sample.home_win_rate + sample.draw_rate + sample.away_win_rate;
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((sample.mean_home_goals + sample.mean_away_goals - sample.mean_goals).abs() < 1e-9);
    }

    #[test]
    fn test_sample_is_reproducible() {
        let setup = create_test_setup(70, 70);
        let config = EngineConfig::default();
        let a = sample_goal_rate(&setup, &config, 99, 128).unwrap();
        let b = sample_goal_rate(&setup, &config, 99, 128).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let setup = create_test_setup(70, 70);
        let mut config = EngineConfig::default();
        config.timing.batch_tick_minutes = 0;
        assert!(sample_goal_rate(&setup, &config, 0, 10).is_err());
    }

    #[test]
    fn test_minimal_preset_has_no_cards_or_injuries() {
        let setup = create_test_setup(70, 70);
        let sample = sample_goal_rate(&setup, &EngineConfig::minimal(), 5, 100).unwrap();
        assert_eq!(sample.mean_cards, 0.0);
        assert_eq!(sample.mean_injuries, 0.0);
    }

    #[test]
    fn test_stronger_side_wins_more() {
        let setup = create_test_setup(85, 55).neutral_venue();
        let sample = sample_goal_rate(&setup, &EngineConfig::default(), 3, 500).unwrap();
        assert!(sample.home_win_rate > sample.away_win_rate);
        assert!(sample.mean_home_goals > sample.mean_away_goals);
    }

    /// 1분 틱과 5분 틱이 같은 득점 분포를 낸다
    #[test]
    fn test_tick_length_keeps_goal_rate() {
        let setup = create_test_setup(85, 55).neutral_venue();
        let mut coarse = EngineConfig::default();
        coarse.timing.batch_tick_minutes = 5;

        let fine = sample_goal_rate(&setup, &EngineConfig::default(), 77, 4_000).unwrap();
        let coarse = sample_goal_rate(&setup, &coarse, 77, 4_000).unwrap();
        assert!(
            (fine.mean_home_goals - coarse.mean_home_goals).abs() < 0.15,
            "home goals: 1-minute {:.3}, 5-minute {:.3}",
            fine.mean_home_goals,
            coarse.mean_home_goals
        );
        assert!((fine.mean_away_goals - coarse.mean_away_goals).abs() < 0.15);
    }

    /// 10,000 equal-strength matches average between 2 and 3 goals.
    #[test]
    fn test_average_goals_in_realistic_band() {
        let setup = create_test_setup(70, 70).neutral_venue();
        let sample = sample_goal_rate(&setup, &EngineConfig::default(), 2024, 10_000).unwrap();
        assert!(
            sample.within(2.0, 3.0),
            "mean goals {:.3} outside [2.0, 3.0]",
            sample.mean_goals
        );
    }
}
