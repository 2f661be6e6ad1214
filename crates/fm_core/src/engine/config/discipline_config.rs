//! Card and Injury Configuration

use serde::{Deserialize, Serialize};

use super::goal_config::PositionWeights;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisciplineConfig {
    pub enabled: bool,
    /// Card likelihood per team per minute (기본: 0.017)
    pub card_rate_per_minute: f64,
    /// From this minute on the rate is multiplied (기본: 60')
    pub escalation_minute: u8,
    /// (기본: 1.4)
    pub escalation_multiplier: f64,
    /// Share of cards that are straight reds (기본: 0.04)
    pub straight_red_probability: f64,
    pub weights: PositionWeights,
}

impl Default for DisciplineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            card_rate_per_minute: 0.017,
            escalation_minute: 60,
            escalation_multiplier: 1.4,
            straight_red_probability: 0.04,
            weights: PositionWeights::new(0.3, 3.0, 2.5, 1.2),
        }
    }
}

/// One band of the injury-length distribution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeverityBand {
    pub min_weeks: u8,
    pub max_weeks: u8,
    pub weight: f64,
}

impl SeverityBand {
    pub const fn new(min_weeks: u8, max_weeks: u8, weight: f64) -> Self {
        Self { min_weeks, max_weeks, weight }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InjuryConfig {
    pub enabled: bool,
    /// Injury likelihood per team per minute (기본: 0.0012)
    pub rate_per_minute: f64,
    /// 50% 1주, 25% 2주, 15% 3주, 7% 4주, 3% 5~7주
    pub severity: Vec<SeverityBand>,
}

impl Default for InjuryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate_per_minute: 0.0012,
            severity: vec![
                SeverityBand::new(1, 1, 0.50),
                SeverityBand::new(2, 2, 0.25),
                SeverityBand::new(3, 3, 0.15),
                SeverityBand::new(4, 4, 0.07),
                SeverityBand::new(5, 7, 0.03),
            ],
        }
    }
}
