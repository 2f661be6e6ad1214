//! Match Clock and Rating Configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// (기본: 90)
    pub regulation_minutes: u8,
    /// (기본: 45)
    pub half_time_minute: u8,
    /// In-game minutes per tick in batch mode (기본: 1)
    pub batch_tick_minutes: u8,
    /// In-game minutes per tick in live mode (기본: 5)
    pub live_tick_minutes: u8,
    /// Injury time drawn uniformly from this range (기본: 1~5)
    pub min_stoppage: u8,
    pub max_stoppage: u8,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            regulation_minutes: 90,
            half_time_minute: 45,
            batch_tick_minutes: 1,
            live_tick_minutes: 5,
            min_stoppage: 1,
            max_stoppage: 5,
        }
    }
}

/// 평점 모델: baseline + Σ increments, clamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingConfig {
    pub baseline: f32,
    pub goal: f32,
    pub assist: f32,
    pub yellow: f32,
    pub red: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self { baseline: 6.5, goal: 1.0, assist: 0.5, yellow: -0.5, red: -2.0, min: 1.0, max: 10.0 }
    }
}

impl RatingConfig {
    pub fn apply(&self, rating: f32, increment: f32) -> f32 {
        (rating + increment).clamp(self.min, self.max)
    }
}
