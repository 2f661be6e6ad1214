//! Live Match Controller
//!
//! Wraps one `MatchEngine` for interactive play:
//! - speed control (paused / real-time / accelerated / instant)
//! - `on_tick` / `on_match_end` callbacks
//! - mid-match substitution and tactic change (power recomputed immediately)
//! - optional pause at half-time
//!
//! Ticks are driven cooperatively: the caller reports elapsed wall-clock time
//! through `advance`, or steps explicitly. All mutation goes through `&mut
//! self`, so a substitution can never land in the middle of a tick.

use std::time::Duration;

use tracing::debug;

use super::config::EngineConfig;
use super::match_sim::{MatchEngine, TickReport};
use crate::error::SetupError;
use crate::models::{MatchResult, MatchSetup, MatchStatus, PlayerId, Score, TeamSide};
use crate::tactics::Tactic;

/// Real seconds per in-game minute at `MatchSpeed::RealTime`.
pub const SECONDS_PER_GAME_MINUTE: u64 = 60;

// ============================================
// Speed / Phase
// ============================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchSpeed {
    Paused,
    /// One in-game minute per real minute
    RealTime,
    /// Real-time multiplied by the factor (e.g. 30.0)
    Accelerated(f32),
    /// Run to the end on the next `advance`
    Instant,
}

impl MatchSpeed {
    /// Multiplier over real time, `None` when time does not drive ticks.
    pub fn factor(&self) -> Option<f64> {
        match self {
            MatchSpeed::RealTime => Some(1.0),
            MatchSpeed::Accelerated(f) if *f > 0.0 && f.is_finite() => Some(*f as f64),
            _ => None,
        }
    }
}

/// Current phase of the live match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivePhase {
    NotStarted,
    FirstHalf,
    HalfTimeBreak,
    SecondHalf,
    Finished,
}

pub type TickCallback = Box<dyn FnMut(&TickReport)>;
pub type MatchEndCallback = Box<dyn FnMut(&MatchResult)>;

// ============================================
// LiveMatchController
// ============================================

pub struct LiveMatchController {
    engine: MatchEngine,
    speed: MatchSpeed,
    phase: LivePhase,
    pause_at_half_time: bool,
    /// Wall-clock time not yet converted into ticks
    accumulated: Duration,
    on_tick: Option<TickCallback>,
    on_match_end: Option<MatchEndCallback>,
}

impl std::fmt::Debug for LiveMatchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveMatchController")
            .field("engine", &self.engine)
            .field("speed", &self.speed)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl LiveMatchController {
    /// Seeded controller using the live tick size from `config.timing`.
    pub fn new(setup: MatchSetup, config: EngineConfig, seed: u64) -> Result<Self, SetupError> {
        Ok(Self::with_engine(MatchEngine::new(setup, config, seed)?))
    }

    /// Wrap an existing engine; switches it to the live tick size.
    pub fn with_engine(mut engine: MatchEngine) -> Self {
        let live_tick = engine.config().timing.live_tick_minutes;
        engine.set_tick_minutes(live_tick);
        Self {
            engine,
            speed: MatchSpeed::Paused,
            phase: LivePhase::NotStarted,
            pause_at_half_time: false,
            accumulated: Duration::ZERO,
            on_tick: None,
            on_match_end: None,
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn set_speed(&mut self, speed: MatchSpeed) {
        self.speed = speed;
        if speed == MatchSpeed::Paused {
            self.accumulated = Duration::ZERO;
        }
    }

    pub fn speed(&self) -> MatchSpeed {
        self.speed
    }

    /// Stop at half-time until `resume_second_half`.
    pub fn set_pause_at_half_time(&mut self, pause: bool) {
        self.pause_at_half_time = pause;
    }

    pub fn on_tick(&mut self, callback: impl FnMut(&TickReport) + 'static) {
        self.on_tick = Some(Box::new(callback));
    }

    pub fn on_match_end(&mut self, callback: impl FnMut(&MatchResult) + 'static) {
        self.on_match_end = Some(Box::new(callback));
    }

    // =========================================================================
    // Flow
    // =========================================================================

    pub fn kick_off(&mut self) {
        if self.phase != LivePhase::NotStarted {
            return;
        }
        self.engine.kick_off();
        self.phase = LivePhase::FirstHalf;
    }

    pub fn resume_second_half(&mut self) {
        if self.phase == LivePhase::HalfTimeBreak {
            self.phase = LivePhase::SecondHalf;
        }
    }

    /// Execute one tick. `None` during the half-time break or after full time.
    pub fn step(&mut self) -> Option<TickReport> {
        match self.phase {
            LivePhase::NotStarted => self.kick_off(),
            LivePhase::HalfTimeBreak | LivePhase::Finished => return None,
            LivePhase::FirstHalf | LivePhase::SecondHalf => {}
        }

        let report = self.engine.step_tick();
        if let Some(cb) = self.on_tick.as_mut() {
            cb(&report);
        }

        if report.status == MatchStatus::Finished {
            self.phase = LivePhase::Finished;
            let result = self.engine.result();
            if let Some(cb) = self.on_match_end.as_mut() {
                cb(&result);
            }
        } else if report.half_time {
            self.phase = if self.pause_at_half_time {
                debug!("Half-time break at {}'", report.minute);
                LivePhase::HalfTimeBreak
            } else {
                LivePhase::SecondHalf
            };
        }
        Some(report)
    }

    /// Feed elapsed wall-clock time; runs as many ticks as the speed allows.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TickReport> {
        let mut reports = Vec::new();
        match self.speed {
            MatchSpeed::Paused => {}
            MatchSpeed::Instant => {
                while let Some(report) = self.step() {
                    reports.push(report);
                }
            }
            MatchSpeed::RealTime | MatchSpeed::Accelerated(_) => {
                let Some(interval) = self.tick_interval() else {
                    return reports;
                };
                self.accumulated += elapsed;
                while self.accumulated >= interval {
                    match self.step() {
                        Some(report) => reports.push(report),
                        None => {
                            self.accumulated = Duration::ZERO;
                            break;
                        }
                    }
                    self.accumulated -= interval;
                }
            }
        }
        reports
    }

    /// Wall-clock time per tick at the current speed.
    pub fn tick_interval(&self) -> Option<Duration> {
        let factor = self.speed.factor()?;
        let game_seconds = self.engine.tick_minutes() as f64 * SECONDS_PER_GAME_MINUTE as f64;
        Some(Duration::from_secs_f64(game_seconds / factor))
    }

    /// Play out the rest of the match, skipping any half-time break.
    pub fn run_to_end(&mut self) -> MatchResult {
        while self.phase != LivePhase::Finished {
            self.resume_second_half();
            self.step();
        }
        self.engine.result()
    }

    // =========================================================================
    // Mid-match mutations
    // =========================================================================

    pub fn substitute(&mut self, side: TeamSide, out_id: PlayerId, in_id: PlayerId) -> bool {
        self.engine.substitute(side, out_id, in_id)
    }

    pub fn change_tactic(&mut self, side: TeamSide, tactic: Tactic) -> bool {
        self.engine.change_tactic(side, tactic)
    }

    /// New match on the same controller and generator; full substitution
    /// budget, speed and callbacks kept.
    pub fn reset(&mut self, setup: MatchSetup) {
        self.engine.reset(setup);
        self.phase = LivePhase::NotStarted;
        self.accumulated = Duration::ZERO;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn phase(&self) -> LivePhase {
        self.phase
    }

    pub fn minute(&self) -> u8 {
        self.engine.minute()
    }

    pub fn score(&self) -> Score {
        self.engine.score()
    }

    pub fn status(&self) -> MatchStatus {
        self.engine.status()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == LivePhase::Finished
    }

    pub fn result(&self) -> MatchResult {
        self.engine.result()
    }
}
