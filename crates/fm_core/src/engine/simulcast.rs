//! Simulcast Coordinator
//!
//! Runs many `LiveMatchController`s in lockstep for an "all matches at once"
//! view. Matches share nothing; the coordinator only fans out speed changes
//! and builds read-only scoreboard projections.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use super::live_match::{LiveMatchController, MatchSpeed};
use super::match_sim::TickReport;
use crate::models::{MatchResult, MatchStatus, Score};

/// One line of the combined scoreboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreboardLine {
    pub home: String,
    pub away: String,
    pub score: Score,
    pub minute: u8,
    pub status: MatchStatus,
}

impl std::fmt::Display for ScoreboardLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>3}' {} {} {}", self.minute, self.home, self.score, self.away)
    }
}

#[derive(Debug)]
pub struct SimulcastCoordinator {
    matches: Vec<LiveMatchController>,
    speed: MatchSpeed,
    /// Completion already logged; cleared when any match is running again
    finished_logged: bool,
}

impl Default for SimulcastCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulcastCoordinator {
    pub fn new() -> Self {
        Self { matches: Vec::new(), speed: MatchSpeed::Paused, finished_logged: false }
    }

    /// Add a match; it adopts the coordinator's speed. Returns its index.
    pub fn add(&mut self, mut controller: LiveMatchController) -> usize {
        controller.set_speed(self.speed);
        self.matches.push(controller);
        self.matches.len() - 1
    }

    /// One global speed for every match.
    pub fn set_speed(&mut self, speed: MatchSpeed) {
        self.speed = speed;
        for m in &mut self.matches {
            m.set_speed(speed);
        }
    }

    pub fn speed(&self) -> MatchSpeed {
        self.speed
    }

    /// Feed elapsed time to every match. Reports are tagged with the match index.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(usize, TickReport)> {
        let mut out = Vec::new();
        for (idx, m) in self.matches.iter_mut().enumerate() {
            out.extend(m.advance(elapsed).into_iter().map(|r| (idx, r)));
        }
        self.log_if_done();
        out
    }

    /// One tick for every match still running (lockstep).
    pub fn step_all(&mut self) -> Vec<(usize, TickReport)> {
        let reports = self
            .matches
            .iter_mut()
            .enumerate()
            .filter(|(_, m)| !m.is_finished())
            .filter_map(|(idx, m)| m.step().map(|r| (idx, r)))
            .collect();
        self.log_if_done();
        reports
    }

    pub fn resume_all_second_half(&mut self) {
        for m in &mut self.matches {
            m.resume_second_half();
        }
    }

    pub fn all_finished(&self) -> bool {
        self.matches.iter().all(|m| m.is_finished())
    }

    pub fn scoreboard(&self) -> Vec<ScoreboardLine> {
        self.matches
            .iter()
            .map(|m| {
                let setup = m.engine().setup();
                ScoreboardLine {
                    home: setup.home.name.clone(),
                    away: setup.away.name.clone(),
                    score: m.score(),
                    minute: m.minute(),
                    status: m.status(),
                }
            })
            .collect()
    }

    pub fn results(&self) -> Vec<MatchResult> {
        self.matches.iter().map(|m| m.result()).collect()
    }

    pub fn get(&self, idx: usize) -> Option<&LiveMatchController> {
        self.matches.get(idx)
    }

    /// Per-match access for substitutions and tactic changes.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut LiveMatchController> {
        self.matches.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Logs the summary on the transition into all-finished. Returns whether it logged.
    fn log_if_done(&mut self) -> bool {
        if self.matches.is_empty() || !self.all_finished() {
            self.finished_logged = false;
            return false;
        }
        if self.finished_logged {
            return false;
        }
        let goals: u32 = self.matches.iter().map(|m| m.score().total() as u32).sum();
        info!("Simulcast finished: {} matches, {} goals", self.matches.len(), goals);
        self.finished_logged = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::match_sim::test_fixtures::create_test_setup;
    use crate::models::TeamSide;
    use crate::tactics::Tactic;

    fn coordinator(n: u64) -> SimulcastCoordinator {
        let mut sim = SimulcastCoordinator::new();
        for seed in 0..n {
            let c = LiveMatchController::new(create_test_setup(70, 68), EngineConfig::default(), seed).unwrap();
            sim.add(c);
        }
        sim
    }

    #[test]
    fn test_speed_fans_out() {
        let mut sim = coordinator(3);
        sim.set_speed(MatchSpeed::Accelerated(30.0));
        for i in 0..3 {
            assert_eq!(sim.get(i).unwrap().speed(), MatchSpeed::Accelerated(30.0));
        }
    }

    #[test]
    fn test_lockstep_minutes() {
        let mut sim = coordinator(4);
        for _ in 0..6 {
            let reports = sim.step_all();
            assert_eq!(reports.len(), 4);
        }
        assert!(sim.scoreboard().iter().all(|line| line.minute == 30));
    }

    #[test]
    fn test_instant_finishes_everything() {
        let mut sim = coordinator(5);
        sim.set_speed(MatchSpeed::Instant);
        sim.advance(Duration::ZERO);
        assert!(sim.all_finished());
        assert!(sim.scoreboard().iter().all(|l| l.status == MatchStatus::Finished));
        assert_eq!(sim.results().len(), 5);
        // finished matches are skipped
        assert!(sim.step_all().is_empty());
    }

    #[test]
    fn test_completion_logged_once() {
        let mut sim = coordinator(3);
        assert!(!sim.log_if_done());
        for i in 0..3 {
            let m = sim.get_mut(i).unwrap();
            while m.step().is_some() {}
        }
        assert!(sim.log_if_done());

        // 끝난 뒤의 호출은 다시 기록하지 않는다
        assert!(sim.step_all().is_empty());
        sim.set_speed(MatchSpeed::Instant);
        sim.advance(Duration::from_secs(1));
        assert!(!sim.log_if_done());

        // 새 경기가 합류하면 완료 시 다시 기록한다
        sim.add(LiveMatchController::new(create_test_setup(70, 68), EngineConfig::default(), 9).unwrap());
        assert!(!sim.log_if_done());
        while !sim.get(3).unwrap().is_finished() {
            sim.get_mut(3).unwrap().step();
        }
        assert!(sim.log_if_done());
    }

    #[test]
    fn test_per_match_mutation_is_isolated() {
        let mut sim = coordinator(2);
        sim.step_all();
        assert!(sim.get_mut(0).unwrap().change_tactic(TeamSide::Home, Tactic::UltraAttacking));
        assert_eq!(sim.get(0).unwrap().engine().setup().home.tactic(), Tactic::UltraAttacking);
        assert_eq!(sim.get(1).unwrap().engine().setup().home.tactic(), Tactic::Balanced);
    }

    #[test]
    fn test_scoreboard_display() {
        let sim = coordinator(1);
        let line = sim.scoreboard()[0].to_string();
        assert_eq!(line, "  0' Home FC 0-0 Away United");
    }
}
