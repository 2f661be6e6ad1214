//! Match Simulation Engine
//!
//! Probabilistic tick loop over aggregate team power. No pitch coordinates,
//! no movement: each tick rolls goals, cards and injuries against closed-form
//! probabilities (`engine::probability`).
//!
//! ## State machine
//! `SCHEDULED → LIVE → FINISHED`
//!
//! ## Tick order (fixed)
//! 1. Accrue tick minutes to every player on the pitch
//! 2. Home attack, then away attack (GOAL / CHANCE)
//! 3. Cards (YELLOW, second yellow → YELLOW + RED, straight RED)
//! 4. Injuries
//! 5. Advance the clock; on reaching 90' draw 1–5 minutes of injury time,
//!    FINISHED once it has been played
//!
//! Batch mode (`simulate`) and live mode (`step_tick`, driven by
//! `LiveMatchController`) share the same tick code. Events carry the minute
//! at the start of their tick.
//!
//! ## Randomness
//! The generator is injected at construction. Same seed + same setup + same
//! config ⇒ identical event log.

mod card_system;
mod player_selection;
mod substitutions;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use card_system::{CardResult, CardSystem, CardType};

use std::collections::{BTreeMap, HashSet};

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::EngineConfig;
use super::probability::{card_chance, draw_injury_weeks, draw_stoppage, goal_chance, injury_chance};
use super::team_power::{TeamPower, TeamPowerCalculator};
use crate::error::SetupError;
use crate::models::{
    MatchEvent, MatchResult, MatchSetup, MatchStatus, PlayerId, PlayerMatchStats, Score, TeamSide,
};

// ============================================================================
// State
// ============================================================================

/// Mutable per-match record. Owned by exactly one engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchState {
    pub minute: u8,
    pub score: Score,
    pub events: Vec<MatchEvent>,
    pub status: MatchStatus,
    /// Indexed by `TeamSide::index()`
    pub subs_remaining: [u8; 2],
    pub power: [TeamPower; 2],
}

/// What one tick produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickReport {
    /// Clock after the tick
    pub minute: u8,
    pub score: Score,
    pub events: Vec<MatchEvent>,
    pub status: MatchStatus,
    /// This tick crossed the half-time mark
    pub half_time: bool,
}

// ============================================================================
// Engine
// ============================================================================

pub struct MatchEngine {
    pub(crate) setup: MatchSetup,
    pub(crate) config: EngineConfig,
    calculator: TeamPowerCalculator,
    pub(crate) rng: Box<dyn RngCore + Send>,
    pub(crate) state: MatchState,
    pub(crate) cards: CardSystem,
    pub(crate) injured: HashSet<PlayerId>,
    pub(crate) stats: BTreeMap<PlayerId, PlayerMatchStats>,
    tick_minutes: u8,
    stoppage_end: Option<u8>,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("home", &self.setup.home.name)
            .field("away", &self.setup.away.name)
            .field("state", &self.state)
            .field("tick_minutes", &self.tick_minutes)
            .finish_non_exhaustive()
    }
}

impl MatchEngine {
    /// Reproducible engine: ChaCha8 seeded with `seed`.
    pub fn new(setup: MatchSetup, config: EngineConfig, seed: u64) -> Result<Self, SetupError> {
        Self::with_rng(setup, config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Production engine with a non-reproducible seed.
    pub fn from_entropy(setup: MatchSetup, config: EngineConfig) -> Result<Self, SetupError> {
        Self::with_rng(setup, config, ChaCha8Rng::from_entropy())
    }

    /// Any generator. Batch tick size from `config.timing`.
    pub fn with_rng(
        setup: MatchSetup,
        config: EngineConfig,
        rng: impl RngCore + Send + 'static,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let calculator = TeamPowerCalculator::new(config.skill.clone(), config.power.clone());
        let tick_minutes = config.timing.batch_tick_minutes;
        let state = Self::initial_state(&setup, &config, &calculator);
        Ok(Self {
            setup,
            config,
            calculator,
            rng: Box::new(rng),
            state,
            cards: CardSystem::new(),
            injured: HashSet::new(),
            stats: BTreeMap::new(),
            tick_minutes,
            stoppage_end: None,
        })
    }

    fn initial_state(setup: &MatchSetup, config: &EngineConfig, calc: &TeamPowerCalculator) -> MatchState {
        let power = TeamSide::BOTH.map(|side| calc.calculate(setup.sheet(side), setup.roster(), setup.context(side)));
        MatchState {
            minute: 0,
            score: Score::default(),
            events: Vec::new(),
            status: MatchStatus::Scheduled,
            subs_remaining: [config.max_substitutions; 2],
            power,
        }
    }

    /// Start a new match on this engine, keeping config, tick size and generator.
    pub fn reset(&mut self, setup: MatchSetup) {
        self.state = Self::initial_state(&setup, &self.config, &self.calculator);
        self.setup = setup;
        self.cards.reset();
        self.injured.clear();
        self.stats.clear();
        self.stoppage_end = None;
    }

    /// In-game minutes per tick (at least 1).
    pub fn set_tick_minutes(&mut self, minutes: u8) {
        self.tick_minutes = minutes.max(1);
    }

    // ========== Accessors ==========

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn setup(&self) -> &MatchSetup {
        &self.setup
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn minute(&self) -> u8 {
        self.state.minute
    }

    pub fn score(&self) -> Score {
        self.state.score
    }

    pub fn status(&self) -> MatchStatus {
        self.state.status
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.state.events
    }

    pub fn power(&self, side: TeamSide) -> TeamPower {
        self.state.power[side.index()]
    }

    pub fn subs_remaining(&self, side: TeamSide) -> u8 {
        self.state.subs_remaining[side.index()]
    }

    pub fn is_sent_off(&self, id: PlayerId) -> bool {
        self.cards.is_sent_off(id)
    }

    pub fn tick_minutes(&self) -> u8 {
        self.tick_minutes
    }

    pub fn is_finished(&self) -> bool {
        self.state.status == MatchStatus::Finished
    }

    /// Snapshot of the match so far (final once FINISHED).
    pub fn result(&self) -> MatchResult {
        MatchResult {
            home_team: self.setup.home.name.clone(),
            away_team: self.setup.away.name.clone(),
            status: self.state.status,
            minute: self.state.minute,
            score: self.state.score,
            events: self.state.events.clone(),
            player_stats: self.stats.clone(),
        }
    }

    // ========== Execution ==========

    /// SCHEDULED → LIVE. No-op otherwise.
    pub fn kick_off(&mut self) {
        if self.state.status != MatchStatus::Scheduled {
            return;
        }
        let baseline = self.config.ratings.baseline;
        for side in TeamSide::BOTH {
            for id in self.setup.sheet(side).starting_eleven() {
                self.stats.entry(*id).or_insert_with(|| PlayerMatchStats::new(side, baseline));
            }
        }
        self.state.status = MatchStatus::Live;
        debug!("Kick-off: {} vs {}", self.setup.home.name, self.setup.away.name);
    }

    /// Run one tick. Kicks off a scheduled match first; a finished match
    /// returns an empty report.
    pub fn step_tick(&mut self) -> TickReport {
        if self.state.status == MatchStatus::Scheduled {
            self.kick_off();
        }
        if self.state.status == MatchStatus::Finished {
            return self.report(Vec::new(), false);
        }

        let minute = self.state.minute;
        let step = self.step_length();
        let first_event = self.state.events.len();

        self.accrue_minutes(step);
        for side in TeamSide::BOTH {
            self.attack_phase(side, minute, step);
        }
        for side in TeamSide::BOTH {
            self.card_phase(side, minute, step);
        }
        for side in TeamSide::BOTH {
            self.injury_phase(side, minute, step);
        }
        self.advance_clock(step);

        let half = self.config.timing.half_time_minute;
        let half_time = minute < half && self.state.minute >= half;
        let events = self.state.events[first_event..].to_vec();
        self.report(events, half_time)
    }

    /// Batch mode: tick until FINISHED.
    pub fn simulate(&mut self) -> MatchResult {
        while self.state.status != MatchStatus::Finished {
            self.step_tick();
        }
        self.result()
    }

    fn report(&self, events: Vec<MatchEvent>, half_time: bool) -> TickReport {
        TickReport {
            minute: self.state.minute,
            score: self.state.score,
            events,
            status: self.state.status,
            half_time,
        }
    }

    pub(crate) fn recompute_power(&mut self, side: TeamSide) {
        self.state.power[side.index()] =
            self.calculator.calculate(self.setup.sheet(side), self.setup.roster(), self.setup.context(side));
    }

    // ========== Tick phases ==========

    fn accrue_minutes(&mut self, step: u8) {
        for side in TeamSide::BOTH {
            for (id, _) in self.on_pitch(side) {
                if let Some(s) = self.stats.get_mut(&id) {
                    s.minutes = s.minutes.saturating_add(step as u16);
                }
            }
        }
    }

    fn attack_phase(&mut self, side: TeamSide, minute: u8, step: u8) {
        let goals = &self.config.goals;
        let attacker = self.state.power[side.index()];
        let defender = self.state.power[side.opponent().index()];
        let deficit = self.state.score.deficit(side);
        let chance = goal_chance(&attacker, &defender, minute, step, deficit, goals);
        let near_miss = chance * goals.near_miss_factor;
        let assist_probability = goals.assist_probability;

        let roll = self.rng.gen::<f64>();
        if roll < chance {
            let Some(scorer) = self.select_scorer(side) else {
                return;
            };
            let assister = if self.rng.gen::<f64>() < assist_probability {
                self.select_assister(side, scorer)
            } else {
                None
            };

            self.state.score.add_goal(side);
            self.state.events.push(MatchEvent::goal(minute, side, scorer, assister));
            let ratings = &self.config.ratings;
            if let Some(s) = self.stats.get_mut(&scorer) {
                s.goals += 1;
                s.rating = ratings.apply(s.rating, ratings.goal);
            }
            if let Some(a) = assister.and_then(|id| self.stats.get_mut(&id)) {
                a.assists += 1;
                a.rating = ratings.apply(a.rating, ratings.assist);
            }
            debug!("{}' GOAL {:?} {} ({})", minute, side, scorer, self.state.score);
        } else if roll < near_miss {
            if let Some(shooter) = self.select_scorer(side) {
                self.state.events.push(MatchEvent::chance(minute, side, shooter));
                if let Some(s) = self.stats.get_mut(&shooter) {
                    s.chances = s.chances.saturating_add(1);
                }
            }
        }
    }

    fn card_phase(&mut self, side: TeamSide, minute: u8, step: u8) {
        let chance = card_chance(minute, step, &self.config.discipline);
        if chance <= 0.0 || self.rng.gen::<f64>() >= chance {
            return;
        }
        let Some(player) = self.select_carded(side) else {
            return;
        };
        let straight_red = self.rng.gen::<f64>() < self.config.discipline.straight_red_probability;
        let card = if straight_red { CardType::Red } else { CardType::Yellow };
        let (outcome, _) = self.cards.issue_card(player, card);

        let ratings = &self.config.ratings;
        let line = self.stats.get_mut(&player);
        match (card, outcome) {
            (CardType::Yellow, CardResult::Warning) => {
                self.state.events.push(MatchEvent::yellow(minute, side, player));
                if let Some(s) = line {
                    s.yellow_cards += 1;
                    s.rating = ratings.apply(s.rating, ratings.yellow);
                }
                debug!("{}' YELLOW {:?} {}", minute, side, player);
            }
            (CardType::Yellow, CardResult::SentOff) => {
                self.state.events.push(MatchEvent::yellow(minute, side, player));
                self.state.events.push(MatchEvent::red(minute, side, player));
                if let Some(s) = line {
                    s.yellow_cards += 1;
                    s.red_card = true;
                    s.rating = ratings.apply(ratings.apply(s.rating, ratings.yellow), ratings.red);
                }
                debug!("{}' second YELLOW → RED {:?} {}", minute, side, player);
            }
            (CardType::Red, _) => {
                self.state.events.push(MatchEvent::red(minute, side, player));
                if let Some(s) = line {
                    s.red_card = true;
                    s.rating = ratings.apply(s.rating, ratings.red);
                }
                debug!("{}' RED {:?} {}", minute, side, player);
            }
        }
    }

    fn injury_phase(&mut self, side: TeamSide, minute: u8, step: u8) {
        let chance = injury_chance(step, &self.config.injuries);
        if chance <= 0.0 || self.rng.gen::<f64>() >= chance {
            return;
        }
        let Some(player) = self.select_injured(side) else {
            return;
        };
        let weeks = draw_injury_weeks(&self.config.injuries.severity, &mut *self.rng);
        self.injured.insert(player);
        self.state.events.push(MatchEvent::injury(minute, side, player, weeks));
        if let Some(s) = self.stats.get_mut(&player) {
            s.injury_weeks = Some(weeks);
        }
        debug!("{}' INJURY {:?} {} ({} weeks)", minute, side, player, weeks);
    }

    // ========== Clock ==========

    /// Tick length, shortened so the clock lands exactly on 90' and on the
    /// end of injury time.
    fn step_length(&self) -> u8 {
        let minute = self.state.minute;
        let regulation = self.config.timing.regulation_minutes;
        let remaining = match self.stoppage_end {
            Some(end) => end.saturating_sub(minute),
            None if minute < regulation => regulation - minute,
            None => self.tick_minutes,
        };
        self.tick_minutes.min(remaining).max(1)
    }

    fn advance_clock(&mut self, step: u8) {
        self.state.minute = self.state.minute.saturating_add(step);
        let timing = &self.config.timing;

        if self.stoppage_end.is_none() && self.state.minute >= timing.regulation_minutes {
            let stoppage = draw_stoppage(timing, &mut *self.rng);
            self.stoppage_end = Some(timing.regulation_minutes.saturating_add(stoppage));
        }
        if let Some(end) = self.stoppage_end {
            if self.state.minute >= end {
                self.state.status = MatchStatus::Finished;
                info!(
                    "Full time ({}'): {} {} {}",
                    self.state.minute, self.setup.home.name, self.state.score, self.setup.away.name
                );
            }
        }
    }
}

/// Batch-simulate one match with a seeded generator.
pub fn simulate_match(setup: MatchSetup, config: EngineConfig, seed: u64) -> Result<MatchResult, SetupError> {
    let mut engine = MatchEngine::new(setup, config, seed)?;
    Ok(engine.simulate())
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;
    use crate::models::EventType;
    use crate::tactics::Tactic;

    #[test]
    fn test_batch_match_finishes_after_ninety() {
        for seed in 0..20 {
            let result = simulate_match(create_test_setup(70, 70), EngineConfig::default(), seed).unwrap();
            assert_eq!(result.status, MatchStatus::Finished);
            assert!((91..=95).contains(&result.minute), "seed {} minute {}", seed, result.minute);
            assert!(result.events.windows(2).all(|w| w[0].minute <= w[1].minute));
            assert_eq!(result.goals().count() as u16, result.score.total());
        }
    }

    #[test]
    fn test_same_seed_same_event_log() {
        let a = simulate_match(create_test_setup(72, 68), EngineConfig::default(), 1234).unwrap();
        let b = simulate_match(create_test_setup(72, 68), EngineConfig::default(), 1234).unwrap();
        assert_eq!(a.event_log_digest(), b.event_log_digest());
        assert_eq!(serde_json::to_vec(&a.events).unwrap(), serde_json::to_vec(&b.events).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let digests: HashSet<String> = (0..10)
            .map(|seed| {
                simulate_match(create_test_setup(70, 70), EngineConfig::default(), seed)
                    .unwrap()
                    .event_log_digest()
            })
            .collect();
        assert!(digests.len() > 1);
    }

    #[test]
    fn test_injuries_hit_each_player_once_and_match_stats() {
        let mut config = EngineConfig::default();
        config.injuries.rate_per_minute = 0.05;
        let mut total = 0;
        for seed in 0..10 {
            let result = simulate_match(create_test_setup(70, 70), config.clone(), seed).unwrap();
            let mut injured = HashSet::new();
            for event in result.events.iter().filter(|e| e.event_type == EventType::Injury) {
                assert!(injured.insert(event.player_id), "seed {}: {} injured twice", seed, event.player_id);
                let weeks = event.injury_weeks.unwrap();
                assert!((1..=7).contains(&weeks), "seed {}: {} weeks", seed, weeks);
                assert_eq!(result.player_stats[&event.player_id].injury_weeks, event.injury_weeks);
            }
            let with_weeks = result.player_stats.values().filter(|s| s.injury_weeks.is_some()).count();
            assert_eq!(with_weeks, injured.len());
            total += injured.len();
        }
        assert!(total > 0);
    }

    #[test]
    fn test_status_transitions() {
        let mut engine = create_test_engine(70, 70, 5);
        assert_eq!(engine.status(), MatchStatus::Scheduled);
        let first = engine.step_tick();
        assert_eq!(first.status, MatchStatus::Live);
        assert_eq!(first.minute, 1);
        engine.simulate();
        assert!(engine.is_finished());
        let after = engine.step_tick();
        assert!(after.events.is_empty());
        assert_eq!(after.minute, engine.minute());
    }

    #[test]
    fn test_half_time_reported_once() {
        let mut engine = create_test_engine(70, 70, 9);
        let mut half_times = Vec::new();
        while !engine.is_finished() {
            let r = engine.step_tick();
            if r.half_time {
                half_times.push(r.minute);
            }
        }
        assert_eq!(half_times, vec![45]);
    }

    #[test]
    fn test_five_minute_ticks_land_on_ninety() {
        let mut engine = create_test_engine(70, 70, 21);
        engine.set_tick_minutes(5);
        let mut minutes = Vec::new();
        while !engine.is_finished() {
            minutes.push(engine.step_tick().minute);
        }
        assert_eq!(&minutes[..18], &(1..=18).map(|i| i * 5).collect::<Vec<u8>>()[..]);
        assert!(*minutes.last().unwrap() > 90);
    }

    #[test]
    fn test_sent_off_players_never_act_again() {
        let mut config = EngineConfig::default();
        config.discipline.card_rate_per_minute = 0.25;
        config.discipline.straight_red_probability = 0.3;

        for seed in 0..10 {
            let result = simulate_match(create_test_setup(70, 70), config.clone(), seed).unwrap();
            let mut sent_off: HashSet<PlayerId> = HashSet::new();
            for e in &result.events {
                let involved = [Some(e.player_id), if e.event_type == EventType::Goal { e.secondary_player_id } else { None }];
                for id in involved.into_iter().flatten() {
                    assert!(!sent_off.contains(&id), "seed {}: {} acted after red: {:?}", seed, id, e);
                }
                if e.event_type == EventType::Red {
                    sent_off.insert(e.player_id);
                }
            }
            assert!(!sent_off.is_empty());
        }
    }

    #[test]
    fn test_second_yellow_emits_yellow_then_red() {
        let mut config = EngineConfig::default();
        config.discipline.card_rate_per_minute = 0.5;
        config.discipline.straight_red_probability = 0.0;
        let result = simulate_match(create_test_setup(70, 70), config, 3).unwrap();

        let reds: Vec<usize> = result
            .events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.event_type == EventType::Red)
            .map(|(i, _)| i)
            .collect();
        assert!(!reds.is_empty());
        for i in reds {
            let red = &result.events[i];
            let prev = &result.events[i - 1];
            assert_eq!(prev.event_type, EventType::Yellow);
            assert_eq!(prev.player_id, red.player_id);
            assert_eq!(prev.minute, red.minute);
            assert_eq!(result.player_stats[&red.player_id].yellow_cards, 2);
        }
    }

    #[test]
    fn test_minimal_config_has_no_cards_or_injuries() {
        let result = simulate_match(create_test_setup(70, 70), EngineConfig::minimal(), 8).unwrap();
        assert!(result
            .events
            .iter()
            .all(|e| e.event_type == EventType::Goal || e.event_type == EventType::Substitution));
    }

    #[test]
    fn test_ratings_follow_events() {
        for seed in 0..5 {
            let result = simulate_match(create_test_setup(75, 65), EngineConfig::default(), seed).unwrap();
            for (id, line) in &result.player_stats {
                let expected = 6.5 + line.goals as f32 * 1.0 + line.assists as f32 * 0.5
                    - line.yellow_cards as f32 * 0.5
                    - if line.red_card { 2.0 } else { 0.0 };
                assert!((1.0..=10.0).contains(&line.rating));
                // no clamping on the way up or down
                if line.goals as f32 + line.assists as f32 * 0.5 <= 3.5 {
                    assert!((line.rating - expected).abs() < 1e-4, "player {}", id);
                }
            }
        }
    }

    #[test]
    fn test_starters_accrue_full_minutes() {
        let result = simulate_match(create_test_setup(70, 70), EngineConfig::minimal(), 4).unwrap();
        assert_eq!(result.player_stats.len(), 22);
        for line in result.player_stats.values() {
            assert_eq!(line.minutes, result.minute as u16);
        }
    }

    #[test]
    fn test_substitution_rules() {
        let mut engine = create_test_engine(70, 70, 2);
        let home = engine.setup().home.clone();
        let out = home.starting_eleven()[10];
        let bench = home.bench().to_vec();

        // not on bench / not starting
        assert!(!engine.substitute(TeamSide::Home, out, 9999));
        assert!(!engine.substitute(TeamSide::Home, bench[0], bench[1]));

        assert!(engine.substitute(TeamSide::Home, out, bench[0]));
        assert_eq!(engine.subs_remaining(TeamSide::Home), 4);
        let last = engine.events().last().unwrap();
        assert_eq!(last.event_type, EventType::Substitution);
        assert_eq!(last.player_id, bench[0]);
        assert_eq!(last.secondary_player_id, Some(out));

        // substituted-out player cannot come back
        let now_on = bench[0];
        assert!(!engine.substitute(TeamSide::Home, now_on, out));
        // away side untouched
        assert_eq!(engine.subs_remaining(TeamSide::Away), 5);
    }

    #[test]
    fn test_substitution_budget_exhausts() {
        let mut engine = create_test_engine(70, 70, 2);
        let home = engine.setup().home.clone();
        let bench = home.bench().to_vec();
        let starters = home.starting_eleven().to_vec();
        assert!(bench.len() >= 6);

        for i in 0..5 {
            assert!(engine.substitute(TeamSide::Home, starters[1 + i], bench[i]));
        }
        assert_eq!(engine.subs_remaining(TeamSide::Home), 0);
        let before = engine.state().clone();
        assert!(!engine.substitute(TeamSide::Home, starters[7], bench[5]));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_power_changes_only_with_different_skill() {
        let mut engine = create_test_engine(70, 70, 2);
        let home = engine.setup().home.clone();
        let before = engine.power(TeamSide::Home);

        // same position, same skill: power unchanged
        let def_out = home.starting_eleven()[1];
        let def_in = bench_player_at(&engine, TeamSide::Home, crate::models::Position::DEF);
        assert!(engine.substitute(TeamSide::Home, def_out, def_in));
        assert_eq!(engine.power(TeamSide::Home), before);

        // midfielder in for a forward: adjacent fit lowers attack
        let fwd_out = home.starting_eleven()[10];
        let mid_in = bench_player_at(&engine, TeamSide::Home, crate::models::Position::MID);
        assert!(engine.substitute(TeamSide::Home, fwd_out, mid_in));
        assert!(engine.power(TeamSide::Home).attack < before.attack);
    }

    #[test]
    fn test_no_substitution_after_full_time() {
        let mut engine = create_test_engine(70, 70, 6);
        engine.simulate();
        let home = engine.setup().home.clone();
        assert!(!engine.substitute(TeamSide::Home, home.starting_eleven()[5], home.bench()[0]));
    }

    #[test]
    fn test_change_tactic_recomputes_power_and_blocks_in_stoppage() {
        let mut engine = create_test_engine(70, 70, 6);
        let before = engine.power(TeamSide::Away);
        assert!(engine.change_tactic(TeamSide::Away, Tactic::UltraDefensive));
        let after = engine.power(TeamSide::Away);
        assert!(after.defense > before.defense);
        assert!(after.attack < before.attack);
        assert_eq!(engine.setup().away.tactic(), Tactic::UltraDefensive);
        // no event emitted
        assert!(engine.events().is_empty());

        while engine.minute() < 90 {
            engine.step_tick();
        }
        if !engine.is_finished() {
            assert!(!engine.change_tactic(TeamSide::Away, Tactic::Balanced));
        }
        engine.simulate();
        assert!(!engine.change_tactic(TeamSide::Away, Tactic::Balanced));
    }

    #[test]
    fn test_reset_restores_budget_and_clock() {
        let mut engine = create_test_engine(70, 70, 6);
        let home = engine.setup().home.clone();
        engine.substitute(TeamSide::Home, home.starting_eleven()[3], home.bench()[0]);
        engine.simulate();

        engine.reset(create_test_setup(70, 70));
        assert_eq!(engine.status(), MatchStatus::Scheduled);
        assert_eq!(engine.minute(), 0);
        assert_eq!(engine.subs_remaining(TeamSide::Home), 5);
        assert!(engine.events().is_empty());
        assert_eq!(engine.score(), Score::default());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = EngineConfig::default();
        config.timing.batch_tick_minutes = 0;
        let err = MatchEngine::new(create_test_setup(70, 70), config, 1).unwrap_err();
        assert!(matches!(err, SetupError::InvalidConfig(_)));
    }

    #[test]
    fn test_stronger_side_wins_more_often() {
        let (mut strong, mut weak) = (0, 0);
        for seed in 0..300 {
            let r = simulate_match(create_test_setup(85, 55), EngineConfig::default(), seed).unwrap();
            match r.score.winner() {
                Some(TeamSide::Home) => strong += 1,
                Some(TeamSide::Away) => weak += 1,
                None => {}
            }
        }
        assert!(strong > weak * 3, "strong {} weak {}", strong, weak);
    }
}
