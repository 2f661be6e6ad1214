//! Player Selection System
//!
//! Weighted draws over the players currently on the pitch:
//! - Scorer / chance taker (FWD ≫ MID > DEF ≫ GK)
//! - Assister (MID favored, excludes scorer)
//! - Carded player (DEF/MID favored)
//! - Injured player (uniform)
//!
//! Weight = position weight × effective skill. Sent-off players never take
//! part in any draw.

use super::MatchEngine;
use crate::engine::config::PositionWeights;
use crate::engine::probability::weighted_index;
use crate::models::{PlayerId, Position, TeamSide};
use crate::player::skill_model::effective_skill;

impl MatchEngine {
    // ===========================================
    // Player Selection System
    // ===========================================

    /// Starters of `side` still on the pitch, with their deployed position.
    pub(crate) fn on_pitch(&self, side: TeamSide) -> Vec<(PlayerId, Position)> {
        self.setup
            .sheet(side)
            .lineup()
            .filter(|(id, _)| !self.cards.is_sent_off(*id))
            .collect()
    }

    pub(crate) fn select_scorer(&mut self, side: TeamSide) -> Option<PlayerId> {
        let weights = self.config.goals.scorer_weights;
        self.select_weighted(side, &weights, None)
    }

    pub(crate) fn select_assister(&mut self, side: TeamSide, scorer: PlayerId) -> Option<PlayerId> {
        let weights = self.config.goals.assister_weights;
        self.select_weighted(side, &weights, Some(scorer))
    }

    pub(crate) fn select_carded(&mut self, side: TeamSide) -> Option<PlayerId> {
        let weights = self.config.discipline.weights;
        self.select_weighted(side, &weights, None)
    }

    /// Uniform over on-pitch players not already injured this match.
    pub(crate) fn select_injured(&mut self, side: TeamSide) -> Option<PlayerId> {
        let candidates: Vec<PlayerId> = self
            .on_pitch(side)
            .into_iter()
            .map(|(id, _)| id)
            .filter(|id| !self.injured.contains(id))
            .collect();
        let weights = vec![1.0; candidates.len()];
        weighted_index(&weights, &mut *self.rng).map(|i| candidates[i])
    }

    fn select_weighted(
        &mut self,
        side: TeamSide,
        weights: &PositionWeights,
        exclude: Option<PlayerId>,
    ) -> Option<PlayerId> {
        let lineup = self.on_pitch(side);
        let teammates: Vec<PlayerId> = lineup.iter().map(|(id, _)| *id).collect();

        let w: Vec<f64> = lineup
            .iter()
            .map(|(id, position)| {
                if Some(*id) == exclude {
                    return 0.0;
                }
                match self.setup.player(*id) {
                    Some(p) => weights.get(*position) * effective_skill(p, *position, &teammates, &self.config.skill),
                    None => 0.0,
                }
            })
            .collect();

        weighted_index(&w, &mut *self.rng).map(|i| lineup[i].0)
    }
}
