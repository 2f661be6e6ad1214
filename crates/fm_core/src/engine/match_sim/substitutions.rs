//! Player Substitution and Tactic Changes
//!
//! 경기 중 사용자 개입 (교체 / 전술 변경).
//!
//! Both operations are user-triggered and never error: invalid requests
//! return `false` and leave the match untouched.
//!
//! 교체 규칙:
//! - 남은 교체 횟수가 0이면 불가
//! - `out`은 선발 11명, `in`은 벤치에 있어야 함
//! - 퇴장 선수는 교체 불가, 교체 아웃된 선수는 재투입 불가
//! - 경기 종료 후 불가

use tracing::debug;

use super::MatchEngine;
use crate::models::{MatchEvent, MatchStatus, PlayerId, PlayerMatchStats, TeamSide};
use crate::tactics::Tactic;

impl MatchEngine {
    /// Swap `out_id` (on the pitch) for `in_id` (bench) on `side`.
    pub fn substitute(&mut self, side: TeamSide, out_id: PlayerId, in_id: PlayerId) -> bool {
        if self.state.status == MatchStatus::Finished {
            return false;
        }
        if self.state.subs_remaining[side.index()] == 0 {
            return false;
        }
        if self.cards.is_sent_off(out_id) {
            return false;
        }
        {
            let sheet = self.setup.sheet(side);
            if !sheet.is_starting(out_id) || !sheet.is_on_bench(in_id) {
                return false;
            }
        }
        if self.setup.sheet_mut(side).apply_substitution(out_id, in_id).is_none() {
            return false;
        }

        self.state.subs_remaining[side.index()] -= 1;
        let minute = self.state.minute;
        self.state.events.push(MatchEvent::substitution(minute, side, in_id, out_id));
        let baseline = self.config.ratings.baseline;
        self.stats.entry(in_id).or_insert_with(|| PlayerMatchStats::new(side, baseline));
        self.recompute_power(side);

        debug!(
            "{}' {:?} substitution: {} on for {} ({} left)",
            minute,
            side,
            in_id,
            out_id,
            self.state.subs_remaining[side.index()]
        );
        true
    }

    /// Change `side`'s tactic and recompute its power. Rejected in stoppage
    /// time and after the final whistle.
    pub fn change_tactic(&mut self, side: TeamSide, tactic: Tactic) -> bool {
        if self.state.status == MatchStatus::Finished
            || self.state.minute >= self.config.timing.regulation_minutes
        {
            return false;
        }
        self.setup.sheet_mut(side).set_tactic(tactic);
        self.recompute_power(side);
        debug!("{}' {:?} switches to {}", self.state.minute, side, tactic.display_name());
        true
    }
}
