//! Card tracking with sent-off support (yellow accumulation + red cards).

use std::collections::{HashMap, HashSet};

use crate::models::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardResult {
    /// First yellow
    Warning,
    /// Second yellow (YELLOW then RED) or straight red
    SentOff,
}

#[derive(Debug, Clone, Default)]
pub struct CardSystem {
    yellow_cards: HashMap<PlayerId, u8>,
    sent_off: HashSet<PlayerId>,
}

impl CardSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a card. Returns the outcome and the player's yellow count.
    pub fn issue_card(&mut self, player: PlayerId, card_type: CardType) -> (CardResult, u8) {
        match card_type {
            CardType::Yellow => {
                let count = {
                    let entry = self.yellow_cards.entry(player).or_insert(0);
                    *entry = entry.saturating_add(1);
                    *entry
                };
                if count >= 2 {
                    self.sent_off.insert(player);
                    (CardResult::SentOff, count)
                } else {
                    (CardResult::Warning, count)
                }
            }
            CardType::Red => {
                self.sent_off.insert(player);
                (CardResult::SentOff, self.yellow_count(player))
            }
        }
    }

    pub fn is_sent_off(&self, player: PlayerId) -> bool {
        self.sent_off.contains(&player)
    }

    pub fn yellow_count(&self, player: PlayerId) -> u8 {
        *self.yellow_cards.get(&player).unwrap_or(&0)
    }

    pub fn sent_off_count(&self) -> usize {
        self.sent_off.len()
    }

    pub fn reset(&mut self) {
        self.yellow_cards.clear();
        self.sent_off.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_yellow_sends_off() {
        let mut cards = CardSystem::new();
        let (result, count) = cards.issue_card(7, CardType::Yellow);
        assert_eq!(result, CardResult::Warning);
        assert_eq!(count, 1);
        assert!(!cards.is_sent_off(7));

        let (result, count) = cards.issue_card(7, CardType::Yellow);
        assert_eq!(result, CardResult::SentOff);
        assert_eq!(count, 2);
        assert!(cards.is_sent_off(7));
    }

    #[test]
    fn test_straight_red_keeps_yellow_count() {
        let mut cards = CardSystem::new();
        cards.issue_card(3, CardType::Yellow);
        let (result, count) = cards.issue_card(3, CardType::Red);
        assert_eq!(result, CardResult::SentOff);
        assert_eq!(count, 1);
        assert_eq!(cards.sent_off_count(), 1);
    }

    #[test]
    fn test_reset_clears() {
        let mut cards = CardSystem::new();
        cards.issue_card(5, CardType::Yellow);
        cards.issue_card(5, CardType::Red);
        cards.reset();
        assert_eq!(cards.yellow_count(5), 0);
        assert!(!cards.is_sent_off(5));
    }
}
