use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Best possible blackjack total.
pub const BLACKJACK: u8 = 21;

/// Cards held by one party (player or dealer) during a single round.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Total of the hand together with the number of aces still counted as 11.
    ///
    /// Every ace starts at 11. While the total is over 21 and a soft ace remains,
    /// one ace is demoted to 1. The result depends only on the ranks held.
    fn evaluate(&self) -> (u16, u16) {
        let mut total: u16 = 0;
        let mut soft_aces: u16 = 0;

        for card in &self.cards {
            total += u16::from(card.value());
            if card.rank.is_ace() {
                soft_aces += 1;
            }
        }

        while total > u16::from(BLACKJACK) && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }

        (total, soft_aces)
    }

    /// Best total not exceeding 21 if one exists, otherwise the smallest busting total.
    pub fn value(&self) -> u16 {
        self.evaluate().0
    }

    /// An ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        self.evaluate().1 > 0
    }

    pub fn is_bust(&self) -> bool {
        self.value() > u16::from(BLACKJACK)
    }

    /// A natural: exactly two cards worth 21. A 21 made of three or more cards is not blackjack.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == u16::from(BLACKJACK)
    }
}

impl fmt::Display for Hand {
    /// `A♠, K♥ (Total: 21)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "{} (Total: {})", cards.join(", "), self.value())
    }
}
