use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

/// Number of standard decks in a casino shoe.
pub const DECKS_PER_SHOE: usize = 6;

/// Cards in one standard deck.
pub const CARDS_PER_DECK: usize = 52;

/// Drawing from a shoe with no cards left.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("the shoe is empty")]
pub struct EmptyShoe;

/// The dealer's shoe: an ordered list of cards, the top is the end of the vec.
/// Shuffling is done by the engine through a `RandomSource`, not here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shoe {
    pub cards: Vec<Card>,
}

impl Shoe {
    /// One standard 52-card deck in the order:
    /// Spades 2..A, Hearts 2..A, Diamonds 2..A, Clubs 2..A.
    pub fn standard_52() -> Self {
        Self::ordered(1)
    }

    /// `decks` concatenated standard decks, unshuffled.
    pub fn ordered(decks: usize) -> Self {
        let mut cards = Vec::with_capacity(decks * CARDS_PER_DECK);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Shoe { cards }
    }

    /// Shoe with a fixed card order. The last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Shoe { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Result<Card, EmptyShoe> {
        self.cards.pop().ok_or(EmptyShoe)
    }

    /// True when fewer than `threshold` cards remain.
    pub fn needs_refill(&self, threshold: usize) -> bool {
        self.cards.len() < threshold
    }
}
