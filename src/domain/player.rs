use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Hand;

/// The single player: bankroll plus the hand being played.
///
/// The wallet lives for the whole session and is persisted between runs;
/// the hand is reset at the start of every round.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub wallet: Chips,
    pub hand: Hand,
}

impl Player {
    pub fn new(wallet: Chips) -> Self {
        Self {
            wallet,
            hand: Hand::new(),
        }
    }

    /// Move `amount` out of the wallet and return it.
    /// No checks here: the engine validates bets before calling this.
    pub fn place_bet(&mut self, amount: Chips) -> Chips {
        self.wallet -= amount;
        amount
    }

    /// Credit `amount` to the wallet.
    pub fn receive_winnings(&mut self, amount: Chips) {
        self.wallet += amount;
    }

    pub fn can_afford(&self, amount: Chips) -> bool {
        amount <= self.wallet
    }

    pub fn is_broke(&self) -> bool {
        !self.wallet.is_positive()
    }

    pub fn reset_hand(&mut self) {
        self.hand.clear();
    }
}
