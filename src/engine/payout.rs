use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Hand;

/// What a winning natural returns, stake included: 3:2 on top of the bet.
pub const BLACKJACK_RETURN: f64 = 2.5;

/// Result of a resolved round from the player's point of view.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Player natural against a dealer without one.
    Blackjack,
    PlayerWins,
    /// Includes a player bust.
    DealerWins,
    Push,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Blackjack => "Blackjack",
            Outcome::PlayerWins => "Player wins",
            Outcome::DealerWins => "Dealer wins",
            Outcome::Push => "Push",
        };
        f.write_str(s)
    }
}

/// Decide the outcome and how much goes back to the wallet.
///
/// `bet` was already taken from the wallet, so a loss credits nothing,
/// a push returns the stake and a win returns double.
pub fn settle(player: &Hand, dealer: &Hand, bet: Chips) -> (Outcome, Chips) {
    let player_total = player.value();
    let dealer_total = dealer.value();

    if player.is_blackjack() && !dealer.is_blackjack() {
        (Outcome::Blackjack, bet.scale(BLACKJACK_RETURN))
    } else if player.is_bust() {
        (Outcome::DealerWins, Chips::ZERO)
    } else if dealer.is_bust() || player_total > dealer_total {
        (Outcome::PlayerWins, bet * 2)
    } else if player_total < dealer_total {
        (Outcome::DealerWins, Chips::ZERO)
    } else {
        (Outcome::Push, bet)
    }
}
