use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::engine::actions::PlayerAction;
use crate::engine::game_loop::Phase;
use crate::engine::payout::Outcome;

/// Who received a card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Party {
    Player,
    Dealer,
}

/// Event kind within a round.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RoundEventKind {
    /// The shoe was replaced before the round.
    ShoeRebuilt { cards: usize },

    /// Bet escrowed, round started.
    RoundStarted { round_id: u64, bet: Chips },

    /// Card dealt during the initial deal or on a player hit/double.
    CardDealt { to: Party, card: Card },

    PhaseChanged { phase: Phase },

    PlayerActed {
        action: PlayerAction,
        bet_after: Chips,
        total_after: u16,
    },

    /// Dealer drew one card under 17.
    DealerHit { card: Card, total: u16 },

    DealerStood { total: u16 },

    RoundResolved { outcome: Outcome, payout: Chips },

    /// Round abandoned after an engine failure; the stake went back to the wallet.
    RoundVoided { refund: Chips },
}

/// Event with its sequence number.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Full log of one round.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }

    /// Cards the dealer drew during the dealer turn, in order, with the running total.
    pub fn dealer_hits(&self) -> impl Iterator<Item = (Card, u16)> + '_ {
        self.events.iter().filter_map(|e| match e.kind {
            RoundEventKind::DealerHit { card, total } => Some((card, total)),
            _ => None,
        })
    }

    /// The dealer turn was played this round.
    pub fn dealer_played(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e.kind, RoundEventKind::DealerStood { .. }))
    }
}
