use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::engine::{Outcome, Phase, PlayerAction};

/// DTO of one hand as the player is allowed to see it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandViewDto {
    /// Face-up cards.
    pub cards: Vec<Card>,
    /// Number of face-down cards (the dealer's hole card during the player turn).
    pub hidden: usize,
    /// Total of the face-up cards; `None` while a card is hidden.
    pub total: Option<u16>,
}

/// DTO of the table for rendering.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub wallet: Chips,
    pub high_score: Chips,
    pub phase: Phase,
    /// Current stake, zero between rounds.
    pub bet: Chips,
    pub player: HandViewDto,
    pub dealer: HandViewDto,
    pub legal_actions: Vec<PlayerAction>,
    pub cards_in_shoe: usize,
    /// Outcome of the last resolved round, if the table is resolved.
    pub last_outcome: Option<Outcome>,
}
