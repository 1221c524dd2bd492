use thiserror::Error;

use crate::domain::{Chips, EmptyShoe};
use crate::engine::actions::PlayerAction;
use crate::engine::game_loop::Phase;

/// Blackjack engine errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Bet of {bet} is not allowed with a wallet of {wallet}")]
    InvalidBet { bet: Chips, wallet: Chips },

    #[error("{action} is not allowed during {phase:?}")]
    IllegalAction { action: PlayerAction, phase: Phase },

    #[error("A round is already in progress")]
    RoundInProgress,

    #[error("No round is in progress")]
    NoActiveRound,

    #[error(transparent)]
    EmptyShoe(#[from] EmptyShoe),
}
