//! Blackjack round engine: dealing, player decisions, dealer policy, payouts.
//!
//! High-level object: `Table`
//! Main operations:
//!   - `Table::start_round` – escrow a bet and deal the opening cards
//!   - `Table::apply_action` – apply Hit / Stay / Double
//!   - `Table::legal_actions` – decisions the player may take right now

pub mod actions;
pub mod dealer;
pub mod errors;
pub mod game_loop;
pub mod payout;
pub mod round_history;
pub mod validation;

pub use actions::PlayerAction;
pub use dealer::{dealer_should_hit, play_dealer, DEALER_STANDS_ON};
pub use errors::EngineError;
pub use game_loop::{
    build_shoe, Phase, RoundEngine, RoundStatus, RoundSummary, Table, DEFAULT_RESHUFFLE_THRESHOLD,
};
pub use payout::{settle, Outcome, BLACKJACK_RETURN};
pub use round_history::{Party, RoundEvent, RoundEventKind, RoundHistory};

/// Shuffling interface for the engine.
/// Implementations live in infra (a wrapper over `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
