//! Blackjack domain model: cards, the shoe, hands, chips and the player.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;

// Re-exports so other modules can write crate::domain::Card and so on.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
