//! Terminal blackjack against a dealer with a persistent wallet and high score.
//!
//! Layers:
//! - `domain` – cards, shoe, hands, chips, player;
//! - `engine` – round state machine, dealer policy, payouts;
//! - `session` – the coordinating object that owns one game;
//! - `infra` – RNG, save store, configuration;
//! - `api` – input parsing and the read-only table view.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod session;

pub use session::Session;
