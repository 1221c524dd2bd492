//! Infrastructure around the blackjack engine:
//! - RNG implementations for the engine;
//! - the save record store (JSON file / in-memory);
//! - runtime configuration.

pub mod config;
pub mod persistence;
pub mod rng;

pub use config::*;
pub use persistence::*;
pub use rng::*;
