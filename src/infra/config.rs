use std::path::PathBuf;
use std::time::Duration;

use crate::domain::chips::Chips;
use crate::engine::DEFAULT_RESHUFFLE_THRESHOLD;

/// Save file used when none is configured, relative to the working directory.
pub const DEFAULT_SAVE_FILE: &str = "blackjack_data.json";

/// Runtime settings. Rule constants (decks, dealer policy, payouts) are not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Where the wallet and high score are stored.
    pub save_path: PathBuf,
    /// The shoe is rebuilt before a round once fewer cards than this remain.
    pub reshuffle_threshold: usize,
    /// Bet offered when the player just presses Enter.
    pub default_bet: Chips,
    /// Pause per "thinking" dot while the dealer draws. Cosmetic only.
    pub dealer_delay_ms: u64,
    /// Fixed seed for reproducible shoes.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            reshuffle_threshold: DEFAULT_RESHUFFLE_THRESHOLD,
            default_bet: Chips(10),
            dealer_delay_ms: 400,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn dealer_delay(&self) -> Duration {
        Duration::from_millis(self.dealer_delay_ms)
    }
}
