//! Game session: the one object that owns the player, the table, the high score
//! and the save store for the lifetime of the process.
//!
//! Every resolved round is persisted before the next one can start.

use tracing::{info, warn};

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::engine::{EngineError, PlayerAction, RandomSource, RoundStatus, Table};
use crate::infra::config::GameConfig;
use crate::infra::persistence::{GameStore, PersistenceError, SaveData, STARTING_WALLET};

pub struct Session<S: GameStore, R: RandomSource> {
    player: Player,
    table: Table<R>,
    high_score: Chips,
    store: S,
    last_save_error: Option<PersistenceError>,
}

impl<S: GameStore, R: RandomSource> Session<S, R> {
    /// Load the saved wallet and high score and set up a table with a fresh shoe.
    pub fn open(store: S, rng: R, config: &GameConfig) -> Self {
        let table = Table::new(rng, config.reshuffle_threshold);
        Self::with_table(store, table)
    }

    /// Same as `open` with a prepared table.
    pub fn with_table(store: S, table: Table<R>) -> Self {
        let data = store.load();
        info!(wallet = data.wallet.0, high_score = data.high_score.0, "session opened");
        Self {
            player: Player::new(data.wallet),
            table,
            high_score: data.high_score,
            store,
            last_save_error: None,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn wallet(&self) -> Chips {
        self.player.wallet
    }

    pub fn high_score(&self) -> Chips {
        self.high_score
    }

    pub fn table(&self) -> &Table<R> {
        &self.table
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn legal_actions(&self) -> Vec<PlayerAction> {
        self.table.legal_actions(&self.player)
    }

    /// Start over with the starting wallet. The high score is kept.
    pub fn new_game(&mut self) {
        self.player.wallet = STARTING_WALLET;
        info!(wallet = STARTING_WALLET.0, "new game");
        self.persist();
    }

    /// Continue with the wallet loaded at startup (or left by the last round).
    pub fn resume(&self) -> Chips {
        info!(wallet = self.player.wallet.0, "resuming saved game");
        self.player.wallet
    }

    /// Refill an empty wallet before a round. Returns true if a refill happened.
    pub fn ensure_funds(&mut self) -> bool {
        if !self.player.is_broke() {
            return false;
        }
        info!(wallet = self.player.wallet.0, "out of money, wallet reset");
        self.player.wallet = STARTING_WALLET;
        self.persist();
        true
    }

    pub fn start_round(&mut self, bet: Chips) -> Result<RoundStatus, EngineError> {
        let result = self.table.start_round(&mut self.player, bet);
        self.after_step(result)
    }

    pub fn apply_action(&mut self, action: PlayerAction) -> Result<RoundStatus, EngineError> {
        let result = self.table.apply_action(&mut self.player, action);
        self.after_step(result)
    }

    /// Current record as it would be written.
    pub fn snapshot(&self) -> SaveData {
        SaveData {
            wallet: self.player.wallet,
            high_score: self.high_score,
        }
    }

    /// Void the open round: the escrowed stake goes back to the wallet and the
    /// record is saved. Returns the refund.
    pub fn abandon_round(&mut self) -> Result<Chips, EngineError> {
        let refund = self.table.abandon_round(&mut self.player)?;
        info!(refund = refund.0, wallet = self.player.wallet.0, "round abandoned");
        self.persist();
        Ok(refund)
    }

    /// Write the record now. An open round is voided first so the stake is not lost.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        if self.table.round_in_progress() {
            if let Ok(refund) = self.table.abandon_round(&mut self.player) {
                info!(refund = refund.0, "open round voided before save");
            }
        }
        self.store.save(&self.snapshot())
    }

    /// Error from the most recent automatic save, if it failed.
    pub fn take_save_error(&mut self) -> Option<PersistenceError> {
        self.last_save_error.take()
    }

    fn after_step(
        &mut self,
        result: Result<RoundStatus, EngineError>,
    ) -> Result<RoundStatus, EngineError> {
        match result {
            Ok(RoundStatus::Finished(mut summary)) => {
                summary.new_high_score = self.record_high_score();
                self.persist();
                Ok(RoundStatus::Finished(summary))
            }
            Ok(status) => Ok(status),
            Err(e) => {
                // Only a failure mid-round leaves a stake in escrow.
                if self.table.round_in_progress() {
                    if let Ok(refund) = self.table.abandon_round(&mut self.player) {
                        warn!(error = %e, refund = refund.0, "round voided");
                    }
                    self.persist();
                }
                Err(e)
            }
        }
    }

    fn record_high_score(&mut self) -> bool {
        if self.player.wallet > self.high_score {
            self.high_score = self.player.wallet;
            info!(high_score = self.high_score.0, "new high score");
            true
        } else {
            false
        }
    }

    fn persist(&mut self) {
        let data = self.snapshot();
        if let Err(e) = self.store.save(&data) {
            warn!(error = %e, "could not save game");
            self.last_save_error = Some(e);
        }
    }
}
