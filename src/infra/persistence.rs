use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::chips::Chips;

/// Wallet for a new game or a fresh save.
pub const STARTING_WALLET: Chips = Chips(1000);

/// Errors while writing or reading the save record.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The persisted record: `{ "wallet": <int>, "high_score": <int> }`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveData {
    pub wallet: Chips,
    pub high_score: Chips,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            wallet: STARTING_WALLET,
            high_score: Chips::ZERO,
        }
    }
}

/// On-disk shape: either key may be missing or null and falls back on its own.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSaveData {
    wallet: Option<Chips>,
    high_score: Option<Chips>,
}

impl From<RawSaveData> for SaveData {
    fn from(raw: RawSaveData) -> Self {
        let defaults = SaveData::default();
        Self {
            wallet: raw.wallet.unwrap_or(defaults.wallet),
            high_score: raw.high_score.unwrap_or(defaults.high_score),
        }
    }
}

/// Storage for the wallet and high score.
///
/// `load` never fails: anything missing or unreadable yields `SaveData::default()`.
pub trait GameStore {
    fn load(&self) -> SaveData;

    /// Overwrite the whole record.
    fn save(&mut self, data: &SaveData) -> Result<(), PersistenceError>;
}

/// JSON file store.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SaveData, PersistenceError> {
        let text = fs::read_to_string(&self.path)?;
        let raw: RawSaveData = serde_json::from_str(&text)?;
        Ok(raw.into())
    }
}

impl GameStore for JsonFileStore {
    fn load(&self) -> SaveData {
        match self.read() {
            Ok(data) => data,
            Err(PersistenceError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no save file, starting fresh");
                SaveData::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable save file, starting fresh");
                SaveData::default()
            }
        }
    }

    fn save(&mut self, data: &SaveData) -> Result<(), PersistenceError> {
        let text = serde_json::to_string(data)?;
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), wallet = data.wallet.0, high_score = data.high_score.0, "saved");
        Ok(())
    }
}

/// In-memory store for tests and runs without a save file.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    data: Option<SaveData>,
    /// Number of successful saves.
    pub saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: SaveData) -> Self {
        Self {
            data: Some(data),
            saves: 0,
        }
    }

    /// What a reload would see right now.
    pub fn stored(&self) -> Option<SaveData> {
        self.data
    }
}

impl GameStore for InMemoryStore {
    fn load(&self) -> SaveData {
        self.data.unwrap_or_default()
    }

    fn save(&mut self, data: &SaveData) -> Result<(), PersistenceError> {
        self.data = Some(*data);
        self.saves += 1;
        Ok(())
    }
}
