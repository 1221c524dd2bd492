use core::fmt;

use serde::{Deserialize, Serialize};

/// A player decision during their turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Take one more card.
    Hit,
    /// Keep the current hand.
    Stay,
    /// Double the bet, take exactly one card, end the turn.
    Double,
}

impl PlayerAction {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::Hit => "Hit",
            PlayerAction::Stay => "Stay",
            PlayerAction::Double => "Double Down",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
