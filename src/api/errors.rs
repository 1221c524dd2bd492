use thiserror::Error;

use crate::domain::chips::Chips;
use crate::engine::PlayerAction;

/// Bad user input. Always recoverable: the front end shows the message and asks again.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("Invalid bet! Must be between 0 and {wallet}.")]
    BetOutOfRange { bet: i64, wallet: Chips },

    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("{0} is not available right now")]
    ActionNotAvailable(PlayerAction),

    #[error("Unknown menu option '{0}'")]
    UnknownMenuOption(String),

    #[error("Please answer y or n")]
    ExpectedYesNo(String),
}
