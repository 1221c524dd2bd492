use serde::{Deserialize, Serialize};

use crate::api::errors::InputError;
use crate::domain::chips::Chips;
use crate::engine::PlayerAction;

/// Main menu entries.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MenuCommand {
    /// Reset the wallet to the starting amount and play.
    NewGame,
    /// Play on with the saved wallet.
    LoadGame,
    ShowHighScore,
    Quit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 4] = [
        MenuCommand::NewGame,
        MenuCommand::LoadGame,
        MenuCommand::ShowHighScore,
        MenuCommand::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuCommand::NewGame => "Start New Game",
            MenuCommand::LoadGame => "Load Previous Game",
            MenuCommand::ShowHighScore => "Show High Score",
            MenuCommand::Quit => "Quit",
        }
    }
}

/// Answer to the bet prompt.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BetCommand {
    Place(Chips),
    /// The player entered 0: leave the round loop.
    Quit,
}

/// Menu choice by number (1-4) or by a word of its label.
pub fn parse_menu(input: &str) -> Result<MenuCommand, InputError> {
    let s = input.trim().to_ascii_lowercase();
    let cmd = match s.as_str() {
        "1" | "new" | "start" => MenuCommand::NewGame,
        "2" | "load" | "continue" => MenuCommand::LoadGame,
        "3" | "high" | "score" | "high score" => MenuCommand::ShowHighScore,
        "4" | "q" | "quit" | "exit" => MenuCommand::Quit,
        _ => return Err(InputError::UnknownMenuOption(input.trim().to_string())),
    };
    Ok(cmd)
}

/// Bet prompt: `0` quits, `1..=wallet` bets, empty input takes `default_bet`.
///
/// Validation happens here, before anything reaches the engine.
pub fn parse_bet(input: &str, wallet: Chips, default_bet: Chips) -> Result<BetCommand, InputError> {
    let s = input.trim();
    let bet = if s.is_empty() {
        default_bet.0
    } else {
        s.parse::<i64>()
            .map_err(|_| InputError::NotANumber(s.to_string()))?
    };

    if bet == 0 {
        return Ok(BetCommand::Quit);
    }
    if bet < 0 || bet > wallet.0 {
        return Err(InputError::BetOutOfRange { bet, wallet });
    }
    Ok(BetCommand::Place(Chips(bet)))
}

/// Player decision; only actions in `legal` are accepted.
pub fn parse_action(input: &str, legal: &[PlayerAction]) -> Result<PlayerAction, InputError> {
    let s = input.trim().to_ascii_lowercase();
    let action = match s.as_str() {
        "h" | "hit" => PlayerAction::Hit,
        "s" | "stay" | "stand" => PlayerAction::Stay,
        "d" | "double" | "double down" => PlayerAction::Double,
        _ => {
            // Numbered choice from the displayed list.
            match s.parse::<usize>() {
                Ok(n) if (1..=legal.len()).contains(&n) => legal[n - 1],
                _ => return Err(InputError::UnknownAction(input.trim().to_string())),
            }
        }
    };

    if !legal.contains(&action) {
        return Err(InputError::ActionNotAvailable(action));
    }
    Ok(action)
}

pub fn parse_yes_no(input: &str) -> Result<bool, InputError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(InputError::ExpectedYesNo(other.to_string())),
    }
}
