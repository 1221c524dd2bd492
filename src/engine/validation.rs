use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::engine::actions::PlayerAction;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::Phase;

/// A bet must be positive and covered by the wallet.
pub fn validate_bet(bet: Chips, wallet: Chips) -> Result<(), EngineError> {
    if !bet.is_positive() || bet > wallet {
        return Err(EngineError::InvalidBet { bet, wallet });
    }
    Ok(())
}

/// Doubling is only the first decision (two cards held) and needs a second stake of the same size.
pub fn can_double(player: &Player, bet: Chips) -> bool {
    player.hand.len() == 2 && player.can_afford(bet)
}

/// Actions the player may choose right now, in menu order.
pub fn legal_actions(phase: Phase, player: &Player, bet: Chips) -> Vec<PlayerAction> {
    if phase != Phase::PlayerTurn {
        return Vec::new();
    }

    let mut actions = vec![PlayerAction::Hit, PlayerAction::Stay];
    if can_double(player, bet) {
        actions.push(PlayerAction::Double);
    }
    actions
}

/// Check that the player may perform `action` in the current state of the round.
pub fn validate_action(
    phase: Phase,
    player: &Player,
    bet: Chips,
    action: PlayerAction,
) -> Result<(), EngineError> {
    if phase != Phase::PlayerTurn {
        return Err(EngineError::IllegalAction { action, phase });
    }

    match action {
        PlayerAction::Hit | PlayerAction::Stay => Ok(()),
        PlayerAction::Double => {
            if can_double(player, bet) {
                Ok(())
            } else {
                Err(EngineError::IllegalAction { action, phase })
            }
        }
    }
}
