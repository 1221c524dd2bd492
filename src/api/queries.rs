use crate::domain::hand::Hand;
use crate::engine::{Phase, RandomSource, RoundEventKind};
use crate::infra::persistence::GameStore;
use crate::session::Session;

use super::dto::{HandViewDto, TableViewDto};

fn open_hand(hand: &Hand) -> HandViewDto {
    HandViewDto {
        cards: hand.cards.clone(),
        hidden: 0,
        total: Some(hand.value()),
    }
}

/// Only the up card is shown while the player is still deciding.
fn dealer_view(hand: &Hand, phase: Phase) -> HandViewDto {
    if phase == Phase::PlayerTurn {
        HandViewDto {
            cards: hand.cards.iter().take(1).copied().collect(),
            hidden: hand.len().saturating_sub(1),
            total: None,
        }
    } else {
        open_hand(hand)
    }
}

/// Build the table DTO from the session.
pub fn build_table_view<S: GameStore, R: RandomSource>(session: &Session<S, R>) -> TableViewDto {
    let table = session.table();
    let phase = table.phase();

    let last_outcome = table
        .history()
        .events
        .iter()
        .rev()
        .find_map(|e| match e.kind {
            RoundEventKind::RoundResolved { outcome, .. } => Some(outcome),
            _ => None,
        });

    TableViewDto {
        wallet: session.wallet(),
        high_score: session.high_score(),
        phase,
        bet: if table.round_in_progress() {
            table.current_bet()
        } else {
            Default::default()
        },
        player: open_hand(&session.player().hand),
        dealer: dealer_view(table.dealer_hand(), phase),
        legal_actions: session.legal_actions(),
        cards_in_shoe: table.shoe.len(),
        last_outcome,
    }
}
