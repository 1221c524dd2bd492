use crate::domain::deck::Shoe;
use crate::domain::hand::Hand;
use crate::engine::errors::EngineError;
use crate::engine::round_history::{RoundEventKind, RoundHistory};

/// The dealer stands on any total of 17 or more, soft 17 included.
pub const DEALER_STANDS_ON: u16 = 17;

pub fn dealer_should_hit(hand: &Hand) -> bool {
    hand.value() < DEALER_STANDS_ON
}

/// Fixed dealer policy: draw one card at a time while under 17.
///
/// Every hit is recorded as `DealerHit` so the front end can replay the turn.
pub fn play_dealer(
    hand: &mut Hand,
    shoe: &mut Shoe,
    history: &mut RoundHistory,
) -> Result<(), EngineError> {
    while dealer_should_hit(hand) {
        let card = shoe.draw()?;
        hand.add_card(card);
        history.push(RoundEventKind::DealerHit {
            card,
            total: hand.value(),
        });
    }

    history.push(RoundEventKind::DealerStood { total: hand.value() });
    Ok(())
}
