// tests/engine_round_tests.rs

//! Round engine tests on stacked shoes:
//! - natural, push, bust and double-down rounds end to end
//! - the dealer policy (stands on soft 17, hits below 17)
//! - invalid bets and illegal actions change nothing
//! - shoe refill below the threshold, empty shoe mid-round

use blackjack_engine::domain::{Card, Chips, Player, Rank, Shoe, Suit};
use blackjack_engine::engine::{
    EngineError, Outcome, Phase, PlayerAction, RandomSource, RoundEventKind, RoundStatus,
    RoundSummary, Table, DEFAULT_RESHUFFLE_THRESHOLD,
};

/// Shuffle that keeps the order. Stacked shoes stay stacked, a rebuilt shoe is unshuffled.
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

fn card(s: &str) -> Card {
    s.parse().expect("valid card literal")
}

/// Shoe whose next draws are `draws` in order, padded with filler underneath
/// so it stays above the reshuffle threshold.
fn stacked(draws: &[&str]) -> Shoe {
    let mut cards = vec![Card::new(Rank::Two, Suit::Clubs); 20];
    cards.extend(draws.iter().rev().map(|s| card(s)));
    Shoe::from_cards(cards)
}

fn table_with(draws: &[&str]) -> Table<DummyRng> {
    Table::with_shoe(DummyRng, stacked(draws), DEFAULT_RESHUFFLE_THRESHOLD)
}

fn finished(status: RoundStatus) -> RoundSummary {
    match status {
        RoundStatus::Finished(summary) => summary,
        RoundStatus::AwaitingPlayer => panic!("round should be finished"),
    }
}

//
// SCENARIOS
//

/// Natural against a dealer 16: paid 3:2, the dealer never plays.
#[test]
fn natural_pays_three_to_two_without_dealer_turn() {
    // deal order: player, dealer, player, dealer
    let mut table = table_with(&["As", "9h", "Kh", "7c"]);
    let mut player = Player::new(Chips(1000));

    let summary = finished(table.start_round(&mut player, Chips(10)).unwrap());

    assert_eq!(summary.outcome, Outcome::Blackjack);
    assert_eq!(summary.payout, Chips(25));
    assert_eq!(summary.net(), Chips(15));
    assert_eq!(player.wallet, Chips(1015));
    assert!(!summary.dealer_played);
    assert_eq!(summary.dealer_cards.len(), 2);
    assert_eq!(table.phase(), Phase::Resolved);
    assert_eq!(table.dealer_up_card(), Some(card("9h")));
}

/// Odd bets are truncated: 2.5 * 7 = 17.5 -> 17.
#[test]
fn natural_payout_truncates() {
    let mut table = table_with(&["Ad", "5h", "Qs", "9c"]);
    let mut player = Player::new(Chips(100));

    let summary = finished(table.start_round(&mut player, Chips(7)).unwrap());

    assert_eq!(summary.payout, Chips(17));
    assert_eq!(player.wallet, Chips(110));
}

/// Two naturals push.
#[test]
fn natural_against_dealer_natural_is_push() {
    let mut table = table_with(&["As", "Ah", "Kh", "Qc"]);
    let mut player = Player::new(Chips(100));

    let summary = finished(table.start_round(&mut player, Chips(10)).unwrap());

    assert_eq!(summary.outcome, Outcome::Push);
    assert_eq!(player.wallet, Chips(100));
}

/// 19 against 19 after staying returns the stake.
#[test]
fn equal_totals_push() {
    let mut table = table_with(&["Ts", "Th", "9h", "9c"]);
    let mut player = Player::new(Chips(1000));

    let status = table.start_round(&mut player, Chips(10)).unwrap();
    assert_eq!(status, RoundStatus::AwaitingPlayer);
    assert_eq!(table.phase(), Phase::PlayerTurn);
    assert_eq!(player.wallet, Chips(990));

    let summary = finished(table.apply_action(&mut player, PlayerAction::Stay).unwrap());

    assert_eq!(summary.outcome, Outcome::Push);
    assert_eq!(summary.net(), Chips::ZERO);
    assert_eq!(player.wallet, Chips(1000));
    assert!(summary.dealer_played);
}

/// A bust ends the round at once and the dealer does not draw.
#[test]
fn bust_skips_dealer_turn() {
    let mut table = table_with(&["8s", "Th", "5h", "6c", "Td"]);
    let mut player = Player::new(Chips(1000));

    table.start_round(&mut player, Chips(10)).unwrap();
    let summary = finished(table.apply_action(&mut player, PlayerAction::Hit).unwrap());

    assert_eq!(summary.outcome, Outcome::DealerWins);
    assert!(summary.player_bust());
    assert_eq!(summary.player_total, 23);
    assert_eq!(summary.net(), Chips(-10));
    assert_eq!(player.wallet, Chips(990));
    assert!(!summary.dealer_played);
    // dealer keeps the 16 it was dealt
    assert_eq!(summary.dealer_cards.len(), 2);
    assert_eq!(table.history().dealer_hits().count(), 0);
}

/// Double on 11: the stake doubles, one card is drawn, dealer plays to 20.
#[test]
fn double_down_doubles_stake_and_draws_one_card() {
    let mut table = table_with(&["6s", "Th", "5h", "6c", "Td", "4d"]);
    let mut player = Player::new(Chips(1000));

    table.start_round(&mut player, Chips(10)).unwrap();
    assert!(table.legal_actions(&player).contains(&PlayerAction::Double));

    let summary = finished(table.apply_action(&mut player, PlayerAction::Double).unwrap());

    assert_eq!(summary.outcome, Outcome::PlayerWins);
    assert!(summary.doubled);
    assert_eq!(summary.bet, Chips(20));
    assert_eq!(summary.payout, Chips(40));
    assert_eq!(summary.net(), Chips(20));
    assert_eq!(player.wallet, Chips(1020));
    assert_eq!(summary.player_cards.len(), 3);
    assert_eq!(summary.player_total, 21);
    assert_eq!(summary.dealer_total, 20);

    let hits: Vec<(Card, u16)> = table.history().dealer_hits().collect();
    assert_eq!(hits, vec![(card("4d"), 20)]);
}

/// Doubling into a bust loses the doubled stake.
#[test]
fn double_down_bust_loses_double() {
    let mut table = table_with(&["Ts", "Th", "6h", "9c", "Kd"]);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();
    let summary = finished(table.apply_action(&mut player, PlayerAction::Double).unwrap());

    assert_eq!(summary.outcome, Outcome::DealerWins);
    assert_eq!(summary.bet, Chips(20));
    assert_eq!(player.wallet, Chips(80));
    assert!(!summary.dealer_played);
}

/// Hitting to 21 does not end the turn by itself.
#[test]
fn hitting_to_21_keeps_player_turn() {
    let mut table = table_with(&["5s", "Th", "6h", "7c", "Td", "9d"]);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();
    let status = table.apply_action(&mut player, PlayerAction::Hit).unwrap();

    assert_eq!(status, RoundStatus::AwaitingPlayer);
    assert_eq!(player.hand.value(), 21);
    assert!(!player.hand.is_blackjack());

    let summary = finished(table.apply_action(&mut player, PlayerAction::Stay).unwrap());
    assert_eq!(summary.outcome, Outcome::PlayerWins);
    assert_eq!(player.wallet, Chips(110));
}

//
// DEALER POLICY
//

/// Soft 17 (A + 6) stands.
#[test]
fn dealer_stands_on_soft_17() {
    let mut table = table_with(&["Ts", "Ah", "8h", "6c"]);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();
    let summary = finished(table.apply_action(&mut player, PlayerAction::Stay).unwrap());

    assert_eq!(summary.dealer_cards.len(), 2);
    assert_eq!(summary.dealer_total, 17);
    assert_eq!(summary.outcome, Outcome::PlayerWins);
}

/// The dealer keeps drawing below 17 and can bust.
#[test]
fn dealer_hits_until_17_or_bust() {
    let mut table = table_with(&["Ts", "2h", "8h", "3c", "4d", "2s", "Kd"]);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();
    let summary = finished(table.apply_action(&mut player, PlayerAction::Stay).unwrap());

    let totals: Vec<u16> = table.history().dealer_hits().map(|(_, t)| t).collect();
    assert_eq!(totals, vec![9, 11, 21]);
    assert_eq!(summary.dealer_total, 21);
    assert_eq!(summary.outcome, Outcome::DealerWins);

    let mut table = table_with(&["Ts", "Th", "8h", "6c", "9d"]);
    let mut player = Player::new(Chips(100));
    table.start_round(&mut player, Chips(10)).unwrap();
    let summary = finished(table.apply_action(&mut player, PlayerAction::Stay).unwrap());

    assert!(summary.dealer_bust());
    assert_eq!(summary.outcome, Outcome::PlayerWins);
    assert_eq!(player.wallet, Chips(110));
}

/// Two three-card 21s push; neither counts as a natural.
#[test]
fn three_card_21s_push() {
    let mut table = table_with(&["7s", "5h", "7h", "6c", "7d", "Td"]);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();
    table.apply_action(&mut player, PlayerAction::Hit).unwrap();
    let summary = finished(table.apply_action(&mut player, PlayerAction::Stay).unwrap());

    // 7+7+7 = 21 against 5+6+10 = 21
    assert_eq!(summary.outcome, Outcome::Push);
}

//
// VALIDATION
//

#[test]
fn invalid_bets_are_rejected_without_changes() {
    let mut table = table_with(&["Ts", "Th", "9h", "9c"]);
    let mut player = Player::new(Chips(50));
    let shoe_before = table.shoe.len();

    for bet in [Chips(0), Chips(-5), Chips(51)] {
        let err = table.start_round(&mut player, bet).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidBet {
                bet,
                wallet: Chips(50)
            }
        );
    }

    assert_eq!(player.wallet, Chips(50));
    assert!(player.hand.is_empty());
    assert_eq!(table.shoe.len(), shoe_before);
    assert_eq!(table.phase(), Phase::Betting);

    // the whole wallet is a valid bet
    assert!(table.start_round(&mut player, Chips(50)).is_ok());
    assert_eq!(player.wallet, Chips::ZERO);
}

#[test]
fn double_is_not_allowed_after_a_hit() {
    let mut table = table_with(&["2s", "Th", "3h", "7c", "4d"]);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();
    table.apply_action(&mut player, PlayerAction::Hit).unwrap();

    assert_eq!(
        table.legal_actions(&player),
        vec![PlayerAction::Hit, PlayerAction::Stay]
    );

    let wallet = player.wallet;
    let cards = player.hand.len();
    let err = table
        .apply_action(&mut player, PlayerAction::Double)
        .unwrap_err();

    assert!(matches!(err, EngineError::IllegalAction { action: PlayerAction::Double, .. }));
    assert_eq!(player.wallet, wallet);
    assert_eq!(player.hand.len(), cards);
    assert_eq!(table.current_bet(), Chips(10));
}

#[test]
fn double_needs_a_second_stake() {
    let mut table = table_with(&["6s", "Th", "5h", "7c"]);
    let mut player = Player::new(Chips(15));

    table.start_round(&mut player, Chips(10)).unwrap();

    assert!(!table.legal_actions(&player).contains(&PlayerAction::Double));
    assert!(table
        .apply_action(&mut player, PlayerAction::Double)
        .is_err());
    assert_eq!(player.wallet, Chips(5));
}

#[test]
fn actions_outside_player_turn_are_illegal() {
    let mut table = table_with(&["Ts", "Th", "9h", "9c"]);
    let mut player = Player::new(Chips(100));

    let err = table.apply_action(&mut player, PlayerAction::Hit).unwrap_err();
    assert_eq!(
        err,
        EngineError::IllegalAction {
            action: PlayerAction::Hit,
            phase: Phase::Betting
        }
    );
    assert!(table.legal_actions(&player).is_empty());
}

#[test]
fn second_round_cannot_start_while_one_is_open() {
    let mut table = table_with(&["Ts", "Th", "9h", "9c"]);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();
    let err = table.start_round(&mut player, Chips(10)).unwrap_err();

    assert_eq!(err, EngineError::RoundInProgress);
    assert_eq!(player.wallet, Chips(90));
}

//
// SHOE
//

/// Below the threshold a full unshuffled shoe replaces the old one before dealing.
#[test]
fn shoe_is_rebuilt_below_threshold() {
    let shoe = Shoe::from_cards(vec![card("Kd"); 14]);
    let mut table = Table::with_shoe(DummyRng, shoe, DEFAULT_RESHUFFLE_THRESHOLD);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();

    assert!(matches!(
        table.history().events[0].kind,
        RoundEventKind::ShoeRebuilt { cards: 312 }
    ));
    assert_eq!(table.shoe.len(), 312 - 4);
    // unshuffled: the last card of the ordered shoe is the ace of clubs
    assert_eq!(player.hand.cards[0], card("Ac"));
}

#[test]
fn shoe_at_threshold_is_kept() {
    let shoe = Shoe::from_cards(vec![card("Kd"); 15]);
    let mut table = Table::with_shoe(DummyRng, shoe, DEFAULT_RESHUFFLE_THRESHOLD);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();

    assert_eq!(table.shoe.len(), 11);
    assert!(!table
        .history()
        .events
        .iter()
        .any(|e| matches!(e.kind, RoundEventKind::ShoeRebuilt { .. })));
}

/// Running dry mid-round is reported and the stake can be refunded.
#[test]
fn empty_shoe_mid_round_can_be_abandoned() {
    let shoe = Shoe::from_cards(vec![card("2h"), card("Ts"), card("2c"), card("Th")]);
    let mut table = Table::with_shoe(DummyRng, shoe, 0);
    let mut player = Player::new(Chips(100));

    table.start_round(&mut player, Chips(10)).unwrap();
    let err = table.apply_action(&mut player, PlayerAction::Hit).unwrap_err();
    assert_eq!(err, EngineError::EmptyShoe(blackjack_engine::domain::EmptyShoe));
    assert!(table.round_in_progress());

    let refund = table.abandon_round(&mut player).unwrap();
    assert_eq!(refund, Chips(10));
    assert_eq!(player.wallet, Chips(100));
    assert_eq!(table.phase(), Phase::Resolved);
    assert_eq!(
        table.abandon_round(&mut player),
        Err(EngineError::NoActiveRound)
    );
}

#[test]
fn round_ids_increase() {
    let mut table = table_with(&["As", "9h", "Kh", "7c", "Ad", "9s", "Kc", "7h"]);
    let mut player = Player::new(Chips(100));

    let first = finished(table.start_round(&mut player, Chips(10)).unwrap());
    let second = finished(table.start_round(&mut player, Chips(10)).unwrap());

    assert_eq!(first.round_id, 1);
    assert_eq!(second.round_id, 2);
    assert_eq!(player.wallet, Chips(130));
}
