use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::{Shoe, DECKS_PER_SHOE};
use crate::domain::hand::Hand;
use crate::domain::player::Player;
use crate::engine::actions::PlayerAction;
use crate::engine::dealer::play_dealer;
use crate::engine::errors::EngineError;
use crate::engine::payout::{settle, Outcome};
use crate::engine::round_history::{Party, RoundEventKind, RoundHistory};
use crate::engine::validation::{legal_actions, validate_action, validate_bet};
use crate::engine::RandomSource;

/// Default number of cards below which the shoe is replaced before a round.
pub const DEFAULT_RESHUFFLE_THRESHOLD: usize = 15;

/// Round state machine:
/// `Betting -> Dealt -> PlayerTurn -> DealerTurn -> Resolved`,
/// with `PlayerTurn` skipped on a player natural and `DealerTurn` skipped on a bust.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    Betting,
    Dealt,
    PlayerTurn,
    DealerTurn,
    Resolved,
}

impl Phase {
    /// Cards are on the table and the stake is escrowed.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Phase::Dealt | Phase::PlayerTurn | Phase::DealerTurn)
    }
}

/// Round status for outside code.
#[derive(Clone, Debug, PartialEq)]
pub enum RoundStatus {
    /// Waiting for a player decision.
    AwaitingPlayer,
    Finished(RoundSummary),
}

/// Short description of a resolved round.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundSummary {
    pub round_id: u64,
    pub outcome: Outcome,
    /// Final stake, doubled if the player doubled down.
    pub bet: Chips,
    /// Amount credited back to the wallet at resolution.
    pub payout: Chips,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_total: u16,
    pub dealer_total: u16,
    pub doubled: bool,
    /// False when the player busted or had a natural.
    pub dealer_played: bool,
    pub wallet_after: Chips,
    /// Set by the session when this round raised the high score.
    pub new_high_score: bool,
}

impl RoundSummary {
    /// Wallet change over the whole round, relative to the wallet before betting.
    pub fn net(&self) -> Chips {
        self.payout - self.bet
    }

    pub fn player_bust(&self) -> bool {
        self.player_total > 21
    }

    pub fn dealer_bust(&self) -> bool {
        self.dealer_total > 21
    }
}

/// State of the current round.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundEngine {
    pub round_id: u64,
    pub phase: Phase,
    pub dealer: Hand,
    pub bet: Chips,
    pub doubled: bool,
    pub history: RoundHistory,
}

impl RoundEngine {
    fn new() -> Self {
        Self {
            round_id: 0,
            phase: Phase::Betting,
            dealer: Hand::new(),
            bet: Chips::ZERO,
            doubled: false,
            history: RoundHistory::new(),
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.history.push(RoundEventKind::PhaseChanged { phase });
    }
}

/// Build a full six-deck shoe and shuffle it.
pub fn build_shoe<R: RandomSource>(rng: &mut R) -> Shoe {
    let mut shoe = Shoe::ordered(DECKS_PER_SHOE);
    rng.shuffle(&mut shoe.cards);
    shoe
}

/// The dealer's table: the shared shoe plus the round being played on it.
pub struct Table<R: RandomSource> {
    pub shoe: Shoe,
    pub reshuffle_threshold: usize,
    pub round: RoundEngine,
    rng: R,
}

impl<R: RandomSource> Table<R> {
    /// Table with a freshly shuffled shoe.
    pub fn new(mut rng: R, reshuffle_threshold: usize) -> Self {
        let shoe = build_shoe(&mut rng);
        Self::with_shoe(rng, shoe, reshuffle_threshold)
    }

    /// Table with a given shoe. Used for replays and stacked test shoes.
    pub fn with_shoe(rng: R, shoe: Shoe, reshuffle_threshold: usize) -> Self {
        Self {
            shoe,
            reshuffle_threshold,
            round: RoundEngine::new(),
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.round.dealer
    }

    /// The dealer's face-up card (first card dealt to the dealer).
    pub fn dealer_up_card(&self) -> Option<Card> {
        self.round.dealer.cards.first().copied()
    }

    pub fn current_bet(&self) -> Chips {
        self.round.bet
    }

    pub fn history(&self) -> &RoundHistory {
        &self.round.history
    }

    pub fn round_in_progress(&self) -> bool {
        self.round.phase.is_in_progress()
    }

    pub fn legal_actions(&self, player: &Player) -> Vec<PlayerAction> {
        legal_actions(self.round.phase, player, self.round.bet)
    }

    /// Start a new round:
    /// - validates and escrows the bet;
    /// - replaces the shoe if it is running low;
    /// - deals player, dealer, player, dealer;
    /// - resolves at once on a player natural.
    pub fn start_round(
        &mut self,
        player: &mut Player,
        bet: Chips,
    ) -> Result<RoundStatus, EngineError> {
        if self.round_in_progress() {
            return Err(EngineError::RoundInProgress);
        }
        validate_bet(bet, player.wallet)?;

        let round_id = self.round.round_id + 1;
        self.round = RoundEngine::new();
        self.round.round_id = round_id;
        player.reset_hand();

        if self.shoe.needs_refill(self.reshuffle_threshold) {
            debug!(remaining = self.shoe.len(), "shoe running low, rebuilding");
            self.shoe = build_shoe(&mut self.rng);
            self.round.history.push(RoundEventKind::ShoeRebuilt {
                cards: self.shoe.len(),
            });
        }

        self.round.bet = player.place_bet(bet);
        self.round
            .history
            .push(RoundEventKind::RoundStarted { round_id, bet });
        info!(round_id, bet = bet.0, wallet = player.wallet.0, "round started");

        self.round.set_phase(Phase::Dealt);
        for _ in 0..2 {
            self.deal_to_player(player)?;
            let card = self.shoe.draw()?;
            self.round.dealer.add_card(card);
            self.round.history.push(RoundEventKind::CardDealt {
                to: Party::Dealer,
                card,
            });
        }

        if player.hand.is_blackjack() {
            return Ok(RoundStatus::Finished(self.resolve(player)));
        }

        self.round.set_phase(Phase::PlayerTurn);
        Ok(RoundStatus::AwaitingPlayer)
    }

    /// Apply a player decision. Returns whether the round continues or finished.
    pub fn apply_action(
        &mut self,
        player: &mut Player,
        action: PlayerAction,
    ) -> Result<RoundStatus, EngineError> {
        validate_action(self.round.phase, player, self.round.bet, action)?;

        match action {
            PlayerAction::Hit => {
                self.deal_to_player(player)?;
                self.record_action(player, action);
                if player.hand.is_bust() {
                    return Ok(RoundStatus::Finished(self.resolve(player)));
                }
                Ok(RoundStatus::AwaitingPlayer)
            }

            PlayerAction::Stay => {
                self.record_action(player, action);
                self.finish_with_dealer(player)
            }

            PlayerAction::Double => {
                let extra = player.place_bet(self.round.bet);
                self.round.bet += extra;
                self.round.doubled = true;
                self.deal_to_player(player)?;
                self.record_action(player, action);
                if player.hand.is_bust() {
                    return Ok(RoundStatus::Finished(self.resolve(player)));
                }
                self.finish_with_dealer(player)
            }
        }
    }

    /// Give up on the current round after a failure: the escrowed stake goes back
    /// to the wallet and the table is ready for a new bet. Returns the refund.
    pub fn abandon_round(&mut self, player: &mut Player) -> Result<Chips, EngineError> {
        if !self.round_in_progress() {
            return Err(EngineError::NoActiveRound);
        }
        let refund = self.round.bet;
        player.receive_winnings(refund);
        self.round
            .history
            .push(RoundEventKind::RoundVoided { refund });
        self.round.set_phase(Phase::Resolved);
        Ok(refund)
    }

    fn deal_to_player(&mut self, player: &mut Player) -> Result<(), EngineError> {
        let card = self.shoe.draw()?;
        player.hand.add_card(card);
        self.round.history.push(RoundEventKind::CardDealt {
            to: Party::Player,
            card,
        });
        Ok(())
    }

    fn record_action(&mut self, player: &Player, action: PlayerAction) {
        self.round.history.push(RoundEventKind::PlayerActed {
            action,
            bet_after: self.round.bet,
            total_after: player.hand.value(),
        });
    }

    fn finish_with_dealer(&mut self, player: &mut Player) -> Result<RoundStatus, EngineError> {
        self.round.set_phase(Phase::DealerTurn);
        play_dealer(&mut self.round.dealer, &mut self.shoe, &mut self.round.history)?;
        Ok(RoundStatus::Finished(self.resolve(player)))
    }

    /// Settle the round and credit the payout.
    fn resolve(&mut self, player: &mut Player) -> RoundSummary {
        let (outcome, payout) = settle(&player.hand, &self.round.dealer, self.round.bet);
        player.receive_winnings(payout);

        self.round
            .history
            .push(RoundEventKind::RoundResolved { outcome, payout });
        self.round.set_phase(Phase::Resolved);

        let summary = RoundSummary {
            round_id: self.round.round_id,
            outcome,
            bet: self.round.bet,
            payout,
            player_cards: player.hand.cards.clone(),
            dealer_cards: self.round.dealer.cards.clone(),
            player_total: player.hand.value(),
            dealer_total: self.round.dealer.value(),
            doubled: self.round.doubled,
            dealer_played: self.round.history.dealer_played(),
            wallet_after: player.wallet,
            new_high_score: false,
        };
        info!(
            round_id = summary.round_id,
            outcome = %summary.outcome,
            payout = payout.0,
            wallet = player.wallet.0,
            "round resolved"
        );
        summary
    }
}
