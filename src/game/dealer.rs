use core::cmp::Ordering;

use tracing::{debug, info, warn};

use crate::error::DeckError;
use crate::hand::{BLACKJACK, HandStatus};
use crate::player::Player;
use crate::result::{HandOutcome, HandResult};
use crate::table::Seat;

use super::round::Round;

/// Compares a player's score against the dealer's, bust-aware.
///
/// Both bust is a push; a lone bust loses; otherwise the higher score wins.
///
/// ```
/// use bjtable::HandOutcome;
/// use bjtable::game::compare_scores;
///
/// assert_eq!(compare_scores(20, 19), HandOutcome::Win);
/// assert_eq!(compare_scores(22, 18), HandOutcome::Lose);
/// assert_eq!(compare_scores(22, 24), HandOutcome::Push);
/// ```
#[must_use]
pub fn compare_scores(player: u8, dealer: u8) -> HandOutcome {
    match (player > BLACKJACK, dealer > BLACKJACK) {
        (true, true) => HandOutcome::Push,
        (true, false) => HandOutcome::Lose,
        (false, true) => HandOutcome::Win,
        (false, false) => match player.cmp(&dealer) {
            Ordering::Greater => HandOutcome::Win,
            Ordering::Less => HandOutcome::Lose,
            Ordering::Equal => HandOutcome::Push,
        },
    }
}

/// Winner's wallet receives both bets; both bets are cleared.
fn transfer(winner: &mut Player, loser: &mut Player) -> usize {
    let amount = winner.take_bet() + loser.take_bet();
    winner.credit(amount);
    amount
}

/// Moves money for one settled hand and returns what the player received.
///
/// On a win the house first stakes a bet matching the player's, so the
/// player's wallet grows by twice their bet.
pub fn settle_bet(player: &mut Player, house: &mut Player, outcome: HandOutcome) -> usize {
    match outcome {
        HandOutcome::Win => {
            let stake = player.bet().min(house.wallet());
            if stake < player.bet() {
                warn!(stake, bet = player.bet(), "house cannot fully match the bet");
            }
            if house.place_bet(stake).is_err() {
                warn!(stake, "house stake rejected");
            }
            transfer(player, house)
        }
        HandOutcome::Lose => {
            transfer(house, player);
            0
        }
        HandOutcome::Push => {
            house.return_bet();
            player.return_bet()
        }
    }
}

impl Round<'_> {
    pub(super) fn reveal_dealer(&mut self) {
        if let Some(hand) = self.dealer.player_mut().hand_mut(0) {
            hand.reveal();
        }
    }

    /// Dealer plays their hand according to the house rule.
    ///
    /// The dealer reveals their hole card and draws until reaching
    /// `dealer_stands_on` or higher. Soft and hard totals are treated alike.
    pub(super) fn dealer_play(&mut self) -> Result<(), DeckError> {
        let stands_on = self.options.dealer_stands_on;
        let Some(hand) = self.dealer.player_mut().hand_mut(0) else {
            return Ok(());
        };
        hand.reveal();

        while hand.rescore() < stands_on {
            let card = self.deck.deal(true)?;
            debug!(%card, "dealer draws");
            hand.add_card(card);
        }
        debug!(score = hand.score(), "dealer stands");
        Ok(())
    }

    /// Settles every hand at the table against the dealer's hand.
    pub(super) fn settle(&mut self) {
        let dealer_score = self.dealer_score();
        self.report.dealer_score = dealer_score;
        self.report.dealer_bust = dealer_score > BLACKJACK;

        for seat in 0..self.table.seat_count() {
            let Some(player) = self.table.seat_mut(seat).and_then(Seat::player_mut) else {
                continue;
            };

            for hand_index in 0..player.hands().len() {
                let hand = &player.hands()[hand_index];
                let player_score = hand.score();
                let outcome = if hand.status() == HandStatus::Surrendered {
                    HandOutcome::Lose
                } else {
                    compare_scores(player_score, dealer_score)
                };

                let bet = player.bet();
                let payout = settle_bet(player, self.dealer.player_mut(), outcome);
                info!(
                    seat,
                    player = player.name(),
                    ?outcome,
                    bet,
                    payout,
                    player_score,
                    dealer_score,
                    "hand settled"
                );

                self.report.hands.push(HandResult {
                    seat,
                    player: player.name().to_owned(),
                    hand_index,
                    outcome,
                    bet,
                    payout,
                    player_score,
                    dealer_score,
                });
            }
        }
    }
}
