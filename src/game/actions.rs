use tracing::{debug, warn};

use crate::decision::{Action, Decider, TurnView};
use crate::error::{ActionError, DeckError, RoundError};
use crate::hand::HandStatus;
use crate::player::Player;

use super::TurnOutcome;
use super::round::Round;

/// Consecutive rejected actions a computer seat may make before it is made
/// to stand.
pub const MAX_REJECTIONS: usize = 3;

impl Round<'_> {
    /// Every seat, every hand, in seat order.
    pub(super) fn play_hands(
        &mut self,
        interactive: &mut dyn Decider,
        computer: &mut dyn Decider,
    ) -> Result<(), RoundError> {
        for seat in 0..self.table.seat_count() {
            let Some(player) = self.table.seat(seat).and_then(|s| s.player()) else {
                continue;
            };
            let is_interactive = player.is_interactive();

            for hand_index in 0..player.hands().len() {
                let decider: &mut dyn Decider = if is_interactive {
                    &mut *interactive
                } else {
                    &mut *computer
                };
                let outcome = self.play_hand(seat, hand_index, is_interactive, decider)?;
                debug!(seat, hand_index, ?outcome, "hand finished");
            }
        }
        Ok(())
    }

    fn turn_view(&self, seat: usize, hand_index: usize) -> Option<TurnView<'_>> {
        let player = self.table.seat(seat)?.player()?;
        let hand = player.hands().get(hand_index)?;
        Some(TurnView {
            seat,
            player,
            hand_index,
            hand,
            dealer_up_card: self.dealer.hand().and_then(|h| h.face_up_cards().next()),
            minimum_bet: self.table.minimum_bet(),
        })
    }

    fn play_hand(
        &mut self,
        seat: usize,
        hand_index: usize,
        is_interactive: bool,
        decider: &mut dyn Decider,
    ) -> Result<TurnOutcome, RoundError> {
        let mut rejections = 0;

        loop {
            let Some(view) = self.turn_view(seat, hand_index) else {
                return Ok(TurnOutcome::Ended);
            };
            if view.hand.is_bust() {
                debug!(seat, player = view.player.name(), "busted");
                return Ok(TurnOutcome::Busted);
            }

            let mut action = decider.decide(&view);
            if !is_interactive && rejections >= MAX_REJECTIONS {
                warn!(seat, "too many rejected actions, standing");
                action = Action::Stand;
            }
            debug!(seat, player = view.player.name(), %action, "action chosen");

            match self.apply(seat, hand_index, action) {
                Ok(outcome) if outcome.is_final() => return Ok(outcome),
                Ok(_) => rejections = 0,
                Err(ActionError::NoCards) => return Err(DeckError::Empty.into()),
                Err(error) => {
                    warn!(seat, %action, %error, "action rejected");
                    rejections += 1;
                    if let Some(view) = self.turn_view(seat, hand_index) {
                        decider.rejected(&view, action, error);
                    }
                }
            }
        }
    }

    fn apply(
        &mut self,
        seat: usize,
        hand_index: usize,
        action: Action,
    ) -> Result<TurnOutcome, ActionError> {
        match action {
            Action::Hit => self.hit(seat, hand_index),
            Action::Stand => self.stand(seat, hand_index),
            Action::DoubleDown => self.double_down(seat, hand_index),
            Action::Surrender => self.surrender(seat, hand_index),
            Action::Split => Err(ActionError::SplitUnsupported),
        }
    }

    fn player_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.table.seat_mut(seat).and_then(|s| s.player_mut())
    }

    /// Deals one face-up card to a hand and rescores it.
    fn draw_to(&mut self, seat: usize, hand_index: usize) -> Result<TurnOutcome, ActionError> {
        let card = self.deck.deal(true).map_err(|_| ActionError::NoCards)?;
        let Some(player) = self.table.seat_mut(seat).and_then(|s| s.player_mut()) else {
            return Ok(TurnOutcome::Ended);
        };
        debug!(seat, player = player.name(), %card, "dealt");
        player.receive_card(card, hand_index);
        let Some(hand) = player.hand_mut(hand_index) else {
            return Ok(TurnOutcome::Ended);
        };
        hand.rescore();
        if hand.is_bust() {
            Ok(TurnOutcome::Busted)
        } else {
            Ok(TurnOutcome::Continue)
        }
    }

    /// Player action: Hit (draw a card).
    fn hit(&mut self, seat: usize, hand_index: usize) -> Result<TurnOutcome, ActionError> {
        self.draw_to(seat, hand_index)
    }

    /// Player action: Stand (keep current hand).
    fn stand(&mut self, seat: usize, hand_index: usize) -> Result<TurnOutcome, ActionError> {
        if let Some(hand) = self.player_mut(seat).and_then(|p| p.hand_mut(hand_index)) {
            hand.set_status(HandStatus::Stand);
        }
        Ok(TurnOutcome::Ended)
    }

    /// Player action: Double down (match the bet, receive one card, then stand).
    fn double_down(&mut self, seat: usize, hand_index: usize) -> Result<TurnOutcome, ActionError> {
        if let Some(player) = self.player_mut(seat) {
            player
                .place_bet(player.bet())
                .map_err(|_| ActionError::InsufficientFunds)?;
        }

        let outcome = self.draw_to(seat, hand_index)?;
        if outcome == TurnOutcome::Busted {
            return Ok(outcome);
        }

        if let Some(hand) = self.player_mut(seat).and_then(|p| p.hand_mut(hand_index)) {
            hand.set_status(HandStatus::Stand);
        }
        Ok(TurnOutcome::Ended)
    }

    /// Player action: Surrender (keep half the bet, the house takes the rest).
    fn surrender(&mut self, seat: usize, hand_index: usize) -> Result<TurnOutcome, ActionError> {
        let rounding = self.options.rounding_surrender;
        let Some(player) = self.table.seat_mut(seat).and_then(|s| s.player_mut()) else {
            return Ok(TurnOutcome::Ended);
        };

        let bet = player.take_bet();
        let refund = rounding.half(bet);
        player.credit(refund);
        if let Some(hand) = player.hand_mut(hand_index) {
            hand.forfeit();
        }
        debug!(seat, player = player.name(), bet, refund, "surrendered");

        self.dealer.player_mut().credit(bet - refund);
        Ok(TurnOutcome::Ended)
    }
}
