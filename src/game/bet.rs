use tracing::{debug, info};

use crate::deck::Deck;
use crate::error::DeckError;
use crate::player::Player;
use crate::table::{Dealer, Table};

use super::round::Round;

/// Returns a player's cards one at a time. On failure the rejected card and
/// everything after it go back into the player's first hand.
fn return_hands(player: &mut Player, deck: &mut Deck) -> Result<(), DeckError> {
    let mut cards = player.discard_hands().into_iter();
    while let Some(card) = cards.next() {
        if let Err(err) = deck.return_card(card) {
            for kept in core::iter::once(card).chain(cards) {
                player.receive_card(kept, 0);
            }
            player.rescore_hands();
            return Err(err);
        }
    }
    Ok(())
}

/// Returns every seated player's and the dealer's cards to the deck.
pub(super) fn return_cards(
    table: &mut Table,
    dealer: &mut Dealer,
    deck: &mut Deck,
) -> Result<(), DeckError> {
    for (_, player) in table.players_mut() {
        return_hands(player, deck)?;
    }
    return_hands(dealer.player_mut(), deck)
}

impl Round<'_> {
    pub(super) fn clear(&mut self) -> Result<(), DeckError> {
        return_cards(self.table, self.dealer, self.deck)?;
        debug!(cards = self.deck.len(), "table cleared");
        Ok(())
    }

    /// Takes the minimum bet from every seat, vacating seats that cannot pay.
    pub(super) fn take_bets(&mut self) {
        let minimum = self.table.minimum_bet();

        for seat in 0..self.table.seat_count() {
            let Some(player) = self.table.seat_mut(seat).and_then(|s| s.player_mut()) else {
                continue;
            };

            match player.place_bet(minimum) {
                Ok(()) => debug!(seat, player = player.name(), bet = minimum, "bet placed"),
                Err(err) => {
                    if let Some(player) = self.table.remove_player(seat) {
                        info!(seat, player = player.name(), error = %err, "player is out of money");
                        self.report.vacated.push((seat, player.name().to_owned()));
                    }
                }
            }
        }
    }

    /// Two cards to every seat and the dealer, in physical deal order.
    ///
    /// Players get both cards face up; the dealer's first card is the hole
    /// card.
    pub(super) fn deal(&mut self) -> Result<(), DeckError> {
        for dealer_face_up in [false, true] {
            for (seat, player) in self.table.players_mut() {
                let card = self.deck.deal(true)?;
                debug!(seat, player = player.name(), %card, "dealt");
                player.receive_card(card, 0);
            }

            let card = self.deck.deal(dealer_face_up)?;
            if dealer_face_up {
                debug!(%card, "dealt to dealer");
            } else {
                debug!("dealer received card face down");
            }
            self.dealer.player_mut().receive_card(card, 0);
        }
        Ok(())
    }

    pub(super) fn score_all(&mut self) {
        for (_, player) in self.table.players_mut() {
            player.rescore_hands();
        }
        self.dealer.player_mut().rescore_hands();
    }
}
