//! A multi-deck shoe that deals from the top and takes cards back at the bottom.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::card::{Card, DECK_SIZE, KING, Suit};
use crate::error::DeckError;

/// An ordered pool of `decks * 52` cards.
///
/// Cards leave the deck when dealt and come back through [`Deck::return_card`].
/// The deck owns its random number generator so that a restored deck shuffles
/// exactly like the one it was saved from.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
    decks: u8,
    pinned: usize,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Creates an unshuffled deck made of `decks` standard decks.
    #[must_use]
    pub fn new(decks: u8, seed: u64) -> Self {
        let mut cards = VecDeque::with_capacity(decks as usize * DECK_SIZE);

        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in 1..=KING {
                    if let Ok(card) = Card::new(suit, rank) {
                        cards.push_back(card);
                    }
                }
            }
        }

        Self {
            cards,
            decks,
            pinned: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffles the cards currently in the deck.
    ///
    /// Cards out in hands are unaffected. Cards pinned by [`Deck::stack`]
    /// stay on top for this one shuffle.
    pub fn shuffle(&mut self) {
        let pinned = self.pinned.min(self.cards.len());
        self.cards.make_contiguous()[pinned..].shuffle(&mut self.rng);
        self.pinned = 0;
    }

    /// Moves the given cards to the top of the deck, in order, and pins them
    /// there through the next shuffle.
    ///
    /// Cards are matched by rank and suit against cards already in the deck,
    /// so the number of copies of each card never changes.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::NotInDeck`] if a requested card is not in the
    /// deck; the deck is left untouched in that case.
    pub fn stack(&mut self, top: &[Card]) -> Result<(), DeckError> {
        let mut rest = self.cards.clone();
        let mut stacked = VecDeque::with_capacity(self.cards.len());

        for wanted in top {
            let index = rest
                .iter()
                .position(|c| c.is_same_card(wanted))
                .ok_or(DeckError::NotInDeck {
                    suit: wanted.suit(),
                    rank: wanted.rank(),
                })?;
            if let Some(card) = rest.remove(index) {
                stacked.push_back(card);
            }
        }

        self.pinned = stacked.len();
        stacked.append(&mut rest);
        self.cards = stacked;
        Ok(())
    }

    /// Deals the top card, turned the requested way.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if no cards remain.
    pub fn deal(&mut self, face_up: bool) -> Result<Card, DeckError> {
        let mut card = self.cards.pop_front().ok_or(DeckError::Empty)?;
        self.pinned = self.pinned.saturating_sub(1);
        if face_up {
            card.turn_up();
        } else {
            card.turn_down();
        }
        Ok(card)
    }

    /// Puts a card back at the bottom of the deck, face down.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::DuplicateCard`] if the deck already holds as many
    /// copies of that exact card as there are decks.
    pub fn return_card(&mut self, mut card: Card) -> Result<(), DeckError> {
        let copies = self.copies_of(card.suit(), card.rank());
        if copies >= self.decks as usize {
            return Err(DeckError::DuplicateCard {
                suit: card.suit(),
                rank: card.rank(),
                copies,
            });
        }

        card.turn_down();
        self.cards.push_back(card);
        Ok(())
    }

    /// Number of copies of a card currently in the deck.
    #[must_use]
    pub fn copies_of(&self, suit: Suit, rank: u8) -> usize {
        self.cards
            .iter()
            .filter(|c| c.suit() == suit && c.rank() == rank)
            .count()
    }

    /// Number of standard decks this deck was built from.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Number of cards a full deck holds.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in the deck, top first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// The generator that drives this deck's shuffles.
    pub(crate) const fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub(crate) fn to_state(&self) -> DeckState {
        DeckState {
            decks: self.decks,
            pinned: self.pinned,
            cards: self.cards.iter().copied().collect(),
            rng_seed: self.rng.get_seed(),
            rng_word_pos_hi: (self.rng.get_word_pos() >> 64) as u64,
            rng_word_pos_lo: self.rng.get_word_pos() as u64,
        }
    }

    pub(crate) fn from_state(state: DeckState) -> Self {
        let mut rng = ChaCha8Rng::from_seed(state.rng_seed);
        let word_pos =
            (u128::from(state.rng_word_pos_hi) << 64) | u128::from(state.rng_word_pos_lo);
        rng.set_word_pos(word_pos);
        Self {
            cards: state.cards.into(),
            decks: state.decks,
            pinned: state.pinned,
            rng,
        }
    }
}

/// Serialized form of a [`Deck`], including the generator position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DeckState {
    pub(crate) decks: u8,
    pub(crate) pinned: usize,
    pub(crate) cards: Vec<Card>,
    rng_seed: [u8; 32],
    rng_word_pos_hi: u64,
    rng_word_pos_lo: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::ACE;

    fn card(suit: Suit, rank: u8) -> Card {
        Card::new(suit, rank).unwrap()
    }

    #[test]
    fn builds_every_card_per_deck() {
        let deck = Deck::new(2, 1);
        assert_eq!(deck.len(), 2 * DECK_SIZE);
        assert_eq!(deck.capacity(), 104);
        assert_eq!(deck.copies_of(Suit::Hearts, ACE), 2);
        assert_eq!(deck.copies_of(Suit::Clubs, KING), 2);
    }

    #[test]
    fn deals_from_the_top_with_orientation() {
        let mut deck = Deck::new(1, 1);
        let first = deck.deal(true).unwrap();
        assert!(first.is_same_card(&card(Suit::Spades, ACE)));
        assert!(first.is_face_up());

        let second = deck.deal(false).unwrap();
        assert!(second.is_same_card(&card(Suit::Spades, 2)));
        assert!(!second.is_face_up());
        assert_eq!(deck.len(), DECK_SIZE - 2);
    }

    #[test]
    fn empty_deck_reports_error() {
        let mut deck = Deck::new(1, 1);
        for _ in 0..DECK_SIZE {
            deck.deal(true).unwrap();
        }
        assert!(deck.is_empty());
        assert_eq!(deck.deal(true), Err(DeckError::Empty));
    }

    #[test]
    fn return_card_goes_to_bottom_face_down() {
        let mut deck = Deck::new(1, 1);
        let card = deck.deal(true).unwrap();
        deck.return_card(card).unwrap();
        let last = deck.cards().last().unwrap();
        assert!(last.is_same_card(&card));
        assert!(!last.is_face_up());
        assert_eq!(deck.len(), DECK_SIZE);
    }

    #[test]
    fn return_card_rejects_extra_copies() {
        let mut deck = Deck::new(1, 1);
        let err = deck.return_card(card(Suit::Hearts, 7)).unwrap_err();
        assert_eq!(
            err,
            DeckError::DuplicateCard {
                suit: Suit::Hearts,
                rank: 7,
                copies: 1,
            }
        );
        assert_eq!(deck.len(), DECK_SIZE);
    }

    #[test]
    fn shuffle_keeps_composition() {
        let mut deck = Deck::new(1, 9);
        deck.shuffle();
        assert_eq!(deck.len(), DECK_SIZE);
        for suit in Suit::ALL {
            for rank in 1..=KING {
                assert_eq!(deck.copies_of(suit, rank), 1);
            }
        }
    }

    #[test]
    fn same_seed_shuffles_the_same() {
        let mut a = Deck::new(1, 5);
        let mut b = Deck::new(1, 5);
        a.shuffle();
        b.shuffle();
        let same = a
            .cards()
            .zip(b.cards())
            .all(|(x, y)| x.is_same_card(y));
        assert!(same);
    }

    #[test]
    fn stacked_cards_survive_one_shuffle() {
        let mut deck = Deck::new(1, 3);
        let top = [card(Suit::Clubs, 9), card(Suit::Hearts, ACE)];
        deck.stack(&top).unwrap();
        deck.shuffle();
        assert!(deck.deal(true).unwrap().is_same_card(&top[0]));
        assert!(deck.deal(true).unwrap().is_same_card(&top[1]));
        assert_eq!(deck.len(), DECK_SIZE - 2);
    }

    #[test]
    fn stack_rejects_missing_cards() {
        let mut deck = Deck::new(1, 3);
        let dealt = deck.deal(true).unwrap();
        assert!(matches!(
            deck.stack(&[dealt]),
            Err(DeckError::NotInDeck { .. })
        ));
        assert_eq!(deck.len(), DECK_SIZE - 1);
    }

    #[test]
    fn state_restores_generator_position() {
        let mut deck = Deck::new(1, 11);
        deck.shuffle();
        let mut restored = Deck::from_state(deck.to_state());
        deck.shuffle();
        restored.shuffle();
        let same = deck
            .cards()
            .zip(restored.cards())
            .all(|(x, y)| x.is_same_card(y));
        assert!(same);
    }
}
