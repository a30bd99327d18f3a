//! Hands and the blackjack scoring rule.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Score above which a hand is bust.
pub const BLACKJACK: u8 = 21;

const fn card_value(rank: u8) -> u8 {
    match rank {
        2..=10 => rank,
        11..=13 => 10,
        _ => 1,
    }
}

/// Scores a set of cards.
///
/// Every ace counts 1, then one ace is promoted to 11 if that does not bust
/// the hand. Pure function of the cards; orientation is ignored.
#[must_use]
pub fn score_cards(cards: &[Card]) -> u8 {
    let low = cards
        .iter()
        .fold(0u8, |sum, card| sum.saturating_add(card_value(card.rank())));

    if low > BLACKJACK || !cards.iter().any(Card::is_ace) {
        return low;
    }

    let high = low + 10;
    if high <= BLACKJACK { high } else { low }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandStatus {
    /// Hand can still take actions.
    Active,
    /// Player has stood (or doubled down).
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Player has surrendered.
    Surrendered,
}

/// One grouping of cards a player is playing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    score: u8,
    status: HandStatus,
}

impl Hand {
    /// Creates an empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            score: 0,
            status: HandStatus::Active,
        }
    }

    /// Adds a card to the hand.
    ///
    /// The score is not touched; call [`Hand::rescore`] afterwards.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Recomputes the score from the cards and marks the hand bust if needed.
    pub fn rescore(&mut self) -> u8 {
        if self.status == HandStatus::Surrendered {
            return self.score;
        }
        self.score = score_cards(&self.cards);
        if self.score > BLACKJACK {
            self.status = HandStatus::Bust;
        }
        self.score
    }

    /// The last computed score.
    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// Whether the last computed score is over 21.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.score > BLACKJACK
    }

    /// Gives the hand up: the score is forced to 0 so it can only lose.
    pub const fn forfeit(&mut self) {
        self.score = 0;
        self.status = HandStatus::Surrendered;
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Turns every card face up.
    pub fn reveal(&mut self) {
        self.cards.iter_mut().for_each(Card::turn_up);
    }

    /// Cards currently showing their face.
    pub fn face_up_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_face_up())
    }

    /// Whether the hand holds two cards of the same rank.
    #[must_use]
    pub fn has_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0] == self.cards[1]
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Empties the hand, handing the cards back in deal order.
    pub fn take_cards(&mut self) -> Vec<Card> {
        self.score = 0;
        self.status = HandStatus::Active;
        core::mem::take(&mut self.cards)
    }

    /// Renders only face-up cards, hiding the rest.
    #[must_use]
    pub const fn masked(&self) -> MaskedHand<'_> {
        MaskedHand(self)
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cards(f, self.cards.iter().map(Some))?;
        write!(f, " (score {})", self.score)
    }
}

/// A hand rendered the way the rest of the table sees it.
pub struct MaskedHand<'a>(&'a Hand);

impl fmt::Display for MaskedHand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cards(f, self.0.cards.iter().map(|c| c.is_face_up().then_some(c)))
    }
}

fn write_cards<'a>(
    f: &mut fmt::Formatter<'_>,
    cards: impl Iterator<Item = Option<&'a Card>>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, card) in cards.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match card {
            Some(card) => write!(f, "{card}")?,
            None => f.write_str("??")?,
        }
    }
    f.write_str("]")
}
