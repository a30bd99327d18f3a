//! Card types.

use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Spades.
    Spades,
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
}

impl Suit {
    /// All four suits in deck-building order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    const fn name(self) -> &'static str {
        match self {
            Self::Spades => "Spades",
            Self::Hearts => "Hearts",
            Self::Diamonds => "Diamonds",
            Self::Clubs => "Clubs",
        }
    }
}

/// Rank of an ace.
pub const ACE: u8 = 1;
/// Rank of a jack.
pub const JACK: u8 = 11;
/// Rank of a queen.
pub const QUEEN: u8 = 12;
/// Rank of a king.
pub const KING: u8 = 13;

/// A playing card.
///
/// Equality and ordering look at the rank only, so a ten of spades equals a
/// ten of clubs. Use [`Card::is_same_card`] to compare physical identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    suit: Suit,
    rank: u8,
    face_up: bool,
}

impl Card {
    /// Creates a new face-down card.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::InvalidRank`] if `rank` is outside `1..=13`.
    pub const fn new(suit: Suit, rank: u8) -> Result<Self, CardError> {
        if rank < ACE || rank > KING {
            return Err(CardError::InvalidRank(rank));
        }
        Ok(Self {
            suit,
            rank,
            face_up: false,
        })
    }

    /// The suit of the card.
    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// Whether the card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == ACE
    }

    /// Whether the card is showing its face.
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Turns the card face up.
    pub const fn turn_up(&mut self) {
        self.face_up = true;
    }

    /// Turns the card face down.
    pub const fn turn_down(&mut self) {
        self.face_up = false;
    }

    /// Whether both cards have the same rank and suit.
    #[must_use]
    pub fn is_same_card(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }

    const fn rank_name(&self) -> Option<&'static str> {
        match self.rank {
            ACE => Some("Ace"),
            JACK => Some("Jack"),
            QUEEN => Some("Queen"),
            KING => Some("King"),
            _ => None,
        }
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Card {}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank_name() {
            Some(name) => write!(f, "{name} of {}", self.suit.name()),
            None => write!(f, "{} of {}", self.rank, self.suit.name()),
        }
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
