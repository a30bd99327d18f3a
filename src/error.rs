//! Error types for table operations.

use thiserror::Error;

use crate::card::Suit;

/// Errors that can occur when building a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    /// Rank is outside `1..=13`.
    #[error("card rank {0} is outside 1..=13")]
    InvalidRank(u8),
}

/// Errors raised by the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// No cards left to deal.
    #[error("no cards left in the deck")]
    Empty,
    /// Returning the card would exceed the number of copies in the deck.
    #[error("{rank} of {suit:?} is already in the deck {copies} time(s)")]
    DuplicateCard {
        /// Suit of the rejected card.
        suit: Suit,
        /// Rank of the rejected card.
        rank: u8,
        /// Copies already held by the deck.
        copies: usize,
    },
    /// A requested card is not in the deck.
    #[error("{rank} of {suit:?} is not in the deck")]
    NotInDeck {
        /// Suit of the missing card.
        suit: Suit,
        /// Rank of the missing card.
        rank: u8,
    },
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Insufficient funds.
    #[error("insufficient funds: wallet {wallet}, bet {bet}")]
    InsufficientFunds {
        /// Wallet balance at the time of the bet.
        wallet: usize,
        /// Requested bet.
        bet: usize,
    },
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// Splitting hands is not supported at this table.
    #[error("splitting hands is not supported")]
    SplitUnsupported,
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    NoCards,
}

/// Errors that abort a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The deck failed to deal or take back a card.
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Errors that can occur when setting up a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    /// A table needs at least one seat.
    #[error("a table needs at least one seat")]
    NoSeats,
    /// A shoe needs at least one deck.
    #[error("a shoe needs at least one deck")]
    NoDecks,
    /// The minimum bet must be positive.
    #[error("the minimum bet must be positive")]
    ZeroMinimumBet,
    /// The human seat does not exist.
    #[error("seat {seat} does not exist at a table of {seats}")]
    SeatOutOfRange {
        /// Requested seat.
        seat: usize,
        /// Number of seats at the table.
        seats: usize,
    },
    /// Cards on the table could not be collected.
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Errors that can occur when saving or restoring a game.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Snapshot could not be read or written.
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Snapshot was written by an unknown format version.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },
    /// Snapshot does not describe a consistent table.
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(&'static str),
    /// Snapshot options are invalid.
    #[error(transparent)]
    Setup(#[from] SetupError),
}
