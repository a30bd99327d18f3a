//! A seated blackjack table: one human, computer opponents, and a dealer.
//!
//! The crate provides a [`Game`] type that owns the table, dealer and deck,
//! and plays whole rounds: clearing, shuffling, betting, dealing, player
//! turns, dealer play and settlement. Decisions come through the [`Decider`]
//! trait, and a game can be paused and resumed through a [`GameSnapshot`].
//!
//! # Example
//!
//! ```
//! use bjtable::{AlwaysStand, Game, GameOptions};
//!
//! let mut game = Game::new(GameOptions::default(), 42).unwrap();
//! let report = game.play_round(&mut AlwaysStand, &mut AlwaysStand).unwrap();
//! assert_eq!(report.hands.len(), 3);
//! ```

pub mod card;
pub mod decision;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod player;
pub mod result;
pub mod session;
pub mod snapshot;
pub mod table;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use decision::{Action, AlwaysStand, Decider, ParseActionError, StandOnThreshold, TurnView};
#[doc(hidden)]
pub use decision::Scripted;
pub use deck::Deck;
pub use error::{
    ActionError, BetError, CardError, DeckError, RoundError, SetupError, SnapshotError,
};
pub use game::{Game, RoundPhase, TurnOutcome};
pub use hand::{Hand, HandStatus, score_cards};
pub use options::{GameOptions, RoundingMode};
pub use player::Player;
pub use result::{HandOutcome, HandResult, RoundReport};
pub use session::{Command, ParseCommandError, SessionState, transition};
pub use snapshot::{GameSnapshot, SNAPSHOT_VERSION};
pub use table::{Dealer, Seat, Table};
