//! Versioned save and restore of a whole game.
//!
//! A snapshot holds the options, every seat, the dealer, the deck in order
//! and the deck's generator position, so a restored game deals and shuffles
//! exactly like the one that was saved. Snapshots are taken between rounds
//! only.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::card::{ACE, KING};
use crate::deck::{Deck, DeckState};
use crate::error::SnapshotError;
use crate::game::Game;
use crate::options::GameOptions;
use crate::table::{Dealer, Table};

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to resume a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    version: u32,
    options: GameOptions,
    table: Table,
    dealer: Dealer,
    deck: DeckState,
    rounds_played: u64,
}

impl GameSnapshot {
    /// Format version of this snapshot.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Rounds completed when the snapshot was taken.
    #[must_use]
    pub const fn rounds_played(&self) -> u64 {
        self.rounds_played
    }
}

impl Game {
    /// Captures the game between rounds.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            options: self.options.clone(),
            table: self.table.clone(),
            dealer: self.dealer.clone(),
            deck: self.deck.to_state(),
            rounds_played: self.rounds_played,
        }
    }

    /// Rebuilds a game from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the snapshot comes from another format
    /// version, carries invalid options, disagrees with its options, or does
    /// not hold exactly one full set of cards per deck.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        snapshot.options.validate()?;
        if snapshot.table.seat_count() != snapshot.options.seats {
            return Err(SnapshotError::Inconsistent("seat count differs from options"));
        }
        if snapshot.deck.decks != snapshot.options.decks {
            return Err(SnapshotError::Inconsistent("deck count differs from options"));
        }
        if snapshot.deck.pinned > snapshot.deck.cards.len() {
            return Err(SnapshotError::Inconsistent("more cards pinned than in the deck"));
        }
        if snapshot.table.minimum_bet() != snapshot.options.minimum_bet {
            return Err(SnapshotError::Inconsistent("minimum bet differs from options"));
        }
        if snapshot.table.players().filter(|(_, p)| p.is_interactive()).count() > 1 {
            return Err(SnapshotError::Inconsistent("more than one interactive player"));
        }
        if snapshot.dealer.player().hands().len() > 1 {
            return Err(SnapshotError::Inconsistent("dealer holds more than one hand"));
        }

        let game = Self {
            options: snapshot.options,
            table: snapshot.table,
            dealer: snapshot.dealer,
            deck: Deck::from_state(snapshot.deck),
            rounds_played: snapshot.rounds_played,
        };
        if game
            .cards_in_play()
            .any(|card| !(ACE..=KING).contains(&card.rank()))
        {
            return Err(SnapshotError::Inconsistent("card rank out of range"));
        }
        if !game.cards_accounted_for() {
            return Err(SnapshotError::Inconsistent("cards are missing or duplicated"));
        }
        Ok(game)
    }
}

/// Writes a snapshot of `game` as JSON.
///
/// # Errors
///
/// Returns [`SnapshotError`] if encoding or writing fails.
pub fn save<W: Write>(game: &Game, mut writer: W) -> Result<(), SnapshotError> {
    serde_json::to_writer(&mut writer, &game.snapshot())?;
    writer.flush()?;
    info!(rounds = game.rounds_played(), "game saved");
    Ok(())
}

/// Reads a JSON snapshot and restores the game it describes.
///
/// # Errors
///
/// Returns [`SnapshotError`] if reading, decoding or validation fails.
pub fn load<R: Read>(reader: R) -> Result<Game, SnapshotError> {
    let snapshot: GameSnapshot = serde_json::from_reader(reader)?;
    let game = Game::restore(snapshot)?;
    info!(rounds = game.rounds_played(), "game restored");
    Ok(game)
}
