//! Game session and round engine.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::card::{ACE, Card, KING, Suit};
use crate::decision::Decider;
use crate::deck::Deck;
use crate::error::{DeckError, RoundError, SetupError};
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::player::Player;
use crate::result::RoundReport;
use crate::table::{Dealer, Table};

mod actions;
mod bet;
mod dealer;
mod round;
pub mod state;

pub use actions::MAX_REJECTIONS;
pub use dealer::{compare_scores, settle_bet};
pub use state::{RoundPhase, TurnOutcome};

use round::Round;

const COMPUTER_NAMES: [&str; 16] = [
    "Alice", "Bob", "Carmen", "Dmitri", "Elena", "Felix", "Grace", "Hiro", "Ines", "Jonas",
    "Keiko", "Luis", "Maya", "Nikolai", "Olga", "Pavel",
];

/// A blackjack session: the table, the dealer, and the deck they share.
///
/// The session owns all state. Each call to [`Game::play_round`] borrows it
/// for exactly one round, so nothing can observe a half-settled table.
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) options: GameOptions,
    pub(crate) table: Table,
    pub(crate) dealer: Dealer,
    pub(crate) deck: Deck,
    pub(crate) rounds_played: u64,
}

impl Game {
    /// Sets up a table: the human in their seat, computers everywhere else.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if the options are invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default(), 42).unwrap();
    /// assert_eq!(game.table().occupied(), 3);
    /// ```
    pub fn new(options: GameOptions, seed: u64) -> Result<Self, SetupError> {
        options.validate()?;
        let mut deck = Deck::new(options.decks, seed);
        let table = Self::seat_table(&options, deck.rng_mut())?;

        Ok(Self {
            options,
            table,
            dealer: Dealer::new(),
            deck,
            rounds_played: 0,
        })
    }

    /// Builds a table from explicit parts, for scripted setups.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if the options are invalid.
    pub fn with_table(options: GameOptions, table: Table, seed: u64) -> Result<Self, SetupError> {
        options.validate()?;
        Ok(Self {
            deck: Deck::new(options.decks, seed),
            options,
            table,
            dealer: Dealer::new(),
            rounds_played: 0,
        })
    }

    fn seat_table(options: &GameOptions, rng: &mut ChaCha8Rng) -> Result<Table, SetupError> {
        let mut table = Table::new(options.seats, options.minimum_bet);
        let human = Player::new(options.human_name.clone(), options.starting_money, true);
        table
            .seat_player(human, options.human_seat)
            .map_err(|_| SetupError::SeatOutOfRange {
                seat: options.human_seat,
                seats: options.seats,
            })?;

        let low = (options.starting_money / 2).max(1);
        let high = options.starting_money.saturating_mul(10).max(low + 1);
        for index in 0..table.seat_count() {
            let Some(seat) = table.seat_mut(index).filter(|seat| seat.is_empty()) else {
                continue;
            };
            let name = COMPUTER_NAMES[rng.random_range(0..COMPUTER_NAMES.len())];
            let wallet = rng.random_range(low..high);
            match seat.fill(Player::new(name, wallet, false)) {
                Ok(()) => debug!(seat = index, name, wallet, "computer player seated"),
                Err(player) => debug!(seat = index, name = player.name(), "seat already taken"),
            }
        }

        Ok(table)
    }

    /// Starts over with a fresh table and dealer, keeping the deck.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Deck`] if the outstanding cards cannot be
    /// returned, or another [`SetupError`] if the table cannot be seated. The
    /// old table stays in place in both cases.
    pub fn restart(&mut self) -> Result<(), SetupError> {
        let table = Self::seat_table(&self.options, self.deck.rng_mut())?;
        self.clear_table()?;
        self.table = table;
        self.dealer = Dealer::new();
        self.rounds_played = 0;
        info!("game restarted");
        Ok(())
    }

    /// Starts over with new options, keeping the deck's generator.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if the options are invalid; the game is left
    /// unchanged in that case.
    pub fn reconfigure(&mut self, options: GameOptions) -> Result<(), SetupError> {
        options.validate()?;
        let mut deck = Deck::new(options.decks, self.deck.rng_mut().random());
        self.table = Self::seat_table(&options, deck.rng_mut())?;
        self.deck = deck;
        self.dealer = Dealer::new();
        self.options = options;
        self.rounds_played = 0;
        info!("game reconfigured");
        Ok(())
    }

    /// Plays one full round.
    ///
    /// `interactive` decides for the human seat, `computer` for every other
    /// seat.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError`] if the deck runs out or its bookkeeping is
    /// violated. Outstanding bets are returned to their owners before the
    /// error is reported.
    pub fn play_round(
        &mut self,
        interactive: &mut dyn Decider,
        computer: &mut dyn Decider,
    ) -> Result<RoundReport, RoundError> {
        let round = Round {
            table: &mut self.table,
            dealer: &mut self.dealer,
            deck: &mut self.deck,
            options: &self.options,
            report: RoundReport::default(),
        };
        let report = round.run(interactive, computer)?;
        self.rounds_played += 1;
        Ok(report)
    }

    /// Returns every card on the table to the deck.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::DuplicateCard`] if a card would be returned twice.
    pub fn clear_table(&mut self) -> Result<(), DeckError> {
        bet::return_cards(&mut self.table, &mut self.dealer, &mut self.deck)
    }

    /// Game options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// The table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Mutable access to the table, for seating and removing players.
    pub const fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    /// The dealer.
    #[must_use]
    pub const fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// The deck.
    #[must_use]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Mutable access to the deck, for stacking.
    pub const fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    /// Rounds completed since the game was set up.
    #[must_use]
    pub const fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// Every card in the deck and in every hand, the dealer's included.
    pub(crate) fn cards_in_play(&self) -> impl Iterator<Item = &Card> {
        let in_hands = self
            .table
            .players()
            .map(|(_, p)| p)
            .chain(core::iter::once(self.dealer.player()))
            .flat_map(Player::hands)
            .flat_map(Hand::cards);
        self.deck.cards().chain(in_hands)
    }

    /// Copies of a card in the deck and in every hand on the table.
    #[must_use]
    pub fn copies_in_play(&self, suit: Suit, rank: u8) -> usize {
        self.cards_in_play()
            .filter(|c| c.suit() == suit && c.rank() == rank)
            .count()
    }

    /// Whether every card is accounted for exactly once per deck and no
    /// other card is in play.
    #[must_use]
    pub fn cards_accounted_for(&self) -> bool {
        let decks = self.deck.decks() as usize;
        self.cards_in_play().count() == self.deck.capacity()
            && Suit::ALL
                .into_iter()
                .all(|suit| (ACE..=KING).all(|rank| self.copies_in_play(suit, rank) == decks))
    }
}

impl core::fmt::Display for Game {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.dealer)?;
        writeln!(f)?;
        write!(f, "{}", self.table)
    }
}
