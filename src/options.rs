//! Game configuration options.

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Rounding mode for halving an odd bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
}

impl RoundingMode {
    /// Halves `amount` using this rounding mode.
    #[must_use]
    pub const fn half(self, amount: usize) -> usize {
        match self {
            Self::Down => amount / 2,
            Self::Up => amount.div_ceil(2),
        }
    }
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(2)
///     .with_seats(5)
///     .with_minimum_bet(25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Number of seats at the table.
    pub seats: usize,
    /// Minimum (and only) bet per round.
    pub minimum_bet: usize,
    /// Wallet the human player starts with.
    pub starting_money: usize,
    /// Seat the human player takes.
    pub human_seat: usize,
    /// Name of the human player.
    pub human_name: String,
    /// Score at which the dealer stops drawing.
    pub dealer_stands_on: u8,
    /// Rounding mode for the half bet returned on surrender.
    pub rounding_surrender: RoundingMode,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            seats: 3,
            minimum_bet: 10,
            starting_money: 1000,
            human_seat: 0,
            human_name: String::from("TheUser"),
            dealer_stands_on: 17,
            rounding_surrender: RoundingMode::Down,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(1);
    /// assert_eq!(options.decks, 1);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the number of seats.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_seats(7);
    /// assert_eq!(options.seats, 7);
    /// ```
    #[must_use]
    pub const fn with_seats(mut self, seats: usize) -> Self {
        self.seats = seats;
        self
    }

    /// Sets the minimum bet.
    #[must_use]
    pub const fn with_minimum_bet(mut self, minimum_bet: usize) -> Self {
        self.minimum_bet = minimum_bet;
        self
    }

    /// Sets the human player's starting wallet.
    #[must_use]
    pub const fn with_starting_money(mut self, money: usize) -> Self {
        self.starting_money = money;
        self
    }

    /// Sets the seat the human player takes.
    #[must_use]
    pub const fn with_human_seat(mut self, seat: usize) -> Self {
        self.human_seat = seat;
        self
    }

    /// Sets the human player's name.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_human_name("Bernie");
    /// assert_eq!(options.human_name, "Bernie");
    /// ```
    #[must_use]
    pub fn with_human_name(mut self, name: impl Into<String>) -> Self {
        self.human_name = name.into();
        self
    }

    /// Sets the score at which the dealer stops drawing.
    #[must_use]
    pub const fn with_dealer_stands_on(mut self, score: u8) -> Self {
        self.dealer_stands_on = score;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameOptions, RoundingMode};
    ///
    /// let options = GameOptions::default().with_rounding_surrender(RoundingMode::Up);
    /// assert_eq!(options.rounding_surrender, RoundingMode::Up);
    /// ```
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }

    /// Checks that the options describe a playable table.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] naming the first invalid option.
    pub const fn validate(&self) -> Result<(), SetupError> {
        if self.seats == 0 {
            return Err(SetupError::NoSeats);
        }
        if self.decks == 0 {
            return Err(SetupError::NoDecks);
        }
        if self.minimum_bet == 0 {
            return Err(SetupError::ZeroMinimumBet);
        }
        if self.human_seat >= self.seats {
            return Err(SetupError::SeatOutOfRange {
                seat: self.human_seat,
                seats: self.seats,
            });
        }
        Ok(())
    }
}
