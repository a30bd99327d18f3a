//! Seats, the table, and the dealer's seat.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::hand::Hand;
use crate::player::Player;

/// Bankroll the house starts with. Large enough to never run dry.
pub const DEALER_BANKROLL: usize = 1_000_000_000;

/// A slot at the table that may hold a player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seat {
    player: Option<Player>,
}

impl Seat {
    /// Creates an empty seat.
    #[must_use]
    pub const fn empty() -> Self {
        Self { player: None }
    }

    /// Whether nobody sits here.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.player.is_none()
    }

    /// The seated player.
    #[must_use]
    pub const fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Mutable access to the seated player.
    pub const fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    /// Seats a player, handing them back if the seat is taken.
    ///
    /// # Errors
    ///
    /// Returns the player unchanged if the seat is occupied.
    pub fn fill(&mut self, player: Player) -> Result<(), Player> {
        if self.player.is_some() {
            return Err(player);
        }
        self.player = Some(player);
        Ok(())
    }

    /// Removes and returns the seated player.
    pub const fn vacate(&mut self) -> Option<Player> {
        self.player.take()
    }
}

/// A fixed row of seats with a minimum bet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    seats: Vec<Seat>,
    minimum_bet: usize,
}

impl Table {
    /// Creates a table of `seats` empty seats.
    #[must_use]
    pub fn new(seats: usize, minimum_bet: usize) -> Self {
        Self {
            seats: (0..seats).map(|_| Seat::empty()).collect(),
            minimum_bet,
        }
    }

    /// Minimum bet per round.
    #[must_use]
    pub const fn minimum_bet(&self) -> usize {
        self.minimum_bet
    }

    /// Number of seats, occupied or not.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// All seats in order.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// One seat.
    #[must_use]
    pub fn seat(&self, index: usize) -> Option<&Seat> {
        self.seats.get(index)
    }

    /// Mutable access to one seat.
    pub fn seat_mut(&mut self, index: usize) -> Option<&mut Seat> {
        self.seats.get_mut(index)
    }

    /// Seats a player at `index`.
    ///
    /// # Errors
    ///
    /// Returns the player if the seat is taken or does not exist.
    pub fn seat_player(&mut self, player: Player, index: usize) -> Result<(), Player> {
        match self.seats.get_mut(index) {
            Some(seat) => seat.fill(player),
            None => Err(player),
        }
    }

    /// Removes the player at `index`.
    pub fn remove_player(&mut self, index: usize) -> Option<Player> {
        self.seats.get_mut(index).and_then(Seat::vacate)
    }

    /// Occupied seats with their index.
    pub fn players(&self) -> impl Iterator<Item = (usize, &Player)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, seat)| seat.player().map(|p| (i, p)))
    }

    /// Occupied seats with their index, mutably.
    pub fn players_mut(&mut self) -> impl Iterator<Item = (usize, &mut Player)> {
        self.seats
            .iter_mut()
            .enumerate()
            .filter_map(|(i, seat)| seat.player_mut().map(|p| (i, p)))
    }

    /// Number of occupied seats.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.players().count()
    }

    /// The interactive player and their seat, if still seated.
    #[must_use]
    pub fn interactive_player(&self) -> Option<(usize, &Player)> {
        self.players().find(|(_, p)| p.is_interactive())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seat) in self.seats.iter().enumerate() {
            writeln!(f, "---------- Seat: {i}")?;
            match seat.player() {
                Some(player) => writeln!(f, "{player}")?,
                None => writeln!(f, "  (empty)")?,
            }
        }
        Ok(())
    }
}

/// The house: a seat outside the table that never places table bets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dealer {
    player: Player,
}

impl Dealer {
    /// Creates the dealer with [`DEALER_BANKROLL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_bankroll(DEALER_BANKROLL)
    }

    /// Creates the dealer with a specific bankroll.
    #[must_use]
    pub fn with_bankroll(bankroll: usize) -> Self {
        Self {
            player: Player::new("Dealer", bankroll, false),
        }
    }

    /// The dealer as a player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access to the dealer as a player.
    pub const fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The dealer's hand, if dealt.
    #[must_use]
    pub fn hand(&self) -> Option<&Hand> {
        self.player.hands().first()
    }

    /// The dealer's remaining bankroll.
    #[must_use]
    pub const fn bankroll(&self) -> usize {
        self.player.wallet()
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Dealer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---------- Dealer")?;
        write!(f, "{}", self.player)
    }
}
