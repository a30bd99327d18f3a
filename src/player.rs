//! Players, their wallets and their hands.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::BetError;
use crate::hand::Hand;

/// A participant at the table, including the dealer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    name: String,
    wallet: usize,
    bet: usize,
    hands: Vec<Hand>,
    interactive: bool,
}

impl Player {
    /// Creates a player with an empty hand list and no bet.
    #[must_use]
    pub fn new(name: impl Into<String>, wallet: usize, interactive: bool) -> Self {
        Self {
            name: name.into(),
            wallet,
            bet: 0,
            hands: Vec::new(),
            interactive,
        }
    }

    /// The player's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Money not currently on the table.
    #[must_use]
    pub const fn wallet(&self) -> usize {
        self.wallet
    }

    /// Money currently on the table.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Whether decisions for this player come from a person.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Moves `amount` from the wallet onto the bet.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::InsufficientFunds`] if the wallet cannot cover it;
    /// nothing moves in that case.
    pub const fn place_bet(&mut self, amount: usize) -> Result<(), BetError> {
        if amount > self.wallet {
            return Err(BetError::InsufficientFunds {
                wallet: self.wallet,
                bet: amount,
            });
        }
        self.wallet -= amount;
        self.bet += amount;
        Ok(())
    }

    /// Returns the whole bet to the wallet.
    pub const fn return_bet(&mut self) -> usize {
        let bet = self.bet;
        self.wallet += bet;
        self.bet = 0;
        bet
    }

    /// Takes the whole bet off the table without returning it.
    pub(crate) const fn take_bet(&mut self) -> usize {
        let bet = self.bet;
        self.bet = 0;
        bet
    }

    /// Adds money to the wallet.
    pub(crate) const fn credit(&mut self, amount: usize) {
        self.wallet += amount;
    }

    /// The player's hands.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Mutable access to one hand.
    pub fn hand_mut(&mut self, index: usize) -> Option<&mut Hand> {
        self.hands.get_mut(index)
    }

    /// Gives a card to hand `index`, opening a new hand if it does not exist yet.
    pub fn receive_card(&mut self, card: Card, index: usize) {
        match self.hands.get_mut(index) {
            Some(hand) => hand.add_card(card),
            None => {
                let mut hand = Hand::new();
                hand.add_card(card);
                self.hands.push(hand);
            }
        }
    }

    /// Rescores every hand.
    pub fn rescore_hands(&mut self) {
        self.hands.iter_mut().for_each(|hand| {
            hand.rescore();
        });
    }

    /// Discards all hands, returning their cards in deal order.
    pub fn discard_hands(&mut self) -> Vec<Card> {
        self.hands
            .drain(..)
            .flat_map(|mut hand| hand.take_cards())
            .collect()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.interactive { "*" } else { "" };
        writeln!(f, "  name   : {}{marker}", self.name)?;
        writeln!(f, "  hand   :")?;
        for hand in &self.hands {
            if self.interactive {
                writeln!(f, "    {hand}")?;
            } else {
                writeln!(f, "    {}", hand.masked())?;
            }
        }
        writeln!(f, "  money  : ${:>8}", self.wallet)?;
        write!(f, "  bet    : ${:>8}", self.bet)
    }
}
