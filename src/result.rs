//! Round result types for settlement.

use crate::game::RoundPhase;

/// Result of a single hand after settlement, from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has the higher score).
    Win,
    /// Player loses (player busts or dealer has the higher score).
    Lose,
    /// Push (tie, including both bust).
    Push,
}

/// Settlement of one hand against the dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    /// Seat the hand was played from.
    pub seat: usize,
    /// Name of the player at that seat.
    pub player: String,
    /// The hand index (always 0 while splitting is unsupported).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// Bet on the table when the hand was settled.
    pub bet: usize,
    /// Amount credited to the player's wallet.
    pub payout: usize,
    /// The player's hand score.
    pub player_score: u8,
    /// The dealer's hand score.
    pub dealer_score: u8,
}

/// Result of a whole round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Phases the round went through, in order.
    pub phases: Vec<RoundPhase>,
    /// Seats vacated because their player could not cover the minimum bet.
    pub vacated: Vec<(usize, String)>,
    /// Settlement of every hand, in seat order.
    pub hands: Vec<HandResult>,
    /// The dealer's final score.
    pub dealer_score: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer was dealt 21 and the round skipped to settlement.
    pub dealer_blackjack: bool,
}

impl RoundReport {
    /// Results for one seat.
    pub fn for_seat(&self, seat: usize) -> impl Iterator<Item = &HandResult> {
        self.hands.iter().filter(move |h| h.seat == seat)
    }
}
