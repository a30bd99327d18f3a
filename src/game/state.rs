//! Round phase and turn outcome types.

/// Phases a round passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Hands are returned to the deck.
    Clear,
    /// The deck is shuffled.
    Shuffle,
    /// Every seated player posts the minimum bet.
    Bet,
    /// Two cards to every seat and the dealer.
    Deal,
    /// Every hand is scored.
    Score,
    /// A dealer 21 skips straight to settlement.
    DealerBlackjackCheck,
    /// Seats act on their hands.
    PlayerTurns,
    /// The dealer draws to its threshold.
    DealerTurn,
    /// Bets are settled against the dealer.
    Settle,
}

/// What happened to a hand after one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The hand can act again.
    Continue,
    /// The hand's turn is over.
    Ended,
    /// The hand went over 21; its turn is over.
    Busted,
}

impl TurnOutcome {
    /// Whether the hand's turn is over.
    #[must_use]
    pub const fn is_final(self) -> bool {
        !matches!(self, Self::Continue)
    }
}
