use tracing::{debug, warn};

use crate::decision::Decider;
use crate::deck::Deck;
use crate::error::RoundError;
use crate::hand::BLACKJACK;
use crate::options::GameOptions;
use crate::result::RoundReport;
use crate::table::{Dealer, Table};

use super::RoundPhase;

/// One round in flight. Borrows the session's state and owns nothing but its
/// report.
pub(super) struct Round<'g> {
    pub(super) table: &'g mut Table,
    pub(super) dealer: &'g mut Dealer,
    pub(super) deck: &'g mut Deck,
    pub(super) options: &'g GameOptions,
    pub(super) report: RoundReport,
}

impl Round<'_> {
    pub(super) fn run(
        mut self,
        interactive: &mut dyn Decider,
        computer: &mut dyn Decider,
    ) -> Result<RoundReport, RoundError> {
        match self.play(interactive, computer) {
            Ok(()) => Ok(self.report),
            Err(err) => {
                warn!(error = %err, "round aborted, returning bets");
                self.refund_bets();
                Err(err)
            }
        }
    }

    fn play(
        &mut self,
        interactive: &mut dyn Decider,
        computer: &mut dyn Decider,
    ) -> Result<(), RoundError> {
        self.enter(RoundPhase::Clear);
        self.clear()?;

        self.enter(RoundPhase::Shuffle);
        self.deck.shuffle();

        self.enter(RoundPhase::Bet);
        self.take_bets();

        self.enter(RoundPhase::Deal);
        self.deal()?;

        self.enter(RoundPhase::Score);
        self.score_all();

        self.enter(RoundPhase::DealerBlackjackCheck);
        if self.dealer_score() == BLACKJACK {
            debug!("dealer has blackjack");
            self.report.dealer_blackjack = true;
            self.reveal_dealer();
        } else {
            self.enter(RoundPhase::PlayerTurns);
            self.play_hands(interactive, computer)?;

            self.enter(RoundPhase::DealerTurn);
            self.dealer_play()?;
        }

        self.enter(RoundPhase::Settle);
        self.settle();
        Ok(())
    }

    fn enter(&mut self, phase: RoundPhase) {
        debug!(?phase, "round phase");
        self.report.phases.push(phase);
    }

    pub(super) fn dealer_score(&self) -> u8 {
        self.dealer.hand().map_or(0, |hand| hand.score())
    }

    /// Returns every outstanding bet to its owner.
    fn refund_bets(&mut self) {
        for (_, player) in self.table.players_mut() {
            player.return_bet();
        }
        self.dealer.player_mut().return_bet();
    }
}
