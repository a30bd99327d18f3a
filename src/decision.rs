//! Player decisions and the policies that make them.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::Hand;
use crate::player::Player;

/// An action a player can take on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw one card and keep playing.
    Hit,
    /// Keep the hand as it is.
    Stand,
    /// Double the bet, draw exactly one card, and stop.
    DoubleDown,
    /// Give up half the bet and stop.
    Surrender,
    /// Split a pair. Always rejected at this table.
    Split,
}

impl Action {
    /// Menu key for the action.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Hit => 'h',
            Self::Stand => 's',
            Self::DoubleDown => 'd',
            Self::Surrender => 'x',
            Self::Split => 'p',
        }
    }

    /// Parses a menu key.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'h' => Some(Self::Hit),
            's' => Some(Self::Stand),
            'd' => Some(Self::DoubleDown),
            'x' => Some(Self::Surrender),
            'p' => Some(Self::Split),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::DoubleDown => "double-down",
            Self::Surrender => "surrender",
            Self::Split => "split",
        })
    }
}

/// Input that does not name an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid action {0:?}")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Self::from_key(key.to_ascii_lowercase()),
            _ => None,
        }
        .ok_or_else(|| ParseActionError(trimmed.to_owned()))
    }
}

/// What a decider can see when asked to act on a hand.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    /// Seat of the acting player.
    pub seat: usize,
    /// The acting player.
    pub player: &'a Player,
    /// Index of the hand being played.
    pub hand_index: usize,
    /// The hand being played.
    pub hand: &'a Hand,
    /// The dealer's face-up card.
    pub dealer_up_card: Option<&'a Card>,
    /// The table's minimum bet.
    pub minimum_bet: usize,
}

/// A source of decisions for a seat.
///
/// Interactive seats are backed by a person at a prompt; computer seats by a
/// policy. The round engine drives both through this trait.
pub trait Decider {
    /// Chooses the next action for the hand in `view`.
    fn decide(&mut self, view: &TurnView<'_>) -> Action;

    /// Called when the chosen action could not be carried out.
    ///
    /// The hand's turn continues and [`Decider::decide`] is asked again.
    fn rejected(&mut self, view: &TurnView<'_>, action: Action, error: ActionError) {
        let _ = (view, action, error);
    }
}

impl<D: Decider + ?Sized> Decider for &mut D {
    fn decide(&mut self, view: &TurnView<'_>) -> Action {
        (**self).decide(view)
    }

    fn rejected(&mut self, view: &TurnView<'_>, action: Action, error: ActionError) {
        (**self).rejected(view, action, error);
    }
}

/// Computer policy that never draws.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysStand;

impl Decider for AlwaysStand {
    fn decide(&mut self, _view: &TurnView<'_>) -> Action {
        Action::Stand
    }
}

/// Computer policy that hits below a threshold, like the dealer does.
#[derive(Debug, Clone, Copy)]
pub struct StandOnThreshold {
    threshold: u8,
}

impl StandOnThreshold {
    /// Hits until the hand scores at least `threshold`.
    #[must_use]
    pub const fn new(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl Default for StandOnThreshold {
    fn default() -> Self {
        Self::new(17)
    }
}

impl Decider for StandOnThreshold {
    fn decide(&mut self, view: &TurnView<'_>) -> Action {
        if view.hand.score() < self.threshold {
            Action::Hit
        } else {
            Action::Stand
        }
    }
}

/// Replays a fixed list of actions, then stands, recording rejections.
///
/// Test support for driving rounds move by move; not part of the documented
/// API.
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    actions: std::collections::VecDeque<Action>,
    rejections: Vec<(Action, ActionError)>,
}

impl Scripted {
    /// Creates a decider that plays `actions` in order.
    #[must_use]
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            rejections: Vec::new(),
        }
    }

    /// Actions that were rejected, in order.
    #[must_use]
    pub fn rejections(&self) -> &[(Action, ActionError)] {
        &self.rejections
    }
}

impl Decider for Scripted {
    fn decide(&mut self, _view: &TurnView<'_>) -> Action {
        self.actions.pop_front().unwrap_or(Action::Stand)
    }

    fn rejected(&mut self, _view: &TurnView<'_>, action: Action, error: ActionError) {
        self.rejections.push((action, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_keys() {
        assert_eq!("h".parse::<Action>(), Ok(Action::Hit));
        assert_eq!(" S \n".parse::<Action>(), Ok(Action::Stand));
        assert_eq!("d".parse::<Action>(), Ok(Action::DoubleDown));
        assert_eq!("x".parse::<Action>(), Ok(Action::Surrender));
        assert_eq!("p".parse::<Action>(), Ok(Action::Split));
    }

    #[test]
    fn rejects_unknown_input() {
        assert_eq!(
            "hit".parse::<Action>(),
            Err(ParseActionError(String::from("hit")))
        );
        assert!("".parse::<Action>().is_err());
        assert!("q".parse::<Action>().is_err());
    }

    #[test]
    fn keys_round_trip() {
        for action in [
            Action::Hit,
            Action::Stand,
            Action::DoubleDown,
            Action::Surrender,
            Action::Split,
        ] {
            assert_eq!(Action::from_key(action.key()), Some(action));
        }
    }

    #[test]
    fn scripted_replays_then_stands() {
        let player = Player::new("P0", 100, true);
        let hand = Hand::new();
        let view = TurnView {
            seat: 0,
            player: &player,
            hand_index: 0,
            hand: &hand,
            dealer_up_card: None,
            minimum_bet: 10,
        };

        let mut scripted = Scripted::new([Action::Hit]);
        assert_eq!(scripted.decide(&view), Action::Hit);
        assert_eq!(scripted.decide(&view), Action::Stand);

        scripted.rejected(&view, Action::Split, ActionError::SplitUnsupported);
        assert_eq!(
            scripted.rejections(),
            [(Action::Split, ActionError::SplitUnsupported)]
        );
    }
}
