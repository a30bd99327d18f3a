//! Between-round commands and the session state they drive.

use core::str::FromStr;

use thiserror::Error;

/// A command accepted between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Print the menu.
    Help,
    /// Show the table.
    Status,
    /// Play one round.
    PlayRound,
    /// Save and stop, to be resumed later.
    Pause,
    /// Start over with a fresh table.
    Restart,
    /// Choose new options and start over.
    Options,
    /// Save without stopping.
    Save,
    /// Leave without saving.
    Exit,
}

impl Command {
    /// Every command, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Help,
        Self::Status,
        Self::PlayRound,
        Self::Pause,
        Self::Options,
        Self::Restart,
        Self::Save,
        Self::Exit,
    ];

    /// Menu key for the command.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Help => '?',
            Self::Status => 'g',
            Self::PlayRound => 'h',
            Self::Pause => 'p',
            Self::Options => 'o',
            Self::Restart => 'r',
            Self::Save => 's',
            Self::Exit => 'x',
        }
    }

    /// Menu description.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Help => "print this menu",
            Self::Status => "show game status",
            Self::PlayRound => "play a round",
            Self::Pause => "pause game",
            Self::Options => "set options",
            Self::Restart => "restart game",
            Self::Save => "save game",
            Self::Exit => "exit casino",
        }
    }
}

/// Input that does not name a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid command {0:?}")]
pub struct ParseCommandError(pub String);

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(key), None) => Some(key.to_ascii_lowercase()),
            _ => None,
        };
        Self::ALL
            .into_iter()
            .find(|c| Some(c.key()) == key)
            .ok_or_else(|| ParseCommandError(trimmed.to_owned()))
    }
}

/// Where the session stands between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Accepting commands.
    #[default]
    Running,
    /// Saved and stopped; resumable.
    Paused,
    /// Finished.
    Exited,
}

/// Next session state after `command`.
///
/// `Exited` is terminal. Any command other than pause or exit resumes a
/// paused session.
#[must_use]
pub const fn transition(state: SessionState, command: Command) -> SessionState {
    match (state, command) {
        (SessionState::Exited, _) | (_, Command::Exit) => SessionState::Exited,
        (_, Command::Pause) => SessionState::Paused,
        _ => SessionState::Running,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_menu_key() {
        for command in Command::ALL {
            assert_eq!(command.key().to_string().parse::<Command>(), Ok(command));
        }
        assert!("n".parse::<Command>().is_err());
        assert!("hh".parse::<Command>().is_err());
    }

    #[test]
    fn pause_and_exit() {
        assert_eq!(
            transition(SessionState::Running, Command::Pause),
            SessionState::Paused
        );
        assert_eq!(
            transition(SessionState::Running, Command::Exit),
            SessionState::Exited
        );
        assert_eq!(
            transition(SessionState::Paused, Command::PlayRound),
            SessionState::Running
        );
    }

    #[test]
    fn exited_is_terminal() {
        for command in Command::ALL {
            assert_eq!(
                transition(SessionState::Exited, command),
                SessionState::Exited
            );
        }
    }

    #[test]
    fn ordinary_commands_keep_running() {
        for command in [Command::Help, Command::Status, Command::Save, Command::Restart] {
            assert_eq!(
                transition(SessionState::Running, command),
                SessionState::Running
            );
        }
    }
}
