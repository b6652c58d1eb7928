//! Commands accepted by a session and their textual form.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::action::Action;
use crate::upgrades::UpgradeKind;

/// Errors raised when a textual command cannot be understood.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("unknown upgrade `{0}`")]
    UnknownUpgrade(String),
    #[error("`upgrade` needs one of strongRoots, wideLeaves, thickBark")]
    MissingUpgrade,
}

/// Everything the presentation layer can ask of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "command", content = "arg", rename_all = "camelCase")]
pub enum Command {
    Turn(Action),
    ChooseUpgrade(UpgradeKind),
    Reset,
    ShowTip,
}

impl Command {
    /// Parse commands such as `water`, `upgrade thickBark`, `reset`, `tip`.
    ///
    /// # Errors
    ///
    /// Returns an error when the verb or the upgrade name is not recognized.
    pub fn parse(input: &str) -> Result<Self, ParseCommandError> {
        let mut words = input.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;
        match verb.to_ascii_lowercase().as_str() {
            "upgrade" | "chooseupgrade" => {
                let kind = words.next().ok_or(ParseCommandError::MissingUpgrade)?;
                Ok(Self::ChooseUpgrade(kind.parse()?))
            }
            "reset" | "restart" => Ok(Self::Reset),
            "tip" | "tips" => Ok(Self::ShowTip),
            _ => Ok(Self::Turn(verb.parse()?)),
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Action> for Command {
    fn from(value: Action) -> Self {
        Self::Turn(value)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turn(action) => write!(f, "{action}"),
            Self::ChooseUpgrade(kind) => write!(f, "upgrade {kind}"),
            Self::Reset => f.write_str("reset"),
            Self::ShowTip => f.write_str("tip"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command_shape() {
        assert_eq!(Command::parse("water"), Ok(Command::Turn(Action::Water)));
        assert_eq!(
            Command::parse("upgrade strongRoots"),
            Ok(Command::ChooseUpgrade(UpgradeKind::StrongRoots))
        );
        assert_eq!(Command::parse("  RESET "), Ok(Command::Reset));
        assert_eq!(Command::parse("tip"), Ok(Command::ShowTip));
    }

    #[test]
    fn reports_parse_failures() {
        assert_eq!(Command::parse("   "), Err(ParseCommandError::Empty));
        assert_eq!(
            Command::parse("upgrade"),
            Err(ParseCommandError::MissingUpgrade)
        );
        assert_eq!(
            Command::parse("dance"),
            Err(ParseCommandError::UnknownAction("dance".to_string()))
        );
        assert_eq!(
            Command::parse("upgrade moss").unwrap_err().to_string(),
            "unknown upgrade `moss`"
        );
    }

    #[test]
    fn display_parses_back() {
        for command in [
            Command::Turn(Action::Special),
            Command::ChooseUpgrade(UpgradeKind::WideLeaves),
            Command::Reset,
            Command::ShowTip,
        ] {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
    }
}
