//! Turn actions a player can take.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::command::ParseCommandError;
use crate::stats::StatKind;

/// One action per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Water,
    Sunlight,
    Nutrients,
    Rest,
    Special,
}

impl Action {
    pub const ALL: [Self; 5] = [
        Self::Water,
        Self::Sunlight,
        Self::Nutrients,
        Self::Rest,
        Self::Special,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Sunlight => "sunlight",
            Self::Nutrients => "nutrients",
            Self::Rest => "rest",
            Self::Special => "special",
        }
    }

    /// The stat a resource action feeds, if any.
    #[must_use]
    pub const fn resource(self) -> Option<StatKind> {
        match self {
            Self::Water => Some(StatKind::Water),
            Self::Sunlight => Some(StatKind::Sunlight),
            Self::Nutrients => Some(StatKind::Nutrients),
            Self::Rest | Self::Special => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "water" => Ok(Self::Water),
            "sunlight" | "sun" => Ok(Self::Sunlight),
            "nutrients" | "feed" => Ok(Self::Nutrients),
            "rest" => Ok(Self::Rest),
            "special" => Ok(Self::Special),
            _ => Err(ParseCommandError::UnknownAction(s.trim().to_string())),
        }
    }
}
