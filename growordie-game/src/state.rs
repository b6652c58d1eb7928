//! Session snapshot mutated by the turn engine.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::events::ActiveEvent;
use crate::levels::{self, GrowthLevel};
use crate::stats::Stats;
use crate::upgrades::Upgrades;

/// How (and whether) a run has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    #[default]
    None,
    Won,
    Lost,
}

impl Terminal {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full snapshot of one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub growth_index: usize,
    pub stats: Stats,
    pub upgrades: Upgrades,
    pub score: u32,
    pub turns: u32,
    pub turns_in_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_event: Option<ActiveEvent>,
    pub special_cooldown: u32,
    pub terminal: Terminal,
}

impl SessionState {
    /// Fresh run: full health, half resources, nothing else.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn level(&self) -> &'static GrowthLevel {
        levels::level(self.growth_index)
    }

    #[must_use]
    pub const fn is_max_level(&self) -> bool {
        levels::is_max_level(self.growth_index)
    }

    /// Whether enough turns have been spent here to pick an upgrade and advance.
    #[must_use]
    pub fn can_level_up(&self) -> bool {
        !self.terminal.is_over()
            && !self.is_max_level()
            && self.turns_in_level >= self.level().turns_to_next
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.terminal.is_over()
    }

    /// Whether the special command would do anything right now.
    #[must_use]
    pub fn special_ready(&self) -> bool {
        self.special_cooldown == 0 && self.level().special.is_some()
    }
}
