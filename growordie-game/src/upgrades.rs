//! Permanent upgrades chosen at each level transition.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::command::ParseCommandError;
use crate::constants::LOG_TARGET_ENGINE;
use crate::state::SessionState;

/// Upgrade picked when the plant advances a growth level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKind {
    /// Water drains slower.
    StrongRoots,
    /// Tracked but has no effect on the rules.
    WideLeaves,
    /// Pests do less damage.
    ThickBark,
}

impl UpgradeKind {
    pub const ALL: [Self; 3] = [Self::StrongRoots, Self::WideLeaves, Self::ThickBark];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongRoots => "strongRoots",
            Self::WideLeaves => "wideLeaves",
            Self::ThickBark => "thickBark",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StrongRoots => "Strong Roots",
            Self::WideLeaves => "Wide Leaves",
            Self::ThickBark => "Thick Bark",
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeKind {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "strongRoots" | "strong_roots" | "roots" => Ok(Self::StrongRoots),
            "wideLeaves" | "wide_leaves" | "leaves" => Ok(Self::WideLeaves),
            "thickBark" | "thick_bark" | "bark" => Ok(Self::ThickBark),
            other => Err(ParseCommandError::UnknownUpgrade(other.to_string())),
        }
    }
}

/// Upgrade counts accumulated over a run. Counts never decrease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrades {
    pub strong_roots: u32,
    pub wide_leaves: u32,
    pub thick_bark: u32,
}

impl Upgrades {
    #[must_use]
    pub const fn count(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::StrongRoots => self.strong_roots,
            UpgradeKind::WideLeaves => self.wide_leaves,
            UpgradeKind::ThickBark => self.thick_bark,
        }
    }

    pub const fn increment(&mut self, kind: UpgradeKind) {
        let slot = match kind {
            UpgradeKind::StrongRoots => &mut self.strong_roots,
            UpgradeKind::WideLeaves => &mut self.wide_leaves,
            UpgradeKind::ThickBark => &mut self.thick_bark,
        };
        *slot = slot.saturating_add(1);
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.strong_roots
            .saturating_add(self.wide_leaves)
            .saturating_add(self.thick_bark)
    }
}

/// Spend a pending level-up on `kind` and advance one growth level.
///
/// Returns `None` when no level-up is pending (too few turns in the level,
/// already at the top level, or the run is over).
#[must_use]
pub fn choose_upgrade(state: &SessionState, kind: UpgradeKind) -> Option<SessionState> {
    if !state.can_level_up() {
        debug!(
            target: LOG_TARGET_ENGINE,
            "ignoring upgrade {kind}: {} of {} turns at {}",
            state.turns_in_level,
            state.level().turns_to_next,
            state.level().name
        );
        return None;
    }
    let mut next = state.clone();
    next.upgrades.increment(kind);
    next.growth_index += 1;
    next.turns_in_level = 0;
    debug!(
        target: LOG_TARGET_ENGINE,
        "upgraded {kind}; now {} {}",
        next.level().icon,
        next.level().name
    );
    Some(next)
}
