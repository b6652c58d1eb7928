//! Notifications emitted to the presentation layer.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::events::EventKind;

/// Notifications raised by a single command; most turns raise zero or one.
pub type Notifications = SmallVec<[Notification; 4]>;

/// Something the presentation layer may want to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Notification {
    #[serde(rename_all = "camelCase")]
    EventStarted {
        kind: EventKind,
        icon: String,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    EventEnded { kind: EventKind },
    #[serde(rename_all = "camelCase")]
    SpecialEffectShown { text: String },
    LevelUpAvailable,
    #[serde(rename_all = "camelCase")]
    RunEnded {
        won: bool,
        score: u32,
        high_score: u32,
    },
    #[serde(rename_all = "camelCase")]
    HighScoreUpdated { high_score: u32 },
    #[serde(rename_all = "camelCase")]
    TipShown { text: String },
}

impl Notification {
    /// Notifications that an external persistence collaborator must act on.
    #[must_use]
    pub const fn needs_persistence(&self) -> bool {
        matches!(self, Self::HighScoreUpdated { .. } | Self::TipShown { .. })
    }
}
