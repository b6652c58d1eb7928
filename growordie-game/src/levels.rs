//! Growth level table.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Special ability attached to a growth level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialTag {
    Photosynthesis,
    RootNetwork,
    SeasonalCycle,
    Ecosystem,
    Immortal,
}

impl SpecialTag {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Photosynthesis => "photosynthesis",
            Self::RootNetwork => "root_network",
            Self::SeasonalCycle => "seasonal_cycle",
            Self::Ecosystem => "ecosystem",
            Self::Immortal => "immortal",
        }
    }
}

impl fmt::Display for SpecialTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One entry of the growth ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthLevel {
    pub name: &'static str,
    pub icon: &'static str,
    /// Turns that must be spent at this level before advancing.
    pub turns_to_next: u32,
    pub special: Option<SpecialTag>,
}

pub const LEVELS: [GrowthLevel; 6] = [
    GrowthLevel {
        name: "Seed",
        icon: "🌱",
        turns_to_next: 5,
        special: None,
    },
    GrowthLevel {
        name: "Sprout",
        icon: "🌿",
        turns_to_next: 8,
        special: Some(SpecialTag::Photosynthesis),
    },
    GrowthLevel {
        name: "Sapling",
        icon: "🌳",
        turns_to_next: 10,
        special: Some(SpecialTag::RootNetwork),
    },
    GrowthLevel {
        name: "Young Tree",
        icon: "🌲",
        turns_to_next: 12,
        special: Some(SpecialTag::SeasonalCycle),
    },
    GrowthLevel {
        name: "Mature Tree",
        icon: "🌳",
        turns_to_next: 15,
        special: Some(SpecialTag::Ecosystem),
    },
    GrowthLevel {
        name: "Ancient Tree",
        icon: "🌲",
        turns_to_next: 0,
        special: Some(SpecialTag::Immortal),
    },
];

/// Index of the terminal growth level.
pub const MAX_LEVEL: usize = LEVELS.len() - 1;

/// Level at `index`, saturating at the terminal level.
#[must_use]
pub fn level(index: usize) -> &'static GrowthLevel {
    &LEVELS[index.min(MAX_LEVEL)]
}

#[must_use]
pub const fn is_max_level(index: usize) -> bool {
    index >= MAX_LEVEL
}
