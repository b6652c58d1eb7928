//! Level special abilities: passive action bonuses and the manual trigger.
use serde::Serialize;

use crate::action::Action;
use crate::constants::{
    ECOSYSTEM_BONUS, IMMORTAL_BONUS, PHOTOSYNTHESIS_BONUS, ROOT_NETWORK_BONUS,
    SEASONAL_CYCLE_BONUS, SEASONAL_CYCLE_CHANCE, SPECIAL_COOLDOWN_TURNS,
};
use crate::levels::SpecialTag;
use crate::rng::RollSource;
use crate::stats::{StatKind, Stats};

/// Extra gain on top of the base action gain granted by the level's special.
///
/// Only `seasonal_cycle` consumes a draw, and only when a tag is present.
pub fn bonus_for<R>(action: Action, special: Option<SpecialTag>, rolls: &mut R) -> i32
where
    R: RollSource + ?Sized,
{
    match special {
        Some(SpecialTag::Photosynthesis) if action == Action::Sunlight => PHOTOSYNTHESIS_BONUS,
        Some(SpecialTag::RootNetwork) if action == Action::Water => ROOT_NETWORK_BONUS,
        Some(SpecialTag::SeasonalCycle) => {
            if rolls.seasonal_bonus() < SEASONAL_CYCLE_CHANCE {
                SEASONAL_CYCLE_BONUS
            } else {
                0
            }
        }
        Some(SpecialTag::Ecosystem) if action == Action::Nutrients => ECOSYSTEM_BONUS,
        Some(SpecialTag::Immortal) => IMMORTAL_BONUS,
        _ => 0,
    }
}

/// One-shot effect of a manually triggered special.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialEffect {
    pub health: i32,
    pub water: i32,
    pub sunlight: i32,
    pub nutrients: i32,
    pub score: u32,
    pub text: &'static str,
}

impl SpecialEffect {
    #[must_use]
    pub const fn for_tag(tag: SpecialTag) -> Self {
        match tag {
            SpecialTag::Photosynthesis => Self {
                health: 10,
                water: 0,
                sunlight: 30,
                nutrients: 0,
                score: 25,
                text: "☀️ Enhanced Photosynthesis!",
            },
            SpecialTag::RootNetwork => Self {
                health: 0,
                water: 25,
                sunlight: 0,
                nutrients: 15,
                score: 20,
                text: "🌿 Root Network Activated!",
            },
            SpecialTag::SeasonalCycle => Self {
                health: 15,
                water: 15,
                sunlight: 15,
                nutrients: 15,
                score: 30,
                text: "🍂 Seasonal Growth!",
            },
            SpecialTag::Ecosystem => Self {
                health: 25,
                water: 0,
                sunlight: 0,
                nutrients: 0,
                score: 35,
                text: "🌍 Ecosystem Harmony!",
            },
            SpecialTag::Immortal => Self {
                health: 30,
                water: 20,
                sunlight: 20,
                nutrients: 20,
                score: 50,
                text: "🌲 Ancient Wisdom!",
            },
        }
    }

    fn apply(&self, stats: &mut Stats) {
        stats.apply_delta(StatKind::Health, self.health);
        stats.apply_delta(StatKind::Water, self.water);
        stats.apply_delta(StatKind::Sunlight, self.sunlight);
        stats.apply_delta(StatKind::Nutrients, self.nutrients);
    }
}

/// Result of a successful special activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub stats: Stats,
    pub cooldown: u32,
    pub effect: SpecialEffect,
}

/// Trigger the level's special ability.
///
/// Returns `None` while the cooldown is running or when the level has no
/// special; the caller treats that as an ignored command.
#[must_use]
pub fn activate_special(
    special: Option<SpecialTag>,
    stats: Stats,
    cooldown: u32,
) -> Option<Activation> {
    if cooldown > 0 {
        return None;
    }
    let effect = SpecialEffect::for_tag(special?);
    let mut stats = stats;
    effect.apply(&mut stats);
    Some(Activation {
        stats,
        cooldown: SPECIAL_COOLDOWN_TURNS,
        effect,
    })
}
