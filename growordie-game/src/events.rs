//! Random event catalog and per-turn event effects.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    DROUGHT_WATER_LOSS, HEATWAVE_SUNLIGHT_GAIN, HEATWAVE_WATER_LOSS, PEST_BASE_DAMAGE,
    PEST_MIN_DAMAGE, RAINSTORM_SUNLIGHT_LOSS, RAINSTORM_WATER_GAIN, THICK_BARK_PEST_RELIEF,
};
use crate::stats::{StatKind, Stats};
use crate::upgrades::Upgrades;

/// Random events that can strike the plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Pests,
    Drought,
    Rainstorm,
    Heatwave,
}

impl EventKind {
    pub const ALL: [Self; 4] = [Self::Pests, Self::Drought, Self::Rainstorm, Self::Heatwave];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pests => "pests",
            Self::Drought => "drought",
            Self::Rainstorm => "rainstorm",
            Self::Heatwave => "heatwave",
        }
    }

    /// Catalog entry for this kind.
    #[must_use]
    pub fn def(self) -> &'static EventDef {
        match self {
            Self::Pests => &CATALOG[0],
            Self::Drought => &CATALOG[1],
            Self::Rainstorm => &CATALOG[2],
            Self::Heatwave => &CATALOG[3],
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Static presentation and timing data for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventDef {
    pub kind: EventKind,
    pub icon: &'static str,
    pub text: &'static str,
    /// Turns the event stays active once triggered.
    pub duration: u32,
}

pub const CATALOG: [EventDef; 4] = [
    EventDef {
        kind: EventKind::Pests,
        icon: "🐛",
        text: "Pests are attacking!",
        duration: 3,
    },
    EventDef {
        kind: EventKind::Drought,
        icon: "☀️",
        text: "Severe drought! Water is scarce.",
        duration: 2,
    },
    EventDef {
        kind: EventKind::Rainstorm,
        icon: "🌧️",
        text: "Heavy rainstorm!",
        duration: 2,
    },
    EventDef {
        kind: EventKind::Heatwave,
        icon: "🔥",
        text: "Extreme heatwave!",
        duration: 2,
    },
];

/// The event currently affecting the plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub kind: EventKind,
    pub remaining_turns: u32,
}

impl ActiveEvent {
    #[must_use]
    pub fn start(kind: EventKind) -> Self {
        Self {
            kind,
            remaining_turns: kind.def().duration,
        }
    }
}

/// Health lost to one turn of pests, reduced by `thickBark`.
#[must_use]
pub fn pest_damage(upgrades: &Upgrades) -> i32 {
    let relief = i32::try_from(upgrades.thick_bark)
        .unwrap_or(i32::MAX)
        .saturating_mul(THICK_BARK_PEST_RELIEF);
    PEST_BASE_DAMAGE.saturating_sub(relief).max(PEST_MIN_DAMAGE)
}

/// Apply one turn of `kind` to `stats`.
#[must_use]
pub fn apply_effect(kind: EventKind, mut stats: Stats, upgrades: &Upgrades) -> Stats {
    match kind {
        EventKind::Pests => {
            stats.apply_delta(StatKind::Health, -pest_damage(upgrades));
        }
        EventKind::Drought => {
            stats.apply_delta(StatKind::Water, -DROUGHT_WATER_LOSS);
        }
        EventKind::Rainstorm => {
            stats.apply_delta(StatKind::Water, RAINSTORM_WATER_GAIN);
            stats.apply_delta(StatKind::Sunlight, -RAINSTORM_SUNLIGHT_LOSS);
        }
        EventKind::Heatwave => {
            stats.apply_delta(StatKind::Water, -HEATWAVE_WATER_LOSS);
            stats.apply_delta(StatKind::Sunlight, HEATWAVE_SUNLIGHT_GAIN);
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_kinds() {
        for (def, kind) in CATALOG.iter().zip(EventKind::ALL) {
            assert_eq!(def.kind, kind);
            assert_eq!(kind.def().kind, kind);
        }
    }

    #[test]
    fn durations_follow_catalog() {
        assert_eq!(ActiveEvent::start(EventKind::Pests).remaining_turns, 3);
        assert_eq!(ActiveEvent::start(EventKind::Drought).remaining_turns, 2);
        assert_eq!(ActiveEvent::start(EventKind::Rainstorm).remaining_turns, 2);
        assert_eq!(ActiveEvent::start(EventKind::Heatwave).remaining_turns, 2);
    }

    #[test]
    fn thick_bark_softens_pests_down_to_floor() {
        let mut upgrades = Upgrades::default();
        assert_eq!(pest_damage(&upgrades), 15);
        upgrades.thick_bark = 2;
        assert_eq!(pest_damage(&upgrades), 9);
        upgrades.thick_bark = 4;
        assert_eq!(pest_damage(&upgrades), 5);
        upgrades.thick_bark = 40;
        assert_eq!(pest_damage(&upgrades), 5);
    }

    #[test]
    fn weather_effects_shift_water_and_sunlight() {
        let base = Stats::default();
        let upgrades = Upgrades::default();
        assert_eq!(
            apply_effect(EventKind::Drought, base, &upgrades),
            Stats::new(100, 35, 50, 50)
        );
        assert_eq!(
            apply_effect(EventKind::Rainstorm, base, &upgrades),
            Stats::new(100, 75, 40, 50)
        );
        assert_eq!(
            apply_effect(EventKind::Heatwave, base, &upgrades),
            Stats::new(100, 30, 65, 50)
        );
        assert_eq!(
            apply_effect(EventKind::Pests, base, &upgrades),
            Stats::new(85, 50, 50, 50)
        );
    }

    #[test]
    fn effects_clamp() {
        let soaked = Stats::new(100, 90, 5, 50);
        let after = apply_effect(EventKind::Rainstorm, soaked, &Upgrades::default());
        assert_eq!((after.water, after.sunlight), (100, 0));
    }
}
