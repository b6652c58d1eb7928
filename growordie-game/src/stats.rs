//! Bounded plant stats and passive decay.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    INITIAL_HEALTH, INITIAL_RESOURCE, NUTRIENTS_DECAY, STARVATION_HEALTH_LOSS,
    STARVATION_THRESHOLD, STAT_MAX, STAT_MIN, STRONG_ROOTS_WATER_RELIEF, SUNLIGHT_DECAY,
    WATER_DECAY,
};
use crate::upgrades::Upgrades;

/// Identifies one of the four plant stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Health,
    Water,
    Sunlight,
    Nutrients,
}

impl StatKind {
    pub const ALL: [Self; 4] = [Self::Health, Self::Water, Self::Sunlight, Self::Nutrients];

    /// The three resources that decay every turn.
    pub const RESOURCES: [Self; 3] = [Self::Water, Self::Sunlight, Self::Nutrients];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Water => "water",
            Self::Sunlight => "sunlight",
            Self::Nutrients => "nutrients",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four independent stats, each kept within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub health: i32,
    pub water: i32,
    pub sunlight: i32,
    pub nutrients: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            health: INITIAL_HEALTH,
            water: INITIAL_RESOURCE,
            sunlight: INITIAL_RESOURCE,
            nutrients: INITIAL_RESOURCE,
        }
    }
}

impl Stats {
    #[must_use]
    pub const fn new(health: i32, water: i32, sunlight: i32, nutrients: i32) -> Self {
        Self {
            health,
            water,
            sunlight,
            nutrients,
        }
    }

    #[must_use]
    pub const fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Health => self.health,
            StatKind::Water => self.water,
            StatKind::Sunlight => self.sunlight,
            StatKind::Nutrients => self.nutrients,
        }
    }

    const fn slot_mut(&mut self, stat: StatKind) -> &mut i32 {
        match stat {
            StatKind::Health => &mut self.health,
            StatKind::Water => &mut self.water,
            StatKind::Sunlight => &mut self.sunlight,
            StatKind::Nutrients => &mut self.nutrients,
        }
    }

    /// Add `amount` to `stat`, clamp to the stat bounds, and return the new value.
    pub fn apply_delta(&mut self, stat: StatKind, amount: i32) -> i32 {
        let slot = self.slot_mut(stat);
        *slot = slot.saturating_add(amount).clamp(STAT_MIN, STAT_MAX);
        *slot
    }

    /// Apply the same delta to every resource stat (health excluded).
    pub fn apply_to_resources(&mut self, amount: i32) {
        for stat in StatKind::RESOURCES {
            self.apply_delta(stat, amount);
        }
    }

    #[must_use]
    pub fn is_clamped(&self) -> bool {
        StatKind::ALL
            .iter()
            .all(|stat| (STAT_MIN..=STAT_MAX).contains(&self.get(*stat)))
    }

    /// True when any resource has dropped below the starvation threshold.
    #[must_use]
    pub fn is_starving(&self) -> bool {
        StatKind::RESOURCES
            .iter()
            .any(|stat| self.get(*stat) < STARVATION_THRESHOLD)
    }

    /// Passive per-turn decay, softened by `strongRoots`.
    ///
    /// Resources decay first; the starvation penalty is judged on the
    /// post-decay values.
    #[must_use]
    pub fn decay_all(mut self, upgrades: &Upgrades) -> Self {
        self.apply_delta(StatKind::Water, -water_decay(upgrades));
        self.apply_delta(StatKind::Sunlight, -SUNLIGHT_DECAY);
        self.apply_delta(StatKind::Nutrients, -NUTRIENTS_DECAY);
        if self.is_starving() {
            self.apply_delta(StatKind::Health, -STARVATION_HEALTH_LOSS);
        }
        self
    }
}

/// Water lost per turn after the `strongRoots` relief.
#[must_use]
pub fn water_decay(upgrades: &Upgrades) -> i32 {
    let relief = i32::try_from(upgrades.strong_roots)
        .unwrap_or(i32::MAX)
        .saturating_mul(STRONG_ROOTS_WATER_RELIEF);
    WATER_DECAY.saturating_sub(relief).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_delta_clamps_both_ends() {
        let mut stats = Stats::default();
        assert_eq!(stats.apply_delta(StatKind::Water, 80), 100);
        assert_eq!(stats.apply_delta(StatKind::Sunlight, -75), 0);
        assert_eq!(stats.apply_delta(StatKind::Health, i32::MIN), 0);
        assert!(stats.is_clamped());
    }

    #[test]
    fn decay_applies_fixed_rates() {
        let stats = Stats::default().decay_all(&Upgrades::default());
        assert_eq!(stats, Stats::new(100, 42, 44, 43));
    }

    #[test]
    fn strong_roots_softens_water_decay_to_zero() {
        let mut upgrades = Upgrades::default();
        upgrades.strong_roots = 1;
        assert_eq!(water_decay(&upgrades), 6);
        upgrades.strong_roots = 4;
        assert_eq!(water_decay(&upgrades), 0);
        upgrades.strong_roots = 9;
        assert_eq!(water_decay(&upgrades), 0);
    }

    #[test]
    fn starvation_penalty_uses_post_decay_values() {
        // Sunlight 25 -> 19 after decay, which triggers the penalty.
        let stats = Stats::new(50, 60, 25, 60).decay_all(&Upgrades::default());
        assert_eq!(stats.sunlight, 19);
        assert_eq!(stats.health, 40);

        // Exactly 20 after decay is not starving.
        let stats = Stats::new(50, 28, 26, 27).decay_all(&Upgrades::default());
        assert_eq!((stats.water, stats.sunlight, stats.nutrients), (20, 20, 20));
        assert_eq!(stats.health, 50);
    }

    #[test]
    fn decay_never_leaves_bounds() {
        let stats = Stats::new(5, 0, 0, 0).decay_all(&Upgrades::default());
        assert_eq!(stats, Stats::new(0, 0, 0, 0));
    }
}
