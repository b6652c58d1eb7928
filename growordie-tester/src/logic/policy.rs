use std::fmt;
use std::str::FromStr;

use growordie_game::{Action, Command, SessionState, StatKind, UpgradeKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Decision returned by a [`PlayerPolicy`]
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub command: Command,
    pub rationale: Option<String>,
}

impl PolicyDecision {
    #[must_use]
    pub const fn new(command: Command, rationale: Option<String>) -> Self {
        Self { command, rationale }
    }
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick the next command for a running session.
    fn decide(&mut self, state: &SessionState) -> PolicyDecision;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameplayStrategy {
    WaterFirst,
    Balanced,
    SpecialFirst,
    Random,
}

impl GameplayStrategy {
    pub const ALL: [Self; 4] = [
        Self::WaterFirst,
        Self::Balanced,
        Self::SpecialFirst,
        Self::Random,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WaterFirst => "Water First",
            Self::Balanced => "Balanced",
            Self::SpecialFirst => "Special First",
            Self::Random => "Random",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::WaterFirst => "water-first",
            Self::Balanced => "balanced",
            Self::SpecialFirst => "special-first",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            Self::WaterFirst => Box::new(WaterFirstPolicy),
            Self::Balanced => Box::new(BalancedPolicy),
            Self::SpecialFirst => Box::new(SpecialFirstPolicy),
            Self::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameplayStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown strategy `{s}`"))
    }
}

struct WaterFirstPolicy;
struct BalancedPolicy;
struct SpecialFirstPolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerPolicy for WaterFirstPolicy {
    fn name(&self) -> &'static str {
        "Water First"
    }

    fn decide(&mut self, state: &SessionState) -> PolicyDecision {
        if state.can_level_up() {
            return upgrade(UpgradeKind::StrongRoots, "roots slow water loss");
        }
        let stats = state.stats;
        if stats.water < 70 {
            return turn(Action::Water, format!("water {}", stats.water));
        }
        if needs_rest(state, 50) {
            return turn(Action::Rest, format!("health {}", stats.health));
        }
        feed_lowest(state)
    }
}

impl PlayerPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn decide(&mut self, state: &SessionState) -> PolicyDecision {
        if state.can_level_up() {
            return upgrade(least_taken(state), "spread upgrades");
        }
        let lowest = lowest_resource(state);
        if state.special_ready() && state.stats.get(lowest) < 50 {
            return turn(Action::Special, format!("{lowest} at {}", state.stats.get(lowest)));
        }
        if needs_rest(state, 60) {
            return turn(Action::Rest, format!("health {}", state.stats.health));
        }
        feed_lowest(state)
    }
}

impl PlayerPolicy for SpecialFirstPolicy {
    fn name(&self) -> &'static str {
        "Special First"
    }

    fn decide(&mut self, state: &SessionState) -> PolicyDecision {
        if state.can_level_up() {
            let kind = if state.upgrades.thick_bark <= state.upgrades.strong_roots {
                UpgradeKind::ThickBark
            } else {
                UpgradeKind::StrongRoots
            };
            return upgrade(kind, "bark before roots");
        }
        if state.special_ready() {
            return turn(Action::Special, "special ready".to_string());
        }
        feed_lowest(state)
    }
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn decide(&mut self, state: &SessionState) -> PolicyDecision {
        if state.can_level_up() {
            let kind = UpgradeKind::ALL[self.rng.random_range(0..UpgradeKind::ALL.len())];
            return upgrade(kind, "coin flip");
        }
        let action = Action::ALL[self.rng.random_range(0..Action::ALL.len())];
        turn(action, "coin flip".to_string())
    }
}

fn turn(action: Action, rationale: String) -> PolicyDecision {
    PolicyDecision::new(Command::Turn(action), Some(rationale))
}

fn upgrade(kind: UpgradeKind, rationale: &str) -> PolicyDecision {
    PolicyDecision::new(Command::ChooseUpgrade(kind), Some(rationale.to_string()))
}

fn lowest_resource(state: &SessionState) -> StatKind {
    StatKind::RESOURCES
        .into_iter()
        .min_by_key(|stat| state.stats.get(*stat))
        .unwrap_or(StatKind::Water)
}

fn feed_lowest(state: &SessionState) -> PolicyDecision {
    let lowest = lowest_resource(state);
    let action = match lowest {
        StatKind::Sunlight => Action::Sunlight,
        StatKind::Nutrients => Action::Nutrients,
        StatKind::Health | StatKind::Water => Action::Water,
    };
    turn(action, format!("{lowest} lowest at {}", state.stats.get(lowest)))
}

fn needs_rest(state: &SessionState, health_floor: i32) -> bool {
    let stats = state.stats;
    stats.health < health_floor
        && StatKind::RESOURCES
            .iter()
            .all(|stat| stats.get(*stat) >= 40)
}

fn least_taken(state: &SessionState) -> UpgradeKind {
    [UpgradeKind::StrongRoots, UpgradeKind::ThickBark, UpgradeKind::WideLeaves]
        .into_iter()
        .min_by_key(|kind| state.upgrades.count(*kind))
        .unwrap_or(UpgradeKind::StrongRoots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use growordie_game::Stats;

    #[test]
    fn strategies_parse_from_keys() {
        for strategy in GameplayStrategy::ALL {
            assert_eq!(strategy.key().parse::<GameplayStrategy>(), Ok(strategy));
        }
        assert!("greedy".parse::<GameplayStrategy>().is_err());
    }

    #[test]
    fn every_policy_upgrades_when_possible() {
        let state = SessionState {
            turns_in_level: 5,
            ..SessionState::new()
        };
        for strategy in GameplayStrategy::ALL {
            let mut policy = strategy.create_policy(3);
            let decision = policy.decide(&state);
            assert!(
                matches!(decision.command, Command::ChooseUpgrade(_)),
                "{} chose {}",
                policy.name(),
                decision.command
            );
        }
    }

    #[test]
    fn balanced_feeds_the_scarcest_resource() {
        let state = SessionState {
            stats: Stats::new(90, 70, 30, 60),
            ..SessionState::new()
        };
        let decision = BalancedPolicy.decide(&state);
        assert_eq!(decision.command, Command::Turn(Action::Sunlight));
    }

    #[test]
    fn balanced_spreads_upgrades() {
        let mut state = SessionState {
            turns_in_level: 5,
            ..SessionState::new()
        };
        state.upgrades.strong_roots = 1;
        let decision = BalancedPolicy.decide(&state);
        assert_eq!(
            decision.command,
            Command::ChooseUpgrade(UpgradeKind::ThickBark)
        );
    }

    #[test]
    fn random_policy_is_seeded() {
        let state = SessionState::new();
        let mut a = RandomPolicy::new(9);
        let mut b = RandomPolicy::new(9);
        for _ in 0..20 {
            assert_eq!(a.decide(&state).command, b.decide(&state).command);
        }
    }
}
