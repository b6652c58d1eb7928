use crate::logic::{GameplayStrategy, SimulationPlan};

pub mod catalog;

use catalog::{
    deterministic_expectation, event_pairing_expectation, invariants_expectation,
    no_ignored_commands_expectation, run_finishes_expectation, upgrade_path_expectation,
};

/// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub plan: SimulationPlan,
}

impl TestScenario {
    #[must_use]
    pub fn simulation(name: impl Into<String>, plan: SimulationPlan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }
}

const SCENARIOS: [(&str, &str); 9] = [
    ("smoke", "Smoke Test"),
    ("water-first", "Water First Strategy"),
    ("balanced", "Balanced Strategy"),
    ("special-first", "Special First Strategy"),
    ("random", "Random Strategy"),
    ("deterministic", "Deterministic Replay"),
    ("stats-boundaries", "Stats Boundary Conditions"),
    ("upgrade-path", "Upgrade Path"),
    ("event-pressure", "Event Pressure"),
];

fn strategy_plan(strategy: GameplayStrategy) -> SimulationPlan {
    SimulationPlan::new(strategy)
        .with_expectation(invariants_expectation)
        .with_expectation(run_finishes_expectation)
}

fn starved(state: &mut growordie_game::SessionState) {
    state.stats = growordie_game::Stats::new(15, 5, 5, 5);
}

fn plan_for(key: &str) -> Option<SimulationPlan> {
    let plan = match key {
        "smoke" => SimulationPlan::new(GameplayStrategy::Balanced)
            .with_max_commands(10)
            .with_expectation(invariants_expectation)
            .with_expectation(no_ignored_commands_expectation),
        "water-first" => strategy_plan(GameplayStrategy::WaterFirst),
        "balanced" => strategy_plan(GameplayStrategy::Balanced)
            .with_expectation(no_ignored_commands_expectation),
        "special-first" => strategy_plan(GameplayStrategy::SpecialFirst)
            .with_expectation(no_ignored_commands_expectation),
        "random" => strategy_plan(GameplayStrategy::Random),
        "deterministic" => strategy_plan(GameplayStrategy::Random)
            .with_expectation(deterministic_expectation),
        "stats-boundaries" => strategy_plan(GameplayStrategy::Balanced).with_setup(starved),
        "upgrade-path" => strategy_plan(GameplayStrategy::Balanced)
            .with_expectation(upgrade_path_expectation),
        "event-pressure" => strategy_plan(GameplayStrategy::WaterFirst)
            .with_expectation(event_pairing_expectation),
        _ => return None,
    };
    Some(plan)
}

/// Look up a scenario by key; strategy keys double as scenario keys.
pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let key = name.trim().to_lowercase();
    let (key, title) = SCENARIOS.iter().find(|(candidate, _)| *candidate == key)?;
    plan_for(key).map(|plan| TestScenario::simulation(*title, plan))
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.to_vec()
}

/// Expand `all` into every scenario key, keeping explicit order otherwise.
pub fn expand_scenarios(requested: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::new();
    for name in requested {
        if name.eq_ignore_ascii_case("all") {
            for (key, _) in SCENARIOS {
                if !expanded.iter().any(|existing| existing == key) {
                    expanded.push(key.to_string());
                }
            }
        } else if !expanded.contains(name) {
            expanded.push(name.clone());
        }
    }
    expanded
}
