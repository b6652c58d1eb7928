use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::TestScenario;
use crate::logic::game_tester::{GameTester, SimulationPlan, SimulationSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub strategy: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub wins: usize,
    pub mean_score: f64,
    pub mean_turns: f64,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    tester: GameTester,
}

#[derive(Default)]
struct IterationTally {
    successes: usize,
    wins: usize,
    total_score: u64,
    total_turns: u64,
    failures: Vec<String>,
    performance_data: Vec<Duration>,
}

impl LogicTester {
    pub const fn new(tester: GameTester) -> Self {
        Self { tester }
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.tester.verbose() {
                println!(
                    "🧪 Testing scenario: {} (policy: {} seed: {})",
                    scenario.name.bright_white(),
                    scenario.plan.strategy.label(),
                    seed
                );
            }

            results.push(self.run_single_scenario(scenario, seed, iterations));
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let tally = self.run_simulation_iterations(&scenario.plan, seed, iterations);

        let average_duration = if tally.performance_data.is_empty() {
            Duration::ZERO
        } else {
            tally.performance_data.iter().sum::<Duration>()
                / u32::try_from(tally.performance_data.len()).unwrap_or(1)
        };
        let runs = f64::from(u32::try_from(iterations.max(1)).unwrap_or(u32::MAX));
        #[allow(clippy::cast_precision_loss)]
        let mean_score = tally.total_score as f64 / runs;
        #[allow(clippy::cast_precision_loss)]
        let mean_turns = tally.total_turns as f64 / runs;

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            strategy: scenario.plan.strategy.label().to_string(),
            seed,
            passed: tally.failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: tally.successes,
            wins: tally.wins,
            mean_score,
            mean_turns,
            failures: tally.failures,
            average_duration,
            performance_data: tally.performance_data,
        }
    }

    fn run_simulation_iterations(
        &self,
        plan: &SimulationPlan,
        seed: u64,
        iterations: usize,
    ) -> IterationTally {
        let mut tally = IterationTally::default();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            let summary = self.tester.run_plan(plan, iteration_seed);
            tally.total_score += u64::from(summary.final_state.score);
            tally.total_turns += u64::from(summary.final_state.turns);
            if summary.final_state.terminal == growordie_game::Terminal::Won {
                tally.wins += 1;
            }

            if let Some(err) = evaluate_expectations(plan, &summary) {
                let stats = summary.final_state.stats;
                tally.failures.push(format!(
                    "Iteration {} (strategy {}, seed {}, turns {}, ending '{}'): {} | {} | final Health {} Water {} Sunlight {} Nutrients {}",
                    i + 1,
                    summary.strategy.label(),
                    summary.seed,
                    summary.final_state.turns,
                    summary.ending_label(),
                    err,
                    summarize_decision_path(&summary),
                    stats.health,
                    stats.water,
                    stats.sunlight,
                    stats.nutrients
                ));

                if self.tester.verbose() {
                    println!(
                        "  ❌ Iteration {}/{} failed: {}",
                        i + 1,
                        iterations,
                        err.red()
                    );
                }
            } else {
                tally.successes += 1;
                let duration = start_time.elapsed();
                tally.performance_data.push(duration);

                if self.tester.verbose() {
                    println!(
                        "  ✅ Iteration {}/{} passed ({duration:?}) turns:{} score:{} ending:{}",
                        i + 1,
                        iterations,
                        summary.final_state.turns,
                        summary.final_state.score,
                        summary.ending_label()
                    );
                }
            }
        }

        tally
    }
}

fn evaluate_expectations(plan: &SimulationPlan, summary: &SimulationSummary) -> Option<String> {
    plan.expectations
        .iter()
        .find_map(|expectation| expectation.evaluate(summary).err())
        .map(|err| err.to_string())
}

fn summarize_decision_path(summary: &SimulationSummary) -> String {
    if summary.steps.is_empty() {
        return "no decisions recorded".to_string();
    }

    summary
        .steps
        .iter()
        .rev()
        .take(3)
        .map(|step| {
            let rationale = step
                .rationale
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("-");
            format!(
                "turn {} ({}): {} reason {}",
                step.state.turns,
                step.state.level().name,
                step.command,
                rationale
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let micros: Vec<u128> = durations.iter().map(Duration::as_micros).collect();
        micros.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = Vec::<u128>::deserialize(deserializer)?;
        Ok(micros
            .into_iter()
            .map(|m| Duration::from_micros(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}
