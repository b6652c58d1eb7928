use anyhow::Result;
use colored::Colorize;
use growordie_game::{Command, Notification, Profile, RngBundle, Session, SessionState, Terminal};
use std::sync::Arc;

use crate::logic::policy::GameplayStrategy;

/// Command budget for a single simulated run.
pub const DEFAULT_MAX_COMMANDS: u32 = 500;

/// Declarative description of an automated run.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub strategy: GameplayStrategy,
    pub max_commands: Option<u32>,
    pub setup: Option<fn(&mut SessionState)>,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub const fn new(strategy: GameplayStrategy) -> Self {
        Self {
            strategy,
            max_commands: None,
            setup: None,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_max_commands(mut self, max_commands: u32) -> Self {
        self.max_commands = Some(max_commands);
        self
    }

    #[must_use]
    pub fn with_setup(mut self, setup: fn(&mut SessionState)) -> Self {
        self.setup = Some(setup);
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SimulationExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// Assertion hook run after a simulation completes.
type SimulationExpectationFn =
    Arc<dyn Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct SimulationExpectation(SimulationExpectationFn);

impl std::fmt::Debug for SimulationExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationExpectation").finish()
    }
}

impl SimulationExpectation {
    pub fn evaluate(&self, summary: &SimulationSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SimulationExpectation
where
    F: Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// One command issued during a run and what it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub command: Command,
    pub rationale: Option<String>,
    pub changed: bool,
    pub state: SessionState,
    pub notifications: Vec<Notification>,
}

/// Complete record of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub initial_state: SessionState,
    pub steps: Vec<StepRecord>,
    pub final_state: SessionState,
    pub profile: Profile,
    pub game_ended: bool,
}

impl SimulationSummary {
    /// Every state in order, starting with the initial one.
    pub fn states(&self) -> impl Iterator<Item = &SessionState> {
        std::iter::once(&self.initial_state).chain(self.steps.iter().map(|step| &step.state))
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.steps.iter().flat_map(|step| step.notifications.iter())
    }

    #[must_use]
    pub fn ignored_commands(&self) -> usize {
        self.steps.iter().filter(|step| !step.changed).count()
    }

    #[must_use]
    pub fn count_events(&self) -> usize {
        self.notifications()
            .filter(|note| matches!(note, Notification::EventStarted { .. }))
            .count()
    }

    #[must_use]
    pub fn ending_label(&self) -> &'static str {
        match self.final_state.terminal {
            Terminal::Won => "Ancient Tree",
            Terminal::Lost => "Withered",
            Terminal::None => "Still growing",
        }
    }
}

/// Headless deterministic runner for the core game logic.
#[derive(Debug, Clone, Copy)]
pub struct GameTester {
    verbose: bool,
}

impl GameTester {
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    #[must_use]
    pub fn run_plan(&self, plan: &SimulationPlan, seed: u64) -> SimulationSummary {
        let max_commands = plan.max_commands.unwrap_or(DEFAULT_MAX_COMMANDS);
        let mut initial_state = SessionState::new();
        if let Some(setup) = plan.setup {
            setup(&mut initial_state);
        }
        let mut session = Session::from_state(
            initial_state.clone(),
            RngBundle::from_user_seed(seed),
            Profile::default(),
        );

        let mut policy = plan.strategy.create_policy(seed);
        if self.verbose {
            log_initial_state(seed, policy.name(), session.state());
        }

        let mut steps = Vec::new();
        for _ in 0..max_commands {
            if session.state().is_over() {
                break;
            }
            let decision = policy.decide(session.state());
            let outcome = session.apply(decision.command);
            let step = StepRecord {
                command: decision.command,
                rationale: decision.rationale,
                changed: outcome.changed,
                state: session.state().clone(),
                notifications: outcome.notifications.into_vec(),
            };
            if self.verbose {
                log_step(&step);
            }
            steps.push(step);
        }

        let final_state = session.state().clone();
        let summary = SimulationSummary {
            seed,
            strategy: plan.strategy,
            initial_state,
            steps,
            game_ended: final_state.is_over(),
            final_state,
            profile: session.profile(),
        };
        if self.verbose {
            println!(
                "🏁 {} | turns:{} score:{} events:{}",
                summary.ending_label(),
                summary.final_state.turns,
                summary.final_state.score,
                summary.count_events()
            );
        }
        summary
    }
}

fn log_initial_state(seed: u64, policy: &str, state: &SessionState) {
    println!("🎮 Starting simulation | seed:{seed} policy:{policy}");
    println!(
        "📊 Initial stats | Health:{} Water:{} Sunlight:{} Nutrients:{}",
        state.stats.health, state.stats.water, state.stats.sunlight, state.stats.nutrients
    );
}

fn log_step(step: &StepRecord) {
    let state = &step.state;
    let marker = if step.changed {
        "•".normal()
    } else {
        "·".dimmed()
    };
    println!(
        "  {marker} turn {:>3} {:<18} {} {} | H:{} W:{} S:{} N:{} | score {}",
        state.turns,
        step.command.to_string(),
        state.level().icon,
        state.level().name,
        state.stats.health,
        state.stats.water,
        state.stats.sunlight,
        state.stats.nutrients,
        state.score
    );
    for note in &step.notifications {
        println!("      ↳ {note:?}");
    }
}
