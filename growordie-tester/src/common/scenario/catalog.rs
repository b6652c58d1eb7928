use anyhow::{Result, ensure};
use growordie_game::{EventKind, Notification};

use crate::logic::game_tester::{GameTester, SimulationPlan, SimulationSummary};

/// Stats stay clamped, score and counters never move backwards.
pub fn invariants_expectation(summary: &SimulationSummary) -> Result<()> {
    let states: Vec<_> = summary.states().collect();
    for pair in states.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        ensure!(
            after.stats.is_clamped(),
            "stats left bounds at turn {}: {:?}",
            after.turns,
            after.stats
        );
        ensure!(
            after.score >= before.score,
            "score dropped from {} to {} at turn {}",
            before.score,
            after.score,
            after.turns
        );
        ensure!(after.turns >= before.turns, "turn counter went backwards");
        ensure!(
            after.upgrades.total() >= before.upgrades.total(),
            "upgrade count went backwards at turn {}",
            after.turns
        );
        if before.is_over() {
            ensure!(after == before, "finished run changed at turn {}", after.turns);
        }
    }
    Ok(())
}

/// The run reaches a terminal state and announces it exactly once.
pub fn run_finishes_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(
        summary.game_ended,
        "run still going after {} commands",
        summary.steps.len()
    );
    let ended: Vec<_> = summary
        .notifications()
        .filter_map(|note| match note {
            Notification::RunEnded { won, score, .. } => Some((*won, *score)),
            _ => None,
        })
        .collect();
    ensure!(ended.len() == 1, "expected one runEnded, saw {}", ended.len());
    let (won, score) = ended[0];
    ensure!(
        won == (summary.final_state.terminal == growordie_game::Terminal::Won),
        "runEnded disagrees with final state"
    );
    ensure!(
        score == summary.final_state.score,
        "runEnded score {score} != final score {}",
        summary.final_state.score
    );
    ensure!(
        summary.profile.high_score == score,
        "fresh profile should adopt the final score"
    );
    Ok(())
}

pub fn no_ignored_commands_expectation(summary: &SimulationSummary) -> Result<()> {
    let ignored = summary.ignored_commands();
    ensure!(ignored == 0, "{ignored} commands were ignored");
    Ok(())
}

/// Replaying the same seed yields the same run.
pub fn deterministic_expectation(summary: &SimulationSummary) -> Result<()> {
    let plan = SimulationPlan::new(summary.strategy);
    let replay = GameTester::new(false).run_plan(&plan, summary.seed);
    ensure!(
        replay.steps == summary.steps,
        "seed {} diverged on replay",
        summary.seed
    );
    ensure!(replay.final_state == summary.final_state);
    Ok(())
}

/// Each growth level is paid for with exactly one upgrade.
pub fn upgrade_path_expectation(summary: &SimulationSummary) -> Result<()> {
    for state in summary.states() {
        let total = usize::try_from(state.upgrades.total()).unwrap_or(usize::MAX);
        ensure!(
            total == state.growth_index,
            "{} upgrades at growth index {}",
            total,
            state.growth_index
        );
    }
    if summary.final_state.terminal == growordie_game::Terminal::Won {
        ensure!(
            summary.final_state.is_max_level(),
            "won below the final level"
        );
    }
    Ok(())
}

/// Every event that starts also ends, and none outlives its duration.
pub fn event_pairing_expectation(summary: &SimulationSummary) -> Result<()> {
    let mut active: Option<EventKind> = None;
    for note in summary.notifications() {
        match note {
            Notification::EventStarted { kind, .. } => {
                ensure!(active.is_none(), "{kind} started while {active:?} active");
                active = Some(*kind);
            }
            Notification::EventEnded { kind } => {
                ensure!(active == Some(*kind), "{kind} ended but {active:?} active");
                active = None;
            }
            _ => {}
        }
    }
    ensure!(
        active == summary.final_state.active_event.map(|event| event.kind),
        "notifications disagree with the final active event"
    );
    for state in summary.states() {
        if let Some(event) = state.active_event {
            ensure!(
                event.remaining_turns > 0 && event.remaining_turns < event.kind.def().duration,
                "{} has {} turns left",
                event.kind,
                event.remaining_turns
            );
        }
    }
    Ok(())
}
