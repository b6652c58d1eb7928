//! The turn engine: one command in, one new snapshot out.
//!
//! [`take_turn`] never mutates its input. It works on a copy in a fixed
//! order (counters, action, cooldown, decay, event, terminal check, level-up
//! check) and hands back the copy together with the notifications raised on
//! the way. Ignored commands return the input unchanged with no
//! notifications.
use log::debug;

use crate::action::Action;
use crate::constants::{
    ACTION_BASE_GAIN, ACTION_BONUS_SCORE, ACTION_HEALTH_GAIN, ACTION_SCORE,
    EVENT_CHANCE_PER_TURN, LOG_TARGET_ENGINE, REST_HEALTH_GAIN, REST_RESOURCE_COST, REST_SCORE,
};
use crate::events::{self, ActiveEvent, CATALOG};
use crate::notification::{Notification, Notifications};
use crate::rng::RollSource;
use crate::special::{activate_special, bonus_for};
use crate::state::{SessionState, Terminal};
use crate::stats::StatKind;

/// Result of resolving one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub state: SessionState,
    pub notifications: Notifications,
    /// False when the command was ignored and `state` equals the input.
    pub applied: bool,
}

impl TurnOutcome {
    fn ignored(state: &SessionState) -> Self {
        Self {
            state: state.clone(),
            notifications: Notifications::new(),
            applied: false,
        }
    }

    /// Terminal state reached on this turn, if any.
    #[must_use]
    pub const fn ended(&self) -> Option<Terminal> {
        if self.applied && self.state.terminal.is_over() {
            Some(self.state.terminal)
        } else {
            None
        }
    }

    #[must_use]
    pub fn level_up_available(&self) -> bool {
        self.notifications
            .iter()
            .any(|note| matches!(note, Notification::LevelUpAvailable))
    }
}

/// Resolve one turn of `action` against `state`.
///
/// Finished runs, and `special` while cooling down or at a level without a
/// special, are ignored.
pub fn take_turn<R>(state: &SessionState, action: Action, rolls: &mut R) -> TurnOutcome
where
    R: RollSource + ?Sized,
{
    if state.is_over() {
        debug!(target: LOG_TARGET_ENGINE, "ignoring {action}: run already {}", state.terminal);
        return TurnOutcome::ignored(state);
    }

    let mut next = state.clone();
    let mut notifications = Notifications::new();

    next.turns = next.turns.saturating_add(1);
    next.turns_in_level = next.turns_in_level.saturating_add(1);

    if !resolve_action(&mut next, action, rolls, &mut notifications) {
        debug!(
            target: LOG_TARGET_ENGINE,
            "ignoring {action}: cooldown {} special {:?}",
            state.special_cooldown,
            state.level().special
        );
        return TurnOutcome::ignored(state);
    }

    next.special_cooldown = next.special_cooldown.saturating_sub(1);
    next.stats = next.stats.decay_all(&next.upgrades);
    advance_event(&mut next, rolls, &mut notifications);
    next.terminal = check_terminal(&next);

    if next.can_level_up() {
        debug!(
            target: LOG_TARGET_ENGINE,
            "level-up available at {} after {} turns",
            next.level().name,
            next.turns_in_level
        );
        notifications.push(Notification::LevelUpAvailable);
    }

    debug!(
        target: LOG_TARGET_ENGINE,
        "turn {} {action}: {:?} score {} terminal {}",
        next.turns,
        next.stats,
        next.score,
        next.terminal
    );

    TurnOutcome {
        state: next,
        notifications,
        applied: true,
    }
}

/// Apply the chosen action. Returns false when the action must be ignored.
fn resolve_action<R>(
    state: &mut SessionState,
    action: Action,
    rolls: &mut R,
    notifications: &mut Notifications,
) -> bool
where
    R: RollSource + ?Sized,
{
    let special = state.level().special;
    match action {
        Action::Water | Action::Sunlight | Action::Nutrients => {
            let bonus = bonus_for(action, special, rolls);
            if let Some(stat) = action.resource() {
                state.stats.apply_delta(stat, ACTION_BASE_GAIN + bonus);
            }
            state.stats.apply_delta(StatKind::Health, ACTION_HEALTH_GAIN);
            let reward = if bonus > 0 {
                ACTION_SCORE + ACTION_BONUS_SCORE
            } else {
                ACTION_SCORE
            };
            state.score = state.score.saturating_add(reward);
            true
        }
        Action::Rest => {
            state.stats.apply_delta(StatKind::Health, REST_HEALTH_GAIN);
            state.stats.apply_to_resources(-REST_RESOURCE_COST);
            state.score = state.score.saturating_add(REST_SCORE);
            true
        }
        Action::Special => {
            let Some(activation) = activate_special(special, state.stats, state.special_cooldown)
            else {
                return false;
            };
            state.stats = activation.stats;
            state.special_cooldown = activation.cooldown;
            state.score = state.score.saturating_add(activation.effect.score);
            notifications.push(Notification::SpecialEffectShown {
                text: activation.effect.text.to_string(),
            });
            true
        }
    }
}

/// Roll for a new event when idle, then apply whichever event is active.
///
/// An event that starts this turn also strikes this turn.
fn advance_event<R>(state: &mut SessionState, rolls: &mut R, notifications: &mut Notifications)
where
    R: RollSource + ?Sized,
{
    if state.active_event.is_none() && rolls.event_chance() < EVENT_CHANCE_PER_TURN {
        let pick = rolls.event_pick(CATALOG.len()).min(CATALOG.len() - 1);
        let def = &CATALOG[pick];
        debug!(target: LOG_TARGET_ENGINE, "event {} starts for {} turns", def.kind, def.duration);
        state.active_event = Some(ActiveEvent::start(def.kind));
        notifications.push(Notification::EventStarted {
            kind: def.kind,
            icon: def.icon.to_string(),
            text: def.text.to_string(),
        });
    }

    let Some(mut event) = state.active_event else {
        return;
    };
    state.stats = events::apply_effect(event.kind, state.stats, &state.upgrades);
    event.remaining_turns = event.remaining_turns.saturating_sub(1);
    if event.remaining_turns == 0 {
        debug!(target: LOG_TARGET_ENGINE, "event {} ends", event.kind);
        state.active_event = None;
        notifications.push(Notification::EventEnded { kind: event.kind });
    } else {
        state.active_event = Some(event);
    }
}

fn check_terminal(state: &SessionState) -> Terminal {
    if state.stats.health <= 0 {
        Terminal::Lost
    } else if state.is_max_level() && state.turns_in_level >= state.level().turns_to_next {
        Terminal::Won
    } else {
        Terminal::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::rng::ScriptedRolls;
    use crate::stats::Stats;

    fn at_level(index: usize) -> SessionState {
        SessionState {
            growth_index: index,
            ..SessionState::new()
        }
    }

    #[test]
    fn water_turn_applies_gain_then_decay() {
        let outcome = take_turn(&SessionState::new(), Action::Water, &mut ScriptedRolls::calm());
        assert!(outcome.applied);
        assert_eq!(outcome.state.stats, Stats::new(100, 62, 44, 43));
        assert_eq!(outcome.state.score, 10);
        assert_eq!(outcome.state.turns, 1);
        assert_eq!(outcome.state.turns_in_level, 1);
        assert!(outcome.notifications.is_empty());
    }

    #[test]
    fn bonus_adds_score() {
        let outcome = take_turn(&at_level(1), Action::Sunlight, &mut ScriptedRolls::calm());
        // 50 + 20 + 10 photosynthesis, then 6 decay.
        assert_eq!(outcome.state.stats.sunlight, 74);
        assert_eq!(outcome.state.score, 15);
    }

    #[test]
    fn rest_heals_and_drains() {
        let start = SessionState {
            stats: Stats::new(60, 50, 50, 50),
            ..SessionState::new()
        };
        let outcome = take_turn(&start, Action::Rest, &mut ScriptedRolls::calm());
        assert_eq!(outcome.state.stats, Stats::new(75, 37, 39, 38));
        assert_eq!(outcome.state.score, 5);
    }

    #[test]
    fn special_sets_cooldown_that_reads_two_next_turn() {
        let outcome = take_turn(&at_level(4), Action::Special, &mut ScriptedRolls::calm());
        assert!(outcome.applied);
        assert_eq!(outcome.state.special_cooldown, 2);
        assert_eq!(outcome.state.score, 35);
        assert!(matches!(
            outcome.notifications.first(),
            Some(Notification::SpecialEffectShown { text }) if text.contains("Ecosystem")
        ));
    }

    #[test]
    fn special_on_cooldown_is_ignored_entirely() {
        let mut start = at_level(2);
        start.special_cooldown = 1;
        let outcome = take_turn(&start, Action::Special, &mut ScriptedRolls::always_event(0));
        assert!(!outcome.applied);
        assert_eq!(outcome.state, start);
        assert!(outcome.notifications.is_empty());
    }

    #[test]
    fn special_without_tag_is_ignored() {
        let start = SessionState::new();
        let outcome = take_turn(&start, Action::Special, &mut ScriptedRolls::calm());
        assert!(!outcome.applied);
        assert_eq!(outcome.state, start);
    }

    #[test]
    fn new_event_strikes_on_the_turn_it_starts() {
        let outcome = take_turn(
            &SessionState::new(),
            Action::Rest,
            &mut ScriptedRolls::always_event(1),
        );
        // Rest: water 45, decay 37, drought 22.
        assert_eq!(outcome.state.stats.water, 22);
        assert_eq!(
            outcome.state.active_event,
            Some(ActiveEvent {
                kind: EventKind::Drought,
                remaining_turns: 1
            })
        );
        assert!(matches!(
            outcome.notifications.as_slice(),
            [Notification::EventStarted { kind: EventKind::Drought, .. }]
        ));
    }

    #[test]
    fn active_event_blocks_new_rolls_and_ends_with_notice() {
        let start = SessionState {
            active_event: Some(ActiveEvent {
                kind: EventKind::Rainstorm,
                remaining_turns: 1,
            }),
            ..SessionState::new()
        };
        let outcome = take_turn(&start, Action::Rest, &mut ScriptedRolls::always_event(0));
        assert_eq!(outcome.state.active_event, None);
        assert_eq!(
            outcome.notifications.as_slice(),
            [Notification::EventEnded {
                kind: EventKind::Rainstorm
            }]
        );
    }

    #[test]
    fn starvation_and_pests_stack_in_one_turn() {
        let start = SessionState {
            stats: Stats::new(40, 10, 60, 60),
            active_event: Some(ActiveEvent {
                kind: EventKind::Pests,
                remaining_turns: 3,
            }),
            ..SessionState::new()
        };
        let outcome = take_turn(&start, Action::Sunlight, &mut ScriptedRolls::calm());
        // +5 action, -10 starvation (water 2), -15 pests.
        assert_eq!(outcome.state.stats.health, 20);
        assert_eq!(
            outcome.state.active_event.map(|event| event.remaining_turns),
            Some(2)
        );
    }

    #[test]
    fn health_reaching_zero_loses() {
        let start = SessionState {
            stats: Stats::new(5, 0, 0, 0),
            ..SessionState::new()
        };
        let outcome = take_turn(&start, Action::Sunlight, &mut ScriptedRolls::calm());
        assert_eq!(outcome.state.stats.health, 0);
        assert_eq!(outcome.state.terminal, Terminal::Lost);
        assert_eq!(outcome.ended(), Some(Terminal::Lost));
        assert!(!outcome.level_up_available());
    }

    #[test]
    fn first_turn_at_max_level_wins() {
        let outcome = take_turn(
            &at_level(crate::levels::MAX_LEVEL),
            Action::Water,
            &mut ScriptedRolls::calm(),
        );
        assert_eq!(outcome.state.terminal, Terminal::Won);
        assert!(outcome.notifications.is_empty());
    }

    #[test]
    fn finished_run_ignores_turns() {
        let start = SessionState {
            terminal: Terminal::Lost,
            ..SessionState::new()
        };
        let outcome = take_turn(&start, Action::Water, &mut ScriptedRolls::calm());
        assert!(!outcome.applied);
        assert_eq!(outcome.state, start);
        assert_eq!(outcome.ended(), None);
    }

    #[test]
    fn level_up_notice_repeats_until_chosen() {
        let mut state = SessionState::new();
        state.turns_in_level = 5;
        let outcome = take_turn(&state, Action::Water, &mut ScriptedRolls::calm());
        assert!(outcome.level_up_available());
        assert_eq!(outcome.state.growth_index, 0);
    }
}
