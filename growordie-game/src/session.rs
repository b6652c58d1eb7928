//! Session tracker: owns one run, the player's profile, and the dice.
//!
//! [`Session`] wraps the pure turn engine. It keeps the current
//! [`SessionState`], routes [`Command`]s, and folds the end of a run into
//! the high score. Everything that must outlive a run lives in [`Profile`].
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::command::Command;
use crate::constants::LOG_TARGET_SESSION;
use crate::engine;
use crate::notification::{Notification, Notifications};
use crate::rng::{RngBundle, RollSource};
use crate::state::{SessionState, Terminal};
use crate::tips;
use crate::upgrades::{self, UpgradeKind};

/// Values that survive `reset` and are handed to external storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub high_score: u32,
    #[serde(default)]
    pub tips_used: bool,
}

/// What one command did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub notifications: Notifications,
    /// Whether the state or profile changed; presentation re-renders on true.
    pub changed: bool,
}

impl CommandOutcome {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed(notifications: Notifications) -> Self {
        Self {
            notifications,
            changed: true,
        }
    }
}

/// A single player's ongoing game.
#[derive(Debug, Clone)]
pub struct Session<R = RngBundle> {
    state: SessionState,
    profile: Profile,
    rolls: R,
}

impl Session<RngBundle> {
    /// Start a seeded run for `profile`.
    #[must_use]
    pub fn new(seed: u64, profile: Profile) -> Self {
        Self::with_rolls(RngBundle::from_user_seed(seed), profile)
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rolls.seed()
    }
}

impl<R: RollSource> Session<R> {
    #[must_use]
    pub fn with_rolls(rolls: R, profile: Profile) -> Self {
        Self {
            state: SessionState::new(),
            profile,
            rolls,
        }
    }

    /// Start from a prepared snapshot.
    #[must_use]
    pub const fn from_state(state: SessionState, rolls: R, profile: Profile) -> Self {
        Self {
            state,
            profile,
            rolls,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn profile(&self) -> Profile {
        self.profile
    }

    #[must_use]
    pub const fn high_score(&self) -> u32 {
        self.profile.high_score
    }

    #[must_use]
    pub const fn rolls(&self) -> &R {
        &self.rolls
    }

    /// Dispatch a parsed command.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Turn(action) => self.take_turn(action),
            Command::ChooseUpgrade(kind) => self.choose_upgrade(kind),
            Command::Reset => self.reset(),
            Command::ShowTip => self.show_tip(),
        }
    }

    /// Parse and dispatch a textual command. Unparseable input is ignored.
    pub fn apply_str(&mut self, input: &str) -> CommandOutcome {
        match Command::parse(input) {
            Ok(command) => self.apply(command),
            Err(err) => {
                debug!(target: LOG_TARGET_SESSION, "ignoring `{}`: {err}", input.trim());
                CommandOutcome::unchanged()
            }
        }
    }

    pub fn take_turn(&mut self, action: Action) -> CommandOutcome {
        let outcome = engine::take_turn(&self.state, action, &mut self.rolls);
        if !outcome.applied {
            return CommandOutcome::unchanged();
        }
        let ended = outcome.ended();
        let mut notifications = outcome.notifications;
        self.state = outcome.state;
        if let Some(terminal) = ended {
            self.finish_run(terminal, &mut notifications);
        }
        CommandOutcome::changed(notifications)
    }

    pub fn choose_upgrade(&mut self, kind: UpgradeKind) -> CommandOutcome {
        match upgrades::choose_upgrade(&self.state, kind) {
            Some(next) => {
                self.state = next;
                CommandOutcome::changed(Notifications::new())
            }
            None => CommandOutcome::unchanged(),
        }
    }

    /// Start a fresh run. The profile is kept.
    pub fn reset(&mut self) -> CommandOutcome {
        debug!(
            target: LOG_TARGET_SESSION,
            "reset after {} turns with score {}",
            self.state.turns,
            self.state.score
        );
        self.state = SessionState::new();
        CommandOutcome::changed(Notifications::new())
    }

    /// Show the one-time tip, if it has not been used yet.
    pub fn show_tip(&mut self) -> CommandOutcome {
        let Some(text) = tips::pick_tip(self.profile.tips_used, &mut self.rolls) else {
            return CommandOutcome::unchanged();
        };
        self.profile.tips_used = true;
        let mut notifications = Notifications::new();
        notifications.push(Notification::TipShown {
            text: text.to_string(),
        });
        CommandOutcome::changed(notifications)
    }

    fn finish_run(&mut self, terminal: Terminal, notifications: &mut Notifications) {
        let score = self.state.score;
        let previous = self.profile.high_score;
        let improved = score > previous;
        if improved {
            self.profile.high_score = score;
        }
        info!(
            target: LOG_TARGET_SESSION,
            "run {terminal} after {} turns with score {score} (high score {})",
            self.state.turns,
            self.profile.high_score
        );
        notifications.push(Notification::RunEnded {
            won: terminal == Terminal::Won,
            score,
            high_score: self.profile.high_score,
        });
        if improved {
            info!(target: LOG_TARGET_SESSION, "new high score {score} (was {previous})");
            notifications.push(Notification::HighScoreUpdated { high_score: score });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::MAX_LEVEL;
    use crate::rng::ScriptedRolls;
    use crate::stats::Stats;

    fn calm_session(profile: Profile) -> Session<ScriptedRolls> {
        Session::with_rolls(ScriptedRolls::calm(), profile)
    }

    #[test]
    fn unknown_text_is_a_silent_no_op() {
        let mut session = calm_session(Profile::default());
        let outcome = session.apply_str("dance wildly");
        assert!(!outcome.changed);
        assert!(outcome.notifications.is_empty());
        assert_eq!(session.state(), &SessionState::new());
    }

    #[test]
    fn textual_commands_drive_the_run() {
        let mut session = calm_session(Profile::default());
        for _ in 0..5 {
            assert!(session.apply_str("water").changed);
        }
        assert!(session.apply_str("upgrade strongRoots").changed);
        assert_eq!(session.state().growth_index, 1);
        assert_eq!(session.state().upgrades.strong_roots, 1);
        assert!(!session.apply_str("upgrade thickBark").changed);
    }

    #[test]
    fn losing_run_reports_and_raises_high_score() {
        let state = SessionState {
            stats: Stats::new(5, 0, 0, 0),
            score: 40,
            ..SessionState::new()
        };
        let profile = Profile {
            high_score: 30,
            tips_used: false,
        };
        let mut session = Session::from_state(state, ScriptedRolls::calm(), profile);
        let outcome = session.take_turn(Action::Sunlight);
        assert_eq!(session.state().terminal, Terminal::Lost);
        assert_eq!(
            outcome.notifications.as_slice(),
            [
                Notification::RunEnded {
                    won: false,
                    score: 50,
                    high_score: 50
                },
                Notification::HighScoreUpdated { high_score: 50 },
            ]
        );
        assert_eq!(session.high_score(), 50);

        let after = session.take_turn(Action::Water);
        assert!(!after.changed);
        assert_eq!(session.state().score, 50);
    }

    #[test]
    fn lower_score_keeps_high_score() {
        let state = SessionState {
            growth_index: MAX_LEVEL,
            ..SessionState::new()
        };
        let profile = Profile {
            high_score: 999,
            tips_used: true,
        };
        let mut session = Session::from_state(state, ScriptedRolls::calm(), profile);
        let outcome = session.take_turn(Action::Rest);
        assert_eq!(
            outcome.notifications.as_slice(),
            [Notification::RunEnded {
                won: true,
                score: 5,
                high_score: 999
            }]
        );
        assert_eq!(session.high_score(), 999);
    }

    #[test]
    fn reset_keeps_profile() {
        let mut session = calm_session(Profile {
            high_score: 120,
            tips_used: false,
        });
        session.take_turn(Action::Water);
        session.show_tip();
        let outcome = session.apply(Command::Reset);
        assert!(outcome.changed);
        assert_eq!(session.state(), &SessionState::new());
        assert_eq!(
            session.profile(),
            Profile {
                high_score: 120,
                tips_used: true
            }
        );
    }

    #[test]
    fn tip_is_shown_once() {
        let mut session = Session::with_rolls(ScriptedRolls::calm().with_tip(2), Profile::default());
        let first = session.show_tip();
        assert_eq!(
            first.notifications.as_slice(),
            [Notification::TipShown {
                text: tips::TIPS[2].to_string()
            }]
        );
        assert!(session.profile().tips_used);
        let second = session.show_tip();
        assert!(!second.changed);
        assert!(second.notifications.is_empty());
    }

    #[test]
    fn seeded_sessions_replay() {
        let mut a = Session::new(2024, Profile::default());
        let mut b = Session::new(2024, Profile::default());
        for action in Action::ALL.iter().cycle().take(40) {
            let left = a.take_turn(*action);
            let right = b.take_turn(*action);
            assert_eq!(left, right);
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.seed(), 2024);
    }
}
