//! Grow or Die Game Engine
//!
//! Platform-agnostic rules for the Grow or Die plant survival game.
//! A run is a sequence of turns: feed the plant, ride out random events,
//! pick upgrades as it grows, and keep it alive to the Ancient Tree.
//! This crate has no UI or storage dependencies; both plug in through
//! [`Session`] notifications and the [`ProfileStorage`] trait.

pub mod action;
pub mod command;
pub mod constants;
pub mod engine;
pub mod events;
pub mod levels;
pub mod notification;
pub mod rng;
pub mod session;
pub mod special;
pub mod state;
pub mod stats;
pub mod tips;
pub mod upgrades;

// Re-export commonly used types
pub use action::Action;
pub use command::{Command, ParseCommandError};
pub use engine::{TurnOutcome, take_turn};
pub use events::{ActiveEvent, EventDef, EventKind, apply_effect, pest_damage};
pub use levels::{GrowthLevel, LEVELS, MAX_LEVEL, SpecialTag};
pub use notification::{Notification, Notifications};
pub use rng::{CountingRng, RngBundle, RollSource, ScriptedRolls};
pub use session::{CommandOutcome, Profile, Session};
pub use special::{Activation, SpecialEffect, activate_special, bonus_for};
pub use state::{SessionState, Terminal};
pub use stats::{StatKind, Stats};
pub use tips::TIPS;
pub use upgrades::{UpgradeKind, Upgrades, choose_upgrade};

use std::cell::Cell;
use std::convert::Infallible;

/// Trait for abstracting profile persistence.
/// Platform-specific implementations should provide this
pub trait ProfileStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the stored profile, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile exists but cannot be read.
    fn load_profile(&self) -> Result<Option<Profile>, Self::Error>;

    /// Store the profile, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be written.
    fn save_profile(&self, profile: &Profile) -> Result<(), Self::Error>;
}

/// Profile storage that lives as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStorage {
    profile: Cell<Option<Profile>>,
}

impl MemoryProfileStorage {
    #[must_use]
    pub const fn with_profile(profile: Profile) -> Self {
        Self {
            profile: Cell::new(Some(profile)),
        }
    }
}

impl ProfileStorage for MemoryProfileStorage {
    type Error = Infallible;

    fn load_profile(&self) -> Result<Option<Profile>, Self::Error> {
        Ok(self.profile.get())
    }

    fn save_profile(&self, profile: &Profile) -> Result<(), Self::Error> {
        self.profile.set(Some(*profile));
        Ok(())
    }
}

/// Main game engine: pairs sessions with a profile store
pub struct GameEngine<S>
where
    S: ProfileStorage,
{
    storage: S,
}

impl<S> GameEngine<S>
where
    S: ProfileStorage,
{
    /// Create a new game engine backed by `storage`
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored profile, or a blank one on first launch.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored profile cannot be read.
    pub fn profile(&self) -> Result<Profile, S::Error> {
        Ok(self.storage.load_profile()?.unwrap_or_default())
    }

    /// Start a seeded session for the stored profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored profile cannot be read.
    pub fn start_session(&self, seed: u64) -> Result<Session, S::Error> {
        Ok(Session::new(seed, self.profile()?))
    }

    /// Write the profile back when a notification calls for it.
    ///
    /// Returns whether anything was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be saved.
    pub fn persist(&self, notifications: &[Notification], profile: Profile) -> Result<bool, S::Error> {
        if !notifications.iter().any(Notification::needs_persistence) {
            return Ok(false);
        }
        self.storage.save_profile(&profile)?;
        Ok(true)
    }
}
