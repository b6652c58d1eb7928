//! Injectable random sources for the turn engine.
//!
//! The engine never touches a global RNG. Every draw goes through
//! [`RollSource`], which is backed either by [`RngBundle`] (seeded streams
//! split by domain) or by [`ScriptedRolls`] for tests and replays.
use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use sha2::Sha256;

/// Source of the random draws a session consumes.
pub trait RollSource {
    /// Uniform draw in `[0, 1)` deciding whether a new event fires.
    fn event_chance(&mut self) -> f32;

    /// Index of the event kind to activate; must be below `len`.
    fn event_pick(&mut self, len: usize) -> usize;

    /// Uniform draw in `[0, 1)` for the `seasonal_cycle` action bonus.
    fn seasonal_bonus(&mut self) -> f32;

    /// Index of the tip to show; must be below `len`.
    fn tip_pick(&mut self, len: usize) -> usize;
}

impl<T: RollSource + ?Sized> RollSource for &mut T {
    fn event_chance(&mut self) -> f32 {
        (**self).event_chance()
    }

    fn event_pick(&mut self, len: usize) -> usize {
        (**self).event_pick(len)
    }

    fn seasonal_bonus(&mut self) -> f32 {
        (**self).seasonal_bonus()
    }

    fn tip_pick(&mut self, len: usize) -> usize {
        (**self).tip_pick(len)
    }
}

/// Deterministic bundle of RNG streams segregated by simulation domain.
///
/// The event roll and the seasonal bonus draw from separate streams so that
/// one never shifts the other.
#[derive(Debug, Clone)]
pub struct RngBundle {
    seed: u64,
    events: CountingRng<SmallRng>,
    bonus: CountingRng<SmallRng>,
    tips: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            seed,
            events: CountingRng::new(derive_stream_seed(seed, b"events")),
            bonus: CountingRng::new(derive_stream_seed(seed, b"bonus")),
            tips: CountingRng::new(derive_stream_seed(seed, b"tips")),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws taken from each stream as `(events, bonus, tips)`.
    #[must_use]
    pub const fn draws(&self) -> (u64, u64, u64) {
        (self.events.draws(), self.bonus.draws(), self.tips.draws())
    }
}

impl RollSource for RngBundle {
    fn event_chance(&mut self) -> f32 {
        self.events.random::<f32>()
    }

    fn event_pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.events.random_range(0..len)
    }

    fn seasonal_bonus(&mut self) -> f32 {
        self.bonus.random::<f32>()
    }

    fn tip_pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.tips.random_range(0..len)
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Fixed draws, for tests and hand-authored replays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedRolls {
    pub event_chance: f32,
    pub event_pick: usize,
    pub seasonal_bonus: f32,
    pub tip_pick: usize,
}

impl ScriptedRolls {
    /// No event ever fires and the seasonal bonus never lands.
    #[must_use]
    pub const fn calm() -> Self {
        Self {
            event_chance: 1.0,
            event_pick: 0,
            seasonal_bonus: 1.0,
            tip_pick: 0,
        }
    }

    /// Every idle turn starts the catalog entry at `index`.
    #[must_use]
    pub const fn always_event(index: usize) -> Self {
        Self {
            event_chance: 0.0,
            event_pick: index,
            ..Self::calm()
        }
    }

    #[must_use]
    pub const fn with_seasonal_bonus(mut self, roll: f32) -> Self {
        self.seasonal_bonus = roll;
        self
    }

    #[must_use]
    pub const fn with_tip(mut self, index: usize) -> Self {
        self.tip_pick = index;
        self
    }
}

impl Default for ScriptedRolls {
    fn default() -> Self {
        Self::calm()
    }
}

impl RollSource for ScriptedRolls {
    fn event_chance(&mut self) -> f32 {
        self.event_chance
    }

    fn event_pick(&mut self, len: usize) -> usize {
        self.event_pick.min(len.saturating_sub(1))
    }

    fn seasonal_bonus(&mut self) -> f32 {
        self.seasonal_bonus
    }

    fn tip_pick(&mut self, len: usize) -> usize {
        self.tip_pick.min(len.saturating_sub(1))
    }
}
