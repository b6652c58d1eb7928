//! Centralized balance and tuning constants for Grow or Die game logic.
//!
//! These values define the deterministic math for the turn engine. Keeping
//! them together means the balance can only change through reviewed code.

// Stat bounds --------------------------------------------------------------
pub(crate) const STAT_MIN: i32 = 0;
pub(crate) const STAT_MAX: i32 = 100;
pub(crate) const INITIAL_HEALTH: i32 = 100;
pub(crate) const INITIAL_RESOURCE: i32 = 50;

// Actions ------------------------------------------------------------------
pub(crate) const ACTION_BASE_GAIN: i32 = 20;
pub(crate) const ACTION_HEALTH_GAIN: i32 = 5;
pub(crate) const ACTION_SCORE: u32 = 10;
pub(crate) const ACTION_BONUS_SCORE: u32 = 5;
pub(crate) const REST_HEALTH_GAIN: i32 = 15;
pub(crate) const REST_RESOURCE_COST: i32 = 5;
pub(crate) const REST_SCORE: u32 = 5;

// Passive decay ------------------------------------------------------------
pub(crate) const WATER_DECAY: i32 = 8;
pub(crate) const STRONG_ROOTS_WATER_RELIEF: i32 = 2;
pub(crate) const SUNLIGHT_DECAY: i32 = 6;
pub(crate) const NUTRIENTS_DECAY: i32 = 7;
pub(crate) const STARVATION_THRESHOLD: i32 = 20;
pub(crate) const STARVATION_HEALTH_LOSS: i32 = 10;

// Special abilities --------------------------------------------------------
pub(crate) const SPECIAL_COOLDOWN_TURNS: u32 = 3;
pub(crate) const PHOTOSYNTHESIS_BONUS: i32 = 10;
pub(crate) const ROOT_NETWORK_BONUS: i32 = 8;
pub(crate) const SEASONAL_CYCLE_BONUS: i32 = 15;
pub(crate) const SEASONAL_CYCLE_CHANCE: f32 = 0.3;
pub(crate) const ECOSYSTEM_BONUS: i32 = 12;
pub(crate) const IMMORTAL_BONUS: i32 = 5;

// Random events ------------------------------------------------------------
pub(crate) const EVENT_CHANCE_PER_TURN: f32 = 0.15;
pub(crate) const PEST_BASE_DAMAGE: i32 = 15;
pub(crate) const THICK_BARK_PEST_RELIEF: i32 = 3;
pub(crate) const PEST_MIN_DAMAGE: i32 = 5;
pub(crate) const DROUGHT_WATER_LOSS: i32 = 15;
pub(crate) const RAINSTORM_WATER_GAIN: i32 = 25;
pub(crate) const RAINSTORM_SUNLIGHT_LOSS: i32 = 10;
pub(crate) const HEATWAVE_WATER_LOSS: i32 = 20;
pub(crate) const HEATWAVE_SUNLIGHT_GAIN: i32 = 15;

// Logging targets ----------------------------------------------------------
pub(crate) const LOG_TARGET_ENGINE: &str = "growordie_game::engine";
pub(crate) const LOG_TARGET_SESSION: &str = "growordie_game::session";
