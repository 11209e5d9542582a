//! Cup Shuffle - a three-cups-and-a-ball shell game engine
//!
//! Core modules:
//! - `sim`: Deterministic game state, frame scheduling and motion sequencing
//! - `tuning`: Data-driven game balance
//!
//! The 3D scene, pointer hit-testing and HUD live in the host. The engine
//! drives them through [`sim::CupView`] and the [`sim::GameEvent`] queue.

pub mod sim;
pub mod tuning;

pub use sim::{Game, GameEvent, GamePhase, PickHit};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Number of cups on the table
    pub const CUP_COUNT: usize = 3;

    /// Horizontal distance between neighbouring cup slots (scene units)
    pub const CUP_SPACING: f64 = 1_000_000.0;
    /// Unit for shuffle movement; 25 units of it span one cup slot
    pub const CUP_MOVE_DISTANCE: f64 = 40_000.0;

    /// Level bounds (inclusive)
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 10;
    /// Level a new game starts at
    pub const START_LEVEL: u8 = 3;

    /// Frame budget numerator: budget = round(FRAME_BASE / level / 2) * 2
    pub const FRAME_BASE: f64 = 72.0;

    /// Largest frame budget numerator tuning may set
    pub const MAX_FRAME_BASE: f64 = 10_000.0;

    /// Wall-clock start offsets of the three staggered lifts (ms)
    pub const LIFT_STAGGER_MS: [f64; CUP_COUNT] = [0.0, 100.0, 200.0];
    /// Latest start offset tuning may set for a lift (ms)
    pub const MAX_LIFT_STAGGER_MS: f64 = 10_000.0;

    /// Nominal display refresh interval used by headless hosts (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
