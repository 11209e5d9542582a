//! Deterministic game simulation
//!
//! All round logic lives here. This module must stay pure and deterministic:
//! - Frame-count driven animation only
//! - Seeded RNG only
//! - Cups iterated by id, shuffles ordered by position snapshot
//! - No rendering or platform dependencies

pub mod cup;
pub mod frames;
pub mod game;
pub mod hits;
pub mod level;
pub mod lift;
pub mod shuffle;
pub mod state;

pub use cup::{Cup, CupFactory, CupId, CupPose, CupView, PoseFactory};
pub use frames::{FrameLoop, FrameStatus, FrameStep};
pub use game::Game;
pub use hits::{PickHit, Verdict, evaluate, pick_at};
pub use level::{Difficulty, clamp_level};
pub use lift::{LiftDirection, LiftMotion, LiftSequence, lift_order};
pub use shuffle::{MOVE_PATTERNS, ShufflePass, ShufflePattern, ShuffleRun};
pub use state::{GameEvent, GamePhase, GameState};
