//! Game state and lifecycle signals
//!
//! Everything the round logic needs besides the cups themselves lives here.

use serde::{Deserialize, Serialize};

use super::cup::CupId;
use super::level::{Difficulty, clamp_level};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Ready for `play`; between rounds or before the first one
    #[default]
    Idle,
    /// Cups lifting before the shuffle (reveal on the first round, conceal after)
    Revealing,
    /// Shuffle passes running
    Shuffling,
    /// Waiting for the player's pick
    AwaitingInput,
    /// Picked cups lifting to show the outcome
    Resolving,
}

impl GamePhase {
    /// An animation is in flight; cups must not be touched by anything else
    pub fn is_animating(self) -> bool {
        matches!(
            self,
            GamePhase::Revealing | GamePhase::Shuffling | GamePhase::Resolving
        )
    }
}

/// One-way signals for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// New game started; show the start screen
    Reset,
    /// Round started; hide the HUD
    Hide,
    Win,
    /// Won at the top level
    RescueAchieved,
    Lose,
    /// Round resolved; offer another round or a new game
    PlayAgainAvailable,
    LevelChanged { level: u8 },
}

/// Round bookkeeping (cups are held by the game)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Current difficulty, including the level
    pub difficulty: Difficulty,
    /// Cup hiding the ball; kept from the input layer until resolution
    #[serde(skip)]
    secret: CupId,
    /// The opening reveal has not been played yet
    pub first_round: bool,
    pub phase: GamePhase,
    /// Rounds resolved this game
    pub rounds: u32,
    pub wins: u32,
}

impl GameState {
    pub fn new(secret: CupId, difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            secret,
            first_round: true,
            phase: GamePhase::Idle,
            rounds: 0,
            wins: 0,
        }
    }

    pub fn level(&self) -> u8 {
        self.difficulty.level
    }

    pub(crate) fn secret(&self) -> CupId {
        self.secret
    }

    /// Move the level by `delta`, saturating at the bounds. Returns the new level.
    pub fn shift_level(&mut self, delta: i32, frame_base: f64) -> u8 {
        let level = clamp_level(self.level() as i32 + delta);
        self.difficulty = Difficulty::with_frame_base(level, frame_base);
        level
    }
}
