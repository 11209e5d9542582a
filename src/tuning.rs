//! Data-driven game balance
//!
//! Defaults match the shipped game; hosts may override any subset from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning json is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("start level {0} is outside {MIN_LEVEL}..={MAX_LEVEL}")]
    StartLevel(u8),
    #[error("frame base {0} exceeds {MAX_FRAME_BASE}")]
    FrameBase(f64),
    #[error("lift stagger offsets must be finite, within 0..={MAX_LIFT_STAGGER_MS} and non-decreasing: {0:?}")]
    Stagger([f64; CUP_COUNT]),
}

/// Table layout and tempo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Distance between cup slots
    pub cup_spacing: f64,
    /// Shuffle movement unit (25 of them cross one slot at default spacing)
    pub move_distance: f64,
    /// Level a new game starts at
    pub start_level: u8,
    /// Frame budget numerator
    pub frame_base: f64,
    /// Start offsets of the staggered lifts (ms)
    pub lift_stagger_ms: [f64; CUP_COUNT],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cup_spacing: CUP_SPACING,
            move_distance: CUP_MOVE_DISTANCE,
            start_level: START_LEVEL,
            frame_base: FRAME_BASE,
            lift_stagger_ms: LIFT_STAGGER_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("cup_spacing", self.cup_spacing),
            ("move_distance", self.move_distance),
            ("frame_base", self.frame_base),
        ] {
            // Written so NaN fails too
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if !(self.frame_base <= MAX_FRAME_BASE) {
            return Err(TuningError::FrameBase(self.frame_base));
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.start_level) {
            return Err(TuningError::StartLevel(self.start_level));
        }
        let stagger = self.lift_stagger_ms;
        let in_range = stagger
            .iter()
            .all(|ms| ms.is_finite() && (0.0..=MAX_LIFT_STAGGER_MS).contains(ms));
        let ordered = in_range && stagger.windows(2).all(|w| w[0] <= w[1]);
        if !ordered {
            return Err(TuningError::Stagger(stagger));
        }
        Ok(())
    }
}
