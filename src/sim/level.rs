//! Level and difficulty
//!
//! Higher levels shuffle more often with fewer frames per animation.

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_BASE, MAX_LEVEL, MIN_LEVEL};

/// Clamp any level arithmetic into the playable range
#[inline]
pub fn clamp_level(level: i32) -> u8 {
    level.clamp(MIN_LEVEL as i32, MAX_LEVEL as i32) as u8
}

/// Animation tempo derived from a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub level: u8,
    /// Shuffle passes per round
    pub shuffle_count: u32,
    /// Frames per shuffle pass and per lift; always even and positive so a
    /// half-period sine lands on its extremum
    pub frame_budget: u32,
}

impl Difficulty {
    pub fn for_level(level: u8) -> Self {
        Self::with_frame_base(level, FRAME_BASE)
    }

    /// `level` is clamped first; `frame_base` must be positive
    pub fn with_frame_base(level: u8, frame_base: f64) -> Self {
        let level = clamp_level(level as i32);
        let half = (frame_base / level as f64 / 2.0)
            .round()
            .clamp(1.0, (u32::MAX / 2) as f64);
        Self {
            level,
            shuffle_count: level as u32,
            frame_budget: (half as u32).saturating_mul(2),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::for_level(crate::consts::START_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_budget_table() {
        let budgets: Vec<u32> = (MIN_LEVEL..=MAX_LEVEL)
            .map(|l| Difficulty::for_level(l).frame_budget)
            .collect();
        assert_eq!(budgets, vec![72, 36, 24, 18, 14, 12, 10, 10, 8, 8]);
    }

    #[test]
    fn test_budget_non_increasing() {
        let mut previous = u32::MAX;
        for level in MIN_LEVEL..=MAX_LEVEL {
            let d = Difficulty::for_level(level);
            assert!(d.frame_budget <= previous);
            assert_eq!(d.shuffle_count, level as u32);
            previous = d.frame_budget;
        }
    }

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(0), MIN_LEVEL);
        assert_eq!(clamp_level(-4), MIN_LEVEL);
        assert_eq!(clamp_level(11), MAX_LEVEL);
        assert_eq!(clamp_level(7), 7);
        assert_eq!(Difficulty::for_level(200).level, MAX_LEVEL);
    }

    #[test]
    fn test_tiny_frame_base_stays_positive() {
        assert_eq!(Difficulty::with_frame_base(10, 1.0).frame_budget, 2);
    }

    #[test]
    fn test_huge_frame_base_saturates_even() {
        let d = Difficulty::with_frame_base(1, 1e12);
        assert_eq!(d.frame_budget, u32::MAX - 1);
        let d = Difficulty::with_frame_base(1, f64::INFINITY);
        assert_eq!(d.frame_budget % 2, 0);
    }

    proptest! {
        #[test]
        fn frame_budget_even_and_positive(level in 0u8..=255, base in 1.0f64..500.0) {
            let d = Difficulty::with_frame_base(level, base);
            prop_assert!(d.frame_budget > 0);
            prop_assert_eq!(d.frame_budget % 2, 0);
            prop_assert!((MIN_LEVEL..=MAX_LEVEL).contains(&d.level));
        }
    }
}
