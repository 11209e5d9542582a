//! Shuffle passes
//!
//! One pass picks a swap pattern and slides every cup along it over
//! `frame_budget` frames, with a sine arc on the y axis so swapping cups curve
//! past each other. Patterns are applied by left-to-right slot, so the slot
//! order is snapshotted from current positions right before each pass.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use super::cup::{Cup, CupView};
use super::frames::{FrameLoop, FrameStatus, FrameStep};
use crate::consts::CUP_COUNT;

/// Slot offsets of the canonical swap patterns, in units of 25 move distances
/// (one cup spacing at default tuning)
pub const MOVE_PATTERNS: [[i32; CUP_COUNT]; 3] = [[2, 0, -2], [1, -1, 0], [0, 1, -1]];

/// Horizontal travel per pass for one pattern unit, in move distances
const TRAVEL_PER_UNIT: f64 = 25.0;
/// Arc height factor per pattern unit, in move distances
const ARC_PER_UNIT: f64 = 40.0;

/// Swap pattern plus arc direction for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShufflePattern {
    /// Offset per slot, left to right
    pub offsets: [i32; CUP_COUNT],
    /// Arc direction, -1 or +1
    pub arc_sign: i32,
}

impl ShufflePattern {
    /// Uniformly pick one of the canonical patterns and an independent sign
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let offsets = MOVE_PATTERNS[rng.random_range(0..MOVE_PATTERNS.len())];
        let arc_sign = if rng.random_bool(0.5) { 1 } else { -1 };
        Self { offsets, arc_sign }
    }
}

/// Per-frame motion of one pass
#[derive(Debug, Clone)]
pub struct ShufflePass {
    /// Cup indices sorted by x at the start of the pass
    order: [usize; CUP_COUNT],
    pattern: ShufflePattern,
    move_distance: f64,
    frame_budget: u32,
}

impl ShufflePass {
    /// Snapshot the slot order from `cups` and build a loop for one pass
    pub fn begin<V>(
        cups: &[Cup<V>],
        pattern: ShufflePattern,
        move_distance: f64,
        frame_budget: u32,
    ) -> FrameLoop<Self> {
        FrameLoop::new(
            frame_budget,
            Self {
                order: slot_order(cups),
                pattern,
                move_distance,
                frame_budget,
            },
        )
    }

    /// Displacement applied to the cup in `slot` on `frame`
    pub fn delta(&self, frame: u32, slot: usize) -> DVec2 {
        let budget = self.frame_budget as f64;
        let offset = self.pattern.offsets[slot] as f64;
        let wave = (frame as f64 / budget * TAU).sin();
        DVec2::new(
            self.move_distance * TRAVEL_PER_UNIT / budget * offset,
            wave * self.move_distance * ARC_PER_UNIT / budget
                * offset
                * self.pattern.arc_sign as f64,
        )
    }

    pub fn order(&self) -> [usize; CUP_COUNT] {
        self.order
    }

    pub fn pattern(&self) -> ShufflePattern {
        self.pattern
    }
}

impl<V: CupView> FrameStep<[Cup<V>]> for ShufflePass {
    fn on_frame(&mut self, frame: u32, cups: &mut [Cup<V>]) {
        for (slot, &index) in self.order.iter().enumerate() {
            let delta = self.delta(frame, slot);
            cups[index].move_by(delta);
        }
    }
}

/// Indices of `cups` sorted by ascending x
pub fn slot_order<V>(cups: &[Cup<V>]) -> [usize; CUP_COUNT] {
    let mut order: [usize; CUP_COUNT] = std::array::from_fn(|i| i);
    order.sort_by(|&a, &b| cups[a].pos.x.total_cmp(&cups[b].pos.x));
    order
}

/// A full shuffle: `passes` passes run strictly one after another
#[derive(Debug, Clone)]
pub struct ShuffleRun {
    remaining: u32,
    completed: u32,
    move_distance: f64,
    frame_budget: u32,
    current: Option<FrameLoop<ShufflePass>>,
}

impl ShuffleRun {
    pub fn new(passes: u32, move_distance: f64, frame_budget: u32) -> Self {
        Self {
            remaining: passes,
            completed: 0,
            move_distance,
            frame_budget,
            current: None,
        }
    }

    /// Advance the active pass by one frame, starting the next pass first if
    /// none is running. A new pass re-sorts the cups, so it must not begin
    /// until the previous one has landed.
    pub fn advance<V: CupView, R: Rng + ?Sized>(
        &mut self,
        cups: &mut [Cup<V>],
        rng: &mut R,
    ) -> FrameStatus {
        if self.remaining == 0 {
            return FrameStatus::Complete;
        }

        if self.current.is_none() {
            let pattern = ShufflePattern::random(rng);
            let pass = ShufflePass::begin(cups, pattern, self.move_distance, self.frame_budget);
            log::debug!(
                "Shuffle pass {}: order {:?}, pattern {:?}, arc {}",
                self.completed + 1,
                pass.step().order(),
                pattern.offsets,
                pattern.arc_sign
            );
            self.current = Some(pass);
        }

        if let Some(pass) = self.current.as_mut()
            && pass.advance(cups).is_complete()
        {
            self.current = None;
            self.remaining -= 1;
            self.completed += 1;
        }

        if self.remaining == 0 {
            FrameStatus::Complete
        } else {
            FrameStatus::Running
        }
    }

    /// Passes fully played so far
    pub fn completed(&self) -> u32 {
        self.completed
    }
}
