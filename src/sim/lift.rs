//! Lift animations: raising, lowering and bouncing cups
//!
//! A single lift eases the cup shell's height and tilt along a sine. Lifting
//! all three cups staggers their starts by fixed wall-clock offsets so they
//! don't move in lockstep; the sequence completes when the last-started cup
//! finishes.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::cup::{Cup, CupId, CupView};
use super::frames::{FrameLoop, FrameStatus, FrameStep};
use crate::consts::CUP_COUNT;

/// Height change per lift, spread over the loop
const LIFT_HEIGHT: f64 = -3.0;
/// Tilt change per lift (degrees), spread over the loop
const LIFT_TILT: f64 = -200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiftDirection {
    Up,
    Down,
}

/// Per-frame easing of one cup
///
/// Undirected lifts (`None`) trace a full sine period and land where they
/// started. Directed lifts stretch the period to twice the frame count, so
/// the cup ends half way round: raised for `Up`, lowered back for `Down`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftMotion {
    direction: Option<LiftDirection>,
    loop_frames: u32,
}

impl LiftMotion {
    pub fn new(direction: Option<LiftDirection>, frame_budget: u32) -> Self {
        let steps_factor = if direction.is_some() { 2 } else { 1 };
        Self {
            direction,
            loop_frames: frame_budget.saturating_mul(steps_factor),
        }
    }

    /// Build the loop for one cup; it always runs `frame_budget` frames
    pub fn begin(direction: Option<LiftDirection>, frame_budget: u32) -> FrameLoop<Self> {
        FrameLoop::new(frame_budget, Self::new(direction, frame_budget))
    }

    /// (height, tilt) change applied on `frame`
    pub fn delta(&self, frame: u32) -> (f64, f64) {
        let dir = match self.direction {
            Some(LiftDirection::Down) => -1.0,
            _ => 1.0,
        };
        let loop_frames = self.loop_frames as f64;
        let wave = (frame as f64 / loop_frames * TAU).sin();
        (
            wave * LIFT_HEIGHT / loop_frames * dir,
            wave * LIFT_TILT / loop_frames * dir,
        )
    }
}

impl<V: CupView> FrameStep<Cup<V>> for LiftMotion {
    fn on_frame(&mut self, frame: u32, cup: &mut Cup<V>) {
        let (dz, dtilt) = self.delta(frame);
        cup.lift_by(dz, dtilt);
    }
}

/// Start order for lifting all cups, leading with `first`
pub fn lift_order(first: CupId) -> [CupId; CUP_COUNT] {
    match first {
        1 => [1, 0, 2],
        2 => [2, 0, 1],
        _ => [0, 1, 2],
    }
}

/// Staggered lift of all three cups
#[derive(Debug, Clone)]
pub struct LiftSequence {
    order: [CupId; CUP_COUNT],
    direction: Option<LiftDirection>,
    frame_budget: u32,
    stagger_ms: [f64; CUP_COUNT],
    elapsed_ms: f64,
    lifts: Vec<(CupId, FrameLoop<LiftMotion>)>,
}

impl LiftSequence {
    /// Start lifting with `first` leading; it starts right away, the others
    /// once their stagger offsets have elapsed.
    pub fn new(
        first: CupId,
        direction: Option<LiftDirection>,
        frame_budget: u32,
        stagger_ms: [f64; CUP_COUNT],
    ) -> Self {
        let mut sequence = Self {
            order: lift_order(first),
            direction,
            frame_budget,
            stagger_ms,
            elapsed_ms: 0.0,
            lifts: Vec::with_capacity(CUP_COUNT),
        };
        sequence.start_due();
        sequence
    }

    fn start_due(&mut self) {
        while self.lifts.len() < CUP_COUNT && self.elapsed_ms >= self.stagger_ms[self.lifts.len()] {
            let id = self.order[self.lifts.len()];
            self.lifts.push((id, LiftMotion::begin(self.direction, self.frame_budget)));
        }
    }

    /// Let `dt_ms` of wall-clock time pass, start any lifts now due, and run
    /// one frame of every started lift.
    pub fn advance<V: CupView>(&mut self, dt_ms: f64, cups: &mut [Cup<V>]) -> FrameStatus {
        self.elapsed_ms += dt_ms;
        self.start_due();

        for (id, lift) in &mut self.lifts {
            lift.advance(&mut cups[*id]);
        }

        match self.lifts.last() {
            Some((_, last)) if self.lifts.len() == CUP_COUNT => last.status(),
            _ => FrameStatus::Running,
        }
    }

    pub fn order(&self) -> [CupId; CUP_COUNT] {
        self.order
    }

    pub fn direction(&self) -> Option<LiftDirection> {
        self.direction
    }

    /// Cups whose lift has started, in start order
    pub fn started(&self) -> impl Iterator<Item = CupId> + '_ {
        self.lifts.iter().map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LIFT_STAGGER_MS;
    use crate::sim::cup::{CupFactory, CupPose, PoseFactory};
    use proptest::prelude::*;

    /// Exact in binary so stagger boundaries land on a known tick
    const STEP_MS: f64 = 20.0;

    fn table() -> Vec<Cup<CupPose>> {
        (0..CUP_COUNT)
            .map(|id| {
                let x = id as f64;
                Cup::new(id, x, false, PoseFactory.create(x, id, false))
            })
            .collect()
    }

    fn run_lift(direction: Option<LiftDirection>, budget: u32) -> Cup<CupPose> {
        let mut cup = Cup::new(0, 0.0, false, PoseFactory.create(0.0, 0, false));
        let mut lift = LiftMotion::begin(direction, budget);
        while !lift.advance(&mut cup).is_complete() {}
        cup
    }

    #[test]
    fn test_lift_order() {
        assert_eq!(lift_order(0), [0, 1, 2]);
        assert_eq!(lift_order(1), [1, 0, 2]);
        assert_eq!(lift_order(2), [2, 0, 1]);
    }

    #[test]
    fn test_bounce_returns_to_rest() {
        let cup = run_lift(None, 24);
        assert!(cup.view.lift.abs() < 1e-9);
        assert!(cup.view.tilt.abs() < 1e-9);
    }

    #[test]
    fn test_directed_lift_stays_up() {
        let up = run_lift(Some(LiftDirection::Up), 24);
        let down = run_lift(Some(LiftDirection::Down), 24);
        assert!(up.view.lift < -0.1, "lift up should leave shell raised");
        assert!(up.view.tilt < -1.0);
        assert!((up.view.lift + down.view.lift).abs() < 1e-9);
        assert!((up.view.tilt + down.view.tilt).abs() < 1e-9);
    }

    #[test]
    fn test_directed_lift_runs_frame_budget() {
        let mut cup = Cup::new(0, 0.0, false, PoseFactory.create(0.0, 0, false));
        let mut lift = LiftMotion::begin(Some(LiftDirection::Up), 18);
        let mut frames = 1;
        while !lift.advance(&mut cup).is_complete() {
            frames += 1;
        }
        assert_eq!(frames, 18);
    }

    #[test]
    fn test_sequence_staggers_starts() {
        let mut cups = table();
        let mut sequence = LiftSequence::new(2, Some(LiftDirection::Up), 24, LIFT_STAGGER_MS);
        assert_eq!(sequence.started().collect::<Vec<_>>(), vec![2]);

        for _ in 0..4 {
            sequence.advance(STEP_MS, &mut cups);
        }
        assert_eq!(sequence.started().count(), 1);
        sequence.advance(STEP_MS, &mut cups);
        assert_eq!(sequence.started().collect::<Vec<_>>(), vec![2, 0]);

        // Leading cup has run further than the trailing one
        assert!(cups[2].view.tilt < cups[0].view.tilt);
        assert_eq!(cups[1].view.tilt, 0.0);
    }

    #[test]
    fn test_sequence_completes_with_last_started() {
        let mut cups = table();
        let budget = 8;
        let mut sequence = LiftSequence::new(1, None, budget, LIFT_STAGGER_MS);

        let mut ticks = 1u32;
        while !sequence.advance(STEP_MS, &mut cups).is_complete() {
            ticks += 1;
            assert!(ticks < 1_000);
        }
        // Last cup starts on the tick that crosses 200 ms, then runs its budget
        let third_start = (LIFT_STAGGER_MS[2] / STEP_MS) as u32;
        assert_eq!(ticks, third_start + budget - 1);
        for cup in &cups {
            assert!(cup.view.lift.abs() < 1e-9);
        }
    }

    #[test]
    fn test_sequence_waits_for_last_started_not_highest_id() {
        let mut cups = table();
        let budget = 8;
        let mut sequence = LiftSequence::new(2, None, budget, LIFT_STAGGER_MS);
        assert_eq!(sequence.order(), [2, 0, 1]);

        let third_start = (LIFT_STAGGER_MS[2] / STEP_MS) as u32;
        let mut ticks = 1u32;
        while !sequence.advance(STEP_MS, &mut cups).is_complete() {
            ticks += 1;
            assert!(ticks < 1_000);
        }
        // Cup 2 finished long before; completion follows cup 1, started last
        assert!(budget < third_start);
        assert_eq!(ticks, third_start + budget - 1);
        assert_eq!(sequence.started().last(), Some(1));
    }

    #[test]
    fn test_huge_budget_does_not_overflow() {
        let motion = LiftMotion::new(Some(LiftDirection::Up), u32::MAX);
        let (dz, dtilt) = motion.delta(1);
        assert!(dz.is_finite() && dtilt.is_finite());
    }

    #[test]
    fn test_zero_stagger_starts_everything() {
        let mut cups = table();
        let mut sequence = LiftSequence::new(0, Some(LiftDirection::Down), 4, [0.0; CUP_COUNT]);
        assert_eq!(sequence.started().count(), CUP_COUNT);
        for _ in 0..3 {
            assert!(!sequence.advance(STEP_MS, &mut cups).is_complete());
        }
        assert!(sequence.advance(STEP_MS, &mut cups).is_complete());
    }

    proptest! {
        #[test]
        fn up_then_down_cancels(half_budget in 1u32..40) {
            let budget = half_budget * 2;
            let mut cup = Cup::new(0, 0.0, false, PoseFactory.create(0.0, 0, false));
            for direction in [LiftDirection::Up, LiftDirection::Down] {
                let mut lift = LiftMotion::begin(Some(direction), budget);
                while !lift.advance(&mut cup).is_complete() {}
            }
            prop_assert!(cup.view.lift.abs() < 1e-9);
            prop_assert!(cup.view.tilt.abs() < 1e-9);
        }
    }
}
