//! Frame-count driven animation loops
//!
//! A [`FrameLoop`] owns its progress (current frame, total frames) and the
//! per-frame step. The host advances it once per display refresh; it never
//! skips or coalesces frames, so progress follows frame count, not elapsed time.

/// Work performed on each frame of a loop, applied to some target `T`
pub trait FrameStep<T: ?Sized> {
    fn on_frame(&mut self, frame: u32, target: &mut T);
}

impl<T: ?Sized, F> FrameStep<T> for F
where
    F: FnMut(u32, &mut T),
{
    fn on_frame(&mut self, frame: u32, target: &mut T) {
        self(frame, target)
    }
}

/// Result of advancing a loop by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// More frames remain
    Running,
    /// All frames have run
    Complete,
}

impl FrameStatus {
    #[inline]
    pub fn is_complete(self) -> bool {
        self == FrameStatus::Complete
    }
}

/// A bounded sequence of per-frame callbacks
#[derive(Debug, Clone)]
pub struct FrameLoop<S> {
    frame: u32,
    total: u32,
    step: S,
}

impl<S> FrameLoop<S> {
    /// A loop of `total` frames. Zero frames is complete from the start.
    pub fn new(total: u32, step: S) -> Self {
        Self {
            frame: 0,
            total,
            step,
        }
    }

    /// Run the next frame (if any) and report whether the loop is done.
    ///
    /// Frame indices are delivered in strictly increasing order from 0 to
    /// `total - 1`. Advancing a finished loop is a no-op.
    pub fn advance<T: ?Sized>(&mut self, target: &mut T) -> FrameStatus
    where
        S: FrameStep<T>,
    {
        if self.frame < self.total {
            self.step.on_frame(self.frame, target);
            self.frame += 1;
        }
        self.status()
    }

    pub fn status(&self) -> FrameStatus {
        if self.frame >= self.total {
            FrameStatus::Complete
        } else {
            FrameStatus::Running
        }
    }

    /// Frames already delivered
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn step(&self) -> &S {
        &self.step
    }
}
