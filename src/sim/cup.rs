//! Cups and the rendering side they drive
//!
//! The engine tracks each cup's table position (needed to order shuffles) and
//! forwards every per-frame delta to a host-provided [`CupView`]. Lift and
//! tilt amounts only live in the view.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Cup identity, 0..CUP_COUNT
pub type CupId = usize;

/// Renderable cup owned by the host scene
pub trait CupView {
    /// Translate the cup (and the ball under it, if any) across the table
    fn move_by(&mut self, dx: f64, dy: f64);
    /// Raise/lower the cup shell and tilt it; the ball stays on the table
    fn lift_by(&mut self, dz: f64, dtilt: f64);
}

/// Creates the host-side view for a cup at the start of a game
pub trait CupFactory {
    type View: CupView;

    fn create(&mut self, base_x: f64, id: CupId, carries_ball: bool) -> Self::View;
}

/// A cup on the table
#[derive(Debug, Clone)]
pub struct Cup<V> {
    pub id: CupId,
    /// Current table position; x orders the cups left to right
    pub pos: DVec2,
    /// Known only to the engine until a pick resolves
    carries_ball: bool,
    pub view: V,
}

impl<V: CupView> Cup<V> {
    pub fn new(id: CupId, base_x: f64, carries_ball: bool, view: V) -> Self {
        Self {
            id,
            pos: DVec2::new(base_x, 0.0),
            carries_ball,
            view,
        }
    }

    pub fn move_by(&mut self, delta: DVec2) {
        self.pos += delta;
        self.view.move_by(delta.x, delta.y);
    }

    pub fn lift_by(&mut self, dz: f64, dtilt: f64) {
        self.view.lift_by(dz, dtilt);
    }

    pub(crate) fn carries_ball(&self) -> bool {
        self.carries_ball
    }
}

/// Plain pose record; the view used by headless hosts and the wasm bridge
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CupPose {
    pub id: CupId,
    pub x: f64,
    pub y: f64,
    /// Vertical offset of the shell (negative is up in scene anchor units)
    pub lift: f64,
    /// Shell tilt (degrees)
    pub tilt: f64,
    /// Whether the ball (and its hit volume) travels with this cup
    pub carries_ball: bool,
}

impl CupView for CupPose {
    fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    fn lift_by(&mut self, dz: f64, dtilt: f64) {
        self.lift += dz;
        self.tilt += dtilt;
    }
}

/// Factory producing [`CupPose`] views
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseFactory;

impl CupFactory for PoseFactory {
    type View = CupPose;

    fn create(&mut self, base_x: f64, id: CupId, carries_ball: bool) -> CupPose {
        CupPose {
            id,
            x: base_x,
            carries_ball,
            ..Default::default()
        }
    }
}
