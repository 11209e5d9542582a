//! Turning ranked pick hits into a verdict
//!
//! A cup carrying the ball has two hit volumes: the visible shell and a
//! slightly smaller invisible marker behind it. Hits arrive ranked by distance
//! along the pick ray, so the marker can only come second when the ray went
//! through the shell of the cup that actually hides the ball.

use serde::{Deserialize, Serialize};

use super::cup::{CupId, CupPose};

/// Half width of a cup shell's hit volume (scene units)
pub const SHELL_HALF_WIDTH: f64 = 350_000.0;
/// Half width of the ball marker volume; narrower than the shell
pub const MARKER_HALF_WIDTH: f64 = 300_000.0;

/// One intersection along the pick ray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickHit {
    pub cup: CupId,
    /// The hit was the ball's marker volume rather than a cup shell
    #[serde(default)]
    pub token_marker: bool,
}

impl PickHit {
    pub fn shell(cup: CupId) -> Self {
        Self {
            cup,
            token_marker: false,
        }
    }

    pub fn marker(cup: CupId) -> Self {
        Self {
            cup,
            token_marker: true,
        }
    }
}

/// Outcome of a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Cup the player picked
    pub cup: CupId,
    /// Whether the ball was under it
    pub hit: bool,
}

/// Evaluate hits ranked nearest first. With no hits the verdict points at
/// `secret` and is a miss.
pub fn evaluate(hits: &[PickHit], secret: CupId) -> Verdict {
    match hits {
        [] => Verdict {
            cup: secret,
            hit: false,
        },
        [first, rest @ ..] => Verdict {
            cup: first.cup,
            hit: rest.first().is_some_and(|second| second.token_marker),
        },
    }
}

/// Headless stand-in for the scene hit test: a vertical ray at table
/// position `x`, ranked shell first then marker.
pub fn pick_at<'a, I>(poses: I, x: f64) -> Vec<PickHit>
where
    I: IntoIterator<Item = &'a CupPose>,
{
    let mut hits = Vec::new();
    for pose in poses {
        let dist = (pose.x - x).abs();
        if dist > SHELL_HALF_WIDTH {
            continue;
        }
        hits.push(PickHit::shell(pose.id));
        if pose.carries_ball && dist <= MARKER_HALF_WIDTH {
            hits.push(PickHit::marker(pose.id));
        }
    }
    hits
}
