//! Pointer input to throw direction
//!
//! A pointer release is measured from the bottom-center of the canvas
//! (where the ball sits on screen) and turned into a clamped aim vector.
//! Pending aims travel through a single-slot channel: the event listener
//! pushes, the frame loop drains at most one per frame.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sign_or_positive;
use crate::tuning::AimTuning;

/// Throw direction: `x` is sideways (positive = right), `y` is forward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimVector {
    x: f32,
    y: f32,
}

impl AimVector {
    /// Clamp a raw direction into the throwing cone.
    ///
    /// `x` is limited to `±max_x` and `y` is forced to `±forward`, keeping
    /// its sign (zero counts as forward). Returns `None` for a zero-length
    /// or non-finite direction.
    pub fn new(x: f32, y: f32, aim: &AimTuning) -> Option<Self> {
        if !x.is_finite() || !y.is_finite() || (x == 0.0 && y == 0.0) {
            return None;
        }
        Some(Self {
            x: x.clamp(-aim.max_x, aim.max_x),
            y: sign_or_positive(y) * aim.forward,
        })
    }

    /// Convert a pointer release (canvas client coordinates) into an aim.
    ///
    /// Drags shorter than `min_drag` pixels are rejected.
    pub fn from_release(pos: Vec2, canvas_size: Vec2, aim: &AimTuning) -> Option<Self> {
        let reference = Vec2::new(canvas_size.x / 2.0, canvas_size.y);
        // Screen y grows downward; forward is up the screen
        let drag = Vec2::new(pos.x - reference.x, reference.y - pos.y);
        let len = drag.length();
        if !len.is_finite() || len < aim.min_drag.max(f32::EPSILON) {
            return None;
        }
        let dir = drag / len;
        Self::new(dir.x, dir.y, aim)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Yaw about the vertical axis (radians, positive swings toward +x).
    ///
    /// Uses the forward magnitude so a backward drag still throws toward
    /// the hoop on the same side instead of mirroring.
    pub fn yaw(&self) -> f32 {
        self.x.atan2(self.y.abs())
    }
}

/// Producer half of the aim slot (held by the pointer listener)
#[derive(Debug, Clone)]
pub struct AimSender(SyncSender<AimVector>);

/// Consumer half of the aim slot (drained once per frame)
#[derive(Debug)]
pub struct AimReceiver(Receiver<AimVector>);

/// Create a bounded aim channel that holds at most one pending aim
pub fn aim_channel() -> (AimSender, AimReceiver) {
    let (tx, rx) = mpsc::sync_channel(1);
    (AimSender(tx), AimReceiver(rx))
}

impl AimSender {
    /// Offer an aim; returns false if one is already pending
    pub fn send(&self, aim: AimVector) -> bool {
        match self.0.try_send(aim) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::debug!("Aim dropped, one already pending");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

impl AimReceiver {
    /// Take the pending aim, if any
    pub fn take(&self) -> Option<AimVector> {
        match self.0.try_recv() {
            Ok(aim) => Some(aim),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}
