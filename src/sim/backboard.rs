//! Sliding backboard
//!
//! The backboard (with rim and net) slides back and forth along x as a
//! triangle wave: constant speed, velocity flips when a limit is crossed.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::tuning::BackboardTuning;

/// Moving backboard state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backboard {
    /// Sideways displacement from the base position
    pub offset: f32,
    /// Signed sliding speed (units/s)
    pub velocity: f32,
    /// Motion toggled off by the player
    pub paused: bool,
}

/// Read-only view of the hoop for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoopSnapshot {
    pub offset: f32,
    pub backboard: Mat4,
    pub hoop: Mat4,
    /// Rim center in world space
    pub center: Vec3,
}

impl Backboard {
    pub fn new(tuning: &BackboardTuning) -> Self {
        Self {
            offset: 0.0,
            velocity: tuning.speed,
            paused: false,
        }
    }

    /// Advance by `dt`, reflecting off the travel limits.
    ///
    /// After every step `offset` lies in `[-max_offset, max_offset]`.
    pub fn step(&mut self, dt: f32, tuning: &BackboardTuning) {
        if self.paused {
            return;
        }
        self.offset += dt * self.velocity;
        let max = tuning.max_offset;
        if self.offset.abs() > max {
            self.offset = max.copysign(self.offset);
            self.velocity = -self.velocity;
        }
    }

    pub fn toggle_motion(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Center the backboard (velocity keeps its direction)
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    /// Derive the frame's backboard and hoop transforms
    pub fn snapshot(&self, tuning: &BackboardTuning) -> HoopSnapshot {
        let backboard = Mat4::from_translation(tuning.base + Vec3::X * self.offset);
        let hoop = backboard
            * Mat4::from_rotation_x(FRAC_PI_2)
            * Mat4::from_translation(tuning.hoop_local);
        HoopSnapshot {
            offset: self.offset,
            backboard,
            hoop,
            center: hoop.transform_point3(Vec3::ZERO),
        }
    }
}
