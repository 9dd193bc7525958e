//! Tiny Hoops - A 3D basketball throwing mini-game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (ball flight, moving hoop, game timer)
//! - `renderer`: Render boundary (world transforms + material tags for the host)
//! - `tuning`: Data-driven physics and game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Length of one game in seconds
    pub const GAME_TIME: f32 = 45.0;
    /// Largest frame delta the platform loop will feed the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ball resting position (world space)
    pub const BALL_ORIGIN: [f32; 3] = [0.0, -5.0, 5.0];
    /// Total flight time before the ball is returned to rest (ttl)
    pub const THROW_LIFETIME: f32 = 2.0;
    /// Time for the arc to reach the hoop plane (tth)
    pub const TIME_TO_TARGET: f32 = 1.0;
    /// Downward acceleration surrogate, faster than real gravity
    pub const THROW_GRAVITY: f32 = 10.0;
    /// Aim this far above the rim instead of its center
    pub const RIM_CLEARANCE: f32 = 0.1;
    /// Horizontal scoring radius around the hoop center
    pub const SCORE_RADIUS: f32 = 1.5;
    /// Vertical scoring tolerance at the hoop plane
    pub const SCORE_HEIGHT: f32 = 0.2;

    /// Aim clamp: largest sideways component
    pub const MAX_AIM_X: f32 = 0.6;
    /// Aim clamp: forward component magnitude
    pub const AIM_Y: f32 = 0.8;

    /// Backboard rest position
    pub const BACKBOARD_BASE: [f32; 3] = [0.0, 6.0, -8.5];
    /// Hoop offset in the backboard's rotated frame
    pub const HOOP_LOCAL: [f32; 3] = [0.0, 1.0, 1.5];
    /// Backboard travel limit on either side
    pub const BACKBOARD_MAX_OFFSET: f32 = 6.0;
    /// Backboard sliding speed (units/s)
    pub const BACKBOARD_SPEED: f32 = 3.0;

    /// Net swing window after a basket (seconds)
    pub const NET_SWING_WINDOW: f32 = 0.3;
}

/// Sign that treats zero (and -0.0) as positive
#[inline]
pub fn sign_or_positive(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}
