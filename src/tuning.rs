//! Data-driven physics and game balance
//!
//! Every constant that shapes a throw, the moving backboard or the game
//! timer lives here so it can be tweaked without touching the simulation.
//! Persisted as JSON (LocalStorage on web, a file on native).

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Ball flight parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowTuning {
    /// Ball resting position
    pub ball_origin: Vec3,
    /// Flight lifetime before the ball snaps back to rest (ttl)
    pub lifetime: f32,
    /// Time for the arc to reach the hoop plane (tth)
    pub time_to_target: f32,
    /// Gravity surrogate used by the closed-form arc
    pub gravity: f32,
    /// Height above the rim the arc aims for
    pub rim_clearance: f32,
    /// Horizontal scoring radius
    pub score_radius: f32,
    /// Vertical scoring tolerance
    pub score_height: f32,
}

impl Default for ThrowTuning {
    fn default() -> Self {
        Self {
            ball_origin: Vec3::from_array(BALL_ORIGIN),
            lifetime: THROW_LIFETIME,
            time_to_target: TIME_TO_TARGET,
            gravity: THROW_GRAVITY,
            rim_clearance: RIM_CLEARANCE,
            score_radius: SCORE_RADIUS,
            score_height: SCORE_HEIGHT,
        }
    }
}

/// Pointer-to-aim conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimTuning {
    /// Largest sideways component after clamping
    pub max_x: f32,
    /// Forward component magnitude (sign follows the drag)
    pub forward: f32,
    /// Drags shorter than this (in CSS pixels) are ignored
    pub min_drag: f32,
}

impl Default for AimTuning {
    fn default() -> Self {
        Self {
            max_x: MAX_AIM_X,
            forward: AIM_Y,
            min_drag: 1.0,
        }
    }
}

/// Backboard placement and motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackboardTuning {
    /// Backboard center when the offset is zero
    pub base: Vec3,
    /// Hoop offset in the backboard frame (rotated a quarter turn about x)
    pub hoop_local: Vec3,
    /// Travel limit on either side of `base`
    pub max_offset: f32,
    /// Sliding speed (units/s)
    pub speed: f32,
}

impl Default for BackboardTuning {
    fn default() -> Self {
        Self {
            base: Vec3::from_array(BACKBOARD_BASE),
            hoop_local: Vec3::from_array(HOOP_LOCAL),
            max_offset: BACKBOARD_MAX_OFFSET,
            speed: BACKBOARD_SPEED,
        }
    }
}

/// Net wobble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetTuning {
    /// Post-basket swing window (seconds)
    pub swing_window: f32,
    /// Swing angular frequency (rad/s)
    pub swing_freq: f32,
    /// Shear per unit of hoop offset
    pub swing_gain: f32,
    /// Idle sway amplitude
    pub idle_amplitude: f32,
    /// Idle sway angular frequency (rad/s)
    pub idle_freq: f32,
    /// Net hangs this far below the rim
    pub drop: f32,
}

impl Default for NetTuning {
    fn default() -> Self {
        Self {
            swing_window: NET_SWING_WINDOW,
            swing_freq: 30.0,
            swing_gain: 0.1,
            idle_amplitude: 0.05,
            idle_freq: 1.5,
            drop: 0.6,
        }
    }
}

/// Complete tuning table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Length of one game (seconds)
    pub game_time: f32,
    pub throw: ThrowTuning,
    pub aim: AimTuning,
    pub backboard: BackboardTuning,
    pub net: NetTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_time: GAME_TIME,
            throw: ThrowTuning::default(),
            aim: AimTuning::default(),
            backboard: BackboardTuning::default(),
            net: NetTuning::default(),
        }
    }
}

/// Why a tuning table was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON for this table
    Parse(serde_json::Error),
    /// A value that would break the simulation
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, reason })
    }
}

impl Tuning {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tiny_hoops_tuning";

    /// Parse and validate a JSON table (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the closed-form arc or the timers cannot handle
    pub fn validate(&self) -> Result<(), TuningError> {
        let t = &self.throw;
        check(self.game_time > 0.0, "game_time", "must be positive")?;
        check(t.time_to_target > 0.0, "throw.time_to_target", "must be positive")?;
        check(t.lifetime > 0.0, "throw.lifetime", "must be positive")?;
        check(t.gravity.is_finite(), "throw.gravity", "must be finite")?;
        check(t.score_radius >= 0.0, "throw.score_radius", "must not be negative")?;
        check(t.score_height >= 0.0, "throw.score_height", "must not be negative")?;
        // Hoop sits in front of the backboard, so this keeps dz positive.
        check(
            t.ball_origin.z > self.backboard.base.z + self.backboard.hoop_local.y,
            "throw.ball_origin",
            "ball must start in front of the hoop",
        )?;
        check(self.aim.forward > 0.0, "aim.forward", "must be positive")?;
        check(self.aim.max_x >= 0.0, "aim.max_x", "must not be negative")?;
        check(self.aim.min_drag >= 0.0, "aim.min_drag", "must not be negative")?;
        check(self.backboard.max_offset >= 0.0, "backboard.max_offset", "must not be negative")?;
        check(self.backboard.speed.is_finite(), "backboard.speed", "must be finite")?;
        check(self.net.swing_window >= 0.0, "net.swing_window", "must not be negative")?;
        Ok(())
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Load tuning from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "game_time": 30.0, "throw": { "gravity": 12.0 } }"#)
            .expect("valid tuning");
        assert_eq!(tuning.game_time, 30.0);
        assert_eq!(tuning.throw.gravity, 12.0);
        assert_eq!(tuning.throw.time_to_target, TIME_TO_TARGET);
        assert_eq!(tuning.backboard, BackboardTuning::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut tuning = Tuning::default();
        tuning.backboard.speed = 4.5;
        let json = tuning.to_json().expect("serializable");
        assert_eq!(Tuning::from_json(&json).expect("valid"), tuning);
    }

    #[test]
    fn test_rejects_zero_time_to_target() {
        let err = Tuning::from_json(r#"{ "throw": { "time_to_target": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid { field: "throw.time_to_target", .. }
        ));
    }

    #[test]
    fn test_rejects_ball_behind_hoop() {
        let mut tuning = Tuning::default();
        tuning.throw.ball_origin.z = -20.0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning parse error"));
    }
}
