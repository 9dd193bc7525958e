//! Net sway

use glam::{Mat4, Vec3, Vec4};

use super::backboard::HoopSnapshot;
use super::trajectory::ThrowState;
use crate::tuning::NetTuning;

/// Shear applied to the net this frame.
///
/// Right after a basket the net swings toward the side the hoop is
/// displaced to, scaled by how far it is displaced. Otherwise it sways
/// slowly with global time.
pub fn net_shear(throw: &ThrowState, hoop_offset: f32, t: f32, tuning: &NetTuning) -> f32 {
    if throw.in_net && throw.net_timer <= tuning.swing_window {
        (throw.net_timer * tuning.swing_freq).sin() * hoop_offset * tuning.swing_gain
    } else {
        tuning.idle_amplitude * (t * tuning.idle_freq).sin()
    }
}

/// Net transform: hangs below the rim, x sheared by height
pub fn net_pose(hoop: &HoopSnapshot, shear: f32, tuning: &NetTuning) -> Mat4 {
    let shear_x_by_y = Mat4::from_cols(
        Vec4::X,
        Vec4::new(shear, 1.0, 0.0, 0.0),
        Vec4::Z,
        Vec4::W,
    );
    Mat4::from_translation(hoop.center - Vec3::Y * tuning.drop) * shear_x_by_y
}
