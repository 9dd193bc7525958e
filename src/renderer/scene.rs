//! Frame description for the host renderer
//!
//! Turns the world into a flat list of transforms (court, backboard, rim,
//! net, ball) plus HUD text. Geometry itself is the host's business.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::{Mat4, Vec3};

use super::instance::{InstanceRaw, MaterialTag, RenderInstance};
use crate::sim::{GameWorld, net_pose};

/// A line of HUD text placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub transform: Mat4,
    pub text: String,
}

/// Timer and scoreboard values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// Whole seconds left, rounded up
    pub seconds_left: u32,
    pub score: u32,
    pub last_score: u32,
    pub high_score: u32,
    pub games_played: usize,
    pub ongoing: bool,
}

impl Hud {
    pub fn from_world(world: &GameWorld) -> Self {
        let game = &world.game;
        Self {
            seconds_left: game.time_left.max(0.0).ceil() as u32,
            score: game.score,
            last_score: game.last_score(),
            high_score: game.high_score(),
            games_played: game.games_played(),
            ongoing: game.ongoing,
        }
    }

    pub fn timer_text(&self) -> String {
        if self.ongoing {
            format!("Time: {}", self.seconds_left)
        } else {
            "Press Enter to start".to_string()
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn session_text(&self) -> String {
        format!(
            "Last: {}  High: {}  Games: {}",
            self.last_score, self.high_score, self.games_played
        )
    }
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub instances: Vec<RenderInstance>,
    pub texts: Vec<TextItem>,
    pub hud: Hud,
}

impl Frame {
    /// Instances in buffer layout
    pub fn instance_data(&self) -> Vec<InstanceRaw> {
        self.instances.iter().map(RenderInstance::to_raw).collect()
    }
}

/// Stripe orientations relative to the ball
fn stripe_transforms() -> [Mat4; 4] {
    let flat = Mat4::from_scale(Vec3::new(1.02, 1.02, 0.03));
    [
        Mat4::from_rotation_y(FRAC_PI_2) * flat,
        Mat4::from_rotation_x(FRAC_PI_2) * flat,
        Mat4::from_rotation_z(FRAC_PI_4) * Mat4::from_rotation_y(FRAC_PI_2) * flat,
        Mat4::from_rotation_z(-FRAC_PI_4) * Mat4::from_rotation_y(FRAC_PI_2) * flat,
    ]
}

fn court() -> [RenderInstance; 2] {
    let wall = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0))
        * Mat4::from_scale(Vec3::new(14.0, 10.0, 0.1));
    let floor = Mat4::from_translation(Vec3::new(0.0, -10.0, 0.0))
        * Mat4::from_scale(Vec3::new(14.0, 1.0, 14.0))
        * Mat4::from_rotation_x(3.0 * PI / 2.0);
    [
        RenderInstance::new(wall, MaterialTag::Wall),
        RenderInstance::new(floor, MaterialTag::Court),
    ]
}

/// Build the frame for the world's current state
pub fn build_frame(world: &GameWorld) -> Frame {
    let hoop = &world.hoop;
    let base = world.tuning.backboard.base;
    let mut instances = Vec::with_capacity(12);

    instances.extend(court());

    instances.push(RenderInstance::new(
        hoop.backboard * Mat4::from_scale(Vec3::new(2.5, 2.0, 2.0)),
        MaterialTag::Backboard,
    ));
    instances.push(RenderInstance::new(hoop.hoop, MaterialTag::Rim));
    // Rail the backboard slides along (does not move)
    instances.push(RenderInstance::new(
        Mat4::from_translation(base)
            * Mat4::from_scale(Vec3::new(25.0, 1.0, 1.0))
            * Mat4::from_rotation_y(FRAC_PI_2)
            * Mat4::from_translation(Vec3::X),
        MaterialTag::Pole,
    ));
    instances.push(RenderInstance::new(
        net_pose(hoop, world.net_shear, &world.tuning.net),
        MaterialTag::Net,
    ));

    instances.push(RenderInstance::new(world.ball_pose, MaterialTag::Ball));
    for stripe in stripe_transforms() {
        instances.push(RenderInstance::new(
            world.ball_pose * stripe,
            MaterialTag::BallStripe,
        ));
    }

    let hud = Hud::from_world(world);
    let text_at = |x: f32, y: f32| Mat4::from_translation(Vec3::new(x, y, -9.8));
    let texts = vec![
        TextItem {
            transform: text_at(base.x, base.y + 3.0),
            text: hud.timer_text(),
        },
        TextItem {
            transform: text_at(-11.0, 8.0),
            text: hud.score_text(),
        },
        TextItem {
            transform: text_at(-11.0, 7.0),
            text: hud.session_text(),
        },
    ];

    Frame {
        instances,
        texts,
        hud,
    }
}
