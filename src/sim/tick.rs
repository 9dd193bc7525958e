//! Per-frame world update
//!
//! Order within a frame:
//! 1. control toggles
//! 2. game timer
//! 3. idle reset (ball to rest, backboard centered) or throw launch
//! 4. backboard step, giving the frame's hoop snapshot
//! 5. ball step against that snapshot, crediting baskets
//! 6. net shear

use glam::Mat4;

use super::aim::AimVector;
use super::backboard::{Backboard, HoopSnapshot};
use super::net::net_shear;
use super::state::{GameEvent, GameState};
use super::trajectory::{ThrowState, rest_pose};
use crate::tuning::Tuning;

/// Input for a single frame. Every field is one-shot.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim drained from the pointer slot this frame
    pub aim: Option<AimVector>,
    /// Start/stop the game
    pub toggle_game: bool,
    /// Pause/resume backboard motion
    pub toggle_backboard: bool,
}

/// Everything the simulation owns
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub tuning: Tuning,
    pub game: GameState,
    pub backboard: Backboard,
    pub throw: ThrowState,
    /// Ball transform from the last tick
    pub ball_pose: Mat4,
    /// Hoop snapshot from the last tick
    pub hoop: HoopSnapshot,
    /// Net shear from the last tick
    pub net_shear: f32,
    /// Global elapsed time of the last tick
    pub time: f32,
}

impl GameWorld {
    pub fn new(tuning: Tuning) -> Self {
        let backboard = Backboard::new(&tuning.backboard);
        let hoop = backboard.snapshot(&tuning.backboard);
        Self {
            ball_pose: rest_pose(&tuning.throw),
            game: GameState::new(),
            throw: ThrowState::new(),
            backboard,
            hoop,
            net_shear: 0.0,
            time: 0.0,
            tuning,
        }
    }

    /// Ball is at rest and a game is running
    pub fn ready_to_throw(&self) -> bool {
        self.game.ongoing && !self.throw.active
    }
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

/// Advance the world by one frame (`t` = global elapsed time, `dt` = frame delta)
pub fn tick(world: &mut GameWorld, input: &TickInput, t: f32, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = dt.max(0.0);
    world.time = t;

    if input.toggle_backboard {
        let paused = world.backboard.toggle_motion();
        log::info!("Backboard motion {}", if paused { "paused" } else { "resumed" });
        events.push(GameEvent::BackboardToggled { paused });
    }
    if input.toggle_game {
        events.push(world.game.toggle(world.tuning.game_time));
    }
    if let Some(event) = world.game.tick(dt) {
        events.push(event);
    }

    if !world.game.ongoing {
        // Abrupt reset: nothing in flight survives the end of a game
        if world.throw.active {
            log::debug!("Throw cancelled, game not running");
        }
        world.throw.force_rest();
        world.backboard.reset();
        world.hoop = world.backboard.snapshot(&world.tuning.backboard);
        world.ball_pose = rest_pose(&world.tuning.throw);
        world.net_shear = net_shear(&world.throw, 0.0, t, &world.tuning.net);
        return events;
    }

    if let Some(aim) = input.aim {
        if world.throw.launch(aim) {
            log::debug!("Throw launched: aim=({:.2}, {:.2})", aim.x(), aim.y());
            events.push(GameEvent::ThrowLaunched { aim });
        } else {
            events.push(GameEvent::AimIgnored);
        }
    }

    world.backboard.step(dt, &world.tuning.backboard);
    world.hoop = world.backboard.snapshot(&world.tuning.backboard);

    let step = world.throw.step(dt, &world.hoop, &world.tuning.throw);
    world.ball_pose = step.pose;
    if let Some(scored) = step.resolved {
        if scored {
            world.game.record_basket();
            log::info!("Basket! score {}", world.game.score);
        } else {
            log::debug!("Missed");
        }
        events.push(GameEvent::ThrowResolved { scored });
    }

    world.net_shear = net_shear(&world.throw, world.hoop.offset, t, &world.tuning.net);

    events
}
