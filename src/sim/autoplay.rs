//! Demo shooter
//!
//! Aims at where the hoop is right now (not where it will be), with a
//! little seeded jitter, so a moving backboard still dodges some shots.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::aim::AimVector;
use super::tick::{GameWorld, TickInput};

/// Seconds the shooter waits with the ball at rest before throwing
const THINK_TIME: f32 = 0.4;

/// Seeded AI player
#[derive(Debug, Clone)]
pub struct AutoShooter {
    rng: Pcg32,
    /// Sideways aim noise (aim units)
    jitter: f32,
    wait: f32,
}

impl AutoShooter {
    pub fn new(seed: u64, jitter: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            jitter: jitter.max(0.0),
            wait: 0.0,
        }
    }

    /// Input for the next frame: starts a game if none is running and
    /// throws whenever the ball has been resting long enough.
    pub fn next_input(&mut self, world: &GameWorld, dt: f32) -> TickInput {
        if !world.game.ongoing {
            self.wait = 0.0;
            return TickInput {
                toggle_game: true,
                ..Default::default()
            };
        }
        if !world.ready_to_throw() {
            self.wait = 0.0;
            return TickInput::default();
        }

        self.wait += dt;
        if self.wait < THINK_TIME {
            return TickInput::default();
        }
        self.wait = 0.0;

        let aim = &world.tuning.aim;
        let origin = world.tuning.throw.ball_origin;
        let dz = origin.z - world.hoop.center.z;
        let dx = world.hoop.center.x - origin.x;
        let noise = if self.jitter > 0.0 {
            self.rng.random_range(-self.jitter..self.jitter)
        } else {
            0.0
        };
        let x = aim.forward * dx / dz + noise;

        TickInput {
            aim: AimVector::new(x, aim.forward, aim),
            ..Default::default()
        }
    }
}
