//! Frame-driven simulation module
//!
//! All gameplay logic lives here. Rules for this module:
//! - State is owned by [`GameWorld`] and passed explicitly, no globals
//! - Every frame is a pure function of state, input, `t` and `dt`
//! - No rendering or platform dependencies

pub mod aim;
pub mod autoplay;
pub mod backboard;
pub mod net;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use aim::{AimReceiver, AimSender, AimVector, aim_channel};
pub use autoplay::AutoShooter;
pub use backboard::{Backboard, HoopSnapshot};
pub use net::{net_pose, net_shear};
pub use state::{GameEvent, GameOverReason, GameState};
pub use tick::{GameWorld, TickInput, tick};
pub use trajectory::{BallStep, ThrowState, rest_pose};
