//! Render boundary
//!
//! The simulation does not draw. Each frame it hands the host renderer a
//! list of world transforms tagged with a material, plus HUD text.

pub mod instance;
pub mod scene;

pub use instance::{InstanceRaw, MaterialTag, RenderInstance};
pub use scene::{Frame, Hud, TextItem, build_frame};
