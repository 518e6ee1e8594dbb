//! Platform-free core of the robot dashboard: pointer tracking, the
//! procedural rig, the camera intro, the GUI gate and widget state.

pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod gate;
pub mod idle;
pub mod intro;
pub mod joints;
pub mod math;
pub mod rig;
pub mod skeleton;
pub mod store;
pub mod system;
pub mod tracker;
pub mod widgets;

pub use camera::*;
pub use config::*;
pub use error::{Result, RigError};
pub use gate::*;
pub use idle::*;
pub use intro::*;
pub use joints::*;
pub use math::*;
pub use rig::*;
pub use skeleton::*;
pub use store::*;
pub use system::*;
pub use tracker::*;
pub use widgets::*;
