pub mod motion;
pub mod sampler;
pub mod schedule;

pub use crate::domain::model::{MotionSample, RigidBodyVelocity, Velocity};
pub use crate::domain::ports::{MotionProfile, ParameterStore, Storage};
pub use crate::utils::error::Result;
