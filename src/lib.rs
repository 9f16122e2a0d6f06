pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, parameters::InMemoryParameters, toml_config::TomlConfig};
pub use core::{
    motion::{evaluate_motion, MotionKind, NoisyVibration, SimpleVibration, VibrationTerm},
    sampler::{MotionSampler, OutputFormat},
    schedule::TimeSchedule,
};
pub use domain::model::{MotionSample, RigidBodyVelocity, Velocity};
pub use domain::ports::{MotionProfile, ParameterStore, Storage};
pub use utils::error::{MotionError, Result};
