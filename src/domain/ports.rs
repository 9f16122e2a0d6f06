use crate::domain::model::{RigidBodyVelocity, Velocity};
use crate::utils::error::Result;

/// Namespace the solver uses for user-defined runtime parameters.
pub const RPVAR_NAMESPACE: &str = "user/";

/// Read-only source of named real parameters.
pub trait ParameterStore: Send + Sync {
    /// Returns `None` when the key is unset. Keys may carry the
    /// [`RPVAR_NAMESPACE`] prefix.
    fn get_real(&self, key: &str) -> Option<f64>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

/// A prescribed rigid-body motion evaluated once per motion update.
pub trait MotionProfile: Send + Sync + std::fmt::Debug {
    /// Name the solver binds the motion to a zone with.
    fn name(&self) -> &'static str;

    fn velocity(&self, time: f64) -> Velocity;

    /// Z offset from the rest position.
    fn displacement(&self, time: f64) -> f64;

    fn apply(&self, time: f64, out: &mut RigidBodyVelocity) {
        out.velocity = self.velocity(time);
    }
}

pub fn strip_namespace(key: &str) -> &str {
    key.strip_prefix(RPVAR_NAMESPACE).unwrap_or(key)
}
