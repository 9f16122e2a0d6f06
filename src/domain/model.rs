use serde::{Deserialize, Serialize};

/// Translational velocity `[vx, vy, vz]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity(pub [f64; 3]);

impl Velocity {
    pub fn along_z(vz: f64) -> Self {
        Self([0.0, 0.0, vz])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }
}

/// Output buffer handed over by the solver for one motion update.
///
/// Profiles only ever write `velocity`; `omega` keeps whatever the caller
/// put there.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidBodyVelocity {
    pub velocity: Velocity,
    pub omega: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub time: f64,
    pub displacement_z: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub velocity_z: f64,
}

impl MotionSample {
    pub fn new(time: f64, displacement_z: f64, velocity: Velocity) -> Self {
        Self {
            time,
            displacement_z,
            velocity_x: velocity.x(),
            velocity_y: velocity.y(),
            velocity_z: velocity.z(),
        }
    }
}
