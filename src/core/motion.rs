//! Prescribed vibration motions for a rigid moving-mesh boundary.
//!
//! Each motion is the time derivative of `A * (1 - cos(2*pi*f*t))` along z,
//! optionally superposed with a second term of the same shape.

use crate::domain::model::Velocity;
use crate::domain::ports::{MotionProfile, ParameterStore};
use crate::utils::error::{MotionError, Result};
use crate::utils::validation::{validate_finite, validate_required_field};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

pub const VIBRATION_AMPLITUDE: &str = "vibration_amplitude";
pub const VIBRATION_FREQUENCY: &str = "vibration_frequency";
pub const NOISE_AMPLITUDE: &str = "noise_amplitude";
pub const NOISE_FREQUENCY: &str = "noise_frequency";

/// One `A * (1 - cos(w t))` displacement term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibrationTerm {
    pub amplitude: f64,
    pub frequency: f64,
}

impl VibrationTerm {
    pub fn new(amplitude: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }

    /// Reads and checks an amplitude/frequency pair from the store.
    pub fn from_store<S: ParameterStore + ?Sized>(
        store: &S,
        amplitude_key: &str,
        frequency_key: &str,
    ) -> Result<Self> {
        let amplitude = validate_required_field(amplitude_key, store.get_real(amplitude_key))?;
        let frequency = validate_required_field(frequency_key, store.get_real(frequency_key))?;
        validate_finite(amplitude_key, amplitude)?;
        validate_finite(frequency_key, frequency)?;
        Ok(Self::new(amplitude, frequency))
    }

    pub fn angular_frequency(&self) -> f64 {
        2.0 * PI * self.frequency
    }

    pub fn velocity(&self, time: f64) -> f64 {
        let omega = self.angular_frequency();
        self.amplitude * omega * (omega * time).sin()
    }

    pub fn displacement(&self, time: f64) -> f64 {
        self.amplitude * (1.0 - (self.angular_frequency() * time).cos())
    }
}

/// Plain sinusoidal vibration (`simple_vibration`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleVibration {
    pub vibration: VibrationTerm,
}

impl SimpleVibration {
    pub fn new(amplitude: f64, frequency: f64) -> Self {
        Self {
            vibration: VibrationTerm::new(amplitude, frequency),
        }
    }

    pub fn from_store<S: ParameterStore + ?Sized>(store: &S) -> Result<Self> {
        let vibration = VibrationTerm::from_store(store, VIBRATION_AMPLITUDE, VIBRATION_FREQUENCY)?;
        tracing::debug!(
            amplitude = vibration.amplitude,
            frequency = vibration.frequency,
            "simple vibration configured"
        );
        Ok(Self { vibration })
    }
}

impl MotionProfile for SimpleVibration {
    fn name(&self) -> &'static str {
        MotionKind::Simple.udf_name()
    }

    fn velocity(&self, time: f64) -> Velocity {
        Velocity::along_z(self.vibration.velocity(time))
    }

    fn displacement(&self, time: f64) -> f64 {
        self.vibration.displacement(time)
    }
}

/// Vibration with a second, independent noise term (`noisy_vibration`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoisyVibration {
    pub vibration: VibrationTerm,
    pub noise: VibrationTerm,
}

impl NoisyVibration {
    pub fn new(vibration: VibrationTerm, noise: VibrationTerm) -> Self {
        Self { vibration, noise }
    }

    pub fn from_store<S: ParameterStore + ?Sized>(store: &S) -> Result<Self> {
        let vibration = VibrationTerm::from_store(store, VIBRATION_AMPLITUDE, VIBRATION_FREQUENCY)?;
        let noise = VibrationTerm::from_store(store, NOISE_AMPLITUDE, NOISE_FREQUENCY)?;
        tracing::debug!(
            amplitude = vibration.amplitude,
            frequency = vibration.frequency,
            noise_amplitude = noise.amplitude,
            noise_frequency = noise.frequency,
            "noisy vibration configured"
        );
        Ok(Self { vibration, noise })
    }
}

impl MotionProfile for NoisyVibration {
    fn name(&self) -> &'static str {
        MotionKind::Noisy.udf_name()
    }

    fn velocity(&self, time: f64) -> Velocity {
        Velocity::along_z(self.vibration.velocity(time) + self.noise.velocity(time))
    }

    fn displacement(&self, time: f64) -> f64 {
        self.vibration.displacement(time) + self.noise.displacement(time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Simple,
    Noisy,
}

impl MotionKind {
    pub fn udf_name(&self) -> &'static str {
        match self {
            MotionKind::Simple => "simple_vibration",
            MotionKind::Noisy => "noisy_vibration",
        }
    }

    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            MotionKind::Simple => &[VIBRATION_AMPLITUDE, VIBRATION_FREQUENCY],
            MotionKind::Noisy => &[
                VIBRATION_AMPLITUDE,
                VIBRATION_FREQUENCY,
                NOISE_AMPLITUDE,
                NOISE_FREQUENCY,
            ],
        }
    }

    pub fn build<S: ParameterStore + ?Sized>(&self, store: &S) -> Result<Box<dyn MotionProfile>> {
        let profile: Box<dyn MotionProfile> = match self {
            MotionKind::Simple => Box::new(SimpleVibration::from_store(store)?),
            MotionKind::Noisy => Box::new(NoisyVibration::from_store(store)?),
        };
        Ok(profile)
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.udf_name())
    }
}

impl FromStr for MotionKind {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        // solver-style "name::library" bindings are accepted as well
        let name = s.trim().split("::").next().unwrap_or_default();
        match name {
            "simple_vibration" | "simple" => Ok(MotionKind::Simple),
            "noisy_vibration" | "noisy" => Ok(MotionKind::Noisy),
            _ => Err(MotionError::InvalidConfigValueError {
                field: "motion.kind".to_string(),
                value: s.to_string(),
                reason: "Unknown motion. Valid motions: simple_vibration, noisy_vibration"
                    .to_string(),
            }),
        }
    }
}

/// Builds the motion from `store` and evaluates it once at `time`.
pub fn evaluate_motion<S: ParameterStore + ?Sized>(
    kind: MotionKind,
    time: f64,
    store: &S,
) -> Result<Velocity> {
    Ok(kind.build(store)?.velocity(time))
}
