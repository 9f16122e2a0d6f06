use crate::utils::error::{MotionError, Result};
use crate::utils::validation::{validate_positive, validate_positive_number};
use serde::Serialize;

pub const DEFAULT_SAMPLES_PER_CYCLE: usize = 50;
pub const MAX_SAMPLES: usize = 10_000_000;

/// Transient time-stepping controls for a vibration run, all derived from
/// the vibration frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSchedule {
    pub frequency: f64,
    pub n_cycles: f64,
    pub total_time: f64,
    pub min_step: f64,
    pub max_step: f64,
    pub initial_step: f64,
    pub save_interval: f64,
}

impl TimeSchedule {
    pub fn new(frequency: f64, n_cycles: f64) -> Result<Self> {
        validate_positive("parameters.vibration_frequency", frequency)?;
        validate_positive("schedule.n_cycles", n_cycles)?;

        Ok(Self {
            frequency,
            n_cycles,
            total_time: n_cycles / frequency,
            min_step: 1.0 / (1000.0 * frequency),
            max_step: 1.0 / (50.0 * frequency),
            initial_step: 1.0 / (50.0 * frequency),
            save_interval: 1.0 / (10.0 * frequency),
        })
    }

    pub fn period(&self) -> f64 {
        1.0 / self.frequency
    }

    /// Number of grid steps before the final sample, bounded by [`MAX_SAMPLES`].
    pub fn check_sample_count(&self, samples_per_cycle: usize) -> Result<usize> {
        validate_positive_number("schedule.samples_per_cycle", samples_per_cycle, 1)?;

        let steps = (self.n_cycles * samples_per_cycle as f64).ceil();
        if steps >= MAX_SAMPLES as f64 {
            return Err(MotionError::InvalidConfigValueError {
                field: "schedule.n_cycles".to_string(),
                value: self.n_cycles.to_string(),
                reason: format!(
                    "{} cycles at {} samples per cycle exceeds {} samples",
                    self.n_cycles, samples_per_cycle, MAX_SAMPLES
                ),
            });
        }
        Ok(steps as usize)
    }

    /// Evenly spaced times from zero to `total_time` inclusive.
    pub fn sample_times(&self, samples_per_cycle: usize) -> Result<Vec<f64>> {
        let steps = self.check_sample_count(samples_per_cycle)?;
        let dt = 1.0 / (samples_per_cycle as f64 * self.frequency);

        // n_cycles * samples_per_cycle may round up past the end
        let mut times: Vec<f64> = (0..steps)
            .map(|i| i as f64 * dt)
            .filter(|t| self.total_time - t > dt * 1e-6)
            .collect();
        times.push(self.total_time);
        Ok(times)
    }
}
