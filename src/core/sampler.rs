use crate::core::schedule::TimeSchedule;
use crate::domain::model::MotionSample;
use crate::domain::ports::{MotionProfile, Storage};
use crate::utils::error::{MotionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(MotionError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: s.to_string(),
                reason: "Unsupported format. Valid formats: csv, tsv, json".to_string(),
            }),
        }
    }
}

pub struct MotionSampler<S: Storage> {
    storage: S,
    profile: Box<dyn MotionProfile>,
    schedule: TimeSchedule,
    samples_per_cycle: usize,
}

impl<S: Storage> MotionSampler<S> {
    pub fn new(
        storage: S,
        profile: Box<dyn MotionProfile>,
        schedule: TimeSchedule,
        samples_per_cycle: usize,
    ) -> Self {
        Self {
            storage,
            profile,
            schedule,
            samples_per_cycle,
        }
    }

    pub fn sample(&self) -> Result<Vec<MotionSample>> {
        let times = self.schedule.sample_times(self.samples_per_cycle)?;
        tracing::debug!(
            motion = self.profile.name(),
            samples = times.len(),
            total_time = self.schedule.total_time,
            "sampling motion"
        );

        Ok(times
            .into_iter()
            .map(|t| MotionSample::new(t, self.profile.displacement(t), self.profile.velocity(t)))
            .collect())
    }

    /// Samples the motion and writes one `<filename>.<ext>` per format.
    pub fn run(&self, filename: &str, formats: &[OutputFormat]) -> Result<Vec<String>> {
        tracing::info!("Sampling {} over {} cycles", self.profile.name(), self.schedule.n_cycles);
        let samples = self.sample()?;
        tracing::info!("Computed {} samples", samples.len());

        let mut written = Vec::with_capacity(formats.len());
        for format in formats {
            let data = render(&samples, *format)?;
            let path = self
                .storage
                .write_file(&format!("{}.{}", filename, format.extension()), &data)?;
            tracing::info!("Wrote {} output to {}", format, path);
            written.push(path);
        }

        Ok(written)
    }
}

pub fn render(samples: &[MotionSample], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => render_delimited(samples, b','),
        OutputFormat::Tsv => render_delimited(samples, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(samples)?),
    }
}

fn render_delimited(samples: &[MotionSample], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for sample in samples {
        writer.serialize(sample)?;
    }

    writer
        .into_inner()
        .map_err(|e| MotionError::IoError(e.into_error()))
}
