use crate::config::parameters::InMemoryParameters;
use crate::core::motion::{MotionKind, VIBRATION_FREQUENCY};
use crate::core::sampler::OutputFormat;
use crate::core::schedule::{TimeSchedule, DEFAULT_SAMPLES_PER_CYCLE};
use crate::domain::ports::{MotionProfile, ParameterStore};
use crate::utils::error::{MotionError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive, validate_positive_number,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub motion: MotionConfig,
    pub parameters: InMemoryParameters,
    pub schedule: ScheduleConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    pub kind: String,
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub n_cycles: f64,
    pub samples_per_cycle: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MotionError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MotionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${VIBRATION_FREQUENCY})
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn motion_kind(&self) -> Result<MotionKind> {
        self.motion.kind.parse()
    }

    pub fn zone(&self) -> &str {
        self.motion.zone.as_deref().unwrap_or("unnamed")
    }

    pub fn samples_per_cycle(&self) -> usize {
        self.schedule
            .samples_per_cycle
            .unwrap_or(DEFAULT_SAMPLES_PER_CYCLE)
    }

    pub fn filename(&self) -> &str {
        self.output.filename.as_deref().unwrap_or("motion")
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn output_formats(&self) -> Result<Vec<OutputFormat>> {
        self.output.formats.iter().map(|f| f.parse()).collect()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn build_motion(&self) -> Result<Box<dyn MotionProfile>> {
        self.motion_kind()?.build(&self.parameters)
    }

    /// Time schedule driven by the main vibration frequency.
    pub fn time_schedule(&self) -> Result<TimeSchedule> {
        let frequency = self
            .parameters
            .get_real(VIBRATION_FREQUENCY)
            .ok_or_else(|| MotionError::MissingConfigError {
                field: VIBRATION_FREQUENCY.to_string(),
            })?;
        TimeSchedule::new(frequency, self.schedule.n_cycles)
    }

    /// Schedule for a sampled run. Unlike a single evaluation this needs a
    /// positive frequency and a bounded number of samples.
    pub fn sampling_schedule(&self) -> Result<TimeSchedule> {
        let schedule = self.time_schedule()?;
        schedule.check_sample_count(self.samples_per_cycle())?;
        Ok(schedule)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let kind = self.motion_kind()?;
        if let Some(zone) = &self.motion.zone {
            validate_non_empty_string("motion.zone", zone)?;
        }

        for key in kind.required_keys() {
            if self.parameters.get_real(key).is_none() {
                return Err(MotionError::MissingConfigError {
                    field: key.to_string(),
                });
            }
        }
        kind.build(&self.parameters)?;

        validate_positive("schedule.n_cycles", self.schedule.n_cycles)?;
        validate_positive_number("schedule.samples_per_cycle", self.samples_per_cycle(), 1)?;

        validate_path("output.path", &self.output.path)?;
        validate_non_empty_string("output.filename", self.filename())?;
        if self.output.formats.is_empty() {
            return Err(MotionError::ConfigValidationError {
                field: "output.formats".to_string(),
                message: "At least one output format is required".to_string(),
            });
        }
        self.output_formats()?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const NOISY_CONFIG: &str = r#"
[motion]
kind = "noisy_vibration"
zone = "solid_coupling"

[parameters]
vibration_amplitude = 1e-6
vibration_frequency = 1.63e6
"user/noise_amplitude" = 1e-7
noise_frequency = 1.63e7

[schedule]
n_cycles = 50

[output]
path = "./output"
formats = ["csv", "json"]
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(NOISY_CONFIG).unwrap();

        assert_eq!(config.motion_kind().unwrap(), MotionKind::Noisy);
        assert_eq!(config.zone(), "solid_coupling");
        assert_eq!(config.parameters.get_real("noise_amplitude"), Some(1e-7));
        assert_eq!(config.samples_per_cycle(), DEFAULT_SAMPLES_PER_CYCLE);
        assert_eq!(config.filename(), "motion");
        assert_eq!(
            config.output_formats().unwrap(),
            vec![OutputFormat::Csv, OutputFormat::Json]
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.build_motion().unwrap().name(), "noisy_vibration");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MESH_VIBRATION_TEST_FREQUENCY", "250.0");

        let toml_content = r#"
[motion]
kind = "simple_vibration"

[parameters]
vibration_amplitude = 0.001
vibration_frequency = ${MESH_VIBRATION_TEST_FREQUENCY}

[schedule]
n_cycles = 2

[output]
path = "${MESH_VIBRATION_UNSET_DIR}"
formats = ["tsv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.parameters.get_real("vibration_frequency"), Some(250.0));
        assert_eq!(config.output_path(), "${MESH_VIBRATION_UNSET_DIR}");

        std::env::remove_var("MESH_VIBRATION_TEST_FREQUENCY");
    }

    #[test]
    fn test_missing_noise_key_fails_validation() {
        let toml_content = NOISY_CONFIG.replace("noise_frequency = 1.63e7\n", "");
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();

        match config.validate() {
            Err(MotionError::MissingConfigError { field }) => assert_eq!(field, "noise_frequency"),
            other => panic!("expected missing key, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let bad_kind = NOISY_CONFIG.replace("noisy_vibration", "spring");
        assert!(TomlConfig::from_toml_str(&bad_kind).unwrap().validate().is_err());

        let bad_format = NOISY_CONFIG.replace("\"json\"", "\"xlsx\"");
        assert!(TomlConfig::from_toml_str(&bad_format).unwrap().validate().is_err());

        let no_cycles = NOISY_CONFIG.replace("n_cycles = 50", "n_cycles = 0");
        assert!(TomlConfig::from_toml_str(&no_cycles).unwrap().validate().is_err());

    }

    #[test]
    fn test_zero_frequency_evaluates_but_cannot_be_sampled() {
        let still = NOISY_CONFIG
            .replace("vibration_frequency = 1.63e6", "vibration_frequency = 0.0")
            .replace("noise_frequency = 1.63e7", "noise_frequency = 0.0");
        let config = TomlConfig::from_toml_str(&still).unwrap();

        assert!(config.validate().is_ok());
        let velocity = config.build_motion().unwrap().velocity(0.1);
        assert_eq!(velocity.z(), 0.0);
        assert!(config.sampling_schedule().is_err());

        let reversed = NOISY_CONFIG.replace("vibration_frequency = 1.63e6", "vibration_frequency = -50.0");
        assert!(TomlConfig::from_toml_str(&reversed).unwrap().validate().is_ok());
    }

    #[test]
    fn test_oversized_run_fails_sampling_schedule() {
        let huge = NOISY_CONFIG.replace("n_cycles = 50", "n_cycles = 1e15");
        let config = TomlConfig::from_toml_str(&huge).unwrap();

        assert!(config.validate().is_ok());
        assert!(matches!(
            config.sampling_schedule(),
            Err(MotionError::InvalidConfigValueError { .. })
        ));
        assert!(TomlConfig::from_toml_str(NOISY_CONFIG)
            .unwrap()
            .sampling_schedule()
            .is_ok());
    }

    #[test]
    fn test_both_spellings_of_a_parameter_rejected() {
        let twice = NOISY_CONFIG.replace(
            "vibration_amplitude = 1e-6\n",
            "vibration_amplitude = 1e-6\n\"user/vibration_amplitude\" = 2e-6\n",
        );

        match TomlConfig::from_toml_str(&twice) {
            Err(MotionError::ConfigValidationError { message, .. }) => {
                assert!(message.contains("vibration_amplitude"), "{}", message)
            }
            other => panic!("expected duplicate parameter error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_toml() {
        match TomlConfig::from_toml_str("[motion\nkind = ") {
            Err(MotionError::ConfigValidationError { field, .. }) => assert_eq!(field, "toml_parsing"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(NOISY_CONFIG.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.motion.kind, "noisy_vibration");
        let schedule = config.time_schedule().unwrap();
        assert!((schedule.total_time - 50.0 / 1.63e6).abs() < 1e-15);
    }
}
