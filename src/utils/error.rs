use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration key: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MotionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MotionError::MissingConfigError { .. }
            | MotionError::InvalidConfigValueError { .. }
            | MotionError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            MotionError::IoError(_)
            | MotionError::CsvError(_)
            | MotionError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MotionError::MissingConfigError { .. }
            | MotionError::InvalidConfigValueError { .. }
            | MotionError::ConfigValidationError { .. } => ErrorSeverity::High,
            // output directory may simply not exist yet
            MotionError::IoError(_) => ErrorSeverity::Medium,
            MotionError::CsvError(_) | MotionError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Process exit status for a run that stopped on this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MotionError::MissingConfigError { field } => format!(
                "Add '{}' to the [parameters] table of the run file",
                field
            ),
            MotionError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' in the run file", field)
            }
            MotionError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' section of the run file", field)
            }
            MotionError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            MotionError::CsvError(_) | MotionError::SerializationError(_) => {
                "Re-run with --verbose and report the failing sample".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Output => format!("Could not read or write motion files: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MotionError>;
