use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Oracle error: {message}")]
    OracleError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ExtractError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "The extraction API could not be reached.".to_string(),
            Self::IoError(e) => format!("A file could not be read or written: {}", e),
            Self::SerializationError(_) => "An input or output file is not valid JSON.".to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::OracleError { message } => format!("Extraction failed: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("The value for '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => {
                "Check network connectivity and the API endpoint, or rerun with --mock"
            }
            Self::IoError(_) => "Check that the input files exist and the output path is writable",
            Self::SerializationError(_) => "Inspect the file contents for malformed JSON",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Run with --help to see the expected settings"
            }
            Self::OracleError { .. } => "Retry, or rerun with --mock to use the offline oracle",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
