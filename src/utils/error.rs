use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Country not found: {code}")]
    CountryNotFound { code: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrackerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackerError::ApiError(_)
            | TrackerError::HttpStatusError { .. }
            | TrackerError::CountryNotFound { .. } => ErrorCategory::Network,
            TrackerError::ConfigError { .. }
            | TrackerError::ConfigValidationError { .. }
            | TrackerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TrackerError::CsvError(_)
            | TrackerError::SerializationError(_)
            | TrackerError::ProcessingError { .. } => ErrorCategory::Data,
            TrackerError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 查無國家只是使用者輸入問題
            TrackerError::CountryNotFound { .. } => ErrorSeverity::Low,
            TrackerError::ApiError(_) | TrackerError::HttpStatusError { .. } => {
                ErrorSeverity::Medium
            }
            TrackerError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            TrackerError::ApiError(e) => e.is_timeout() || e.is_connect(),
            TrackerError::HttpStatusError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackerError::ApiError(_) => "Could not reach the statistics API".to_string(),
            TrackerError::HttpStatusError { status, .. } => {
                format!("The statistics API answered with status {}", status)
            }
            TrackerError::CountryNotFound { code } => {
                format!("No statistics available for country '{}'", code)
            }
            TrackerError::CsvError(_) | TrackerError::SerializationError(_) => {
                "Failed to encode or decode statistics data".to_string()
            }
            TrackerError::IoError(e) => format!("File system error: {}", e),
            TrackerError::ConfigError { .. }
            | TrackerError::ConfigValidationError { .. }
            | TrackerError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            TrackerError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network if self.is_retryable() => {
                "Check your network connection and try again later"
            }
            ErrorCategory::Network => match self {
                TrackerError::CountryNotFound { .. } => {
                    "Use an ISO2 code such as 'US', or 'worldwide'"
                }
                _ => "Verify --api-base-url points at a disease.sh compatible API",
            },
            ErrorCategory::Configuration => "Fix the flagged option or TOML field and rerun",
            ErrorCategory::Data => "The API payload was unexpected; rerun with --verbose for details",
            ErrorCategory::System => "Check that the export path exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
