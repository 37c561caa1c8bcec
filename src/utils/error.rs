use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid email '{email}': {reason}")]
    InvalidEmail { email: String, reason: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ResolverError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ResolverError::Http(_) => ErrorCategory::Network,
            ResolverError::CsvError(_)
            | ResolverError::SerializationError(_)
            | ResolverError::ParseError { .. } => ErrorCategory::Parsing,
            ResolverError::ConfigError { .. }
            | ResolverError::ConfigValidationError { .. }
            | ResolverError::InvalidConfigValueError { .. }
            | ResolverError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ResolverError::InvalidEmail { .. } => ErrorCategory::Input,
            ResolverError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Parsing => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 網路或解析類錯誤在 layer 內會被轉成 miss
    pub fn is_parse_failure(&self) -> bool {
        match self {
            ResolverError::Http(e) => e.is_decode(),
            other => other.category() == ErrorCategory::Parsing,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ResolverError::Http(e) if e.is_timeout() => {
                "Increase http.timeout_seconds or check network connectivity"
            }
            ResolverError::Http(_) => "Check network connectivity and endpoint URLs",
            ResolverError::CsvError(_) | ResolverError::SerializationError(_) => {
                "Check the report contents for unexpected characters"
            }
            ResolverError::IoError(_) => "Check that the output directory exists and is writable",
            ResolverError::ConfigError { .. }
            | ResolverError::ConfigValidationError { .. }
            | ResolverError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
            ResolverError::MissingConfigError { .. } => {
                "Add the missing field to the configuration or pass it on the command line"
            }
            ResolverError::InvalidEmail { .. } => {
                "Provide addresses of the form local@domain"
            }
            ResolverError::ParseError { .. } => "The upstream response format may have changed",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ResolverError::Http(_) => "Could not reach an external service".to_string(),
            ResolverError::IoError(e) => format!("File operation failed: {}", e),
            ResolverError::ConfigError { message } => format!("Configuration problem: {}", message),
            ResolverError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            ResolverError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            ResolverError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
