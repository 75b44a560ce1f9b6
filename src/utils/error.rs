use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoyageError {
    #[error("Speed must be strictly less than 100% of light speed (got {value}%)")]
    InvalidSpeed { value: f64 },

    #[error("Travelled years must be greater than 0 (got {value})")]
    InvalidDuration { value: f64 },

    #[error("Narrative request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Narrative service returned status {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Narrative service returned an empty response")]
    EmptyNarrative,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VoyageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSpeed { .. } | Self::InvalidDuration { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ApiError(_) | Self::ServiceError { .. } | Self::EmptyNarrative => {
                ErrorCategory::Network
            }
            Self::SerializationError(_) | Self::ProcessingError { .. } => ErrorCategory::Processing,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Caller-correctable input problems; never transient.
            Self::InvalidSpeed { .. } | Self::InvalidDuration { .. } => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            // The narrative call may succeed on a later attempt.
            Self::ApiError(_) | Self::ServiceError { .. } => ErrorSeverity::Medium,
            // The numeric result is still usable without a narrative.
            Self::EmptyNarrative => ErrorSeverity::Low,
            Self::SerializationError(_) | Self::ProcessingError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidSpeed { .. } => {
                "Use a speed below 100, e.g. 99.999 for extreme dilation effects"
            }
            Self::InvalidDuration { .. } => "Use a travel time greater than 0 years",
            Self::ApiError(_) => "Check that the narrative service endpoint is reachable",
            Self::ServiceError { .. } => "Check the narrative service logs and the model name",
            Self::EmptyNarrative => "Retry, or run with --offline to skip the narrative",
            Self::SerializationError(_) => "Check the narrative service response format",
            Self::IoError(_) => "Check file permissions and available disk space",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration value and run again",
            Self::ProcessingError { .. } => "Check the input values for extreme magnitudes",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidSpeed { value } => {
                format!("Speed must be less than 100% of c (you entered {}%)", value)
            }
            Self::InvalidDuration { value } => format!(
                "Travel time must be greater than 0 years (you entered {})",
                value
            ),
            Self::ApiError(_) | Self::ServiceError { .. } | Self::EmptyNarrative => {
                "Could not fetch a future-Earth description; the calculation itself is unaffected"
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VoyageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_distinguishable() {
        let speed = VoyageError::InvalidSpeed { value: 120.0 };
        let duration = VoyageError::InvalidDuration { value: 0.0 };

        assert_eq!(speed.category(), ErrorCategory::Input);
        assert_eq!(duration.category(), ErrorCategory::Input);
        assert!(speed.to_string().contains("less than 100%"));
        assert!(duration.to_string().contains("greater than 0"));
    }

    #[test]
    fn test_empty_narrative_is_low_severity() {
        assert_eq!(VoyageError::EmptyNarrative.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_network_errors_are_medium_severity() {
        let err = VoyageError::ServiceError {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.category(), ErrorCategory::Network);
    }
}
