use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding failed: {0}")]
    ImageError(#[from] image::ImageError),

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

    #[error("Invalid input {value}: {reason}")]
    InvalidInput { value: u64, reason: String },

    #[error("Rendering error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Rendering,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TableError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TableError::ConfigError { .. }
            | TableError::ConfigValidationError { .. }
            | TableError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TableError::InvalidInput { .. } => ErrorCategory::Input,
            TableError::ImageError(_) | TableError::RenderError { .. } => ErrorCategory::Rendering,
            TableError::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TableError::IoError(_) => ErrorSeverity::Critical,
            TableError::ImageError(_) | TableError::RenderError { .. } => ErrorSeverity::High,
            TableError::InvalidInput { .. } => ErrorSeverity::High,
            TableError::ConfigError { .. }
            | TableError::ConfigValidationError { .. }
            | TableError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
        }
    }

    /// Short message suitable for stderr, without internal detail.
    pub fn user_friendly_message(&self) -> String {
        match self {
            TableError::IoError(e) => format!("Could not read or write a file: {}", e),
            TableError::ImageError(e) => format!("Could not encode the table image: {}", e),
            TableError::ConfigError { message } => format!("Configuration problem: {}", message),
            TableError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            TableError::InvalidConfigValueError { field, value, reason } => {
                format!("Setting '{}' has invalid value '{}': {}", field, value, reason)
            }
            TableError::InvalidInput { value, reason } => {
                format!("Cannot process value {}: {}", value, reason)
            }
            TableError::RenderError { message } => format!("Rendering failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check --size/--cell-size and the [table] section of the config file"
            }
            ErrorCategory::Input => "Table indices must be positive integers",
            ErrorCategory::Rendering => "Try a smaller table size or cell size",
            ErrorCategory::Storage => {
                "Make sure the working directory is writable and has free space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_are_critical_storage_failures() {
        let err = TableError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("read-only"));
    }

    #[test]
    fn test_config_errors_are_medium() {
        let err = TableError::InvalidConfigValueError {
            field: "size".to_string(),
            value: "0".to_string(),
            reason: "Value must be between 1 and 1000".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("size"));
    }
}
