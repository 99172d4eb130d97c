use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Mail transport failed: {0}")]
    MailTransportError(#[from] lettre::transport::smtp::Error),

    #[error("Mail composition failed: {message}")]
    MailComposeError { message: String },

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

    #[error("Missing credential: environment variable {variable} is not set")]
    MissingCredentialsError { variable: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Delivery,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DigestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DigestError::ApiError(_) => ErrorCategory::Network,
            DigestError::IoError(_) => ErrorCategory::Storage,
            DigestError::TemplateError(_) => ErrorCategory::Data,
            DigestError::MailTransportError(_) | DigestError::MailComposeError { .. } => {
                ErrorCategory::Delivery
            }
            DigestError::ConfigError { .. }
            | DigestError::ConfigValidationError { .. }
            | DigestError::InvalidConfigValueError { .. }
            | DigestError::MissingCredentialsError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Transient: the next scheduled run will retry on its own.
            DigestError::ApiError(_) | DigestError::MailTransportError(_) => {
                ErrorSeverity::Medium
            }
            // Nothing to do without a sender; reported, not a failure.
            DigestError::MissingCredentialsError { .. } => ErrorSeverity::Low,
            DigestError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DigestError::ApiError(_) => {
                "Check network connectivity and that the listing endpoint is reachable"
            }
            DigestError::IoError(_) => {
                "Check that the watermark path is writable and the disk is not full"
            }
            DigestError::TemplateError(_) => "Verify the digest template renders with sample data",
            DigestError::MailTransportError(_) => {
                "Check the SMTP host/port and that the sender password is a valid app password"
            }
            DigestError::MailComposeError { .. } => {
                "Check that the sender and recipient addresses are valid mailboxes"
            }
            DigestError::ConfigError { .. }
            | DigestError::ConfigValidationError { .. }
            | DigestError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags"
            }
            DigestError::MissingCredentialsError { .. } => {
                "Export MY_EMAIL and MY_PASSWORD or put them in a .env file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DigestError::ApiError(e) if e.is_timeout() => {
                "The job listing service did not respond in time".to_string()
            }
            DigestError::ApiError(_) => "Could not reach the job listing service".to_string(),
            DigestError::MailTransportError(_) => {
                "The digest email could not be delivered; nothing was marked as sent".to_string()
            }
            DigestError::MissingCredentialsError { variable } => {
                format!("Sender credentials are missing ({} is not set)", variable)
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
