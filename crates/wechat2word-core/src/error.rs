//! Error types for WeChat2Word.

use thiserror::Error;

/// Result type alias for WeChat2Word operations.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Message shown when the URL input contains no usable article link.
pub const NO_VALID_URLS_MESSAGE: &str =
    "No valid article links: enter at least one WeChat article URL (one per line).";

/// Message shown for any remote failure.
pub const REMOTE_FAILURE_MESSAGE: &str = "Generation failed, please try again later.";

/// Message shown when the service answered with something that is not a script.
pub const INVALID_SCRIPT_MESSAGE: &str = "Failed to generate a valid script. Please try again.";

/// Main error type for the script generator.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// The URL input produced no candidate links.
    #[error("{}", NO_VALID_URLS_MESSAGE)]
    NoValidUrls,

    /// AI provider returned an error.
    #[error("AI provider error: {0}")]
    ProviderError(String),

    /// Network request failed.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The response body did not match the declared schema.
    ///
    /// The payload carries the parser diagnostic; it is logged, not displayed.
    #[error("{}", INVALID_SCRIPT_MESSAGE)]
    InvalidScript(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Prompt template rendering failed.
    #[error("Prompt error: {0}")]
    PromptError(String),

    /// The export target already exists and overwriting is disabled.
    #[error("Refusing to overwrite existing file: {0}")]
    AlreadyExists(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExporterError {
    /// Human-readable text for the error banner.
    ///
    /// Remote failures collapse into a generic retry-later message; the
    /// details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::NetworkError(_) | Self::ProviderError(_) => REMOTE_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_use_generic_message() {
        let err = ExporterError::NetworkError("connection reset".into());
        assert_eq!(err.user_message(), REMOTE_FAILURE_MESSAGE);

        let err = ExporterError::ProviderError("API error 500".into());
        assert_eq!(err.user_message(), REMOTE_FAILURE_MESSAGE);
    }

    #[test]
    fn invalid_script_hides_parser_details() {
        let err = ExporterError::InvalidScript("missing field `code`".into());
        assert_eq!(err.user_message(), INVALID_SCRIPT_MESSAGE);
    }

    #[test]
    fn validation_error_keeps_its_message() {
        let err = ExporterError::NoValidUrls;
        assert_eq!(err.user_message(), NO_VALID_URLS_MESSAGE);
    }
}
