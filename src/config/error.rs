//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Session TTL must be between one second and 30 days")]
    InvalidSessionTtl,

    #[error("Resolver threshold '{0}' must be within (0, 1]")]
    ThresholdOutOfRange(&'static str),

    #[error("Possible-match threshold exceeds high-confidence threshold")]
    ThresholdsInverted,
}
