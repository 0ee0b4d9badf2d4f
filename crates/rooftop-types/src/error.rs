//! Error types for rooftop solar assessment

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown panel type: {0}")]
    UnknownPanelType(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),

    #[error("Roof analysis failed: {0}")]
    Analysis(String),

    #[error("Analysis confidence {confidence:.2} is below threshold {threshold:.2}")]
    LowConfidence { confidence: f64, threshold: f64 },
}

impl Error {
    /// Shorthand for an invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::Configuration(ConfigError::Invalid(msg.into()))
    }

    /// Failure of the image pipeline or the roof analyzer, as opposed to a
    /// caller or configuration mistake
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Error::Analysis(_)
                | Error::LowConfidence { .. }
                | Error::Image(_)
                | Error::InvalidImageFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
